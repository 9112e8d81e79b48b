//! Hardware abstraction traits
//!
//! These traits define the interface between the motion logic and the
//! hardware it drives. The controller never touches a pin or a timer
//! directly; it is handed a [`CoilDriver`] and a [`Clock`] at construction.

pub mod clock;
pub mod coils;

pub use clock::{Clock, ManualClock};
pub use coils::{Coil, CoilDriver, Level};
