//! Page flow around the show
//!
//! The PIN page, the three routes, the timed reveal on the fireworks page and
//! the memory cards on the wishes page. All of it is plain state; the browser
//! layer only renders it.

pub mod memories;
pub mod pin;
pub mod route;
pub mod sequence;

pub use memories::{Memory, default_memories};
pub use pin::{PinError, PinForm, PinGate, PinStage};
pub use route::Route;
pub use sequence::{RevealEvent, RevealSequence};
