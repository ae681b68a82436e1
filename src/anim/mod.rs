//! Pure animation module
//!
//! All decorative motion logic lives here. This module must be pure and
//! deterministic:
//! - dt-based integration only (no wall-clock reads)
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The DOM layer in `main.rs` samples these types once per animation frame
//! and applies the results to elements/canvas.

pub mod ripple;
pub mod spring;
pub mod tilt;

pub use ripple::{Ripple, RippleField};
pub use spring::Spring;
pub use tilt::TiltState;
