//! TapCard Plus waitlist site
//!
//! Core modules:
//! - `anim`: Pure animation logic (tilt springs, ripple field)
//! - `form`: Waitlist form model and submission payload
//! - `net`: Outbound form submission (browser fetch)
//! - `page`: Routes and per-route section visibility

pub mod anim;
pub mod form;
pub mod net;
pub mod page;

pub use form::{FormModel, SubmitError, SubmitStatus, WaitlistEntry};
pub use page::Route;

/// Site configuration constants
pub mod consts {
    /// Form collection endpoint (Formspree)
    pub const WAITLIST_ENDPOINT: &str = "https://formspree.io/f/xkgzkjor";
    /// Campaign tag sent with every submission
    pub const SOURCE_TAG: &str = "tapcardplus_waitlist";
    /// Delay before redirecting to the confirmation page after success (ms)
    pub const REDIRECT_DELAY_MS: i32 = 1200;

    /// Tilt extremes at the card edges (degrees)
    pub const TILT_MAX_X_DEG: f32 = 14.0;
    pub const TILT_MAX_Y_DEG: f32 = 18.0;
    /// Scroll drift repeats every this many scrolled pixels
    pub const DRIFT_PERIOD_PX: f32 = 200.0;
    /// Scroll pixels per drift pixel
    pub const DRIFT_SCALE: f32 = 10.0;
    /// Spring constants for the card transform (stiffness, damping)
    pub const TILT_STIFFNESS: f32 = 140.0;
    pub const TILT_DAMPING: f32 = 14.0;
    /// Perspective distance for the 3D card transform (px)
    pub const TILT_PERSPECTIVE_PX: f32 = 1200.0;

    /// Number of ripples scheduled on the confirmation page
    pub const RIPPLE_COUNT: usize = 6;
    /// Stagger between scheduled ripple spawns (seconds)
    pub const RIPPLE_SPAWN_INTERVAL: f32 = 0.4;
    /// Opacity a ripple starts at
    pub const RIPPLE_START_ALPHA: f32 = 0.3;
    /// Radius growth rate (px/s, 1.5 px per 60 Hz frame)
    pub const RIPPLE_GROWTH_RATE: f32 = 90.0;
    /// Opacity decay rate (1/s, 0.002 per 60 Hz frame)
    pub const RIPPLE_FADE_RATE: f32 = 0.12;
    /// Stroke width for ripple circles (px)
    pub const RIPPLE_LINE_WIDTH: f64 = 2.0;
    /// Brand purple used for ripple strokes
    pub const RIPPLE_RGB: (u8, u8, u8) = (110, 53, 233);

    /// Largest frame delta fed to the animators (stalls clamp here)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Clamp a value to [0, 1]
#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Positive remainder, so negative scroll positions still wrap forward
#[inline]
pub fn wrap_positive(v: f32, period: f32) -> f32 {
    v.rem_euclid(period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_positive() {
        assert_eq!(wrap_positive(250.0, 200.0), 50.0);
        assert_eq!(wrap_positive(-50.0, 200.0), 150.0);
        assert_eq!(wrap_positive(0.0, 200.0), 0.0);
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
    }
}
