//! Built-in easing functions
//!
//! Every easing maps a clamped progress value in [0, 1] to an eased value
//! with f(0) = 0 and f(1) = 1. Custom easings can be registered on the
//! EasingRegistry under any name.

/// Iterations used to invert the bezier x polynomial
const BEZIER_ITERATIONS: usize = 32;
/// Accepted error when solving for the bezier parameter
const BEZIER_EPSILON: f64 = 1e-6;

/// Trait for easing functions
pub trait Easing: Send + Sync {
    /// Get the name of this easing function
    fn name(&self) -> &str;

    /// Map progress in [0, 1] to an eased value
    fn ease(&self, t: f64) -> f64;
}

/// Linear easing (identity)
#[derive(Debug, Clone)]
pub struct LinearEasing;

impl Easing for LinearEasing {
    fn name(&self) -> &str {
        "linear"
    }

    #[inline]
    fn ease(&self, t: f64) -> f64 {
        t
    }
}

/// Quartic ease-out: fast start, long settle.
/// This is the curve counter animations use.
#[derive(Debug, Clone)]
pub struct EaseOutQuarticEasing;

impl Easing for EaseOutQuarticEasing {
    fn name(&self) -> &str {
        "ease-out-quartic"
    }

    #[inline]
    fn ease(&self, t: f64) -> f64 {
        1.0 - (t - 1.0).powi(4)
    }
}

/// Quadratic ease-in
#[derive(Debug, Clone)]
pub struct EaseInQuadEasing;

impl Easing for EaseInQuadEasing {
    fn name(&self) -> &str {
        "ease-in-quad"
    }

    #[inline]
    fn ease(&self, t: f64) -> f64 {
        t * t
    }
}

/// Quadratic ease-out
#[derive(Debug, Clone)]
pub struct EaseOutQuadEasing;

impl Easing for EaseOutQuadEasing {
    fn name(&self) -> &str {
        "ease-out-quad"
    }

    #[inline]
    fn ease(&self, t: f64) -> f64 {
        t * (2.0 - t)
    }
}

/// Quadratic ease-in-out
#[derive(Debug, Clone)]
pub struct EaseInOutQuadEasing;

impl Easing for EaseInOutQuadEasing {
    fn name(&self) -> &str {
        "ease-in-out-quad"
    }

    #[inline]
    fn ease(&self, t: f64) -> f64 {
        if t < 0.5 {
            2.0 * t * t
        } else {
            -1.0 + (4.0 - 2.0 * t) * t
        }
    }
}

/// Cubic bezier easing with endpoints pinned to (0,0) and (1,1)
///
/// The curve is parameterized by its two control points, CSS style. The
/// x polynomial is inverted by binary search to within BEZIER_EPSILON.
#[derive(Debug, Clone)]
pub struct CubicBezierEasing {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezierEasing {
    /// Create a bezier easing. Control point x coordinates are clamped
    /// into [0, 1] so the curve stays a function of progress.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// The standard deceleration curve, cubic-bezier(0.4, 0, 0.2, 1)
    pub fn standard() -> Self {
        Self::new(0.4, 0.0, 0.2, 1.0)
    }

    /// Evaluate one cubic bezier component with endpoints 0 and 1
    #[inline]
    fn component(p1: f64, p2: f64, t: f64) -> f64 {
        let inv = 1.0 - t;
        3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t
    }

    /// Solve for the curve parameter whose x component equals `x`
    fn solve_parameter(&self, x: f64) -> f64 {
        let mut lo = 0.0;
        let mut hi = 1.0;
        let mut t = x;

        for _ in 0..BEZIER_ITERATIONS {
            let current = Self::component(self.x1, self.x2, t);
            if (current - x).abs() < BEZIER_EPSILON {
                break;
            }
            if current < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }

        t
    }
}

impl Default for CubicBezierEasing {
    fn default() -> Self {
        Self::standard()
    }
}

impl Easing for CubicBezierEasing {
    fn name(&self) -> &str {
        "cubic-bezier"
    }

    fn ease(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let parameter = self.solve_parameter(t);
        Self::component(self.y1, self.y2, parameter)
    }
}
