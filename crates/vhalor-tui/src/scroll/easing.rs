pub use vhalor_core::EasingType;

pub trait EasingTypeExt {
    /// Map progress `t` in [0, 1] to eased progress in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::EaseInOut => cubic_ease_in_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
        }
    }
}

/// f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Slow at both ends, like a browser's smooth scroll-into-view
#[inline]
fn cubic_ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

/// f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingType; 4] = [
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::EaseInOut,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_easing_endpoints() {
        for easing in CURVES {
            assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
        assert_eq!(EasingType::None.apply(0.99), 0.0);
        assert_eq!(EasingType::None.apply(1.0), 1.0);
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in CURVES {
            let mut prev = 0.0;
            for i in 0..=20 {
                let v = easing.apply(i as f64 / 20.0);
                assert!(v >= prev, "{:?} not monotonic", easing);
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_in_out_symmetric() {
        let e = EasingType::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-9);
    }
}
