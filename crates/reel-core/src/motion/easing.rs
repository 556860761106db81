use serde_with::DeserializeFromStr;
use strum::{Display, EnumIter, EnumString};

#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    (end - start).mul_add(t, start)
}

#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t1 = t - 1.0;
    (t1 * t1).mul_add(t1, 1.0)
}

#[inline]
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let t1 = (-2.0f64).mul_add(t, 2.0);
        1.0 - t1 * t1 / 2.0
    }
}

/// CSS-style cubic bezier with fixed end points at (0, 0) and (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// Fast start, long soft landing. Used for card movement.
    pub const SNAP: Self = Self::new(0.22, 1.0, 0.36, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f64, a2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    fn slope(a1: f64, a2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    }

    /// Solves the curve parameter for `x` then returns the matching `y`.
    pub fn apply(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let mut s = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, s) - x;
            if err.abs() < 1e-7 {
                break;
            }
            let d = Self::slope(self.x1, self.x2, s);
            if d.abs() < 1e-6 {
                break;
            }
            s -= err / d;
        }

        // newton can wander off on flat segments
        if !(0.0..=1.0).contains(&s) || (Self::sample(self.x1, self.x2, s) - x).abs() > 1e-5 {
            let (mut lo, mut hi) = (0.0, 1.0);
            s = x;
            for _ in 0..48 {
                let v = Self::sample(self.x1, self.x2, s);
                if (v - x).abs() < 1e-7 {
                    break;
                }
                if v < x {
                    lo = s;
                } else {
                    hi = s;
                }
                s = (lo + hi) / 2.0;
            }
        }

        Self::sample(self.y1, self.y2, s)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, EnumIter, Display, DeserializeFromStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseOut,
    EaseInOut,
    #[default]
    Snap,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => ease_out_cubic(t),
            Self::EaseInOut => ease_in_out_quad(t),
            Self::Snap => CubicBezier::SNAP.apply(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < f64::EPSILON);
        assert!((lerp(50.0, 150.0, 0.25) - 75.0).abs() < f64::EPSILON);
        assert!((lerp(-10.0, 10.0, 1.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_curves_hit_end_points() {
        for easing in Easing::iter() {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing} at 1");
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for easing in Easing::iter() {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f64 / 100.0);
                assert!(v + 1e-9 >= prev, "{easing} dipped at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < f64::EPSILON);
        assert!((ease_in_out_quad(0.25) + ease_in_out_quad(0.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_snap_front_loads_motion() {
        // most of the distance is covered in the first third
        assert!(Easing::Snap.apply(0.3) > 0.7);
        assert!(Easing::Snap.apply(0.3) > Easing::EaseOut.apply(0.3) - 0.1);
    }

    #[test]
    fn test_bezier_linear_control_points() {
        let linear = CubicBezier::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for i in 0..=10 {
            let x = i as f64 / 10.0;
            assert!((linear.apply(x) - x).abs() < 1e-4);
        }
    }

    #[test]
    fn test_easing_from_str() {
        let cases = vec![
            ("\"snap\"", Easing::Snap),
            ("\"ease-out\"", Easing::EaseOut),
            ("\"EASE-IN-OUT\"", Easing::EaseInOut),
            ("\"linear\"", Easing::Linear),
        ];

        for (json, expected) in cases {
            let parsed: Easing = serde_json::from_str(json).unwrap();
            assert_eq!(parsed, expected);
        }
        assert!(serde_json::from_str::<Easing>("\"bounce\"").is_err());
    }
}
