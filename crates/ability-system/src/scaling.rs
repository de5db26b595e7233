//! Level scaling for ability costs and effect magnitudes.

/// How a base value grows with level.
///
/// # Formula
/// ```text
/// Linear: base + per_level × (level − 1)
/// Curve:  base × curve(level)
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelScaling {
    Linear { per_level: f32 },
    Curve(ScalingCurve),
}

impl LevelScaling {
    /// No growth: the base value at every level.
    pub const FLAT: Self = Self::Linear { per_level: 0.0 };

    pub fn scale(&self, base: f32, level: u32) -> f32 {
        match self {
            Self::Linear { per_level } => {
                base + per_level * (level.max(1) - 1) as f32
            }
            Self::Curve(curve) => base * curve.evaluate(level as f32),
        }
    }
}

impl Default for LevelScaling {
    fn default() -> Self {
        Self::FLAT
    }
}

/// Piecewise-linear curve over `(level, value)` keys.
///
/// Keys are kept sorted by level. Evaluation clamps to the first and last
/// key outside the covered range; an empty curve evaluates to `1.0`.
///
/// # Example
/// ```
/// # use ability_system::ScalingCurve;
/// let curve = ScalingCurve::new([(1.0, 1.0), (5.0, 3.0)]);
/// assert_eq!(curve.evaluate(3.0), 2.0);
/// assert_eq!(curve.evaluate(9.0), 3.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalingCurve {
    keys: Vec<(f32, f32)>,
}

impl ScalingCurve {
    pub fn new(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut keys: Vec<(f32, f32)> = keys.into_iter().collect();
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    pub fn keys(&self) -> &[(f32, f32)] {
        &self.keys
    }

    pub fn evaluate(&self, at: f32) -> f32 {
        let (Some(&first), Some(&last)) = (self.keys.first(), self.keys.last()) else {
            return 1.0;
        };
        if at <= first.0 {
            return first.1;
        }
        if at >= last.0 {
            return last.1;
        }

        self.keys
            .windows(2)
            .find(|pair| at <= pair[1].0)
            .map(|pair| {
                let (x0, y0) = pair[0];
                let (x1, y1) = pair[1];
                let span = x1 - x0;
                if span <= f32::EPSILON {
                    y1
                } else {
                    y0 + (y1 - y0) * (at - x0) / span
                }
            })
            .unwrap_or(last.1)
    }
}
