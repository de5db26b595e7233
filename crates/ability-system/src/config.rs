/// Director configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DirectorConfig {
    /// Remaining time on an effect's trigger schedule at or below which the
    /// trigger fires one last time during removal.
    pub trigger_tolerance: f32,

    /// Upper bound on timer callbacks dispatched by a single `advance` call.
    /// Protects against repeating timers with degenerate intervals.
    pub max_dispatches_per_advance: usize,
}

impl DirectorConfig {
    // ===== limits mirrored from the effect editor =====
    /// Shortest allowed duration for a timed effect.
    pub const MIN_EFFECT_DURATION: f32 = 0.02;
    /// Shortest allowed trigger interval for a timed effect.
    pub const MIN_TRIGGER_INTERVAL: f32 = 0.01;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TRIGGER_TOLERANCE: f32 = 1.0e-4;
    pub const DEFAULT_MAX_DISPATCHES_PER_ADVANCE: usize = 4096;

    pub fn new() -> Self {
        Self {
            trigger_tolerance: Self::DEFAULT_TRIGGER_TOLERANCE,
            max_dispatches_per_advance: Self::DEFAULT_MAX_DISPATCHES_PER_ADVANCE,
        }
    }

    pub fn with_trigger_tolerance(mut self, tolerance: f32) -> Self {
        self.trigger_tolerance = tolerance.abs();
        self
    }

    pub fn with_max_dispatches_per_advance(mut self, limit: usize) -> Self {
        self.max_dispatches_per_advance = limit.max(1);
        self
    }

    /// Returns true if `remaining` counts as "due now".
    pub fn is_nearly_zero(&self, remaining: f32) -> bool {
        remaining.abs() <= self.trigger_tolerance
    }
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self::new()
    }
}
