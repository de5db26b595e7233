//! Sandbox configuration.
use std::env;
use std::path::PathBuf;

/// Timeline playback settings.
#[derive(Clone, Debug)]
pub struct SandboxConfig {
    /// Seconds advanced per tick.
    pub step: f32,
    /// Total simulated seconds.
    pub duration: f32,
    /// Directory with `abilities.ron`, `effects.ron` and `attributes.ron`.
    /// The embedded catalogs are used when unset.
    pub content_dir: Option<PathBuf>,
}

impl SandboxConfig {
    /// Construct sandbox configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SANDBOX_STEP` - Tick length in seconds (default: 0.25, min: 0.01)
    /// - `SANDBOX_DURATION` - Simulated seconds (default: 12.0)
    /// - `SANDBOX_CONTENT` - Content data directory (default: embedded)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(step) = read_env::<f32>("SANDBOX_STEP") {
            config.step = step.max(0.01);
        }
        if let Some(duration) = read_env::<f32>("SANDBOX_DURATION") {
            config.duration = duration.max(0.0);
        }
        if let Ok(dir) = env::var("SANDBOX_CONTENT") {
            config.content_dir = Some(PathBuf::from(dir));
        }

        config
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            step: 0.25,
            duration: 12.0,
            content_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
