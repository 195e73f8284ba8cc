use std::time::Duration;
use crate::config::PacingConfig;

/// Cosmetic delays between progress events. Tests construct it disabled.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    enabled: bool,
    scale: f64,
}

impl Pacing {
    pub fn new(enabled: bool, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale >= 0.0 { scale } else { 1.0 };
        Self { enabled, scale }
    }

    pub fn disabled() -> Self {
        Self { enabled: false, scale: 0.0 }
    }

    pub fn from_config(config: &PacingConfig) -> Self {
        Self::new(config.enabled, config.scale)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn duration(&self, ms: u64) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        Duration::from_millis((ms as f64 * self.scale).round() as u64)
    }

    pub async fn pause(&self, ms: u64) {
        let delay = self.duration(ms);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(true, 1.0)
    }
}
