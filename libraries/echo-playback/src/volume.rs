//! Volume control with mute memory
//!
//! Volume is a linear 0.0-1.0 level handed straight to the media element.
//! Muting is expressed as level 0; the level in effect before muting is
//! remembered so unmuting restores it exactly.

/// Level restored when unmuting without a remembered level
const DEFAULT_RESTORE_LEVEL: f64 = 1.0;

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Current level (0.0-1.0)
    level: f64,

    /// Level saved by the last mute (0.0-1.0)
    muted_previous: f64,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (clamped to 0.0-1.0; NaN falls back to 1.0)
    pub fn new(level: f64) -> Self {
        let level = if level.is_nan() {
            DEFAULT_RESTORE_LEVEL
        } else {
            level.clamp(0.0, 1.0)
        };

        Self {
            level,
            muted_previous: DEFAULT_RESTORE_LEVEL,
        }
    }

    /// Set volume level (clamped to 0.0-1.0)
    ///
    /// Returns `false` and leaves the level untouched for NaN input.
    pub fn set_level(&mut self, level: f64) -> bool {
        if level.is_nan() {
            return false;
        }
        self.level = level.clamp(0.0, 1.0);
        true
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Level that the next unmute restores
    pub fn muted_previous(&self) -> f64 {
        self.muted_previous
    }

    /// Toggle mute state
    ///
    /// Audible: remember the level and drop to 0. Silent: restore the
    /// remembered level.
    pub fn toggle_mute(&mut self) {
        if self.level > 0.0 {
            self.muted_previous = self.level;
            self.level = 0.0;
        } else {
            self.level = self.muted_previous;
        }
    }

    /// Check if muted (level is zero)
    pub fn is_muted(&self) -> bool {
        self.level <= 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_RESTORE_LEVEL)
    }
}
