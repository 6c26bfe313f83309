//! Game tunables and the startup checks that make goal placement safe.

use crate::Color;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("distance range is empty: min {min} > max {max}")]
    EmptyDistanceRange { min: f32, max: f32 },

    #[error("distance_min must not be negative, got {0}")]
    NegativeDistance(f32),

    #[error(
        "distance_max + player_radius + goal_radius = {reach} exceeds half the shorter screen side ({limit})"
    )]
    ReachTooLarge { reach: f32, limit: f32 },

    #[error(
        "a mirrored goal may leave the screen: distance_max + player_radius + 2 * goal_radius = {reach} exceeds {limit}"
    )]
    MirrorOffScreen { reach: f32, limit: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub player_radius: f32,
    pub player_color: Color,
    pub goal_radius: f32,
    pub goal_color: Color,
    pub screen_width: f32,
    pub screen_height: f32,
    pub distance_min: f32,
    pub distance_max: f32,
    /// Movement integration rate.
    pub physics_hz: u32,
    /// Rate at which the server drains incoming commands.
    pub command_hz: u32,
    /// Rate at which the client polls the keyboard.
    pub input_hz: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_radius: 20.0,
            player_color: Color::BLUE,
            goal_radius: 30.0,
            goal_color: Color::GREEN,
            screen_width: 640.0,
            screen_height: 480.0,
            distance_min: 50.0,
            distance_max: 150.0,
            physics_hz: 60,
            command_hz: 120,
            input_hz: 120,
        }
    }
}

impl Settings {
    /// Checks the relationships between radii, distances and screen size.
    ///
    /// Run once at startup, before any socket is opened. A failure here is a
    /// fatal precondition for both binaries.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positives = [
            ("player_radius", self.player_radius),
            ("goal_radius", self.goal_radius),
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("physics_hz", self.physics_hz as f32),
            ("command_hz", self.command_hz as f32),
            ("input_hz", self.input_hz as f32),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(SettingsError::NotPositive { name, value });
            }
        }

        if self.distance_min < 0.0 {
            return Err(SettingsError::NegativeDistance(self.distance_min));
        }
        if self.distance_min > self.distance_max {
            return Err(SettingsError::EmptyDistanceRange {
                min: self.distance_min,
                max: self.distance_max,
            });
        }

        let limit = self.screen_width.min(self.screen_height) / 2.0;

        let reach = self.distance_max + self.player_radius + self.goal_radius;
        if reach > limit {
            return Err(SettingsError::ReachTooLarge { reach, limit });
        }

        // Mirroring an axis fails only if the offset on that axis exceeds
        // limit - goal_radius, so the full reach plus one more goal radius
        // has to fit.
        let mirrored_reach = reach + self.goal_radius;
        if mirrored_reach > limit {
            return Err(SettingsError::MirrorOffScreen {
                reach: mirrored_reach,
                limit,
            });
        }

        Ok(())
    }

    pub fn physics_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.physics_hz as f64)
    }

    pub fn command_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.command_hz as f64)
    }

    pub fn input_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.input_hz as f64)
    }

    /// Applies optional screen size overrides from the command line.
    pub fn with_screen(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        if let Some(width) = width {
            self.screen_width = width;
        }
        if let Some(height) = height {
            self.screen_height = height;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_intervals() {
        let settings = Settings::default();
        assert_eq!(settings.physics_interval().as_micros(), 16_666);
        assert_eq!(settings.command_interval().as_micros(), 8_333);
        assert_eq!(settings.input_interval().as_micros(), 8_333);
    }

    #[test]
    fn test_reach_larger_than_half_screen_is_rejected() {
        let settings = Settings {
            distance_max: 200.0,
            ..Settings::default()
        };
        // 200 + 20 + 30 = 250 > 240
        assert_eq!(
            settings.validate(),
            Err(SettingsError::ReachTooLarge {
                reach: 250.0,
                limit: 240.0
            })
        );
    }

    #[test]
    fn test_mirror_bound_is_rejected() {
        let settings = Settings {
            distance_max: 185.0,
            ..Settings::default()
        };
        // reach 235 fits, but 235 + 30 does not
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::MirrorOffScreen { .. })
        ));
    }

    #[test]
    fn test_empty_distance_range_is_rejected() {
        let settings = Settings {
            distance_min: 120.0,
            distance_max: 100.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::EmptyDistanceRange { .. })
        ));
    }

    #[test]
    fn test_non_positive_values_are_rejected() {
        let settings = Settings {
            goal_radius: 0.0,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NotPositive {
                name: "goal_radius",
                value: 0.0
            })
        );

        let settings = Settings {
            physics_hz: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_negative_distance_is_rejected() {
        let settings = Settings {
            distance_min: -1.0,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NegativeDistance(-1.0))
        );
    }

    #[test]
    fn test_screen_overrides() {
        let settings = Settings::default().with_screen(Some(800.0), None);
        assert_eq!(settings.screen_width, 800.0);
        assert_eq!(settings.screen_height, 480.0);

        let small = Settings::default().with_screen(Some(300.0), Some(300.0));
        assert!(small.validate().is_err());
    }
}
