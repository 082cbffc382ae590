//! Grapple settings (designer-tunable)
//!
//! Единицы: world units ≈ сантиметры (как и KinematicController).
//! Setters контроллера читаются на следующем tick, attach point и длина
//! троса фиксируются на момент activate.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Параметры grapple для одного тела
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct GrappleSettings {
    /// Максимальная длина троса (дальность trace)
    pub max_length: f32,
    /// Скорость полёта троса к attach point (interp speed, 1/сек)
    pub cable_speed: f32,
    /// Скорость подтягивания игрока (interp speed, 1/сек)
    pub player_speed: f32,
    /// Impulse при отрыве (нужна вертикаль чтобы отрыв был заметен)
    pub break_off_velocity: Vec3,
    /// Насколько близко к attach point считается "прибыли"
    /// (толстые меши → больше; минимум ~45)
    pub acceptance_radius: f32,
    /// Высота над землёй, ниже которой трос отпускает автоматически
    /// (должна быть меньше порога fall damage)
    pub fall_distance: f32,
}

impl Default for GrappleSettings {
    fn default() -> Self {
        Self {
            max_length: 10_000.0,
            cable_speed: 50.0,
            player_speed: 250.0,
            break_off_velocity: Vec3::new(0.0, 750.0, 0.0),
            acceptance_radius: 45.0,
            fall_distance: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be >= 0 (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("max_length must be > 0 (got {0})")]
    NonPositiveLength(f32),

    #[error("break_off_velocity must be finite (got {0:?})")]
    InvalidBreakOff(Vec3),
}

impl GrappleSettings {
    /// Проверка settings пришедших извне (serde, editor)
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.break_off_velocity.is_finite() {
            return Err(SettingsError::InvalidBreakOff(self.break_off_velocity));
        }

        let scalars = [
            ("max_length", self.max_length),
            ("cable_speed", self.cable_speed),
            ("player_speed", self.player_speed),
            ("acceptance_radius", self.acceptance_radius),
            ("fall_distance", self.fall_distance),
        ];

        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(SettingsError::Negative { field, value });
            }
        }

        if self.max_length <= 0.0 {
            return Err(SettingsError::NonPositiveLength(self.max_length));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = GrappleSettings::default();
        assert_eq!(settings.max_length, 10_000.0);
        assert_eq!(settings.cable_speed, 50.0);
        assert_eq!(settings.player_speed, 250.0);
        assert_eq!(settings.break_off_velocity, Vec3::new(0.0, 750.0, 0.0));
        assert_eq!(settings.acceptance_radius, 45.0);
        assert_eq!(settings.fall_distance, 150.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_negative_speed_rejected() {
        let settings = GrappleSettings {
            player_speed: -1.0,
            ..default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::Negative { field: "player_speed", value: -1.0 })
        );
    }

    #[test]
    fn test_zero_length_rejected() {
        let settings = GrappleSettings {
            max_length: 0.0,
            ..default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::NonPositiveLength(0.0)));
    }

    #[test]
    fn test_nan_rejected() {
        let settings = GrappleSettings {
            acceptance_radius: f32::NAN,
            ..default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotFinite { field: "acceptance_radius", .. })
        ));
    }
}
