//! Camera mode + viewpoint компоненты
//!
//! Камера сама по себе вне симуляции (host пишет Viewpoint каждый frame),
//! но grapple aim зависит от режима и от transform активной камеры.

use bevy::prelude::*;

/// Camera mode (First-Person vs Third-Person)
///
/// First person: aim ray идёт строго по camera forward.
/// Third person: aim разрешён только когда aim bucket == Forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum CameraMode {
    /// First-person camera (attached к голове)
    FirstPerson,

    /// Third-person camera (spring arm за спиной)
    #[default]
    ThirdPerson,
}

impl CameraMode {
    pub fn is_first_person(&self) -> bool {
        matches!(self, CameraMode::FirstPerson)
    }
}

/// Active camera mode component
///
/// Attached к player entity для tracking текущего camera mode.
///
/// # Toggle
/// ```ignore
/// if let Ok(mut camera) = query.get_mut(player) {
///     camera.toggle();
/// }
/// ```
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ActiveCamera {
    pub mode: CameraMode,
}

impl ActiveCamera {
    pub fn first_person() -> Self {
        Self {
            mode: CameraMode::FirstPerson,
        }
    }

    pub fn third_person() -> Self {
        Self {
            mode: CameraMode::ThirdPerson,
        }
    }

    /// Переключает режим, возвращает новый
    pub fn toggle(&mut self) -> CameraMode {
        self.mode = match self.mode {
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
        };
        self.mode
    }
}

/// Event: переключить first/third person
#[derive(Event, Debug, Clone)]
pub struct CameraToggleIntent {
    pub entity: Entity,
}

/// World-space transform активной камеры (пишется host camera system)
///
/// `forward` ожидается normalized; aim resolver всё равно нормализует.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Viewpoint {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }
}

impl Viewpoint {
    /// Yaw камеры в градусах (0 = -Z, +90 = +X)
    pub fn yaw_degrees(&self) -> f32 {
        crate::grapple::aim::yaw_of(self.forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let mut camera = ActiveCamera::default();
        assert_eq!(camera.mode, CameraMode::ThirdPerson);

        assert_eq!(camera.toggle(), CameraMode::FirstPerson);
        assert!(camera.mode.is_first_person());

        assert_eq!(camera.toggle(), CameraMode::ThirdPerson);
    }

    #[test]
    fn test_viewpoint_yaw() {
        let view = Viewpoint {
            position: Vec3::ZERO,
            forward: Vec3::X,
        };
        assert!((view.yaw_degrees() - 90.0).abs() < 1e-4);
        assert!(Viewpoint::default().yaw_degrees().abs() < 1e-4);
    }
}
