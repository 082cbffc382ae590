//! Movement компоненты: velocity тела, locomotion mode, jump intent

use bevy::prelude::*;

/// Velocity + масса тела
///
/// Velocity интегрируется в Transform системой `integrate_velocity_to_transform`.
/// Grapple "launch" = запись в velocity (override или additive).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    pub mass: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 70.0,
        }
    }
}

impl PhysicsBody {
    /// Instant launch: velocity добавляется, либо заменяет компоненты
    ///
    /// `override_horizontal` — заменить X/Z, иначе прибавить.
    /// `override_vertical` — заменить Y, иначе прибавить.
    pub fn launch(&mut self, velocity: Vec3, override_horizontal: bool, override_vertical: bool) {
        if override_horizontal {
            self.velocity.x = velocity.x;
            self.velocity.z = velocity.z;
        } else {
            self.velocity.x += velocity.x;
            self.velocity.z += velocity.z;
        }

        if override_vertical {
            self.velocity.y = velocity.y;
        } else {
            self.velocity.y += velocity.y;
        }
    }
}

/// Режим передвижения тела
///
/// Grounded — ходьба/падение (гравитация работает).
/// Flying — гравитация выключена (hover на attach point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum LocomotionMode {
    #[default]
    Grounded,
    Flying,
}

/// Event: намерение прыгнуть (jump intent)
///
/// Генерируется player input system (Space key).
/// Обрабатывается `route_jump_intents`: если grapple активен — сначала
/// cancel/break, потом (возможно) обычный прыжок.
#[derive(Event, Debug, Clone)]
pub struct JumpIntent {
    pub entity: Entity,
}
