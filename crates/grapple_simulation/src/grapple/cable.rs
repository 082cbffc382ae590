//! Cable animator: конец троса летит к attach point
//!
//! Exponential interpolation: каждый tick проходим долю `dt * speed`
//! оставшегося расстояния. Точного равенства не бывает → arrival по tolerance.

use bevy::prelude::*;

/// Порог "трос долетел" (world units)
pub const CABLE_ARRIVAL_TOLERANCE: f32 = 10.0;

/// Ниже этого (squared) считаем что уже на месте
const SNAP_DISTANCE_SQUARED: f32 = 1e-8;

/// Interp `current` → `target` со скоростью `speed` за `dt` секунд
///
/// - `speed <= 0`: мгновенный snap в target
/// - доля шага clamp'ится в [0, 1] (никогда не перелетаем target)
pub fn interp_to(current: Vec3, target: Vec3, dt: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }

    let delta = target - current;
    if delta.length_squared() < SNAP_DISTANCE_SQUARED {
        return target;
    }

    current + delta * (dt * speed).clamp(0.0, 1.0)
}

/// Визуальное состояние троса
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CableState {
    pub current: Vec3,
    pub target: Vec3,
    pub speed: f32,
    pub visible: bool,
}

impl Default for CableState {
    fn default() -> Self {
        Self {
            current: Vec3::ZERO,
            target: Vec3::ZERO,
            speed: 0.0,
            visible: false,
        }
    }
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct CableAnimator {
    state: CableState,
}

impl CableAnimator {
    pub fn state(&self) -> &CableState {
        &self.state
    }

    /// Выстрел: трос стартует из `muzzle` и летит к `target`
    pub fn launch(&mut self, muzzle: Vec3, target: Vec3, speed: f32) {
        self.state = CableState {
            current: muzzle,
            target,
            speed,
            visible: true,
        };
    }

    pub fn hide(&mut self) {
        self.state.visible = false;
    }

    pub fn distance_to_target(&self) -> f32 {
        self.state.current.distance(self.state.target)
    }

    pub fn has_arrived(&self) -> bool {
        self.distance_to_target() <= CABLE_ARRIVAL_TOLERANCE
    }

    /// Travel phase: один шаг к target со скоростью троса
    ///
    /// Возвращает true если трос уже в пределах tolerance (шаг не делается).
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.has_arrived() {
            return true;
        }

        self.state.current = interp_to(self.state.current, self.state.target, dt, self.state.speed);
        false
    }

    /// Attached phase: трос следует за точкой крепления со скоростью игрока
    pub fn rehome(&mut self, dt: f32, speed: f32) {
        self.state.speed = speed;
        self.state.current = interp_to(self.state.current, self.state.target, dt, speed);
    }
}
