//! Player traveler: тянет тело к attach point по тросу
//!
//! Движение не интерполяция, а launch (velocity override) физического тела:
//! collision response может увести реальную позицию от расчётной.
//! Arrival: тело в `acceptance_radius` от target → probe вниз на
//! `ground_probe_distance`: земля близко → auto release, иначе Arrived.

use bevy::prelude::*;

use crate::components::{CameraMode, LocomotionMode};

use super::scanner::GeometryTrace;
use super::settings::GrappleSettings;

/// Movement primitives контролируемого тела
///
/// Реализуется ECS адаптером (`SimBody`) и mock'ами в тестах.
pub trait GrappleBody {
    fn entity(&self) -> Entity;
    fn position(&self) -> Vec3;
    /// Forward тела (для third-person aim)
    fn forward(&self) -> Vec3;
    fn view_mode(&self) -> CameraMode;

    /// Instant velocity change (override или additive по осям)
    fn launch(&mut self, velocity: Vec3, override_horizontal: bool, override_vertical: bool);

    /// Обнулить остаточную velocity
    fn halt(&mut self);

    fn locomotion(&self) -> LocomotionMode;
    fn set_locomotion(&mut self, mode: LocomotionMode);

    /// Тело поворачивается вслед за yaw камеры
    fn set_yaw_lock(&mut self, locked: bool);
}

/// Параметры перемещения (обновляются из settings каждый tick)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct TravelState {
    pub target: Vec3,
    pub speed: f32,
    pub acceptance_radius: f32,
    pub ground_probe_distance: f32,
}

/// Результат одного шага перемещения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelStep {
    /// Ещё летим
    Traveling,
    /// В acceptance radius, под ногами пусто
    Arrived,
    /// В acceptance radius и земля в пределах probe → отпустить трос
    GroundReached,
}

#[derive(Debug, Clone, Default, Reflect)]
pub struct PlayerTraveler {
    state: TravelState,
    engaged: bool,
}

impl PlayerTraveler {
    pub fn state(&self) -> &TravelState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        !self.engaged
    }

    pub fn begin(&mut self, target: Vec3, settings: &GrappleSettings) {
        self.engaged = true;
        self.state.target = target;
        self.sync(settings);
    }

    pub fn reset(&mut self) {
        self.engaged = false;
        self.state = TravelState::default();
    }

    fn sync(&mut self, settings: &GrappleSettings) {
        self.state.speed = settings.player_speed;
        self.state.acceptance_radius = settings.acceptance_radius;
        self.state.ground_probe_distance = settings.fall_distance;
    }

    /// Launch к target + проверка arrival
    ///
    /// Velocity = (target - body) * (dt * speed), override обеих осей.
    pub fn advance<T, B>(&mut self, trace: &T, body: &mut B, dt: f32, settings: &GrappleSettings) -> TravelStep
    where
        T: GeometryTrace + ?Sized,
        B: GrappleBody + ?Sized,
    {
        self.sync(settings);

        let position = body.position();
        let velocity = (self.state.target - position) * (dt * self.state.speed);
        body.launch(velocity, true, true);

        if position.distance(self.state.target) > self.state.acceptance_radius {
            return TravelStep::Traveling;
        }

        if trace.probe_ground(position, self.state.ground_probe_distance, body.entity()) {
            TravelStep::GroundReached
        } else {
            TravelStep::Arrived
        }
    }

    /// Steady hover на attach point (third person после arrival)
    pub fn hover<B: GrappleBody + ?Sized>(&self, body: &mut B) {
        body.set_locomotion(LocomotionMode::Flying);
        body.set_yaw_lock(true);
        body.halt();
    }
}
