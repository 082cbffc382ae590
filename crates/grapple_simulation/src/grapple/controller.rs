//! Grapple controller — state machine одной grapple session
//!
//! Idle → CableTraveling → CableAttached → (Arrived) → Idle
//!                                       ↘ Breaking → Idle
//!
//! Phase — единственный источник правды "идёт ли grapple". Repeating tick
//! зарегистрирован тогда и только тогда, когда phase != Idle.
//! Все failure paths мягкие: no-op + best-effort cleanup, без паник.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{LocomotionMode, Viewpoint};
use crate::logger;

use super::aim::{AimBucket, AimResolver};
use super::cable::{CableAnimator, CableState};
use super::scanner::{AttachPoint, AttachScanner, GeometryTrace, TargetCategory, TargetFilter};
use super::settings::{GrappleSettings, SettingsError};
use super::timer::{GrappleTick, GRAPPLE_TICK_PERIOD};
use super::traveler::{GrappleBody, PlayerTraveler, TravelStep};

/// Фаза grapple session (attach point живёт внутри варианта)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GrapplePhase {
    #[default]
    Idle,
    /// Трос летит к attach point, игрок стоит
    CableTraveling { attach: Vec3 },
    /// Трос закреплён, игрока тянет
    CableAttached { attach: Vec3 },
    /// Игрок в acceptance radius, под ним пусто
    Arrived { attach: Vec3 },
    /// One-shot отрыв (impulse), сразу переходит в Idle
    Breaking { attach: Vec3 },
}

impl GrapplePhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            GrapplePhase::Idle => PhaseKind::Idle,
            GrapplePhase::CableTraveling { .. } => PhaseKind::CableTraveling,
            GrapplePhase::CableAttached { .. } => PhaseKind::CableAttached,
            GrapplePhase::Arrived { .. } => PhaseKind::Arrived,
            GrapplePhase::Breaking { .. } => PhaseKind::Breaking,
        }
    }

    pub fn attach(&self) -> Option<Vec3> {
        match *self {
            GrapplePhase::Idle => None,
            GrapplePhase::CableTraveling { attach }
            | GrapplePhase::CableAttached { attach }
            | GrapplePhase::Arrived { attach }
            | GrapplePhase::Breaking { attach } => Some(attach),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, GrapplePhase::Idle)
    }
}

/// Фаза без payload (для events и логов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum PhaseKind {
    Idle,
    CableTraveling,
    CableAttached,
    Arrived,
    Breaking,
}

/// Запись перехода (дренируется ECS системой в events)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: PhaseKind,
    pub to: PhaseKind,
}

/// Результат activate (только для наблюдаемости, не ошибка)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivateOutcome {
    /// Trace попал, session началась
    Started,
    /// Third person и aim не вперёд (или вырожденное направление)
    NoAimRay,
    /// Trace ничего не нашёл
    NoHit,
    /// Trace попал, но session уже идёт (attach point не меняется)
    AlreadyActive,
}

/// Grapple controller — один на controlled body
#[derive(Component, Debug, Clone, Default)]
pub struct GrappleController {
    settings: GrappleSettings,
    filter: TargetFilter,
    phase: GrapplePhase,
    attach_point: AttachPoint,
    cable: CableAnimator,
    traveler: PlayerTraveler,
    tick: GrappleTick,
    elapsed_ticks: u64,
    changes: Vec<PhaseChange>,
}

impl GrappleController {
    pub fn new(settings: GrappleSettings) -> Self {
        Self {
            settings,
            ..default()
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Попытка начать grapple
    ///
    /// Aim → trace → на hit: захват attach point, трос виден, tick запущен.
    /// Miss без закреплённого троса → `stop` (в том числе пока трос летит).
    /// Hit во время session → `AlreadyActive`, session не меняется.
    pub fn activate<T, B>(
        &mut self,
        view: &Viewpoint,
        bucket: AimBucket,
        trace: &T,
        body: &mut B,
    ) -> ActivateOutcome
    where
        T: GeometryTrace + ?Sized,
        B: GrappleBody + ?Sized,
    {
        let Some(ray) = AimResolver::resolve(
            view,
            body.view_mode(),
            bucket,
            body.forward(),
            self.settings.max_length,
        ) else {
            return ActivateOutcome::NoAimRay;
        };

        let point = AttachScanner::scan(trace, &ray, &self.filter, body.entity());
        if !point.valid {
            // Трос ещё не закреплён → сброс; закреплённую session промах не трогает
            if !self.is_attached() {
                self.stop(body);
            }
            return ActivateOutcome::NoHit;
        }

        // Attach point неизменен до конца session
        if !self.phase.is_idle() {
            logger::log(&format!(
                "Grapple: {:?} activate ignored, session already in {:?}",
                body.entity(),
                self.phase.kind()
            ));
            return ActivateOutcome::AlreadyActive;
        }

        self.attach_point = point;
        self.cable.launch(body.position(), point.location, self.settings.cable_speed);
        self.traveler.reset();
        self.elapsed_ticks = 0;
        self.tick.start(GRAPPLE_TICK_PERIOD);
        self.transition(GrapplePhase::CableTraveling {
            attach: point.location,
        });

        ActivateOutcome::Started
    }

    /// Продвигает repeating tick на `delta`, выполняет истёкшие шаги
    pub fn update<T, B>(&mut self, delta: Duration, trace: &T, body: &mut B)
    where
        T: GeometryTrace + ?Sized,
        B: GrappleBody + ?Sized,
    {
        let fired = self.tick.advance(delta);
        if fired == 0 {
            return;
        }

        let dt = self.tick.period_secs();
        for _ in 0..fired {
            self.step(dt, trace, body);
            if self.phase.is_idle() {
                break;
            }
        }
    }

    /// Один grapple tick (`dt` — период таймера в секундах)
    pub fn step<T, B>(&mut self, dt: f32, trace: &T, body: &mut B)
    where
        T: GeometryTrace + ?Sized,
        B: GrappleBody + ?Sized,
    {
        match self.phase {
            GrapplePhase::Idle => {
                // Tick не должен жить в Idle
                if self.tick.cancel() {
                    logger::log_warning(&format!(
                        "Grapple: {:?} stale tick in Idle, cleared",
                        body.entity()
                    ));
                }
            }

            GrapplePhase::CableTraveling { attach } => {
                self.elapsed_ticks += 1;
                if self.cable.advance(dt) {
                    self.traveler.begin(attach, &self.settings);
                    self.transition(GrapplePhase::CableAttached { attach });
                }
            }

            GrapplePhase::CableAttached { attach } | GrapplePhase::Arrived { attach } => {
                self.elapsed_ticks += 1;
                let arrived = matches!(self.phase, GrapplePhase::Arrived { .. });

                if arrived && !body.view_mode().is_first_person() {
                    self.traveler.hover(body);
                } else {
                    match self.traveler.advance(trace, body, dt, &self.settings) {
                        TravelStep::Traveling => {}
                        TravelStep::Arrived => {
                            if !arrived {
                                self.transition(GrapplePhase::Arrived { attach });
                            }
                        }
                        TravelStep::GroundReached => {
                            self.break_off(body);
                            return;
                        }
                    }
                }

                self.cable.rehome(dt, self.settings.player_speed);
            }

            GrapplePhase::Breaking { .. } => {
                // break_off проходит Breaking → Idle за один вызов; здесь только довершаем Stop
                self.stop(body);
            }
        }
    }

    /// Ранний release по запросу игрока
    ///
    /// - ещё не прибыли → Stop без impulse
    /// - прибыли (висим) → Breaking, чтобы тело получило impulse
    ///
    /// Возвращает true если session была прервана.
    pub fn cancel<B: GrappleBody + ?Sized>(&mut self, body: &mut B) -> bool {
        match self.phase {
            GrapplePhase::Idle => false,
            GrapplePhase::CableTraveling { .. } | GrapplePhase::CableAttached { .. } => {
                self.stop(body);
                true
            }
            GrapplePhase::Arrived { .. } | GrapplePhase::Breaking { .. } => self.break_off(body),
        }
    }

    /// Принудительный отрыв: break-off impulse + Stop
    ///
    /// Из Idle — no-op (impulse не применяется).
    pub fn break_off<B: GrappleBody + ?Sized>(&mut self, body: &mut B) -> bool {
        let Some(attach) = self.phase.attach() else {
            return false;
        };

        self.transition(GrapplePhase::Breaking { attach });
        body.launch(self.settings.break_off_velocity, false, false);
        self.stop(body);
        true
    }

    /// Сброс в Idle. Безопасен из любого состояния, идемпотентен.
    pub fn stop<B: GrappleBody + ?Sized>(&mut self, body: &mut B) {
        self.tick.cancel();
        self.traveler.reset();
        self.cable.hide();
        self.attach_point = AttachPoint::miss();

        if body.locomotion() == LocomotionMode::Flying {
            body.set_locomotion(LocomotionMode::Grounded);
        }
        if !body.view_mode().is_first_person() {
            body.set_yaw_lock(false);
        }

        self.transition(GrapplePhase::Idle);
    }

    fn transition(&mut self, next: GrapplePhase) {
        let from = self.phase.kind();
        let to = next.kind();
        self.phase = next;

        if from != to {
            self.changes.push(PhaseChange { from, to });
        }
    }

    /// Забирает накопленные переходы
    pub fn drain_changes(&mut self) -> Vec<PhaseChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn pending_changes(&self) -> &[PhaseChange] {
        &self.changes
    }

    /// Выставляет phase и tick напрямую, без transitions
    #[cfg(test)]
    pub(crate) fn force_state(&mut self, phase: GrapplePhase, ticking: bool) {
        self.phase = phase;
        if ticking {
            self.tick.start(GRAPPLE_TICK_PERIOD);
        } else {
            self.tick.cancel();
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub fn phase(&self) -> GrapplePhase {
        self.phase
    }

    /// Grapple нажат и trace попал (session идёт)
    pub fn is_active(&self) -> bool {
        !self.phase.is_idle()
    }

    /// Трос долетел до attach point
    pub fn is_attached(&self) -> bool {
        matches!(
            self.phase,
            GrapplePhase::CableAttached { .. } | GrapplePhase::Arrived { .. } | GrapplePhase::Breaking { .. }
        )
    }

    pub fn has_arrived(&self) -> bool {
        matches!(self.phase, GrapplePhase::Arrived { .. })
    }

    pub fn attach_point(&self) -> Option<Vec3> {
        self.attach_point.valid.then_some(self.attach_point.location)
    }

    pub fn cable(&self) -> &CableState {
        self.cable.state()
    }

    pub fn traveler(&self) -> &PlayerTraveler {
        &self.traveler
    }

    pub fn is_ticking(&self) -> bool {
        self.tick.is_scheduled()
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn settings(&self) -> &GrappleSettings {
        &self.settings
    }

    pub fn filter(&self) -> &TargetFilter {
        &self.filter
    }

    // ========================================================================
    // Setters (читаются на следующем tick / activate)
    // ========================================================================

    pub fn add_target_category(&mut self, category: TargetCategory) {
        self.filter.allow(category);
    }

    pub fn add_ignored(&mut self, entity: Entity) {
        self.filter.ignore(entity);
    }

    pub fn set_max_length(&mut self, length: f32) {
        if length.is_finite() && length > 0.0 {
            self.settings.max_length = length;
        } else {
            logger::log_warning(&format!("Grapple: max_length {} ignored (must be > 0)", length));
        }
    }

    pub fn set_cable_speed(&mut self, speed: f32) {
        self.settings.cable_speed = non_negative("cable_speed", speed);
    }

    pub fn set_player_speed(&mut self, speed: f32) {
        self.settings.player_speed = non_negative("player_speed", speed);
    }

    pub fn set_break_off_velocity(&mut self, velocity: Vec3) {
        if velocity.is_finite() {
            self.settings.break_off_velocity = velocity;
        } else {
            logger::log_warning(&format!("Grapple: break_off_velocity {:?} ignored", velocity));
        }
    }

    pub fn set_acceptance_radius(&mut self, radius: f32) {
        self.settings.acceptance_radius = non_negative("acceptance_radius", radius);
    }

    pub fn set_fall_distance(&mut self, distance: f32) {
        self.settings.fall_distance = non_negative("fall_distance", distance);
    }

    /// Заменить settings целиком (после validate)
    pub fn set_settings(&mut self, settings: GrappleSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }
}

fn non_negative(field: &str, value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        return value;
    }

    logger::log_warning(&format!("Grapple: {} = {} clamped to 0", field, value));
    0.0
}
