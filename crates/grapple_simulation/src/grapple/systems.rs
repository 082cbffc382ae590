//! Grapple systems (ECS ↔ controller)
//!
//! Все системы в FixedUpdate, до movement (launch velocity должна
//! интегрироваться в том же fixed step).
//!
//! Backend-зависимые системы (activate, tick) есть в двух вариантах:
//! `*_static` (StaticGeometry resource) и `*_rapier` (ReadRapierContext).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{ActiveCamera, CameraMode, JumpIntent, LocomotionMode, PhysicsBody, Viewpoint};
use crate::logger;
use crate::physics::{KinematicController, MovementInput};

use super::aim::{input_yaw, yaw_of, AimState};
use super::controller::{ActivateOutcome, GrappleController};
use super::events::{GrappleActivate, GrappleBreak, GrappleCancel, GrapplePhaseChanged, JumpAnimationTriggered};
use super::geometry::{RapierTrace, StaticGeometry};
use super::scanner::GeometryTrace;
use super::traveler::GrappleBody;

/// ECS адаптер тела для controller
pub struct SimBody<'a> {
    pub entity: Entity,
    pub transform: &'a Transform,
    pub body: &'a mut PhysicsBody,
    pub controller: &'a mut KinematicController,
    pub view_mode: CameraMode,
}

impl GrappleBody for SimBody<'_> {
    fn entity(&self) -> Entity {
        self.entity
    }

    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn forward(&self) -> Vec3 {
        self.transform.forward().as_vec3()
    }

    fn view_mode(&self) -> CameraMode {
        self.view_mode
    }

    fn launch(&mut self, velocity: Vec3, override_horizontal: bool, override_vertical: bool) {
        self.body.launch(velocity, override_horizontal, override_vertical);
        // Launch отрывает от земли (следующий ground_detection решит заново)
        self.controller.grounded = false;
    }

    fn halt(&mut self) {
        self.body.velocity = Vec3::ZERO;
    }

    fn locomotion(&self) -> LocomotionMode {
        self.controller.mode
    }

    fn set_locomotion(&mut self, mode: LocomotionMode) {
        self.controller.mode = mode;
    }

    fn set_yaw_lock(&mut self, locked: bool) {
        self.controller.yaw_follows_camera = locked;
    }
}

type GrappleQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut GrappleController,
        &'static Transform,
        &'static mut PhysicsBody,
        &'static mut KinematicController,
        Option<&'static ActiveCamera>,
    ),
>;

type AimQuery<'w, 's> = Query<'w, 's, (&'static Viewpoint, &'static AimState)>;

fn view_mode(camera: Option<&ActiveCamera>) -> CameraMode {
    camera.map(|camera| camera.mode).unwrap_or_default()
}

/// Система: обновить aim bucket из камеры, тела и input осей
pub fn update_aim_state(
    mut query: Query<(&Transform, &Viewpoint, Option<&MovementInput>, &mut AimState)>,
) {
    for (transform, view, input, mut aim) in query.iter_mut() {
        let (forward_axis, right_axis) = input
            .map(|input| (input.forward_axis, input.right_axis))
            .unwrap_or((0.0, 0.0));

        let body_yaw = yaw_of(transform.forward().as_vec3());
        aim.update(input_yaw(view.yaw_degrees(), body_yaw, forward_axis, right_axis));
    }
}

fn activate_requested<T: GeometryTrace + ?Sized>(
    trace: &T,
    requests: &[Entity],
    query: &mut GrappleQuery,
    aims: &AimQuery,
) {
    for &entity in requests {
        let Ok((_, mut grapple, transform, mut body, mut controller, camera)) = query.get_mut(entity) else {
            logger::log_warning(&format!("GrappleActivate: {:?} has no grapple controller", entity));
            continue;
        };
        let Ok((view, aim)) = aims.get(entity) else {
            logger::log_warning(&format!("GrappleActivate: {:?} has no Viewpoint/AimState", entity));
            continue;
        };

        let mut sim = SimBody {
            entity,
            transform,
            body: &mut body,
            controller: &mut controller,
            view_mode: view_mode(camera),
        };

        match grapple.activate(view, aim.bucket, trace, &mut sim) {
            ActivateOutcome::Started => {
                logger::log_info(&format!(
                    "🪝 {:?} grapple attach point {:?}",
                    entity,
                    grapple.attach_point()
                ));
            }
            outcome => {
                logger::log(&format!("🪝 {:?} grapple activate: {:?}", entity, outcome));
            }
        }
    }
}

fn tick_sessions<T: GeometryTrace + ?Sized>(trace: &T, query: &mut GrappleQuery, time: &Time<Fixed>) {
    let delta = time.delta();

    for (entity, mut grapple, transform, mut body, mut controller, camera) in query.iter_mut() {
        if !grapple.is_ticking() {
            continue;
        }

        let mut sim = SimBody {
            entity,
            transform,
            body: &mut body,
            controller: &mut controller,
            view_mode: view_mode(camera),
        };
        grapple.update(delta, trace, &mut sim);
    }
}

/// Система: GrappleActivate → controller.activate (StaticGeometry backend)
pub fn process_activate_intents_static(
    geometry: Res<StaticGeometry>,
    mut intents: EventReader<GrappleActivate>,
    mut query: GrappleQuery,
    aims: AimQuery,
) {
    let requests: Vec<Entity> = intents.read().map(|intent| intent.entity).collect();
    if requests.is_empty() {
        return;
    }

    activate_requested(&*geometry, &requests, &mut query, &aims);
}

/// Система: GrappleActivate → controller.activate (Rapier backend)
pub fn process_activate_intents_rapier(
    rapier: ReadRapierContext,
    mut intents: EventReader<GrappleActivate>,
    mut query: GrappleQuery,
    aims: AimQuery,
) {
    let requests: Vec<Entity> = intents.read().map(|intent| intent.entity).collect();
    if requests.is_empty() {
        return;
    }

    let Ok(context) = rapier.single() else {
        logger::log_error("GrappleActivate: RapierContext не найден, activate пропущен");
        return;
    };
    activate_requested(&RapierTrace::new(context), &requests, &mut query, &aims);
}

/// Система: GrappleCancel / GrappleBreak → controller
pub fn process_release_intents(
    mut cancels: EventReader<GrappleCancel>,
    mut breaks: EventReader<GrappleBreak>,
    mut query: GrappleQuery,
) {
    for intent in cancels.read() {
        let Ok((entity, mut grapple, transform, mut body, mut controller, camera)) = query.get_mut(intent.entity) else {
            continue;
        };
        let mut sim = SimBody {
            entity,
            transform,
            body: &mut body,
            controller: &mut controller,
            view_mode: view_mode(camera),
        };
        grapple.cancel(&mut sim);
    }

    for intent in breaks.read() {
        let Ok((entity, mut grapple, transform, mut body, mut controller, camera)) = query.get_mut(intent.entity) else {
            continue;
        };
        let mut sim = SimBody {
            entity,
            transform,
            body: &mut body,
            controller: &mut controller,
            view_mode: view_mode(camera),
        };
        grapple.break_off(&mut sim);
    }
}

/// Система: прыжок во время grapple
///
/// - летим/трос летит (не прибыли) → Stop, прыжок съедается
/// - висим на attach point → Break (impulse), потом обычный прыжок
/// - третье лицо → cosmetic JumpAnimationTriggered
pub fn route_jump_intents(
    mut jumps: EventReader<JumpIntent>,
    mut query: Query<(
        &Transform,
        &mut PhysicsBody,
        &mut KinematicController,
        Option<&mut GrappleController>,
        Option<&ActiveCamera>,
    )>,
    mut animations: EventWriter<JumpAnimationTriggered>,
) {
    for intent in jumps.read() {
        let Ok((transform, mut body, mut controller, grapple, camera)) = query.get_mut(intent.entity) else {
            continue;
        };
        let mode = view_mode(camera);

        if let Some(mut grapple) = grapple {
            let mut sim = SimBody {
                entity: intent.entity,
                transform,
                body: &mut body,
                controller: &mut controller,
                view_mode: mode,
            };

            if grapple.is_active() && !grapple.has_arrived() {
                grapple.stop(&mut sim);
                continue;
            }
            if grapple.has_arrived() {
                grapple.break_off(&mut sim);
            }
        }

        if controller.grounded && controller.mode == LocomotionMode::Grounded {
            body.velocity.y = controller.jump_speed;
            controller.grounded = false;
        }
        if !mode.is_first_person() {
            animations.write(JumpAnimationTriggered { entity: intent.entity });
        }
    }
}

/// Система: repeating grapple tick (StaticGeometry backend)
pub fn tick_grapple_sessions_static(
    time: Res<Time<Fixed>>,
    geometry: Res<StaticGeometry>,
    mut query: GrappleQuery,
) {
    tick_sessions(&*geometry, &mut query, &time);
}

/// Система: repeating grapple tick (Rapier backend)
pub fn tick_grapple_sessions_rapier(
    time: Res<Time<Fixed>>,
    rapier: ReadRapierContext,
    mut query: GrappleQuery,
) {
    if query.iter().all(|(_, grapple, ..)| !grapple.is_ticking()) {
        return;
    }

    let Ok(context) = rapier.single() else {
        logger::log_error("Grapple tick: RapierContext не найден, tick пропущен");
        return;
    };
    tick_sessions(&RapierTrace::new(context), &mut query, &time);
}

/// Система: переходы controller → GrapplePhaseChanged events
pub fn publish_phase_changes(
    mut query: Query<(Entity, &mut GrappleController)>,
    mut events: EventWriter<GrapplePhaseChanged>,
) {
    for (entity, mut grapple) in query.iter_mut() {
        if grapple.pending_changes().is_empty() {
            continue;
        }

        for change in grapple.drain_changes() {
            logger::log(&format!("🪝 {:?} grapple {:?} → {:?}", entity, change.from, change.to));
            events.write(GrapplePhaseChanged {
                entity,
                from: change.from,
                to: change.to,
            });
        }
    }
}
