//! Tests for grapple controller state machine.

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use bevy::prelude::*;

    use crate::components::{CameraMode, LocomotionMode, Viewpoint};
    use crate::grapple::aim::{AimBucket, AimRay};
    use crate::grapple::controller::{ActivateOutcome, GrappleController, GrapplePhase, PhaseChange, PhaseKind};
    use crate::grapple::scanner::{GeometryTrace, TargetFilter};
    use crate::grapple::settings::GrappleSettings;
    use crate::grapple::traveler::GrappleBody;

    const DT: f32 = 0.01;

    /// Trace с одним заранее заданным hit
    struct MockTrace {
        hit: Option<Vec3>,
        ground: Cell<bool>,
        casts: Cell<u32>,
    }

    impl MockTrace {
        fn hit(location: Vec3) -> Self {
            Self {
                hit: Some(location),
                ground: Cell::new(false),
                casts: Cell::new(0),
            }
        }

        fn miss() -> Self {
            Self {
                hit: None,
                ground: Cell::new(false),
                casts: Cell::new(0),
            }
        }
    }

    impl GeometryTrace for MockTrace {
        fn cast(&self, _ray: &AimRay, _filter: &TargetFilter, _source: Entity) -> Option<Vec3> {
            self.casts.set(self.casts.get() + 1);
            self.hit
        }

        fn probe_ground(&self, _origin: Vec3, _distance: f32, _source: Entity) -> bool {
            self.ground.get()
        }
    }

    struct MockBody {
        position: Vec3,
        velocity: Vec3,
        mode: CameraMode,
        locomotion: LocomotionMode,
        yaw_lock: bool,
        launches: Vec<(Vec3, bool, bool)>,
    }

    impl MockBody {
        fn new(mode: CameraMode) -> Self {
            Self {
                position: Vec3::ZERO,
                velocity: Vec3::ZERO,
                mode,
                locomotion: LocomotionMode::Grounded,
                yaw_lock: false,
                launches: Vec::new(),
            }
        }

        fn integrate(&mut self, dt: f32) {
            self.position += self.velocity * dt;
        }

        fn impulses(&self) -> Vec<Vec3> {
            self.launches
                .iter()
                .filter(|(_, horizontal, vertical)| !horizontal && !vertical)
                .map(|(velocity, ..)| *velocity)
                .collect()
        }
    }

    impl GrappleBody for MockBody {
        fn entity(&self) -> Entity {
            Entity::from_raw(1)
        }

        fn position(&self) -> Vec3 {
            self.position
        }

        fn forward(&self) -> Vec3 {
            Vec3::NEG_Z
        }

        fn view_mode(&self) -> CameraMode {
            self.mode
        }

        fn launch(&mut self, velocity: Vec3, override_horizontal: bool, override_vertical: bool) {
            self.launches.push((velocity, override_horizontal, override_vertical));
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

        fn halt(&mut self) {
            self.velocity = Vec3::ZERO;
        }

        fn locomotion(&self) -> LocomotionMode {
            self.locomotion
        }

        fn set_locomotion(&mut self, mode: LocomotionMode) {
            self.locomotion = mode;
        }

        fn set_yaw_lock(&mut self, locked: bool) {
            self.yaw_lock = locked;
        }
    }

    fn view() -> Viewpoint {
        Viewpoint {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }

    fn rank(kind: PhaseKind) -> u8 {
        match kind {
            PhaseKind::Idle => 0,
            PhaseKind::CableTraveling => 1,
            PhaseKind::CableAttached => 2,
            PhaseKind::Arrived => 3,
            PhaseKind::Breaking => 4,
        }
    }

    /// Активирует и гоняет ticks пока phase не станет `kind` (или Idle)
    fn run_until(
        grapple: &mut GrappleController,
        trace: &MockTrace,
        body: &mut MockBody,
        kind: PhaseKind,
        max_ticks: u32,
    ) -> Option<u32> {
        for tick in 1..=max_ticks {
            grapple.step(DT, trace, body);
            let current = grapple.phase().kind();
            if current == kind || current == PhaseKind::Idle {
                return (current == kind).then_some(tick);
            }
            body.integrate(DT);
        }
        None
    }

    fn started(mode: CameraMode, attach: Vec3) -> (GrappleController, MockTrace, MockBody) {
        let mut grapple = GrappleController::default();
        let trace = MockTrace::hit(attach);
        let mut body = MockBody::new(mode);

        let outcome = grapple.activate(&view(), AimBucket::Forward, &trace, &mut body);
        assert_eq!(outcome, ActivateOutcome::Started);
        (grapple, trace, body)
    }

    #[test]
    fn test_miss_stays_idle() {
        let mut grapple = GrappleController::default();
        let trace = MockTrace::miss();
        let mut body = MockBody::new(CameraMode::FirstPerson);

        let outcome = grapple.activate(&view(), AimBucket::Forward, &trace, &mut body);

        assert_eq!(outcome, ActivateOutcome::NoHit);
        assert_eq!(grapple.phase().kind(), PhaseKind::Idle);
        assert!(!grapple.cable().visible);
        assert!(!grapple.is_ticking());
        assert!(grapple.attach_point().is_none());
        assert!(body.launches.is_empty());
    }

    #[test]
    fn test_hit_starts_cable() {
        let attach = Vec3::new(0.0, 0.0, -1000.0);
        let (grapple, _, _) = started(CameraMode::FirstPerson, attach);

        assert_eq!(grapple.phase().kind(), PhaseKind::CableTraveling);
        assert!(grapple.is_active());
        assert!(!grapple.is_attached());
        assert!(grapple.is_ticking());
        assert!(grapple.cable().visible);
        assert_eq!(grapple.cable().target, attach);
        assert_eq!(grapple.attach_point(), Some(attach));
    }

    #[test]
    fn test_cable_attaches_within_ten_ticks() {
        // 500 units, speed 50, dt 0.01 → каждый tick половина расстояния
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 0.0, -500.0));

        let ticks = run_until(&mut grapple, &trace, &mut body, PhaseKind::CableAttached, 10);

        assert!(ticks.is_some_and(|ticks| ticks <= 10), "ticks = {:?}", ticks);
        assert!(grapple.cable().current.distance(grapple.cable().target) <= 10.0);
        assert!(!grapple.traveler().is_idle());
    }

    #[test]
    fn test_body_stays_put_while_cable_travels() {
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 0.0, -5000.0));

        grapple.step(DT, &trace, &mut body);
        grapple.step(DT, &trace, &mut body);

        assert_eq!(grapple.phase().kind(), PhaseKind::CableTraveling);
        assert!(body.launches.is_empty());
        assert_eq!(grapple.elapsed_ticks(), 2);
    }

    #[test]
    fn test_zero_cable_speed_snaps() {
        let mut grapple = GrappleController::default();
        grapple.set_cable_speed(0.0);
        let trace = MockTrace::hit(Vec3::new(0.0, 0.0, -3000.0));
        let mut body = MockBody::new(CameraMode::FirstPerson);

        grapple.activate(&view(), AimBucket::Forward, &trace, &mut body);

        // Tick 1: snap в target, tick 2: arrival замечен
        grapple.step(DT, &trace, &mut body);
        assert_eq!(grapple.cable().current, grapple.cable().target);
        grapple.step(DT, &trace, &mut body);

        assert_eq!(grapple.phase().kind(), PhaseKind::CableAttached);
    }

    #[test]
    fn test_arrives_within_acceptance_radius() {
        let attach = Vec3::new(0.0, 300.0, -1000.0);
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, attach);

        let mut arrived = false;
        for _ in 0..1000 {
            let before = body.position;
            grapple.step(DT, &trace, &mut body);
            if grapple.has_arrived() {
                assert!(before.distance(attach) <= 45.0, "distance = {}", before.distance(attach));
                arrived = true;
                break;
            }
            body.integrate(DT);
        }

        assert!(arrived);
        assert!(grapple.is_attached());
        assert!(grapple.is_ticking());
    }

    #[test]
    fn test_pull_velocity_overrides_both_axes() {
        let attach = Vec3::new(0.0, 0.0, -1000.0);
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, attach);
        body.velocity = Vec3::new(300.0, -200.0, 0.0);

        run_until(&mut grapple, &trace, &mut body, PhaseKind::CableAttached, 20);
        grapple.step(DT, &trace, &mut body);

        let (velocity, horizontal, vertical) = body.launches[body.launches.len() - 1];
        assert!(horizontal && vertical);
        // (target - position) * (dt * player_speed)
        let expected = (attach - body.position) * (DT * 250.0);
        assert!(velocity.distance(expected) < 1e-3, "velocity = {:?}", velocity);
        assert_eq!(body.velocity, velocity);
    }

    #[test]
    fn test_ground_below_breaks_off_once() {
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 0.0, -800.0));
        trace.ground.set(true);

        let mut finished = false;
        for _ in 0..1000 {
            grapple.step(DT, &trace, &mut body);
            if !grapple.is_active() {
                finished = true;
                break;
            }
            body.integrate(DT);
        }

        assert!(finished);
        assert_eq!(body.impulses(), vec![GrappleSettings::default().break_off_velocity]);
        assert!(!grapple.is_ticking());
        assert!(!grapple.cable().visible);

        let kinds: Vec<PhaseKind> = grapple.drain_changes().iter().map(|change| change.to).collect();
        assert_eq!(
            kinds,
            vec![
                PhaseKind::CableTraveling,
                PhaseKind::CableAttached,
                PhaseKind::Breaking,
                PhaseKind::Idle
            ]
        );
    }

    #[test]
    fn test_phases_never_go_backward() {
        let (mut grapple, trace, mut body) = started(CameraMode::ThirdPerson, Vec3::new(100.0, 400.0, -1500.0));

        for _ in 0..400 {
            grapple.step(DT, &trace, &mut body);
            assert_eq!(grapple.is_ticking(), grapple.is_active());
            body.integrate(DT);
        }
        grapple.cancel(&mut body);

        let changes = grapple.drain_changes();
        assert!(!changes.is_empty());
        for change in changes {
            if change.to != PhaseKind::Idle {
                assert!(rank(change.to) > rank(change.from), "{:?}", change);
            }
        }
    }

    #[test]
    fn test_third_person_hovers_after_arrival() {
        let (mut grapple, trace, mut body) = started(CameraMode::ThirdPerson, Vec3::new(0.0, 500.0, -600.0));

        assert!(run_until(&mut grapple, &trace, &mut body, PhaseKind::Arrived, 1000).is_some());
        let launches = body.launches.len();

        grapple.step(DT, &trace, &mut body);

        assert_eq!(body.locomotion, LocomotionMode::Flying);
        assert!(body.yaw_lock);
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(body.launches.len(), launches);
        assert!(grapple.has_arrived());
    }

    #[test]
    fn test_first_person_keeps_pulling_after_arrival() {
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 500.0, -600.0));

        assert!(run_until(&mut grapple, &trace, &mut body, PhaseKind::Arrived, 1000).is_some());
        let launches = body.launches.len();

        grapple.step(DT, &trace, &mut body);
        grapple.step(DT, &trace, &mut body);

        assert_eq!(body.launches.len(), launches + 2);
        assert_eq!(body.locomotion, LocomotionMode::Grounded);
        assert!(grapple.has_arrived());
    }

    #[test]
    fn test_cancel_mid_travel_no_impulse() {
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 0.0, -2000.0));
        grapple.step(DT, &trace, &mut body);

        assert!(grapple.cancel(&mut body));

        assert_eq!(grapple.phase().kind(), PhaseKind::Idle);
        assert!(body.impulses().is_empty());
        assert!(!grapple.is_ticking());
        assert!(!grapple.cable().visible);
        assert!(grapple.attach_point().is_none());
        assert!(grapple.traveler().is_idle());
    }

    #[test]
    fn test_cancel_while_attached_no_impulse() {
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 0.0, -2000.0));
        assert!(run_until(&mut grapple, &trace, &mut body, PhaseKind::CableAttached, 20).is_some());

        assert!(grapple.cancel(&mut body));
        assert!(body.impulses().is_empty());
        assert!(!grapple.is_active());
    }

    #[test]
    fn test_cancel_when_idle_is_noop() {
        let mut grapple = GrappleController::default();
        let mut body = MockBody::new(CameraMode::FirstPerson);

        assert!(!grapple.cancel(&mut body));
        assert!(!grapple.break_off(&mut body));
        assert!(body.launches.is_empty());
        assert!(grapple.drain_changes().is_empty());
    }

    #[test]
    fn test_break_after_arrival_applies_configured_impulse() {
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 500.0, -600.0));
        grapple.set_break_off_velocity(Vec3::new(0.0, 900.0, 100.0));
        assert!(run_until(&mut grapple, &trace, &mut body, PhaseKind::Arrived, 1000).is_some());

        assert!(grapple.break_off(&mut body));

        assert_eq!(body.impulses(), vec![Vec3::new(0.0, 900.0, 100.0)]);
        assert_eq!(grapple.phase().kind(), PhaseKind::Idle);
        assert!(!grapple.is_ticking());
    }

    #[test]
    fn test_cancel_after_arrival_breaks_off() {
        let (mut grapple, trace, mut body) = started(CameraMode::ThirdPerson, Vec3::new(0.0, 500.0, -600.0));
        assert!(run_until(&mut grapple, &trace, &mut body, PhaseKind::Arrived, 1000).is_some());
        grapple.step(DT, &trace, &mut body);
        assert_eq!(body.locomotion, LocomotionMode::Flying);

        assert!(grapple.cancel(&mut body));

        assert_eq!(body.impulses().len(), 1);
        // Stop возвращает Grounded и отпускает yaw lock (third person)
        assert_eq!(body.locomotion, LocomotionMode::Grounded);
        assert!(!body.yaw_lock);
    }

    #[test]
    fn test_third_person_side_aim_is_noop() {
        let mut grapple = GrappleController::default();
        let trace = MockTrace::hit(Vec3::new(0.0, 0.0, -500.0));
        let mut body = MockBody::new(CameraMode::ThirdPerson);

        let outcome = grapple.activate(&view(), AimBucket::FrontRight, &trace, &mut body);

        assert_eq!(outcome, ActivateOutcome::NoAimRay);
        assert_eq!(trace.casts.get(), 0);
        assert!(!grapple.is_active());
        assert!(!grapple.is_ticking());
    }

    #[test]
    fn test_first_person_ignores_bucket() {
        let mut grapple = GrappleController::default();
        let trace = MockTrace::hit(Vec3::new(0.0, 0.0, -500.0));
        let mut body = MockBody::new(CameraMode::FirstPerson);

        let outcome = grapple.activate(&view(), AimBucket::Behind, &trace, &mut body);
        assert_eq!(outcome, ActivateOutcome::Started);
    }

    #[test]
    fn test_activate_hit_while_active_keeps_session() {
        let attach = Vec3::new(0.0, 0.0, -1000.0);
        let (mut grapple, _, mut body) = started(CameraMode::FirstPerson, attach);
        let other = MockTrace::hit(Vec3::new(500.0, 0.0, 0.0));

        let outcome = grapple.activate(&view(), AimBucket::Forward, &other, &mut body);

        assert_eq!(outcome, ActivateOutcome::AlreadyActive);
        assert_eq!(other.casts.get(), 1);
        assert_eq!(grapple.attach_point(), Some(attach));
        assert_eq!(grapple.phase().kind(), PhaseKind::CableTraveling);
        assert!(grapple.is_ticking());
    }

    #[test]
    fn test_activate_miss_while_cable_travels_stops() {
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 0.0, -2000.0));
        grapple.step(DT, &trace, &mut body);
        assert_eq!(grapple.phase().kind(), PhaseKind::CableTraveling);
        assert!(grapple.cable().visible);

        let outcome = grapple.activate(&view(), AimBucket::Forward, &MockTrace::miss(), &mut body);

        assert_eq!(outcome, ActivateOutcome::NoHit);
        assert_eq!(grapple.phase().kind(), PhaseKind::Idle);
        assert!(!grapple.cable().visible);
        assert!(!grapple.is_ticking());
        assert!(grapple.attach_point().is_none());
        assert!(body.impulses().is_empty());
    }

    #[test]
    fn test_activate_miss_while_attached_is_ignored() {
        let attach = Vec3::new(0.0, 0.0, -2000.0);
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, attach);
        assert!(run_until(&mut grapple, &trace, &mut body, PhaseKind::CableAttached, 20).is_some());
        grapple.drain_changes();

        let outcome = grapple.activate(&view(), AimBucket::Forward, &MockTrace::miss(), &mut body);

        assert_eq!(outcome, ActivateOutcome::NoHit);
        assert_eq!(grapple.phase().kind(), PhaseKind::CableAttached);
        assert_eq!(grapple.attach_point(), Some(attach));
        assert!(grapple.is_ticking());
        assert!(grapple.cable().visible);
        assert!(grapple.drain_changes().is_empty());
    }

    #[test]
    fn test_side_aim_while_active_keeps_session() {
        let (mut grapple, trace, mut body) = started(CameraMode::ThirdPerson, Vec3::new(0.0, 0.0, -2000.0));
        grapple.step(DT, &trace, &mut body);

        let outcome = grapple.activate(&view(), AimBucket::Left, &MockTrace::miss(), &mut body);

        assert_eq!(outcome, ActivateOutcome::NoAimRay);
        assert_eq!(grapple.phase().kind(), PhaseKind::CableTraveling);
        assert!(grapple.is_ticking());
    }

    #[test]
    fn test_stale_tick_in_idle_is_cleared() {
        let mut grapple = GrappleController::default();
        let trace = MockTrace::miss();
        let mut body = MockBody::new(CameraMode::FirstPerson);
        grapple.force_state(GrapplePhase::Idle, true);
        assert!(grapple.is_ticking());

        grapple.update(Duration::from_millis(10), &trace, &mut body);

        assert!(!grapple.is_ticking());
        assert!(!grapple.is_active());
        assert_eq!(grapple.elapsed_ticks(), 0);
        assert!(body.launches.is_empty());
        // Повторный step: таймера уже нет, ничего не происходит
        grapple.step(DT, &trace, &mut body);
        assert!(!grapple.is_ticking());
    }

    #[test]
    fn test_tick_in_breaking_finishes_stop() {
        let mut grapple = GrappleController::default();
        let trace = MockTrace::miss();
        let mut body = MockBody::new(CameraMode::ThirdPerson);
        body.locomotion = LocomotionMode::Flying;
        body.yaw_lock = true;
        grapple.force_state(GrapplePhase::Breaking { attach: Vec3::new(0.0, 500.0, 0.0) }, true);

        grapple.step(DT, &trace, &mut body);

        assert_eq!(grapple.phase().kind(), PhaseKind::Idle);
        assert!(!grapple.is_ticking());
        assert!(body.impulses().is_empty());
        assert_eq!(body.locomotion, LocomotionMode::Grounded);
        assert!(!body.yaw_lock);
    }

    #[test]
    fn test_cancel_in_breaking_applies_impulse() {
        let mut grapple = GrappleController::default();
        let mut body = MockBody::new(CameraMode::FirstPerson);
        grapple.force_state(GrapplePhase::Breaking { attach: Vec3::new(0.0, 500.0, 0.0) }, true);

        assert!(grapple.cancel(&mut body));

        assert_eq!(body.impulses(), vec![GrappleSettings::default().break_off_velocity]);
        assert_eq!(grapple.phase().kind(), PhaseKind::Idle);
        assert!(!grapple.is_ticking());
        assert_eq!(
            grapple.drain_changes(),
            vec![PhaseChange {
                from: PhaseKind::Breaking,
                to: PhaseKind::Idle,
            }]
        );
    }

    #[test]
    fn test_idle_step_is_harmless() {
        let mut grapple = GrappleController::default();
        let trace = MockTrace::miss();
        let mut body = MockBody::new(CameraMode::FirstPerson);

        grapple.step(DT, &trace, &mut body);
        grapple.update(Duration::from_millis(50), &trace, &mut body);

        assert!(!grapple.is_active());
        assert!(!grapple.is_ticking());
        assert!(body.launches.is_empty());
        assert_eq!(grapple.elapsed_ticks(), 0);
    }

    #[test]
    fn test_update_fires_once_per_period() {
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 0.0, -5000.0));

        grapple.update(Duration::from_millis(5), &trace, &mut body);
        assert_eq!(grapple.elapsed_ticks(), 0);

        grapple.update(Duration::from_millis(25), &trace, &mut body);
        assert_eq!(grapple.elapsed_ticks(), 3);
    }

    #[test]
    fn test_no_ticks_after_stop() {
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 0.0, -5000.0));
        grapple.update(Duration::from_millis(20), &trace, &mut body);
        grapple.stop(&mut body);
        let elapsed = grapple.elapsed_ticks();

        grapple.update(Duration::from_millis(100), &trace, &mut body);

        assert_eq!(grapple.elapsed_ticks(), elapsed);
        assert!(!grapple.is_ticking());
    }

    #[test]
    fn test_restart_after_stop() {
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, Vec3::new(0.0, 0.0, -5000.0));
        grapple.stop(&mut body);

        let outcome = grapple.activate(&view(), AimBucket::Forward, &trace, &mut body);

        assert_eq!(outcome, ActivateOutcome::Started);
        assert_eq!(grapple.elapsed_ticks(), 0);
        assert!(grapple.is_ticking());
    }

    #[test]
    fn test_player_speed_read_live() {
        let attach = Vec3::new(0.0, 0.0, -1000.0);
        let (mut grapple, trace, mut body) = started(CameraMode::FirstPerson, attach);
        assert!(run_until(&mut grapple, &trace, &mut body, PhaseKind::CableAttached, 20).is_some());

        grapple.set_player_speed(100.0);
        grapple.step(DT, &trace, &mut body);

        let (velocity, ..) = body.launches[body.launches.len() - 1];
        let expected = (attach - body.position) * (DT * 100.0);
        assert!(velocity.distance(expected) < 1e-3);
    }

    #[test]
    fn test_setters_clamp_invalid_values() {
        let mut grapple = GrappleController::default();

        grapple.set_cable_speed(-5.0);
        grapple.set_player_speed(f32::NAN);
        grapple.set_acceptance_radius(-1.0);
        grapple.set_max_length(0.0);
        grapple.set_fall_distance(200.0);

        let settings = grapple.settings();
        assert_eq!(settings.cable_speed, 0.0);
        assert_eq!(settings.player_speed, 0.0);
        assert_eq!(settings.acceptance_radius, 0.0);
        assert_eq!(settings.max_length, 10000.0);
        assert_eq!(settings.fall_distance, 200.0);
    }

    #[test]
    fn test_set_settings_validates() {
        let mut grapple = GrappleController::default();
        let invalid = GrappleSettings {
            max_length: -1.0,
            ..default()
        };

        assert!(grapple.set_settings(invalid).is_err());
        assert_eq!(grapple.settings().max_length, 10000.0);

        let valid = GrappleSettings {
            max_length: 2000.0,
            ..default()
        };
        assert!(grapple.set_settings(valid).is_ok());
        assert_eq!(grapple.settings().max_length, 2000.0);
    }

    #[test]
    fn test_filter_setters_add_unique() {
        use crate::grapple::scanner::TargetCategory;

        let mut grapple = GrappleController::default();
        grapple.add_target_category(TargetCategory::GRAPPLE_POINT);
        grapple.add_target_category(TargetCategory::GRAPPLE_POINT);
        grapple.add_ignored(Entity::from_raw(7));
        grapple.add_ignored(Entity::from_raw(7));

        assert_eq!(grapple.filter().allowed.len(), 3);
        assert_eq!(grapple.filter().ignore, vec![Entity::from_raw(7)]);
    }
}
