//! Headless grapple симуляция
//!
//! Seeded сцена: пол + случайные anchor блоки в воздухе. Игрок (first person)
//! по очереди цепляется к каждому блоку, висит, прыжком отрывается и падает.
//! Запуск: `grapple_simulation [seed]`.

use bevy::prelude::*;
use rand::Rng;

use grapple_simulation::grapple::GrappleSet;
use grapple_simulation::{
    create_headless_app, log, log_info, log_warning, spawn_grapple_character, ActiveCamera, DeterministicRng,
    GrappleActivate, GrappleController, GrappleSettings, JumpIntent, KinematicController, PhaseKind,
    StaticGeometry, TargetCategory, Viewpoint,
};

const ANCHOR_COUNT: usize = 8;
/// Сколько тиков ждать Arrived прежде чем сдаться
const MAX_PULL_TICKS: u32 = 1000;
/// Сколько висим на attach point перед прыжком
const HANG_TICKS: u32 = 50;
const MAX_FALL_TICKS: u32 = 1000;
/// Камера над центром тела
const EYE_HEIGHT: f32 = 60.0;

/// Host camera: viewpoint следует за телом
fn sync_viewpoint(mut query: Query<(&Transform, &mut Viewpoint)>) {
    for (transform, mut view) in query.iter_mut() {
        view.position = transform.translation + Vec3::Y * EYE_HEIGHT;
    }
}

fn spawn_scene(app: &mut App) -> (Entity, Vec<Vec3>) {
    let anchors: Vec<Vec3> = {
        let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
        (0..ANCHOR_COUNT)
            .map(|_| {
                Vec3::new(
                    rng.rng.gen_range(-1500.0..1500.0),
                    rng.rng.gen_range(400.0..1200.0),
                    rng.rng.gen_range(-3000.0..-800.0),
                )
            })
            .collect()
    };

    let floor = app.world_mut().spawn(Name::new("Floor")).id();
    let anchor_entities: Vec<Entity> = anchors
        .iter()
        .enumerate()
        .map(|(index, center)| {
            app.world_mut()
                .spawn((Name::new(format!("Anchor {}", index)), Transform::from_translation(*center)))
                .id()
        })
        .collect();

    {
        let mut geometry = app.world_mut().resource_mut::<StaticGeometry>();
        geometry.add_block(
            floor,
            Vec3::new(0.0, -50.0, 0.0),
            Vec3::new(10000.0, 50.0, 10000.0),
            TargetCategory::WORLD_STATIC,
        );
        for (entity, center) in anchor_entities.iter().zip(&anchors) {
            geometry.add_block(*entity, *center, Vec3::splat(100.0), TargetCategory::WORLD_STATIC);
        }
    }

    let player = {
        let mut commands = app.world_mut().commands();
        spawn_grapple_character(
            &mut commands,
            Vec3::new(0.0, 88.0, 0.0),
            ActiveCamera::first_person(),
            GrappleSettings::default(),
        )
    };
    app.world_mut().flush();

    (player, anchors)
}

fn phase_of(app: &App, player: Entity) -> PhaseKind {
    app.world()
        .get::<GrappleController>(player)
        .map(|grapple| grapple.phase().kind())
        .unwrap_or(PhaseKind::Idle)
}

fn position_of(app: &App, player: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(player)
        .map(|transform| transform.translation)
        .unwrap_or_default()
}

fn run_until(app: &mut App, max_ticks: u32, mut done: impl FnMut(&App) -> bool) -> Option<u32> {
    for tick in 0..max_ticks {
        app.update();
        if done(app) {
            return Some(tick + 1);
        }
    }
    None
}

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);
    log_info(&format!("Starting grapple headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    app.add_systems(FixedUpdate, sync_viewpoint.before(GrappleSet));

    let (player, anchors) = spawn_scene(&mut app);

    // Первый update: Startup + приземление
    run_until(&mut app, 20, |_| false);

    let mut reached = 0;
    for (round, anchor) in anchors.iter().enumerate() {
        let start = position_of(&app, player);
        let eye = start + Vec3::Y * EYE_HEIGHT;

        if let Some(mut view) = app.world_mut().get_mut::<Viewpoint>(player) {
            view.position = eye;
            view.forward = (*anchor - eye).normalize_or_zero();
        }
        app.world_mut().send_event(GrappleActivate { entity: player });

        let Some(pull_ticks) = run_until(&mut app, MAX_PULL_TICKS, |app| {
            matches!(phase_of(app, player), PhaseKind::Arrived | PhaseKind::Idle)
        }) else {
            log_warning(&format!("Round {}: grapple не прибыл за {} тиков", round, MAX_PULL_TICKS));
            continue;
        };

        if phase_of(&app, player) == PhaseKind::Idle {
            log(&format!("Round {}: grapple закончился без Arrived ({} тиков)", round, pull_ticks));
            continue;
        }

        reached += 1;
        log_info(&format!(
            "Round {}: arrived at {:?} after {} тиков (anchor {:?})",
            round,
            position_of(&app, player),
            pull_ticks,
            anchor
        ));

        run_until(&mut app, HANG_TICKS, |_| false);
        app.world_mut().send_event(JumpIntent { entity: player });

        let landed = run_until(&mut app, MAX_FALL_TICKS, |app| {
            app.world()
                .get::<KinematicController>(player)
                .is_some_and(|controller| controller.grounded)
        });
        match landed {
            Some(ticks) => log(&format!(
                "Round {}: landed at {:?} after {} тиков",
                round,
                position_of(&app, player),
                ticks
            )),
            None => log_warning(&format!("Round {}: не приземлился за {} тиков", round, MAX_FALL_TICKS)),
        }
    }

    log_info(&format!(
        "Simulation complete! {}/{} anchors reached, final position {:?}",
        reached,
        anchors.len(),
        position_of(&app, player)
    ));
}
