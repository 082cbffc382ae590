//! Grapple Simulation Core
//!
//! ECS-симуляция grapple механики на Bevy 0.16.
//!
//! Слои:
//! - components: player/camera/movement данные
//! - physics: kinematic контроллер (gravity, input, yaw lock)
//! - grapple: aim → trace → cable → pull state machine
//! - logger: глобальный LogPrinter (host может подменить)
//!
//! Геометрия для trace: `StaticGeometry` (headless) или Rapier.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod grapple;
pub mod logger;
pub mod physics;

// Re-export базовых типов для удобства
pub use components::*;
pub use grapple::{
    ActivateOutcome, GrappleActivate, GrappleBreak, GrappleCancel, GrappleController, GrapplePhase,
    GrapplePhaseChanged, GrapplePlugin, GrappleSettings, JumpAnimationTriggered, PhaseKind, StaticGeometry,
    TargetCategory, TraceBackend,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use physics::{spawn_grapple_character, KinematicController, KinematicControllerPlugin, MovementInput};

/// Частота FixedUpdate (grapple tick = 10ms = один fixed step)
pub const SIMULATION_HZ: f64 = 100.0;

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub backend: TraceBackend,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 100Hz (совпадает с периодом grapple tick)
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .add_plugins((
                GrapplePlugin { backend: self.backend },
                KinematicControllerPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную (10ms на update) → один FixedUpdate на frame,
/// результат не зависит от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin::default())
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(std::time::Duration::from_millis(10)));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
