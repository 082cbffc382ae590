//! Grapple module (cable + player pull)
//!
//! Pipeline одной session:
//! 1. aim (AimResolver): camera mode + aim bucket → AimRay
//! 2. scanner (AttachScanner): AimRay → AttachPoint через GeometryTrace
//! 3. cable (CableAnimator): конец троса летит к attach point
//! 4. traveler (PlayerTraveler): тянем игрока, ground probe, hover
//! 5. controller (GrappleController): state machine + repeating tick
//!
//! ECS слой (systems) работает в FixedUpdate ДО MovementSet.

use bevy::prelude::*;

pub mod aim;
pub mod cable;
pub mod controller;
pub mod events;
pub mod geometry;
pub mod scanner;
pub mod settings;
pub mod systems;
pub mod timer;
pub mod traveler;

#[cfg(test)]
mod controller_tests;

// Re-export основных типов
pub use aim::{AimBucket, AimRay, AimResolver, AimState};
pub use cable::{CableAnimator, CableState, CABLE_ARRIVAL_TOLERANCE};
pub use controller::{ActivateOutcome, GrappleController, GrapplePhase, PhaseChange, PhaseKind};
pub use events::{GrappleActivate, GrappleBreak, GrappleCancel, GrapplePhaseChanged, JumpAnimationTriggered};
pub use geometry::{category_groups, RapierTrace, StaticGeometry};
pub use scanner::{AttachPoint, AttachScanner, GeometryTrace, TargetCategory, TargetFilter};
pub use settings::{GrappleSettings, SettingsError};
pub use timer::{GrappleTick, GRAPPLE_TICK_PERIOD};
pub use traveler::{GrappleBody, PlayerTraveler, TravelStep};

use crate::components::JumpIntent;
use crate::physics::MovementSet;

/// Set для grapple систем
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrappleSet;

/// Откуда берётся геометрия для trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceBackend {
    /// `StaticGeometry` resource (headless, тесты)
    #[default]
    Static,
    /// Rapier query pipeline (нужен RapierPhysicsPlugin)
    Rapier,
}

/// Grapple Plugin
///
/// Порядок выполнения (FixedUpdate, chain):
/// 1. update_aim_state: aim bucket из камеры и input
/// 2. process_activate_intents: GrappleActivate → trace → session
/// 3. process_release_intents: GrappleCancel / GrappleBreak
/// 4. route_jump_intents: прыжок во время grapple
/// 5. tick_grapple_sessions: repeating tick (cable, pull, ground probe)
/// 6. publish_phase_changes: GrapplePhaseChanged events
#[derive(Default)]
pub struct GrapplePlugin {
    pub backend: TraceBackend,
}

impl Plugin for GrapplePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GrappleActivate>()
            .add_event::<GrappleCancel>()
            .add_event::<GrappleBreak>()
            .add_event::<JumpIntent>()
            .add_event::<GrapplePhaseChanged>()
            .add_event::<JumpAnimationTriggered>();

        app.register_type::<GrappleSettings>()
            .register_type::<AimState>()
            .register_type::<PhaseKind>();

        app.configure_sets(FixedUpdate, GrappleSet.before(MovementSet));

        match self.backend {
            TraceBackend::Static => {
                app.init_resource::<StaticGeometry>();
                app.add_systems(
                    FixedUpdate,
                    (
                        systems::update_aim_state,
                        systems::process_activate_intents_static,
                        systems::process_release_intents,
                        systems::route_jump_intents,
                        systems::tick_grapple_sessions_static,
                        systems::publish_phase_changes,
                    )
                        .chain()
                        .in_set(GrappleSet),
                );
            }
            TraceBackend::Rapier => {
                app.add_systems(
                    FixedUpdate,
                    (
                        systems::update_aim_state,
                        systems::process_activate_intents_rapier,
                        systems::process_release_intents,
                        systems::route_jump_intents,
                        systems::tick_grapple_sessions_rapier,
                        systems::publish_phase_changes,
                    )
                        .chain()
                        .in_set(GrappleSet),
                );
            }
        }
    }
}
