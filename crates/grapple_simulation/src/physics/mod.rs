//! Physics simulation module
//!
//! Kinematic контроллер, движение, коллайдеры через Rapier.

pub mod movement;

// Re-export основных типов
pub use movement::{
    KinematicController,
    KinematicControllerPlugin,
    MovementInput,
    MovementSet,
    process_camera_toggle,
    spawn_grapple_character,
};
