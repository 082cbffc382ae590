//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - player: player control marker (Player)
//! - camera: camera mode + viewpoint (ActiveCamera, CameraMode, Viewpoint)
//! - movement: velocity и locomotion (PhysicsBody, LocomotionMode, JumpIntent)
//!
//! Grapple-специфичные компоненты живут в `crate::grapple`.

pub mod player;
pub mod camera;
pub mod movement;

// Re-exports для удобного импорта
pub use player::*;
pub use camera::*;
pub use movement::*;
