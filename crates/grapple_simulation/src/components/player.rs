//! Player control marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Grapple intents от input system адресуются entity с этим маркером.
/// Headless сценарии и тесты шлют intents напрямую по Entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
