//! Grapple events
//!
//! Intents (input → ECS):
//! - GrappleActivate: кнопка grapple
//! - GrappleCancel: ранний release (повторное нажатие, jump)
//! - GrappleBreak: принудительный отрыв с impulse
//!
//! Notifications (ECS → host/анимации):
//! - GrapplePhaseChanged: каждый переход state machine
//! - JumpAnimationTriggered: cosmetic, third-person anim blueprint

use bevy::prelude::*;

use super::controller::PhaseKind;

/// Event: игрок нажал grapple
#[derive(Event, Debug, Clone)]
pub struct GrappleActivate {
    pub entity: Entity,
}

/// Event: ранний release (без impulse если ещё не прибыли)
#[derive(Event, Debug, Clone)]
pub struct GrappleCancel {
    pub entity: Entity,
}

/// Event: отрыв с break-off impulse
#[derive(Event, Debug, Clone)]
pub struct GrappleBreak {
    pub entity: Entity,
}

/// Event: grapple state machine сменила фазу
#[derive(Event, Debug, Clone, PartialEq)]
pub struct GrapplePhaseChanged {
    pub entity: Entity,
    pub from: PhaseKind,
    pub to: PhaseKind,
}

/// Event: прыжок для third-person анимаций (логика его не читает)
#[derive(Event, Debug, Clone)]
pub struct JumpAnimationTriggered {
    pub entity: Entity,
}
