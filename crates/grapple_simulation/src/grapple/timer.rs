//! Repeating tick handle для grapple session
//!
//! Handle принадлежит контроллеру: start при выходе из Idle, cancel при
//! возврате в Idle. Независим от частоты FixedUpdate: fixed step продвигает
//! таймер на свой delta, а контроллер получает столько шагов, сколько
//! периодов истекло.

use std::time::Duration;

use bevy::prelude::*;

/// Период grapple tick (10ms simulated time)
pub const GRAPPLE_TICK_PERIOD: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Default)]
pub struct GrappleTick {
    timer: Option<Timer>,
}

impl GrappleTick {
    /// Запускает (или перезапускает) repeating таймер
    pub fn start(&mut self, period: Duration) {
        self.timer = Some(Timer::new(period, TimerMode::Repeating));
    }

    /// Снимает таймер. Повторный cancel — no-op.
    ///
    /// Возвращает true если таймер действительно был зарегистрирован.
    pub fn cancel(&mut self) -> bool {
        self.timer.take().is_some()
    }

    pub fn is_scheduled(&self) -> bool {
        self.timer.is_some()
    }

    /// Период в секундах (0 если таймер не зарегистрирован)
    pub fn period_secs(&self) -> f32 {
        self.timer
            .as_ref()
            .map(|timer| timer.duration().as_secs_f32())
            .unwrap_or(0.0)
    }

    /// Продвигает таймер, возвращает сколько раз он сработал
    pub fn advance(&mut self, delta: Duration) -> u32 {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick(delta);
                timer.times_finished_this_tick()
            }
            None => 0,
        }
    }
}
