//! Aim resolver: camera transform + aim bucket → world-space ray
//!
//! Yaw convention (Y-up, forward = -Z):
//! - 0° = -Z
//! - +90° = +X (вправо)
//! - ±180° = +Z
//!
//! Aim bucket — дискретизация yaw в 9 секторов по 45°.
//! Используется для ориентации locomotion и как gate для third-person grapple.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{CameraMode, Viewpoint};

/// Луч для attach trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimRay {
    pub origin: Vec3,
    /// Всегда normalized
    pub direction: Vec3,
    pub max_length: f32,
}

impl AimRay {
    pub fn end(&self) -> Vec3 {
        self.origin + self.direction * self.max_length
    }
}

/// 9-way aim bucket (градусы кратные 45)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum AimBucket {
    /// -180°
    BehindLeft,
    /// -135°
    BackLeft,
    /// -90°
    Left,
    /// -45°
    FrontLeft,
    /// 0° — единственный bucket разрешающий third-person grapple
    #[default]
    Forward,
    /// 45°
    FrontRight,
    /// 90°
    Right,
    /// 135°
    BackRight,
    /// 180°
    Behind,
}

impl AimBucket {
    /// Классифицирует signed yaw (градусы) в bucket
    ///
    /// Yaw сначала нормализуется в [-180, 180] и обрезается до целых градусов
    /// (дробная часть отбрасывается к нулю), поэтому границы включительные:
    /// 21.9° → Forward, 22° → FrontRight.
    pub fn classify(yaw_degrees: f32) -> Self {
        let yaw = normalize_degrees(yaw_degrees).trunc() as i32;

        match yaw {
            -21..=21 => AimBucket::Forward,
            22..=65 => AimBucket::FrontRight,
            66..=111 => AimBucket::Right,
            112..=155 => AimBucket::BackRight,
            156..=180 => AimBucket::Behind,
            -65..=-22 => AimBucket::FrontLeft,
            -111..=-66 => AimBucket::Left,
            -155..=-112 => AimBucket::BackLeft,
            _ => AimBucket::BehindLeft,
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            AimBucket::BehindLeft => -180,
            AimBucket::BackLeft => -135,
            AimBucket::Left => -90,
            AimBucket::FrontLeft => -45,
            AimBucket::Forward => 0,
            AimBucket::FrontRight => 45,
            AimBucket::Right => 90,
            AimBucket::BackRight => 135,
            AimBucket::Behind => 180,
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, AimBucket::Forward)
    }
}

/// Текущее aim состояние игрока (обновляется каждый fixed tick)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct AimState {
    /// Последний посчитанный input yaw (градусы, [-180, 180])
    pub yaw: f32,
    pub bucket: AimBucket,
}

impl AimState {
    pub fn update(&mut self, yaw_degrees: f32) {
        self.yaw = normalize_degrees(yaw_degrees);
        self.bucket = AimBucket::classify(self.yaw);
    }
}

/// Нормализует угол в [-180, 180]
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }

    let wrapped = degrees % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped < -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Yaw горизонтальной проекции вектора (градусы)
///
/// Вертикальный или нулевой вектор → 0°.
pub fn yaw_of(direction: Vec3) -> f32 {
    if direction.x.abs() < 1e-6 && direction.z.abs() < 1e-6 {
        return 0.0;
    }
    direction.x.atan2(-direction.z).to_degrees()
}

/// Input yaw: поворот камеры относительно тела + направление stick/WASD
///
/// `forward_axis`/`right_axis` — raw оси ввода в [-1, 1].
/// Нет ввода → только camera-relative yaw.
pub fn input_yaw(camera_yaw: f32, body_yaw: f32, forward_axis: f32, right_axis: f32) -> f32 {
    let camera_relative = normalize_degrees(camera_yaw - body_yaw);

    let input = if forward_axis == 0.0 && right_axis == 0.0 {
        0.0
    } else {
        right_axis.atan2(forward_axis).to_degrees()
    };

    normalize_degrees(camera_relative + input)
}

/// Строит aim ray из активной камеры
pub struct AimResolver;

impl AimResolver {
    /// First person: origin = camera, direction = camera forward.
    /// Third person: только при `bucket == Forward`; горизонталь берётся от
    /// forward тела, вертикаль — от camera forward (pitch прицела).
    ///
    /// `None` — aim отклонён (не тот bucket или вырожденное направление).
    pub fn resolve(
        view: &Viewpoint,
        mode: CameraMode,
        bucket: AimBucket,
        body_forward: Vec3,
        max_length: f32,
    ) -> Option<AimRay> {
        let direction = match mode {
            CameraMode::FirstPerson => view.forward,
            CameraMode::ThirdPerson => {
                if !bucket.is_forward() {
                    return None;
                }
                let horizontal = Vec3::new(body_forward.x, 0.0, body_forward.z).normalize_or_zero();
                Vec3::new(horizontal.x, view.forward.y, horizontal.z)
            }
        };

        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        Some(AimRay {
            origin: view.position,
            direction,
            max_length,
        })
    }
}
