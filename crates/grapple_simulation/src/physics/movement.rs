//! Kinematic контроллер для игрока
//!
//! Архитектура:
//! - Rapier для коллайдеров (RigidBody::KinematicPositionBased) и raycast
//! - Custom velocity integration (не используем Rapier forces)
//! - Gravity + flat floor + movement input + locomotion mode
//!
//! Единицы: world units ≈ сантиметры (grapple settings в тех же единицах).
//! Детерминизм: fixed timestep (100Hz).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{ActiveCamera, CameraToggleIntent, LocomotionMode, PhysicsBody, Player, Viewpoint};
use crate::logger;
use crate::grapple::aim::{yaw_of, AimState};
use crate::grapple::geometry::category_groups;
use crate::grapple::scanner::TargetCategory;
use crate::grapple::{GrappleController, GrappleSettings};

/// Set для movement систем (grapple tick идёт ДО него)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovementSet;

/// Kinematic контроллер компонент
///
/// Управляет движением персонажа (WASD + gravity + jump).
/// Использует Rapier для коллизий, но velocity интегрируем сами.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct KinematicController {
    /// Скорость ходьбы (units/s)
    pub move_speed: f32,
    /// Гравитация (units/s²)
    pub gravity: f32,
    /// Вертикальная скорость прыжка (units/s)
    pub jump_speed: f32,
    /// Половина высоты капсулы (центр тела над полом)
    pub half_height: f32,
    /// Высота плоского пола
    pub floor_height: f32,
    /// На земле ли персонаж
    pub grounded: bool,
    /// Grounded → гравитация работает, Flying → нет
    pub mode: LocomotionMode,
    /// Тело поворачивается за yaw камеры
    pub yaw_follows_camera: bool,
}

impl Default for KinematicController {
    fn default() -> Self {
        Self {
            move_speed: 600.0,
            gravity: -980.0 * 1.75, // gravity scale 1.75
            jump_speed: 630.0,
            half_height: 88.0,
            floor_height: 0.0,
            grounded: false,
            mode: LocomotionMode::Grounded,
            yaw_follows_camera: false,
        }
    }
}

impl KinematicController {
    pub fn feet_height(&self, position: Vec3) -> f32 {
        position.y - self.half_height
    }
}

/// Входные данные для движения (raw оси)
///
/// Для headless тестов — mock input через этот компонент.
/// Для игры — заполняется из input mapping.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    /// Вперёд/назад, [-1, 1]
    pub forward_axis: f32,
    /// Вправо/влево, [-1, 1]
    pub right_axis: f32,
}

/// Система ground detection по плоскому полу
///
/// Grounded если ноги на полу (с запасом 0.5) и тело не летит вверх.
/// Проваливание под пол исправляется snap'ом.
pub fn ground_detection(mut query: Query<(&mut Transform, &mut PhysicsBody, &mut KinematicController)>) {
    for (mut transform, mut body, mut controller) in query.iter_mut() {
        let feet = controller.feet_height(transform.translation);
        let on_floor = feet <= controller.floor_height + 0.5;

        controller.grounded = on_floor && body.velocity.y <= 0.0;

        if on_floor && body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }
        if feet < controller.floor_height {
            transform.translation.y = controller.floor_height + controller.half_height;
        }
    }
}

/// Система применения движения от input
///
/// Направление — от yaw камеры (не тела). Пока grapple активен, input
/// игнорируется: velocity целиком принадлежит grapple launch.
pub fn apply_movement_input(
    mut query: Query<(
        &KinematicController,
        &MovementInput,
        &Viewpoint,
        &mut PhysicsBody,
        Option<&GrappleController>,
    )>,
) {
    for (controller, input, view, mut body, grapple) in query.iter_mut() {
        if grapple.is_some_and(|grapple| grapple.is_active()) {
            continue;
        }
        if controller.mode == LocomotionMode::Flying {
            continue;
        }

        let forward = Vec3::new(view.forward.x, 0.0, view.forward.z).normalize_or_zero();
        let right = forward.cross(Vec3::Y);
        let wish = forward * input.forward_axis + right * input.right_axis;

        if wish.length_squared() > 0.01 {
            let direction = wish.normalize();

            // Горизонтальная скорость (X, Z), Y остаётся за gravity
            body.velocity.x = direction.x * controller.move_speed;
            body.velocity.z = direction.z * controller.move_speed;
        } else if controller.grounded {
            // Трение только на земле, в воздухе инерция сохраняется
            body.velocity.x = 0.0;
            body.velocity.z = 0.0;
        }
    }
}

/// Система применения gravity к velocity
pub fn apply_gravity(
    mut query: Query<(&KinematicController, &mut PhysicsBody)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (controller, mut body) in query.iter_mut() {
        gravity_step(controller, &mut body, delta);
    }
}

/// Один шаг гравитации: только Grounded mode и только в воздухе
pub fn gravity_step(controller: &KinematicController, body: &mut PhysicsBody, delta: f32) {
    if controller.mode == LocomotionMode::Flying || controller.grounded {
        return;
    }
    body.velocity.y += controller.gravity * delta;
}

/// Система интеграции velocity → Transform (headless, без Rapier step)
pub fn integrate_velocity_to_transform(
    mut query: Query<(&PhysicsBody, &mut Transform), With<KinematicController>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (body, mut transform) in query.iter_mut() {
        transform.translation += body.velocity * delta;
    }
}

/// Система: тело с yaw lock смотрит туда же куда камера
pub fn orient_to_camera(mut query: Query<(&KinematicController, &Viewpoint, &mut Transform)>) {
    for (controller, view, mut transform) in query.iter_mut() {
        if !controller.yaw_follows_camera {
            continue;
        }
        let yaw = yaw_of(view.forward);
        transform.rotation = Quat::from_rotation_y(-yaw.to_radians());
    }
}

/// Система: переключение камеры
///
/// First person → тело всегда следует yaw камеры, third person → свободно.
pub fn process_camera_toggle(
    mut intents: EventReader<CameraToggleIntent>,
    mut query: Query<(&mut ActiveCamera, &mut KinematicController)>,
) {
    for intent in intents.read() {
        let Ok((mut camera, mut controller)) = query.get_mut(intent.entity) else {
            continue;
        };
        let mode = camera.toggle();
        controller.yaw_follows_camera = mode.is_first_person();
        logger::log(&format!("📷 {:?} camera → {:?}", intent.entity, mode));
    }
}

/// Синхронизация нашего PhysicsBody.velocity с Rapier (для collision backend)
pub fn sync_velocity_to_rapier(
    mut query: Query<(&PhysicsBody, &mut Velocity), With<KinematicController>>,
) {
    for (body, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = body.velocity;
    }
}

/// Plugin для kinematic контроллера
///
/// Все системы в FixedUpdate, после grapple tick.
pub struct KinematicControllerPlugin;

impl Plugin for KinematicControllerPlugin {
    fn build(&self, app: &mut App) {
        use bevy_rapier3d::plugin::PhysicsSet;

        app.add_event::<CameraToggleIntent>()
            .register_type::<KinematicController>()
            .register_type::<MovementInput>();

        app.add_systems(
            FixedUpdate,
            (
                process_camera_toggle,
                ground_detection,
                apply_movement_input,
                apply_gravity,
                integrate_velocity_to_transform,
                orient_to_camera,
                sync_velocity_to_rapier,
            )
                .chain()
                .in_set(MovementSet)
                .before(PhysicsSet::SyncBackend),
        );
    }
}

/// Spawn helper для grapple персонажа
///
/// Создает entity с полным набором компонентов:
/// - Transform
/// - PhysicsBody + KinematicController + MovementInput
/// - Viewpoint + ActiveCamera + AimState (aim)
/// - GrappleController
/// - Rapier: RigidBody + Collider (capsule) + collision groups ACTORS
pub fn spawn_grapple_character(
    commands: &mut Commands,
    position: Vec3,
    camera: ActiveCamera,
    settings: GrappleSettings,
) -> Entity {
    let controller = KinematicController {
        yaw_follows_camera: camera.mode.is_first_person(),
        ..default()
    };

    commands
        .spawn((
            Transform::from_translation(position),
            Player,
            PhysicsBody::default(),
            controller,
            MovementInput::default(),
            Viewpoint {
                position: position + Vec3::Y * 60.0,
                forward: Vec3::NEG_Z,
            },
            camera,
            AimState::default(),
            GrappleController::new(settings),
            // Rapier physics
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(controller.half_height - 34.0, 34.0),
            Velocity::default(),
            category_groups(TargetCategory::ACTORS),
        ))
        .id()
}
