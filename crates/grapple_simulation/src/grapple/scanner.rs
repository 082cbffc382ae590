//! Attach scanner: aim ray + target filter → attach point
//!
//! Geometry trace инжектится через `GeometryTrace` trait:
//! - `StaticGeometry`: headless AABB сцена (тесты, headless binary)
//! - `RapierTrace`: bevy_rapier3d raycast (игра)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::aim::AimRay;

/// Категория коллайдера для grapple trace (битовая маска)
///
/// Bit layout совпадает с rapier `Group` bits: категория N = `1 << N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct TargetCategory(pub u32);

impl TargetCategory {
    /// Статичная геометрия (стены, скалы)
    pub const WORLD_STATIC: TargetCategory = TargetCategory(0b0001);
    /// Подвижная геометрия (платформы, ящики)
    pub const WORLD_DYNAMIC: TargetCategory = TargetCategory(0b0010);
    /// Акторы (игрок, NPC)
    pub const ACTORS: TargetCategory = TargetCategory(0b0100);
    /// Custom "только сюда можно цепляться"
    pub const GRAPPLE_POINT: TargetCategory = TargetCategory(0b1000);

    pub fn bits(&self) -> u32 {
        self.0
    }
}

/// Фильтр trace: разрешённые категории + игнорируемые entity
///
/// Мутируется только setters контроллера, read-only во время scan.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct TargetFilter {
    pub allowed: Vec<TargetCategory>,
    pub ignore: Vec<Entity>,
}

impl Default for TargetFilter {
    fn default() -> Self {
        Self {
            allowed: vec![TargetCategory::WORLD_STATIC, TargetCategory::WORLD_DYNAMIC],
            ignore: Vec::new(),
        }
    }
}

impl TargetFilter {
    /// Add unique. Возвращает false если категория уже была.
    pub fn allow(&mut self, category: TargetCategory) -> bool {
        if self.allowed.contains(&category) {
            return false;
        }
        self.allowed.push(category);
        true
    }

    /// Add unique. Возвращает false если entity уже игнорировался.
    pub fn ignore(&mut self, entity: Entity) -> bool {
        if self.ignore.contains(&entity) {
            return false;
        }
        self.ignore.push(entity);
        true
    }

    /// Объединённая маска разрешённых категорий
    pub fn mask(&self) -> u32 {
        self.allowed.iter().fold(0, |mask, category| mask | category.bits())
    }

    pub fn accepts(&self, category: TargetCategory, owner: Entity) -> bool {
        self.mask() & category.bits() != 0 && !self.ignore.contains(&owner)
    }
}

/// Результат scan
///
/// Захватывается один раз на grapple lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct AttachPoint {
    pub location: Vec3,
    pub valid: bool,
}

impl AttachPoint {
    pub fn hit(location: Vec3) -> Self {
        Self {
            location,
            valid: true,
        }
    }

    pub fn miss() -> Self {
        Self::default()
    }
}

/// World geometry trace capability
pub trait GeometryTrace {
    /// Первый blocking hit вдоль луча (до `ray.max_length`).
    ///
    /// Учитывает только `filter.allowed`, пропускает `filter.ignore` и `source`.
    fn cast(&self, ray: &AimRay, filter: &TargetFilter, source: Entity) -> Option<Vec3>;

    /// Есть ли что-то твёрдое прямо под `origin` в пределах `distance`
    ///
    /// Любая категория (visibility channel), кроме самого `source`.
    fn probe_ground(&self, origin: Vec3, distance: f32, source: Entity) -> bool;
}

/// One-shot scanner
pub struct AttachScanner;

impl AttachScanner {
    pub fn scan<T: GeometryTrace + ?Sized>(
        trace: &T,
        ray: &AimRay,
        filter: &TargetFilter,
        source: Entity,
    ) -> AttachPoint {
        if filter.allowed.is_empty() || ray.max_length <= 0.0 {
            return AttachPoint::miss();
        }

        match trace.cast(ray, filter, source) {
            Some(location) => AttachPoint::hit(location),
            None => AttachPoint::miss(),
        }
    }
}
