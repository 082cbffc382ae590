//! Geometry trace backends
//!
//! - `StaticGeometry`: resource со списком AABB блоков (headless).
//!   Детерминированный, без rapier pipeline: тесты и headless binary.
//! - `RapierTrace`: обёртка над `RapierContext::cast_ray` (игра).
//!   Категория коллайдера = rapier `CollisionGroups::memberships`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::aim::AimRay;
use super::scanner::{GeometryTrace, TargetCategory, TargetFilter};

/// Axis-aligned блок сцены
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct StaticBlock {
    /// Entity владельца (для ignore list)
    pub owner: Entity,
    pub min: Vec3,
    pub max: Vec3,
    pub category: TargetCategory,
}

impl StaticBlock {
    /// Distance вдоль луча до входа в блок (0 если origin внутри)
    pub fn ray_entry(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let mut t_enter = 0.0_f32;
        let mut t_exit = max_distance;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];

            if d.abs() < 1e-8 {
                // Луч параллелен slab — либо внутри, либо промах
                if o < self.min[axis] || o > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t1 = (self.min[axis] - o) * inv;
            let mut t2 = (self.max[axis] - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_enter = t_enter.max(t1);
            t_exit = t_exit.min(t2);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(t_enter)
    }
}

/// Headless сцена из AABB блоков
#[derive(Resource, Debug, Clone, Default)]
pub struct StaticGeometry {
    blocks: Vec<StaticBlock>,
}

impl StaticGeometry {
    pub fn add_block(&mut self, owner: Entity, center: Vec3, half_extents: Vec3, category: TargetCategory) {
        let half = half_extents.abs();
        self.blocks.push(StaticBlock {
            owner,
            min: center - half,
            max: center + half,
            category,
        });
    }

    pub fn remove_owner(&mut self, owner: Entity) {
        self.blocks.retain(|block| block.owner != owner);
    }

    pub fn blocks(&self) -> &[StaticBlock] {
        &self.blocks
    }

    /// Ближайший блок вдоль луча, прошедший `accept`
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        accept: impl Fn(&StaticBlock) -> bool,
    ) -> Option<(Entity, f32)> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        self.blocks
            .iter()
            .filter(|block| accept(block))
            .filter_map(|block| {
                block
                    .ray_entry(origin, direction, max_distance)
                    .map(|distance| (block.owner, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl GeometryTrace for StaticGeometry {
    fn cast(&self, ray: &AimRay, filter: &TargetFilter, source: Entity) -> Option<Vec3> {
        self.raycast(ray.origin, ray.direction, ray.max_length, |block| {
            block.owner != source && filter.accepts(block.category, block.owner)
        })
        .map(|(_, distance)| ray.origin + ray.direction * distance)
    }

    fn probe_ground(&self, origin: Vec3, distance: f32, source: Entity) -> bool {
        self.raycast(origin, Vec3::NEG_Y, distance, |block| block.owner != source)
            .is_some()
    }
}

/// Rapier backend
pub struct RapierTrace<'a> {
    context: RapierContext<'a>,
}

impl<'a> RapierTrace<'a> {
    pub fn new(context: RapierContext<'a>) -> Self {
        Self { context }
    }
}

impl GeometryTrace for RapierTrace<'_> {
    fn cast(&self, ray: &AimRay, filter: &TargetFilter, source: Entity) -> Option<Vec3> {
        let groups = CollisionGroups::new(Group::ALL, Group::from_bits_truncate(filter.mask()));
        let skip = |entity: Entity| entity != source && !filter.ignore.contains(&entity);
        let query = QueryFilter::new().groups(groups).predicate(&skip);

        self.context
            .cast_ray(ray.origin, ray.direction, ray.max_length, true, query)
            .map(|(_, distance)| ray.origin + ray.direction * distance)
    }

    fn probe_ground(&self, origin: Vec3, distance: f32, source: Entity) -> bool {
        let skip = |entity: Entity| entity != source;
        let query = QueryFilter::new().exclude_sensors().predicate(&skip);

        self.context
            .cast_ray(origin, Vec3::NEG_Y, distance, true, query)
            .is_some()
    }
}

/// Collision groups для grapple-able коллайдера заданной категории
pub fn category_groups(category: TargetCategory) -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(category.bits()), Group::ALL)
}
