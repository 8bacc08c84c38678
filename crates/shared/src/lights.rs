use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::controller::{DimOverrides, SceneLights};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize,
)]
pub enum LightKind {
    Point,
    Spot,
    /// Faded through `illuminance` rather than `intensity`.
    Directional,
}

/// Identity of one light component on one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct LightKey {
    pub entity: Entity,
    pub kind: LightKind,
}

impl LightKey {
    pub fn point(entity: Entity) -> Self {
        Self {
            entity,
            kind: LightKind::Point,
        }
    }

    pub fn spot(entity: Entity) -> Self {
        Self {
            entity,
            kind: LightKind::Spot,
        }
    }

    pub fn directional(entity: Entity) -> Self {
        Self {
            entity,
            kind: LightKind::Directional,
        }
    }
}

/// Which light a [`LightOverride`] applies to.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub enum OverrideTarget {
    Entity(Entity),
    /// Matches lights whose `Name` equals this string.
    Named(String),
}

/// Dim target used for one light instead of zero.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct LightOverride {
    pub light: OverrideTarget,
    pub target_intensity: f32,
}

impl LightOverride {
    pub fn new(light: OverrideTarget) -> Self {
        Self {
            light,
            target_intensity: crate::DEFAULT_OVERRIDE_INTENSITY,
        }
    }

    pub fn entity(entity: Entity, target_intensity: f32) -> Self {
        Self {
            light: OverrideTarget::Entity(entity),
            target_intensity,
        }
    }

    pub fn named(name: impl Into<String>, target_intensity: f32) -> Self {
        Self {
            light: OverrideTarget::Named(name.into()),
            target_intensity,
        }
    }

    fn matches(&self, entity: Entity, name: Option<&Name>) -> bool {
        match &self.light {
            OverrideTarget::Entity(target) => *target == entity,
            OverrideTarget::Named(target) => name.is_some_and(|name| name.as_str() == target),
        }
    }
}

/// Every point, spot and directional light in the world.
#[derive(SystemParam)]
pub struct SceneLightQuery<'w, 's> {
    points: Query<'w, 's, (Entity, &'static mut PointLight)>,
    spots: Query<'w, 's, (Entity, &'static mut SpotLight)>,
    directionals: Query<'w, 's, (Entity, &'static mut DirectionalLight)>,
    names: Query<'w, 's, &'static Name>,
}

impl SceneLightQuery<'_, '_> {
    /// Resolves the configured overrides against the lights alive right now.
    pub fn resolve_overrides(&self, overrides: &[LightOverride]) -> DimOverrides<LightKey> {
        if overrides.is_empty() {
            return DimOverrides::new();
        }

        self.active_lights()
            .into_iter()
            .filter_map(|light| {
                let name = self.names.get(light.entity).ok();
                let entry = overrides
                    .iter()
                    .find(|entry| entry.matches(light.entity, name))?;
                if !entry.target_intensity.is_finite() {
                    warn!(
                        "Ignoring non-finite dim target {} for light {:?}",
                        entry.target_intensity, light.entity
                    );
                    return None;
                }
                Some((light, entry.target_intensity))
            })
            .collect()
    }
}

impl SceneLights for SceneLightQuery<'_, '_> {
    type Key = LightKey;

    fn active_lights(&self) -> Vec<LightKey> {
        self.points
            .iter()
            .map(|(entity, _)| LightKey::point(entity))
            .chain(self.spots.iter().map(|(entity, _)| LightKey::spot(entity)))
            .chain(
                self.directionals
                    .iter()
                    .map(|(entity, _)| LightKey::directional(entity)),
            )
            .collect()
    }

    fn intensity(&self, light: LightKey) -> Option<f32> {
        match light.kind {
            LightKind::Point => self.points.get(light.entity).ok().map(|(_, l)| l.intensity),
            LightKind::Spot => self.spots.get(light.entity).ok().map(|(_, l)| l.intensity),
            LightKind::Directional => self
                .directionals
                .get(light.entity)
                .ok()
                .map(|(_, l)| l.illuminance),
        }
    }

    fn set_intensity(&mut self, light: LightKey, value: f32) -> bool {
        match light.kind {
            LightKind::Point => self
                .points
                .get_mut(light.entity)
                .map(|(_, mut l)| l.intensity = value)
                .is_ok(),
            LightKind::Spot => self
                .spots
                .get_mut(light.entity)
                .map(|(_, mut l)| l.intensity = value)
                .is_ok(),
            LightKind::Directional => self
                .directionals
                .get_mut(light.entity)
                .map(|(_, mut l)| l.illuminance = value)
                .is_ok(),
        }
    }
}
