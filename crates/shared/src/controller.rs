//! Engine-independent dim/restore state machine.
//!
//! [`LightDimController`] owns everything the toggle needs: the current
//! [`DimState`], the intensities recorded before any dimming, and at most one
//! running [`FadeTask`] per light. The lights themselves stay with whoever
//! implements [`SceneLights`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;

use bevy::prelude::{Reflect, debug};
use serde::{Deserialize, Serialize};

use crate::fade::{FadeDuration, FadeTask};

/// Lights the controller can enumerate, read and write.
pub trait SceneLights {
    type Key: Copy + Eq + Hash + Debug;

    /// Every light currently alive in the scene, in enumeration order.
    fn active_lights(&self) -> Vec<Self::Key>;

    /// Current intensity, or `None` once the light has been destroyed.
    fn intensity(&self, light: Self::Key) -> Option<f32>;

    /// Returns `false` when the light no longer exists.
    fn set_intensity(&mut self, light: Self::Key, value: f32) -> bool;
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize,
)]
pub enum DimState {
    #[default]
    Bright,
    Dimmed,
}

impl DimState {
    pub fn toggled(self) -> Self {
        match self {
            DimState::Bright => DimState::Dimmed,
            DimState::Dimmed => DimState::Bright,
        }
    }

    pub fn is_dimmed(self) -> bool {
        self == DimState::Dimmed
    }
}

/// Per-light dim targets used instead of zero. First matching entry wins.
#[derive(Clone, Debug, PartialEq)]
pub struct DimOverrides<K> {
    entries: Vec<(K, f32)>,
}

impl<K> Default for DimOverrides<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> DimOverrides<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, light: K, target_intensity: f32) -> Self {
        self.push(light, target_intensity);
        self
    }

    pub fn push(&mut self, light: K, target_intensity: f32) {
        self.entries.push((light, target_intensity));
    }

    pub fn target_for(&self, light: K) -> Option<f32> {
        self.entries
            .iter()
            .find(|(key, _)| *key == light)
            .map(|(_, target)| *target)
    }
}

impl<K: Copy + Eq> FromIterator<(K, f32)> for DimOverrides<K> {
    fn from_iter<I: IntoIterator<Item = (K, f32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub state: DimState,
    pub fades_started: usize,
    /// Lights left alone because no original intensity was recorded for them.
    pub skipped: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub advanced: usize,
    pub completed: usize,
    pub aborted: usize,
}

#[derive(Clone, Debug)]
pub struct LightDimController<K> {
    state: DimState,
    fade_duration: FadeDuration,
    originals: HashMap<K, f32>,
    fades: HashMap<K, FadeTask>,
}

impl<K> Default for LightDimController<K> {
    fn default() -> Self {
        Self::new(FadeDuration::default())
    }
}

impl<K> LightDimController<K> {
    pub fn new(fade_duration: FadeDuration) -> Self {
        Self {
            state: DimState::Bright,
            fade_duration,
            originals: HashMap::new(),
            fades: HashMap::new(),
        }
    }

    pub fn state(&self) -> DimState {
        self.state
    }

    pub fn fade_duration(&self) -> FadeDuration {
        self.fade_duration
    }

    pub fn originals(&self) -> &HashMap<K, f32> {
        &self.originals
    }

    pub fn is_fading(&self) -> bool {
        !self.fades.is_empty()
    }

    pub fn active_fades(&self) -> usize {
        self.fades.len()
    }

    pub fn fades(&self) -> impl Iterator<Item = (&K, &FadeTask)> {
        self.fades.iter()
    }

    pub fn cancel_all(&mut self) {
        self.fades.clear();
    }
}

impl<K: Copy + Eq + Hash + Debug> LightDimController<K> {
    pub fn original_intensity(&self, light: K) -> Option<f32> {
        self.originals.get(&light).copied()
    }

    pub fn fade_target(&self, light: K) -> Option<f32> {
        self.fades.get(&light).map(FadeTask::target)
    }

    /// Drops the running fade for `light`, leaving its intensity where it is.
    pub fn cancel(&mut self, light: K) -> bool {
        self.fades.remove(&light).is_some()
    }

    /// Takes over originals recorded elsewhere, keeping any entry already
    /// present. Returns how many were newly recorded.
    pub fn adopt_originals(&mut self, originals: impl IntoIterator<Item = (K, f32)>) -> usize {
        let mut adopted = 0;
        for (light, intensity) in originals {
            if let Entry::Vacant(entry) = self.originals.entry(light) {
                entry.insert(intensity);
                adopted += 1;
            }
        }
        adopted
    }

    /// Records the intensity of every light not seen before. Returns how many
    /// lights were newly recorded.
    pub fn snapshot<S>(&mut self, scene: &S) -> usize
    where
        S: SceneLights<Key = K>,
    {
        let mut recorded = 0;
        for light in scene.active_lights() {
            if self.originals.contains_key(&light) {
                continue;
            }
            if let Some(intensity) = scene.intensity(light) {
                self.originals.insert(light, intensity);
                recorded += 1;
            }
        }
        recorded
    }

    /// Flips the dim state and starts a fade for every affected light,
    /// replacing any fade already running on it.
    pub fn toggle<S>(&mut self, scene: &S, overrides: &DimOverrides<K>) -> ToggleOutcome
    where
        S: SceneLights<Key = K>,
    {
        self.state = self.state.toggled();

        let mut fades_started = 0;
        let mut skipped = 0;

        for light in scene.active_lights() {
            let target = match self.state {
                DimState::Dimmed => Some(overrides.target_for(light).unwrap_or(0.0)),
                DimState::Bright => self.original_intensity(light),
            };

            match target {
                Some(target) => {
                    self.fades
                        .insert(light, FadeTask::new(target, self.fade_duration));
                    fades_started += 1;
                }
                None => skipped += 1,
            }
        }

        ToggleOutcome {
            state: self.state,
            fades_started,
            skipped,
        }
    }

    /// Advances every running fade by `dt` seconds.
    pub fn tick<S>(&mut self, scene: &mut S, dt: f32) -> TickSummary
    where
        S: SceneLights<Key = K>,
    {
        let mut summary = TickSummary::default();

        self.fades.retain(|light, task| {
            let Some(current) = scene.intensity(*light) else {
                debug!("Light {:?} disappeared mid-fade, dropping its fade", light);
                summary.aborted += 1;
                return false;
            };

            let step = task.step(current, dt);
            if !scene.set_intensity(*light, step.value) {
                summary.aborted += 1;
                return false;
            }

            summary.advanced += 1;
            if step.finished {
                summary.completed += 1;
            }
            !step.finished
        });

        summary
    }
}
