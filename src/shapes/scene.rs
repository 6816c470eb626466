//! Scene - composition of multiple generators
//!
//! A Scene owns an ordered set of generators and rasterizes their union.
//! It listens to every generator's change emitter and only re-rasterizes
//! when something actually changed.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::ShapeError;
use crate::render::{rasterize, Raster};

use super::controls::{Control, ControlValue};
use super::events::Subscription;
use super::traits::{BoxedGenerator, ShapeGenerator};

/// A generator entry in the scene
pub struct SceneEntry {
    name: String,
    generator: BoxedGenerator,
    /// Our listener on the generator's change emitter
    subscription: Subscription,
    enabled: bool,
}

impl SceneEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generator(&self) -> &dyn ShapeGenerator {
        self.generator.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// A set of generators rendered together
pub struct Scene {
    name: String,
    entries: Vec<SceneEntry>,
    /// Set by generator change notifications, cleared by `refresh`
    dirty: Rc<Cell<bool>>,
    raster: Option<Raster>,
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            dirty: Rc::new(Cell::new(true)),
            raster: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a generator to the scene
    pub fn add<G: ShapeGenerator + 'static>(
        &mut self,
        name: impl Into<String>,
        generator: G,
    ) -> &mut Self {
        self.add_boxed(name, Box::new(generator))
    }

    /// Add an already boxed generator
    pub fn add_boxed(&mut self, name: impl Into<String>, generator: BoxedGenerator) -> &mut Self {
        let dirty = Rc::clone(&self.dirty);
        let subscription = generator.change_emitter().subscribe(move || dirty.set(true));

        self.entries.push(SceneEntry {
            name: name.into(),
            generator,
            subscription,
            enabled: true,
        });
        self.dirty.set(true);
        self
    }

    /// Remove a generator by index, detaching it from the scene
    pub fn remove(&mut self, index: usize) -> Option<BoxedGenerator> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        entry.generator.change_emitter().unsubscribe(entry.subscription);
        self.dirty.set(true);
        Some(entry.generator)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SceneEntry> {
        self.entries.get(index)
    }

    /// Index of the first entry called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneEntry> {
        self.entries.iter()
    }

    /// Include or exclude a generator from rendering
    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(entry) = self.entries.get_mut(index) {
            if entry.enabled != enabled {
                entry.enabled = enabled;
                self.dirty.set(true);
            }
        }
    }

    /// The controls of the generator at `index`
    pub fn controls(&self, index: usize) -> Result<Vec<Control>, ShapeError> {
        self.entries
            .get(index)
            .map(|e| e.generator.controls())
            .ok_or(ShapeError::UnknownGenerator(index))
    }

    /// Forward a control edit to the generator at `index`
    pub fn apply_control(
        &mut self,
        index: usize,
        label: &str,
        value: ControlValue,
    ) -> Result<(), ShapeError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(ShapeError::UnknownGenerator(index))?;
        entry.generator.apply_control(label, value)
    }

    /// Whether a change is waiting to be rendered
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Rasterize every enabled generator
    pub fn rasterize(&self) -> Result<Raster, ShapeError> {
        rasterize(
            self.entries
                .iter()
                .filter(|e| e.enabled)
                .map(|e| &*e.generator),
        )
    }

    /// Re-rasterize if anything changed since the last pass
    ///
    /// Change notifications only raise a flag, so a generator that fires
    /// while a pass is running cannot start another pass.
    pub fn refresh(&mut self) -> Result<&Raster, ShapeError> {
        if self.dirty.get() || self.raster.is_none() {
            let raster = self.rasterize()?;
            log::info!("Scene '{}': {}", self.name, raster.stats());
            self.raster = Some(raster);
            self.dirty.set(false);
        }
        self.raster.as_ref().ok_or(ShapeError::EmptyBounds)
    }

    /// The most recent raster, if any
    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Star};

    #[test]
    fn test_empty_scene() {
        let mut scene = Scene::new("Empty");
        assert!(scene.is_empty());
        assert_eq!(scene.refresh().err(), Some(ShapeError::EmptyBounds));
    }

    #[test]
    fn test_refresh_only_when_dirty() {
        let mut scene = Scene::new("Single");
        scene.add("circle", Circle::with_params(20.0, 2.0));
        assert!(scene.is_dirty());

        let first = scene.refresh().unwrap().clone();
        assert!(!scene.is_dirty());
        assert_eq!(scene.refresh().unwrap(), &first);

        scene
            .apply_control(0, "size", ControlValue::Number(30.0))
            .unwrap();
        assert!(scene.is_dirty());

        let second = scene.refresh().unwrap();
        assert_eq!(second.width(), 30);
        assert_ne!(second.filled_count(), first.filled_count());
    }

    #[test]
    fn test_multiple_generators() {
        let mut scene = Scene::new("Multi");
        scene
            .add("circle", Circle::with_params(20.0, 1.0))
            .add("star", Star::with_params(40.0, 1.0, 5));

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.position("star"), Some(1));

        let raster = scene.refresh().unwrap();
        assert_eq!(raster.width(), 40);
        assert_eq!(raster.height(), 40);
    }

    #[test]
    fn test_disable_excludes_generator() {
        let mut scene = Scene::new("Toggle");
        scene
            .add("circle", Circle::with_params(20.0, 1.0))
            .add("star", Star::with_params(40.0, 1.0, 5));

        let both = scene.refresh().unwrap().filled_count();
        scene.set_enabled(1, false);
        assert!(scene.is_dirty());

        let ring_only = scene.refresh().unwrap();
        assert_eq!(ring_only.width(), 20);
        assert!(ring_only.filled_count() < both);
    }

    #[test]
    fn test_remove_detaches_listener() {
        let mut scene = Scene::new("Remove");
        scene.add("circle", Circle::with_params(10.0, 1.0));
        scene.refresh().unwrap();

        let mut circle = scene.remove(0).unwrap();
        assert!(circle.change_emitter().is_empty());
        assert!(scene.remove(0).is_none());

        scene.add("star", Star::with_params(10.0, 1.0, 5));
        scene.refresh().unwrap();

        // Editing the detached circle no longer dirties the scene
        circle
            .apply_control("size", ControlValue::Number(12.0))
            .unwrap();
        assert!(!scene.is_dirty());
    }

    #[test]
    fn test_unknown_generator() {
        let mut scene = Scene::new("Bad index");
        assert_eq!(
            scene.apply_control(3, "size", ControlValue::Number(1.0)),
            Err(ShapeError::UnknownGenerator(3))
        );
        assert!(scene.controls(0).is_err());
    }
}
