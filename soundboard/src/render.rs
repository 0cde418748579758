//! In-memory renderer.

use std::collections::{BTreeMap, BTreeSet};

use strum::IntoEnumIterator;

use crate::host::{Marker, Renderer, Surface};

/// Records the markers of every surface.
///
/// Views read it back to build class lists, so the classes rendered are
/// exactly the ones the controller asked for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassBook {
    markers: BTreeMap<Surface, BTreeSet<Marker>>,
}

impl ClassBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, surface: &Surface, marker: Marker) -> bool {
        self.markers
            .get(surface)
            .map_or(false, |markers| markers.contains(&marker))
    }

    /// Surfaces carrying `marker`.
    pub fn surfaces_with(&self, marker: Marker) -> Vec<&Surface> {
        self.markers
            .iter()
            .filter(|(_, markers)| markers.contains(&marker))
            .map(|(surface, _)| surface)
            .collect()
    }

    /// Class names of a surface, appended to its static classes.
    pub fn classes<'a>(&self, surface: &Surface, base: &[&'a str]) -> Vec<&'a str> {
        let mut classes = base.to_vec();
        if let Some(markers) = self.markers.get(surface) {
            for marker in Marker::iter().filter(|marker| markers.contains(marker)) {
                classes.push(marker.class_name());
            }
        }
        classes
    }
}

impl Renderer for ClassBook {
    fn add_marker(&mut self, surface: &Surface, marker: Marker) {
        self.markers
            .entry(surface.clone())
            .or_insert_with(BTreeSet::new)
            .insert(marker);
    }

    fn remove_marker(&mut self, surface: &Surface, marker: Marker) {
        if let Some(markers) = self.markers.get_mut(surface) {
            markers.remove(&marker);
            if markers.is_empty() {
                self.markers.remove(surface);
            }
        }
    }

    fn clear_marker(&mut self, marker: Marker) {
        for markers in self.markers.values_mut() {
            markers.remove(&marker);
        }
        self.markers.retain(|_, markers| !markers.is_empty());
    }
}
