//! Product annotations anchored to world positions.
//!
//! The registry holds a static catalog plus a single-selection state. It is
//! read by renderers and UI and never touches the camera pose.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, CameraPose};

/// A world-anchored annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Unique id.
    pub id: String,
    /// Anchor in world space.
    pub position: Vec3,
    /// Heading shown in the popup.
    pub title: String,
    /// Body text shown in the popup.
    pub description: String,
    /// Marker glyph.
    pub icon: String,
}

impl Hotspot {
    /// Create a hotspot.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        position: Vec3,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
        }
    }
}

/// A hotspot's marker position on screen for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedHotspot<'a> {
    /// The hotspot.
    pub hotspot: &'a Hotspot,
    /// Pixel position, origin top-left.
    pub screen: Vec2,
    /// Whether this hotspot is the active selection.
    pub active: bool,
}

/// Static hotspot catalog with at most one active selection.
#[derive(Debug, Clone, Default)]
pub struct HotspotRegistry {
    hotspots: Vec<Hotspot>,
    /// Index into `hotspots`.
    active: Option<usize>,
}

impl HotspotRegistry {
    /// Create a registry over `hotspots` with nothing selected.
    ///
    /// Later duplicates of an id are dropped.
    #[must_use]
    pub fn new(hotspots: Vec<Hotspot>) -> Self {
        let mut unique: Vec<Hotspot> = Vec::with_capacity(hotspots.len());
        for hotspot in hotspots {
            if unique.iter().any(|h| h.id == hotspot.id) {
                log::warn!("duplicate hotspot id '{}' ignored", hotspot.id);
            } else {
                unique.push(hotspot);
            }
        }
        Self {
            hotspots: unique,
            active: None,
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.hotspots.iter().position(|h| h.id == id)
    }

    /// Toggle selection of `id`.
    ///
    /// Selecting the active hotspot clears it; selecting another replaces
    /// it. Unknown ids leave the selection unchanged. Returns the active
    /// hotspot afterwards.
    pub fn select(&mut self, id: &str) -> Option<&Hotspot> {
        match self.index_of(id) {
            Some(index) if self.active == Some(index) => self.active = None,
            Some(index) => self.active = Some(index),
            None => log::debug!("select of unknown hotspot '{id}' ignored"),
        }
        self.active()
    }

    /// Deselect whatever is active.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// The active hotspot, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Hotspot> {
        self.active.and_then(|i| self.hotspots.get(i))
    }

    /// Id of the active hotspot, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active().map(|h| h.id.as_str())
    }

    /// Look up a hotspot by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Hotspot> {
        self.index_of(id).and_then(|i| self.hotspots.get(i))
    }

    /// All hotspots in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Hotspot> {
        self.hotspots.iter()
    }

    /// Number of hotspots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }

    /// Screen positions of every hotspot visible from `pose`.
    ///
    /// Hotspots behind the camera are omitted.
    #[must_use]
    pub fn project(
        &self,
        camera: &Camera,
        pose: &CameraPose,
        viewport: Vec2,
    ) -> Vec<ProjectedHotspot<'_>> {
        self.hotspots
            .iter()
            .enumerate()
            .filter_map(|(i, hotspot)| {
                let screen = camera.project(pose, hotspot.position, viewport)?;
                Some(ProjectedHotspot {
                    hotspot,
                    screen,
                    active: self.active == Some(i),
                })
            })
            .collect()
    }
}

/// The default product catalog.
#[must_use]
pub fn default_catalog() -> Vec<Hotspot> {
    vec![
        Hotspot::new(
            "front-wing",
            Vec3::new(0.0, 0.3, 2.8),
            "Front Wing Assembly",
            "Multi-element carbon fiber aerodynamic package generating up \
             to 25% of total downforce. Features adjustable flap angles, \
             cascade elements, and endplates optimized through 60+ wind \
             tunnel sessions. Weight: approximately 10kg with mounting \
             hardware.",
            "▲",
        ),
        Hotspot::new(
            "halo",
            Vec3::new(0.0, 1.2, 0.3),
            "Halo Protection System",
            "FIA-mandated Grade 5 Titanium safety structure capable of \
             withstanding 116kN (12 tonnes) of static load. Weighs 9kg and \
             has saved multiple lives since its 2018 introduction. \
             Integrated mounting points are stressed members of the chassis.",
            "◆",
        ),
        Hotspot::new(
            "engine-cover",
            Vec3::new(0.0, 0.8, -1.2),
            "Power Unit Bay",
            "1.6L V6 Turbo Hybrid Power Unit producing 1,000+ combined \
             horsepower. Features MGU-K (kinetic) and MGU-H (heat) energy \
             recovery systems. Thermal efficiency exceeds 50%, the most \
             efficient internal combustion engines ever built. RPM limited \
             to 15,000.",
            "●",
        ),
        Hotspot::new(
            "rear-wing",
            Vec3::new(0.0, 1.0, -2.5),
            "Rear Wing & DRS",
            "Drag Reduction System (DRS) enables the rear flap to open \
             within designated zones, reducing drag by up to 20%. Generates \
             300-350kg of downforce at 250 km/h. Carbon fiber construction \
             with titanium mounting bolts. Actuator responds in under 0.1 \
             seconds.",
            "▼",
        ),
        Hotspot::new(
            "sidepod",
            Vec3::new(1.2, 0.6, -0.3),
            "Sidepod & Cooling",
            "Houses radiators managing 140kW of heat rejection. 2022 ground \
             effect regulations revolutionized sidepod design for \
             floor-generated downforce. Internal baffles direct airflow at \
             precise angles. Inlet design critical for balancing cooling \
             efficiency and aerodynamic drag.",
            "◀",
        ),
    ]
}
