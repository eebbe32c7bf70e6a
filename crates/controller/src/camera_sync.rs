//! Relative camera framing for entity selection.
//!
//! Consecutive selections keep the camera's offset from the ground, so moving
//! from one photo to the next pans the view instead of re-framing it.

use foundation::math::{Ecef, Vec3, ecef_to_geodetic, geodetic_to_ecef};
use formats::config::Home;
use scene::entity::Entity;
use scene::world::World;
use tracing::debug;

use crate::config::SyncConfig;
use crate::host::{Camera, Destination, Flight, Globe, Orientation};
use crate::state::SelectionState;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraSync {
    fly_duration_s: f64,
    change_threshold: f64,
}

impl Default for CameraSync {
    fn default() -> Self {
        Self::new(&SyncConfig::default())
    }
}

impl CameraSync {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            fly_duration_s: config.fly_duration_s,
            change_threshold: config.camera_change_threshold,
        }
    }

    /// Flies the camera so `entity` sits where the previous reference sat.
    ///
    /// Returns the issued flight, or `None` when the entity has no position
    /// (the camera is not touched in that case).
    pub fn fly_to_entity(
        &self,
        state: &mut SelectionState,
        world: &World,
        entity: &Entity,
        camera: &mut dyn Camera,
        globe: &dyn Globe,
    ) -> Option<Flight> {
        let target = entity.position()?;

        if state.flying {
            camera.complete_flight();
        }

        let reference = self.reference_point(state, world, camera, globe);
        let offset = camera.position() - reference;
        let destination = ground_corrected(target, globe) + offset;

        let current = camera.orientation();
        let flight = Flight {
            destination: Destination::Point(destination),
            orientation: Some(Orientation::new(current.heading_rad, current.pitch_rad, 0.0)),
            duration_s: self.fly_duration_s,
        };

        state.flying = true;
        state.last_selected = Some(entity.id().clone());
        debug!(entity = %entity.id(), "camera fly-to");
        camera.fly_to(flight);
        Some(flight)
    }

    /// Ground point the current camera offset is measured from.
    fn reference_point(
        &self,
        state: &SelectionState,
        world: &World,
        camera: &dyn Camera,
        globe: &dyn Globe,
    ) -> Vec3 {
        let previous = state
            .last_selected
            .as_ref()
            .and_then(|id| world.get(id))
            .and_then(Entity::position);
        if let Some(pos) = previous {
            return ground_corrected(pos, globe);
        }
        globe
            .pick_ground(camera.center_ray())
            .unwrap_or_else(|| ground_corrected(camera.position(), globe))
    }

    /// Manual camera movement. Returns `true` if the framing reference was dropped.
    pub fn on_camera_changed(&self, state: &mut SelectionState, fraction: f64) -> bool {
        if state.flying || fraction <= self.change_threshold {
            return false;
        }
        let had_reference = state.last_selected.take().is_some();
        if had_reference {
            debug!(fraction, "camera moved by user; framing reference reset");
        }
        had_reference
    }

    pub fn on_move_end(&self, state: &mut SelectionState) {
        state.flying = false;
    }

    pub fn reset_reference(&self, state: &mut SelectionState) {
        state.last_selected = None;
    }

    pub fn fly_home(&self, camera: &mut dyn Camera, home: Home) -> Flight {
        let flight = match home {
            Home::Position(geo) => Flight {
                destination: Destination::Point(geodetic_to_ecef(geo).into()),
                orientation: Some(Orientation::looking_down()),
                duration_s: self.fly_duration_s,
            },
            Home::Rect(rect) => Flight {
                destination: Destination::Rect(rect),
                orientation: None,
                duration_s: self.fly_duration_s,
            },
        };
        camera.fly_to(flight);
        flight
    }
}

/// `pos` moved vertically onto the terrain surface. Unknown terrain clamps to
/// the ellipsoid.
pub fn ground_corrected(pos: Vec3, globe: &dyn Globe) -> Vec3 {
    let geo = ecef_to_geodetic(Ecef::from(pos));
    let height = globe.terrain_height_at(geo.lat_rad, geo.lon_rad).unwrap_or(0.0);
    geodetic_to_ecef(geo.with_alt(height)).into()
}
