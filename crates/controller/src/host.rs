//! Capabilities the controller consumes from the render engine and the page.

use foundation::bounds::GeoRect;
use foundation::math::Vec3;
use foundation::time::Time;
use scene::entity::EntityId;
use scene::picking::Ray;

use crate::info_panel::PanelContent;

/// Camera attitude relative to the local east-north-up frame at the camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orientation {
    pub heading_rad: f64,
    pub pitch_rad: f64,
    pub roll_rad: f64,
}

impl Orientation {
    pub fn new(heading_rad: f64, pitch_rad: f64, roll_rad: f64) -> Self {
        Self {
            heading_rad,
            pitch_rad,
            roll_rad,
        }
    }

    /// North-up, looking straight down.
    pub fn looking_down() -> Self {
        Self::new(0.0, -std::f64::consts::FRAC_PI_2, 0.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Destination {
    /// Camera eye position (ECEF).
    Point(Vec3),
    /// Fit a geographic rectangle.
    Rect(GeoRect),
}

/// An animated camera transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Flight {
    pub destination: Destination,
    /// `None` lets the engine pick its default view.
    pub orientation: Option<Orientation>,
    pub duration_s: f64,
}

pub trait Camera {
    /// Eye position (ECEF).
    fn position(&self) -> Vec3;
    fn orientation(&self) -> Orientation;
    /// Ray from the eye through the center of the viewport.
    fn center_ray(&self) -> Ray;
    /// Starts a transition. The engine reports its end through
    /// [`crate::Viewer::on_camera_move_end`].
    fn fly_to(&mut self, flight: Flight);
    /// Jumps an in-flight transition to its destination. No-op when idle.
    fn complete_flight(&mut self);
}

pub trait Globe {
    /// Terrain height (meters above the ellipsoid), `None` when not loaded.
    fn terrain_height_at(&self, lat_rad: f64, lon_rad: f64) -> Option<f64>;
    /// First terrain intersection along `ray`.
    fn pick_ground(&self, ray: Ray) -> Option<Vec3>;
}

/// The animation clock driving the time slider.
pub trait Clock {
    fn current_time(&self) -> Time;
    fn set_current_time(&mut self, time: Time);
    /// `true` while playback is running.
    fn should_animate(&self) -> bool;
}

pub trait Filmstrip {
    /// Scrolls the strip so `id` is visible. Does not select it.
    fn scroll_to(&mut self, id: &EntityId);
}

pub trait InfoPanel {
    fn show(&mut self, content: PanelContent);
    fn hide(&mut self);
}

/// Simultaneous borrows of every collaborator for one event reaction.
pub struct HostParts<'a> {
    pub camera: &'a mut dyn Camera,
    pub globe: &'a dyn Globe,
    pub clock: &'a mut dyn Clock,
    pub filmstrip: &'a mut dyn Filmstrip,
    pub panel: &'a mut dyn InfoPanel,
}

/// The surface a [`crate::Viewer`] drives.
pub trait Host {
    fn parts(&mut self) -> HostParts<'_>;
}
