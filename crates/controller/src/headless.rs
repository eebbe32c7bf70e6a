//! In-memory host used by the `travelmap` tool and by scenario tests.
//!
//! Flights do not animate: a fly-to stays pending until
//! [`HeadlessCamera::finish_flight`] or [`Camera::complete_flight`] jumps the
//! camera to its destination.

use foundation::bounds::GeoRect;
use foundation::math::{Ecef, Geodetic, Vec3, WGS84_A, ecef_to_geodetic, geodetic_to_ecef};
use foundation::time::Time;
use scene::entity::EntityId;
use scene::picking::{Ray, pick_ellipsoid};

use crate::host::{Camera, Clock, Destination, Filmstrip, Flight, Globe, Host, HostParts, InfoPanel, Orientation};
use crate::info_panel::PanelContent;

#[derive(Debug, Clone)]
pub struct HeadlessCamera {
    position: Vec3,
    orientation: Orientation,
    pending: Option<Flight>,
    flights: Vec<Flight>,
    completed: usize,
}

impl HeadlessCamera {
    pub fn new(position: Vec3, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
            pending: None,
            flights: Vec::new(),
            completed: 0,
        }
    }

    /// Looking straight down from `geo`.
    pub fn above(geo: Geodetic) -> Self {
        Self::new(geodetic_to_ecef(geo).into(), Orientation::looking_down())
    }

    pub fn set_pose(&mut self, position: Vec3, orientation: Orientation) {
        self.position = position;
        self.orientation = orientation;
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn last_flight(&self) -> Option<&Flight> {
        self.flights.last()
    }

    /// Flights cut short by a later fly-to.
    pub fn completed_flights(&self) -> usize {
        self.completed
    }

    pub fn is_flying(&self) -> bool {
        self.pending.is_some()
    }

    /// Lands the pending flight. Returns `false` if none was in progress.
    pub fn finish_flight(&mut self) -> bool {
        match self.pending.take() {
            Some(flight) => {
                self.land(flight);
                true
            }
            None => false,
        }
    }

    fn land(&mut self, flight: Flight) {
        match flight.destination {
            Destination::Point(p) => {
                self.position = p;
                if let Some(o) = flight.orientation {
                    self.orientation = o;
                }
            }
            Destination::Rect(rect) => {
                self.position = rect_viewpoint(&rect);
                self.orientation = flight.orientation.unwrap_or_else(Orientation::looking_down);
            }
        }
    }
}

impl Camera for HeadlessCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn center_ray(&self) -> Ray {
        let geo = ecef_to_geodetic(Ecef::from(self.position));
        let (sin_lat, cos_lat) = geo.lat_rad.sin_cos();
        let (sin_lon, cos_lon) = geo.lon_rad.sin_cos();
        let east = Vec3::new(-sin_lon, cos_lon, 0.0);
        let north = Vec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
        let up = Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

        let Orientation {
            heading_rad,
            pitch_rad,
            ..
        } = self.orientation;
        let horizontal = east.scale(heading_rad.sin()) + north.scale(heading_rad.cos());
        let dir = horizontal.scale(pitch_rad.cos()) + up.scale(pitch_rad.sin());
        Ray::new(self.position, dir)
    }

    fn fly_to(&mut self, flight: Flight) {
        self.pending = Some(flight);
        self.flights.push(flight);
    }

    fn complete_flight(&mut self) {
        if self.finish_flight() {
            self.completed += 1;
        }
    }
}

/// Eye point high enough to see the whole rectangle.
fn rect_viewpoint(rect: &GeoRect) -> Vec3 {
    let (lat, lon) = rect.center();
    let mut width = rect.east - rect.west;
    if width < 0.0 {
        width += std::f64::consts::TAU;
    }
    let extent = (rect.north - rect.south).max(width * lat.cos());
    geodetic_to_ecef(Geodetic::new(lat, lon, extent * WGS84_A)).into()
}

/// Smooth ellipsoid with optional uniform terrain height.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessGlobe {
    pub terrain_height_m: Option<f64>,
}

impl Globe for HeadlessGlobe {
    fn terrain_height_at(&self, _lat_rad: f64, _lon_rad: f64) -> Option<f64> {
        self.terrain_height_m
    }

    fn pick_ground(&self, ray: Ray) -> Option<Vec3> {
        pick_ellipsoid(ray, self.terrain_height_m.unwrap_or(0.0)).map(|hit| hit.point)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HeadlessClock {
    pub time: Time,
    pub animating: bool,
}

impl HeadlessClock {
    pub fn new(time: Time) -> Self {
        Self {
            time,
            animating: false,
        }
    }
}

impl Clock for HeadlessClock {
    fn current_time(&self) -> Time {
        self.time
    }

    fn set_current_time(&mut self, time: Time) {
        self.time = time;
    }

    fn should_animate(&self) -> bool {
        self.animating
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingFilmstrip {
    pub scrolled: Vec<EntityId>,
}

impl RecordingFilmstrip {
    pub fn last(&self) -> Option<&EntityId> {
        self.scrolled.last()
    }
}

impl Filmstrip for RecordingFilmstrip {
    fn scroll_to(&mut self, id: &EntityId) {
        self.scrolled.push(id.clone());
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingPanel {
    pub content: Option<PanelContent>,
    pub visible: bool,
}

impl InfoPanel for RecordingPanel {
    fn show(&mut self, content: PanelContent) {
        self.content = Some(content);
        self.visible = true;
    }

    fn hide(&mut self) {
        self.content = None;
        self.visible = false;
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessHost {
    pub camera: HeadlessCamera,
    pub globe: HeadlessGlobe,
    pub clock: HeadlessClock,
    pub filmstrip: RecordingFilmstrip,
    pub panel: RecordingPanel,
}

impl HeadlessHost {
    pub fn new(camera: HeadlessCamera, clock_time: Time) -> Self {
        Self {
            camera,
            globe: HeadlessGlobe::default(),
            clock: HeadlessClock::new(clock_time),
            filmstrip: RecordingFilmstrip::default(),
            panel: RecordingPanel::default(),
        }
    }
}

impl Host for HeadlessHost {
    fn parts(&mut self) -> HostParts<'_> {
        HostParts {
            camera: &mut self.camera,
            globe: &self.globe,
            clock: &mut self.clock,
            filmstrip: &mut self.filmstrip,
            panel: &mut self.panel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadlessCamera, HeadlessGlobe};
    use crate::host::{Camera, Destination, Flight, Globe, Orientation};
    use foundation::bounds::GeoRect;
    use foundation::math::{Ecef, Geodetic, ecef_to_geodetic, geodetic_to_ecef};

    #[test]
    fn center_ray_looking_down_hits_ground_below() {
        let camera = HeadlessCamera::above(Geodetic::from_degrees(13.0, 60.0, 10_000.0));
        let hit = HeadlessGlobe::default()
            .pick_ground(camera.center_ray())
            .expect("hit");
        let geo = ecef_to_geodetic(Ecef::from(hit));
        assert!((geo.lat_deg() - 60.0).abs() < 1e-4);
        assert!((geo.lon_deg() - 13.0).abs() < 1e-4);
        assert!(geo.alt_m.abs() < 1.0);
    }

    #[test]
    fn horizontal_ray_misses_from_high_altitude() {
        let mut camera = HeadlessCamera::above(Geodetic::from_degrees(0.0, 0.0, 10_000_000.0));
        let pos = camera.position();
        camera.set_pose(pos, Orientation::new(0.0, 0.0, 0.0));
        assert!(HeadlessGlobe::default().pick_ground(camera.center_ray()).is_none());
    }

    #[test]
    fn complete_flight_lands_and_counts() {
        let mut camera = HeadlessCamera::above(Geodetic::from_degrees(0.0, 0.0, 1_000.0));
        let target = geodetic_to_ecef(Geodetic::from_degrees(1.0, 1.0, 500.0)).into();
        camera.fly_to(Flight {
            destination: Destination::Point(target),
            orientation: None,
            duration_s: 1.5,
        });
        assert!(camera.is_flying());
        camera.complete_flight();
        camera.complete_flight();
        assert_eq!(camera.position(), target);
        assert_eq!(camera.completed_flights(), 1);
        assert!(!camera.finish_flight());
    }

    #[test]
    fn rect_destination_centers_camera() {
        let mut camera = HeadlessCamera::above(Geodetic::from_degrees(0.0, 0.0, 1_000.0));
        camera.fly_to(Flight {
            destination: Destination::Rect(GeoRect::from_degrees(10.0, 50.0, 20.0, 60.0)),
            orientation: None,
            duration_s: 1.5,
        });
        assert!(camera.finish_flight());
        let geo = ecef_to_geodetic(Ecef::from(camera.position()));
        assert!((geo.lat_deg() - 55.0).abs() < 1e-6);
        assert!((geo.lon_deg() - 15.0).abs() < 1e-6);
        assert!(geo.alt_m > 100_000.0);
    }
}
