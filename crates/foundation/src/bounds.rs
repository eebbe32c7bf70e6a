/// Geographic rectangle in radians, the shape of the pipeline's `home_rect`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoRect {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoRect {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    pub fn from_degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self::new(
            west.to_radians(),
            south.to_radians(),
            east.to_radians(),
            north.to_radians(),
        )
    }

    /// Center as `(lat_rad, lon_rad)`. Handles rectangles crossing the antimeridian.
    pub fn center(&self) -> (f64, f64) {
        let mut east = self.east;
        if east < self.west {
            east += std::f64::consts::TAU;
        }
        let mut lon = 0.5 * (self.west + east);
        if lon > std::f64::consts::PI {
            lon -= std::f64::consts::TAU;
        }
        (0.5 * (self.south + self.north), lon)
    }
}
