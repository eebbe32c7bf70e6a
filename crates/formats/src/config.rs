use foundation::bounds::GeoRect;
use foundation::math::Geodetic;
use serde::Deserialize;

/// Camera altitude used when a `home` entry omits `height`.
pub const DEFAULT_HOME_HEIGHT_M: f64 = 50_000.0;

/// Initial camera framing read from `config.json`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Home {
    /// Look straight down at this position.
    Position(Geodetic),
    /// Fit this rectangle into the viewport.
    Rect(GeoRect),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    home: Option<HomePosition>,
    #[serde(default)]
    home_rect: Option<HomeRect>,
}

#[derive(Debug, Deserialize)]
struct HomePosition {
    longitude: f64,
    latitude: f64,
    #[serde(default = "default_home_height")]
    height: f64,
}

/// Radians, as the data pipeline writes them.
#[derive(Debug, Deserialize)]
struct HomeRect {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

fn default_home_height() -> f64 {
    DEFAULT_HOME_HEIGHT_M
}

/// Parses the viewer config.
///
/// `home` wins over `home_rect` when both are present. A config with neither
/// yields `Ok(None)` and the camera keeps its default view.
pub fn parse_home(payload: &str) -> Result<Option<Home>, ConfigError> {
    let file: ConfigFile = serde_json::from_str(payload)?;

    if let Some(h) = file.home {
        if !(-90.0..=90.0).contains(&h.latitude) {
            return Err(ConfigError::InvalidValue {
                name: "home.latitude".to_string(),
                value: h.latitude.to_string(),
            });
        }
        return Ok(Some(Home::Position(Geodetic::from_degrees(
            h.longitude,
            h.latitude,
            h.height,
        ))));
    }

    if let Some(r) = file.home_rect {
        if r.south > r.north {
            return Err(ConfigError::InvalidValue {
                name: "home_rect".to_string(),
                value: format!("south {} > north {}", r.south, r.north),
            });
        }
        return Ok(Some(Home::Rect(GeoRect::new(r.west, r.south, r.east, r.north))));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DEFAULT_HOME_HEIGHT_M, Home, parse_home};
    use foundation::bounds::GeoRect;

    #[test]
    fn parses_home_rect_in_radians() {
        let payload = r#"{"home_rect": {"west": 0.2, "south": 1.0, "east": 0.3, "north": 1.1}}"#;
        let home = parse_home(payload).expect("parse");
        assert_eq!(home, Some(Home::Rect(GeoRect::new(0.2, 1.0, 0.3, 1.1))));
    }

    #[test]
    fn parses_home_position_with_default_height() {
        let payload = r#"{"home": {"longitude": 13.862629, "latitude": 60.050526}}"#;
        let Some(Home::Position(geo)) = parse_home(payload).expect("parse") else {
            panic!("expected home position");
        };
        assert!((geo.lat_deg() - 60.050526).abs() < 1e-9);
        assert_eq!(geo.alt_m, DEFAULT_HOME_HEIGHT_M);
    }

    #[test]
    fn home_position_wins_over_rect() {
        let payload = r#"{
            "home": {"longitude": 1.0, "latitude": 2.0, "height": 300.0},
            "home_rect": {"west": 0.2, "south": 1.0, "east": 0.3, "north": 1.1}
        }"#;
        assert!(matches!(
            parse_home(payload).expect("parse"),
            Some(Home::Position(_))
        ));
    }

    #[test]
    fn empty_config_has_no_home() {
        assert_eq!(parse_home("{}").expect("parse"), None);
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(matches!(parse_home("not json"), Err(ConfigError::Json(_))));
        assert!(matches!(
            parse_home(r#"{"home": {"longitude": 1.0, "latitude": 120.0}}"#),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
