use foundation::time::Time;

/// Kind-specific property bag attached to an entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EntityProperties {
    #[default]
    None,
    Photo(PhotoProperties),
    Track(TrackProperties),
    Poi(PoiProperties),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhotoProperties {
    /// Image path relative to the data root.
    pub src: String,
    pub time: Option<Time>,
}

/// Statistics the data pipeline computes per GPX track.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackProperties {
    pub source: Option<String>,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub duration_s: Option<f64>,
    pub length_2d_m: Option<f64>,
    pub ascent_m: Option<f64>,
    pub descent_m: Option<f64>,
    pub min_elevation_m: Option<f64>,
    pub max_elevation_m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoiProperties {
    pub label: String,
    pub symbol: Option<MarkerSymbol>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerSymbol {
    Tent,
    Mountain,
}

impl MarkerSymbol {
    /// Unknown symbols are logged and dropped; the POI keeps its default pin.
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "tent" => Some(MarkerSymbol::Tent),
            "mountain" => Some(MarkerSymbol::Mountain),
            other => {
                tracing::warn!(symbol = other, "marker not found");
                None
            }
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            MarkerSymbol::Tent => "images/marker_tent.svg",
            MarkerSymbol::Mountain => "images/marker_mountain.svg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MarkerSymbol;

    #[test]
    fn known_symbols_resolve_to_icons() {
        assert_eq!(MarkerSymbol::parse("tent"), Some(MarkerSymbol::Tent));
        assert_eq!(
            MarkerSymbol::parse("mountain").map(MarkerSymbol::icon),
            Some("images/marker_mountain.svg")
        );
    }

    #[test]
    fn unknown_symbol_is_dropped() {
        assert_eq!(MarkerSymbol::parse("castle"), None);
        assert_eq!(MarkerSymbol::parse(""), None);
    }
}
