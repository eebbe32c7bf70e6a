use foundation::time::{Time, format_hms};
use scene::components::{EntityProperties, TrackProperties};
use scene::entity::{Entity, EntityKind};

const MISSING: &str = "-";

/// What the info panel displays for a selected entity.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// Image with caption; the metadata table is hidden.
    Photo { src: String, caption: String },
    /// Metadata table; the image is hidden.
    Track(TrackTable),
    Poi { label: String },
}

impl PanelContent {
    pub fn shows_image(&self) -> bool {
        matches!(self, PanelContent::Photo { .. })
    }

    pub fn shows_table(&self) -> bool {
        matches!(self, PanelContent::Track(_))
    }
}

/// Fixed-schema track statistics, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackTable {
    pub rows: Vec<(&'static str, String)>,
}

impl TrackTable {
    pub fn from_properties(props: &TrackProperties) -> Self {
        let duration = props.duration_s.or_else(|| match (props.start_time, props.end_time) {
            (Some(start), Some(end)) => Some(end.seconds_since(start)),
            _ => None,
        });
        Self {
            rows: vec![
                ("Start", time_cell(props.start_time)),
                ("End", time_cell(props.end_time)),
                ("Duration", duration.map(format_hms).unwrap_or_else(missing)),
                ("Distance", props.length_2d_m.map(km).unwrap_or_else(missing)),
                ("Ascent", props.ascent_m.map(meters).unwrap_or_else(missing)),
                ("Descent", props.descent_m.map(meters).unwrap_or_else(missing)),
                ("Min elevation", props.min_elevation_m.map(meters).unwrap_or_else(missing)),
                ("Max elevation", props.max_elevation_m.map(meters).unwrap_or_else(missing)),
            ],
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// Panel content for `entity`, or `None` for kinds the panel does not show.
pub fn render(entity: &Entity) -> Option<PanelContent> {
    match (entity.kind(), entity.properties()) {
        (EntityKind::Photo, props) => {
            let src = match props {
                EntityProperties::Photo(p) => p.src.clone(),
                _ => String::new(),
            };
            let caption = entity.name().unwrap_or(entity.id().as_str()).to_string();
            Some(PanelContent::Photo { src, caption })
        }
        (EntityKind::Track, EntityProperties::Track(props)) => {
            Some(PanelContent::Track(TrackTable::from_properties(props)))
        }
        (EntityKind::Track, _) => Some(PanelContent::Track(TrackTable::from_properties(
            &TrackProperties::default(),
        ))),
        (EntityKind::Poi, props) => {
            let label = match props {
                EntityProperties::Poi(p) if !p.label.is_empty() => p.label.clone(),
                _ => entity.name().unwrap_or(entity.id().as_str()).to_string(),
            };
            Some(PanelContent::Poi { label })
        }
        (EntityKind::Marker, _) => None,
    }
}

fn missing() -> String {
    MISSING.to_string()
}

fn time_cell(time: Option<Time>) -> String {
    time.and_then(Time::to_iso8601).unwrap_or_else(missing)
}

fn km(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

fn meters(value: f64) -> String {
    format!("{value:.0} m")
}
