use foundation::math::{Geodetic, geodetic_to_ecef};
use scene::World;
use scene::components::{EntityProperties, MarkerSymbol, PoiProperties};
use scene::entity::{Entity, EntityKind};
use serde_json::Value;

use crate::czml::str_prop;

#[derive(Debug, thiserror::Error)]
pub enum GeoJsonError {
    #[error("GeoJSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected GeoJSON FeatureCollection")]
    NotAFeatureCollection,
    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
}

/// Adds the Point features of a POI FeatureCollection to `world`.
///
/// Features become `poi_<n>` entities numbered by their position in the
/// collection. Non-point geometries are skipped with a warning. Returns the
/// number of POIs added.
pub fn load_pois(payload: &str, world: &mut World) -> Result<usize, GeoJsonError> {
    let value: Value = serde_json::from_str(payload)?;
    let obj = value.as_object().ok_or(GeoJsonError::NotAFeatureCollection)?;
    if obj.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(GeoJsonError::NotAFeatureCollection);
    }
    let features = obj
        .get("features")
        .and_then(Value::as_array)
        .ok_or(GeoJsonError::NotAFeatureCollection)?;

    let mut count = 0usize;
    for (index, feature) in features.iter().enumerate() {
        let invalid = |reason: &str| GeoJsonError::InvalidFeature {
            index,
            reason: reason.to_string(),
        };

        let feature = feature
            .as_object()
            .ok_or_else(|| invalid("feature must be an object"))?;
        let geometry = feature
            .get("geometry")
            .and_then(Value::as_object)
            .ok_or_else(|| invalid("feature missing geometry"))?;

        if geometry.get("type").and_then(Value::as_str) != Some("Point") {
            tracing::warn!(index, "skipping non-point POI feature");
            continue;
        }
        let coords = geometry
            .get("coordinates")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("point missing coordinates"))?;
        let lon = coords.first().and_then(Value::as_f64);
        let lat = coords.get(1).and_then(Value::as_f64);
        let (Some(lon), Some(lat)) = (lon, lat) else {
            return Err(invalid("point coordinates must be numbers"));
        };
        let height = coords.get(2).and_then(Value::as_f64).unwrap_or(0.0);

        let props = feature
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let label = str_prop(&props, "name")
            .or_else(|| str_prop(&props, "label"))
            .unwrap_or_default();
        let symbol = str_prop(&props, "symbol").and_then(|s| MarkerSymbol::parse(&s));

        let position = geodetic_to_ecef(Geodetic::from_degrees(lon, lat, height)).into();
        let id = format!("{}{index}", EntityKind::POI_PREFIX);
        let entity = Entity::new(
            id,
            Some(position),
            EntityProperties::Poi(PoiProperties {
                label: label.clone(),
                symbol,
            }),
        )
        .with_name(label);
        world.insert(entity);
        count += 1;
    }

    tracing::debug!(count, "loaded points of interest");
    Ok(count)
}
