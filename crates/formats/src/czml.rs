//! CZML ingestion.
//!
//! Reads the packet array the data pipeline writes (`combined.czml`) into a
//! [`World`]. Only what selection needs is kept: id, name, a representative
//! position and the kind-specific properties. Styling is left to the renderer.

use foundation::math::{Geodetic, Vec3, geodetic_to_ecef};
use foundation::time::Time;
use scene::World;
use scene::components::{
    EntityProperties, MarkerSymbol, PhotoProperties, PoiProperties, TrackProperties,
};
use scene::entity::{Entity, EntityKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

pub const DOCUMENT_PACKET_ID: &str = "document";

#[derive(Debug, thiserror::Error)]
pub enum CzmlError {
    #[error("CZML JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a CZML packet array")]
    NotAPacketArray,
    #[error("invalid packet at index {index}: {reason}")]
    InvalidPacket { index: usize, reason: String },
}

/// One CZML packet. Every field decodes leniently: a malformed value becomes
/// `None` so a single bad field degrades its packet, not the document.
#[derive(Debug, Deserialize)]
struct Packet {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    position: Option<PositionPacket>,
    #[serde(default, deserialize_with = "lenient")]
    properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct PositionPacket {
    #[serde(default, deserialize_with = "lenient")]
    epoch: Option<String>,
    #[serde(default, rename = "cartographicDegrees", deserialize_with = "lenient")]
    cartographic_degrees: Option<Vec<f64>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl PositionPacket {
    /// First sample of the position, as ECEF.
    ///
    /// Time-tagged positions (`epoch` present) are `[t, lon, lat, h, ...]`,
    /// static ones `[lon, lat, h]`.
    fn first_sample(&self) -> Option<Vec3> {
        let values = self.cartographic_degrees.as_deref()?;
        let sample = if self.epoch.is_some() {
            values.get(1..4)?
        } else {
            values.get(0..3)?
        };
        let geo = Geodetic::from_degrees(sample[0], sample[1], sample[2]);
        Some(geodetic_to_ecef(geo).into())
    }
}

/// Parses a CZML document into a fresh [`World`].
pub fn load_world(payload: &str) -> Result<World, CzmlError> {
    let mut world = World::new();
    ingest(payload, &mut world)?;
    Ok(world)
}

/// Adds every entity packet of `payload` to `world`. Returns the number ingested.
///
/// The document packet and anonymous packets are skipped.
pub fn ingest(payload: &str, world: &mut World) -> Result<usize, CzmlError> {
    let value: Value = serde_json::from_str(payload)?;
    let packets = value.as_array().ok_or(CzmlError::NotAPacketArray)?;

    let mut count = 0usize;
    for (index, raw) in packets.iter().enumerate() {
        if !raw.is_object() {
            return Err(CzmlError::InvalidPacket {
                index,
                reason: "packet must be an object".to_string(),
            });
        }
        let packet: Packet =
            serde_json::from_value(raw.clone()).map_err(|e| CzmlError::InvalidPacket {
                index,
                reason: e.to_string(),
            })?;

        let Some(id) = packet.id.as_deref() else {
            tracing::warn!(index, "skipping CZML packet without id");
            continue;
        };
        if id == DOCUMENT_PACKET_ID {
            continue;
        }

        if packet.properties.is_none() && raw.get("properties").is_some_and(|v| !v.is_null()) {
            tracing::warn!(index, id, "malformed CZML properties; using defaults");
        }

        let kind = EntityKind::classify(id);
        let properties = properties_for(kind, &packet);
        let position = packet.position.as_ref().and_then(PositionPacket::first_sample);

        let mut entity = Entity::new(id, position, properties);
        if let Some(name) = packet.name.clone() {
            entity = entity.with_name(name);
        }
        world.insert(entity);
        count += 1;
    }

    tracing::debug!(count, "ingested CZML packets");
    Ok(count)
}

fn properties_for(kind: EntityKind, packet: &Packet) -> EntityProperties {
    let empty = Map::new();
    let props = packet.properties.as_ref().unwrap_or(&empty);
    match kind {
        EntityKind::Photo => EntityProperties::Photo(PhotoProperties {
            src: str_prop(props, "src").unwrap_or_default(),
            time: str_prop(props, "time").and_then(|s| Time::parse_iso8601(&s)),
        }),
        EntityKind::Track => EntityProperties::Track(TrackProperties {
            source: str_prop(props, "source").filter(|s| !s.is_empty()),
            start_time: str_prop(props, "start_time").and_then(|s| Time::parse_iso8601(&s)),
            end_time: str_prop(props, "end_time").and_then(|s| Time::parse_iso8601(&s)),
            duration_s: num_prop(props, "duration"),
            length_2d_m: num_prop(props, "length_2d"),
            ascent_m: num_prop(props, "ascent"),
            descent_m: num_prop(props, "descent"),
            min_elevation_m: num_prop(props, "min_elevation"),
            max_elevation_m: num_prop(props, "max_elevation"),
        }),
        EntityKind::Poi => EntityProperties::Poi(PoiProperties {
            label: str_prop(props, "label")
                .or_else(|| packet.name.clone())
                .unwrap_or_default(),
            symbol: str_prop(props, "symbol").and_then(|s| MarkerSymbol::parse(&s)),
        }),
        EntityKind::Marker => EntityProperties::None,
    }
}

/// Property values may be plain or wrapped in a CZML `{"string": ...}` / `{"number": ...}` object.
fn unwrap_interval<'a>(value: &'a Value, key: &str) -> &'a Value {
    value.get(key).unwrap_or(value)
}

pub(crate) fn str_prop(props: &Map<String, Value>, key: &str) -> Option<String> {
    let v = props.get(key)?;
    unwrap_interval(v, "string").as_str().map(str::to_string)
}

pub(crate) fn num_prop(props: &Map<String, Value>, key: &str) -> Option<f64> {
    let v = props.get(key)?;
    unwrap_interval(v, "number").as_f64()
}
