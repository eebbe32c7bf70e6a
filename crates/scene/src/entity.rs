use foundation::math::Vec3;
use foundation::time::Time;

use crate::components::EntityProperties;

/// String identifier as it appears in the data files (`photo_2019_3`, `line_0`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::classify(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a selectable entity represents.
///
/// Derived from the id prefix exactly once, when the entity is created.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Photo,
    Track,
    Poi,
    /// Track cursors and other unprefixed helpers. Not selectable.
    Marker,
}

impl EntityKind {
    pub const PHOTO_PREFIX: &'static str = "photo_";
    pub const TRACK_PREFIX: &'static str = "line_";
    pub const POI_PREFIX: &'static str = "poi_";

    pub fn classify(id: &str) -> Self {
        if id.starts_with(Self::TRACK_PREFIX) {
            EntityKind::Track
        } else if id.starts_with(Self::POI_PREFIX) {
            EntityKind::Poi
        } else if id.starts_with(Self::PHOTO_PREFIX) {
            EntityKind::Photo
        } else {
            EntityKind::Marker
        }
    }

    pub fn is_selectable(self) -> bool {
        !matches!(self, EntityKind::Marker)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    name: Option<String>,
    position: Option<Vec3>,
    properties: EntityProperties,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, position: Option<Vec3>, properties: EntityProperties) -> Self {
        let id = id.into();
        let kind = id.kind();
        Self {
            id,
            kind,
            name: None,
            position,
            properties,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// World (ECEF) position as authored. Track polylines have none.
    pub fn position(&self) -> Option<Vec3> {
        self.position
    }

    pub fn properties(&self) -> &EntityProperties {
        &self.properties
    }

    /// The instant used to place the entity on the timeline.
    ///
    /// Photos use their capture time, tracks their start time.
    pub fn timestamp(&self) -> Option<Time> {
        match &self.properties {
            EntityProperties::Photo(p) => p.time,
            EntityProperties::Track(t) => t.start_time,
            EntityProperties::Poi(_) | EntityProperties::None => None,
        }
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{Entity, EntityId, EntityKind};
    use crate::components::{EntityProperties, PhotoProperties};
    use foundation::time::Time;

    #[test]
    fn classifies_by_prefix() {
        assert_eq!(EntityKind::classify("photo_sweden_3"), EntityKind::Photo);
        assert_eq!(EntityKind::classify("line_0"), EntityKind::Track);
        assert_eq!(EntityKind::classify("poi_12"), EntityKind::Poi);
        assert_eq!(EntityKind::classify("point_0"), EntityKind::Marker);
        assert_eq!(EntityKind::classify("track_entity"), EntityKind::Marker);
        assert_eq!(EntityKind::classify(""), EntityKind::Marker);
        assert!(!EntityKind::Marker.is_selectable());
    }

    #[test]
    fn kind_is_fixed_at_construction() {
        let e = Entity::new("photo_a_1", None, EntityProperties::None);
        assert_eq!(e.kind(), EntityKind::Photo);
        assert_eq!(e.id(), &EntityId::from("photo_a_1"));
        assert!(e.timestamp().is_none());
    }

    #[test]
    fn photo_timestamp_comes_from_properties() {
        let e = Entity::new(
            "photo_a_1",
            None,
            EntityProperties::Photo(PhotoProperties {
                src: "data/photos/a/1.jpg".into(),
                time: Some(Time(42.0)),
            }),
        )
        .with_name("Alice, 2019");
        assert_eq!(e.timestamp(), Some(Time(42.0)));
        assert_eq!(e.name(), Some("Alice, 2019"));
    }
}
