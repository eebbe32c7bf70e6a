use std::collections::HashMap;

use foundation::math::precision::stable_total_cmp_f64;
use foundation::time::TimeSpan;

use crate::entity::{Entity, EntityId, EntityKind};
use crate::selection::EntityList;

/// Entity store.
///
/// Keeps entities in insertion order with an id index. Everything outside the
/// store refers to entities by [`EntityId`].
#[derive(Debug, Default)]
pub struct World {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entity`, replacing any previous entity with the same id in place.
    ///
    /// Returns `true` if an entity was replaced.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if let Some(&idx) = self.index.get(entity.id()) {
            self.entities[idx] = entity;
            return true;
        }
        self.index.insert(entity.id().clone(), self.entities.len());
        self.entities.push(entity);
        false
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.index.get(id).map(|&idx| &self.entities[idx])
    }

    pub fn all(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter(move |e| e.kind() == kind)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Navigation list for `kind`.
    ///
    /// Photos are ordered by ascending timestamp (stable; photos without a time
    /// go last). Other kinds keep store order.
    pub fn entity_list(&self, kind: EntityKind) -> EntityList {
        let mut members: Vec<&Entity> = self.of_kind(kind).collect();
        if kind == EntityKind::Photo {
            members.sort_by(|a, b| match (a.timestamp(), b.timestamp()) {
                (Some(ta), Some(tb)) => stable_total_cmp_f64(ta.0, tb.0),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
        EntityList::new(members.into_iter().map(|e| e.id().clone()).collect())
    }

    /// Span covered by all timestamped photos and tracks.
    pub fn time_span(&self) -> Option<TimeSpan> {
        let mut span: Option<TimeSpan> = None;
        for entity in &self.entities {
            let mut stamps = vec![entity.timestamp()];
            if let crate::components::EntityProperties::Track(t) = entity.properties() {
                stamps.push(t.end_time);
            }
            for t in stamps.into_iter().flatten() {
                span = Some(match span {
                    None => TimeSpan::instant(t),
                    Some(s) => s.extend(t),
                });
            }
        }
        span
    }
}
