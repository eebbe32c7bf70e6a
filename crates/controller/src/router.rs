use scene::entity::{EntityId, EntityKind};
use scene::selection::EntityList;
use scene::world::World;
use tracing::debug;

use crate::camera_sync::CameraSync;
use crate::host::HostParts;
use crate::info_panel;
use crate::state::SelectionState;
use crate::timeline::timeline_to_entity;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RouterState {
    #[default]
    Idle,
    PhotoSelected,
    TrackSelected,
    PoiSelected,
}

impl RouterState {
    fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Photo => RouterState::PhotoSelected,
            EntityKind::Track => RouterState::TrackSelected,
            EntityKind::Poi => RouterState::PoiSelected,
            EntityKind::Marker => RouterState::Idle,
        }
    }

    /// Kind of the entity in the info panel.
    pub fn kind(self) -> Option<EntityKind> {
        match self {
            RouterState::Idle => None,
            RouterState::PhotoSelected => Some(EntityKind::Photo),
            RouterState::TrackSelected => Some(EntityKind::Track),
            RouterState::PoiSelected => Some(EntityKind::Poi),
        }
    }
}

/// One navigation list per selectable kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityLists {
    pub photos: EntityList,
    pub tracks: EntityList,
    pub pois: EntityList,
}

impl EntityLists {
    pub fn from_world(world: &World) -> Self {
        Self {
            photos: world.entity_list(EntityKind::Photo),
            tracks: world.entity_list(EntityKind::Track),
            pois: world.entity_list(EntityKind::Poi),
        }
    }

    pub fn for_kind(&self, kind: EntityKind) -> Option<&EntityList> {
        match kind {
            EntityKind::Photo => Some(&self.photos),
            EntityKind::Track => Some(&self.tracks),
            EntityKind::Poi => Some(&self.pois),
            EntityKind::Marker => None,
        }
    }

    pub fn for_kind_mut(&mut self, kind: EntityKind) -> Option<&mut EntityList> {
        match kind {
            EntityKind::Photo => Some(&mut self.photos),
            EntityKind::Track => Some(&mut self.tracks),
            EntityKind::Poi => Some(&mut self.pois),
            EntityKind::Marker => None,
        }
    }
}

/// Everything one selection reaction reads or writes.
pub struct Route<'a> {
    pub world: &'a World,
    pub lists: &'a mut EntityLists,
    pub selection: &'a mut SelectionState,
    pub camera_sync: &'a CameraSync,
    pub host: HostParts<'a>,
}

/// Fans a selection change out to the list cursor, filmstrip, clock, panel
/// and camera.
#[derive(Debug, Clone, Default)]
pub struct SelectionRouter {
    state: RouterState,
}

impl SelectionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    pub fn on_selection_changed(
        &mut self,
        selected: Option<&EntityId>,
        route: &mut Route<'_>,
    ) -> RouterState {
        let world = route.world;
        let entity = selected
            .and_then(|id| world.get(id))
            .filter(|e| e.kind().is_selectable());

        let Some(entity) = entity else {
            if let Some(id) = selected {
                debug!(entity = %id, "selection not routable; clearing panel");
            }
            route.host.panel.hide();
            route.selection.last_infobox = None;
            self.state = RouterState::Idle;
            return self.state;
        };

        let id = entity.id();
        let kind = entity.kind();
        if self.state.kind().is_some_and(|k| k != kind) {
            route.camera_sync.reset_reference(route.selection);
        }

        if let Some(list) = route.lists.for_kind_mut(kind) {
            list.select(id);
        }

        if kind == EntityKind::Photo {
            route.host.filmstrip.scroll_to(id);
        }
        if let Some(content) = info_panel::render(entity) {
            route.host.panel.show(content);
        }
        if kind == EntityKind::Photo {
            timeline_to_entity(entity, &mut *route.host.clock);
            if !route.host.clock.should_animate() {
                route.camera_sync.fly_to_entity(
                    route.selection,
                    world,
                    entity,
                    &mut *route.host.camera,
                    route.host.globe,
                );
            }
        }

        route.selection.last_infobox = Some(id.clone());
        self.state = RouterState::for_kind(kind);
        debug!(entity = %id, state = ?self.state, "selection routed");
        self.state
    }

    /// The entity after the one in the info panel, within its kind's list.
    pub fn request_next(&self, selection: &SelectionState, lists: &EntityLists) -> Option<EntityId> {
        selection.last_infobox.as_ref()?;
        lists.for_kind(self.state.kind()?)?.next().cloned()
    }

    pub fn request_previous(
        &self,
        selection: &SelectionState,
        lists: &EntityLists,
    ) -> Option<EntityId> {
        selection.last_infobox.as_ref()?;
        lists.for_kind(self.state.kind()?)?.previous().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityLists, Route, RouterState, SelectionRouter};
    use crate::camera_sync::CameraSync;
    use crate::headless::{HeadlessCamera, HeadlessHost};
    use crate::host::Host;
    use crate::info_panel::PanelContent;
    use crate::state::SelectionState;
    use foundation::math::{Geodetic, geodetic_to_ecef};
    use foundation::time::Time;
    use pretty_assertions::assert_eq;
    use scene::components::{EntityProperties, PhotoProperties, PoiProperties, TrackProperties};
    use scene::entity::{Entity, EntityId};
    use scene::world::World;

    struct Fixture {
        world: World,
        lists: EntityLists,
        selection: SelectionState,
        sync: CameraSync,
        host: HeadlessHost,
        router: SelectionRouter,
    }

    impl Fixture {
        fn new() -> Self {
            let mut world = World::new();
            for (i, t) in [100.0, 200.0, 300.0].iter().enumerate() {
                let pos = geodetic_to_ecef(Geodetic::from_degrees(13.0 + i as f64, 60.0, 0.0));
                world.insert(Entity::new(
                    format!("photo_{i}"),
                    Some(pos.into()),
                    EntityProperties::Photo(PhotoProperties {
                        src: format!("{i}.jpg"),
                        time: Some(Time(*t)),
                    }),
                ));
            }
            world.insert(Entity::new(
                "line_0",
                None,
                EntityProperties::Track(TrackProperties::default()),
            ));
            world.insert(Entity::new(
                "poi_0",
                None,
                EntityProperties::Poi(PoiProperties {
                    label: "Summit".into(),
                    symbol: None,
                }),
            ));
            world.insert(Entity::new("path", None, EntityProperties::None));
            let camera = HeadlessCamera::above(Geodetic::from_degrees(13.0, 59.9, 20_000.0));
            Self {
                lists: EntityLists::from_world(&world),
                world,
                selection: SelectionState::new(),
                sync: CameraSync::default(),
                host: HeadlessHost::new(camera, Time(0.0)),
                router: SelectionRouter::new(),
            }
        }

        fn select(&mut self, id: Option<&str>) -> RouterState {
            let id = id.map(EntityId::from);
            let mut route = Route {
                world: &self.world,
                lists: &mut self.lists,
                selection: &mut self.selection,
                camera_sync: &self.sync,
                host: self.host.parts(),
            };
            self.router.on_selection_changed(id.as_ref(), &mut route)
        }
    }

    #[test]
    fn photo_selection_updates_every_view() {
        let mut f = Fixture::new();
        assert_eq!(f.select(Some("photo_1")), RouterState::PhotoSelected);

        assert_eq!(f.lists.photos.current(), Some(&EntityId::from("photo_1")));
        assert_eq!(f.host.filmstrip.last(), Some(&EntityId::from("photo_1")));
        assert_eq!(f.host.clock.time, Time(200.0));
        assert!(f.host.panel.visible);
        assert_eq!(f.host.camera.flights().len(), 1);
        assert_eq!(f.selection.last_infobox(), Some(&EntityId::from("photo_1")));
        assert!(f.selection.is_flying());
    }

    #[test]
    fn unknown_or_marker_selection_goes_idle() {
        let mut f = Fixture::new();
        f.select(Some("poi_0"));
        assert!(f.host.panel.visible);

        assert_eq!(f.select(Some("photo_missing")), RouterState::Idle);
        assert!(!f.host.panel.visible);
        assert_eq!(f.selection.last_infobox(), None);

        f.select(Some("poi_0"));
        assert_eq!(f.select(Some("path")), RouterState::Idle);
        assert_eq!(f.select(None), RouterState::Idle);
        assert!(!f.host.panel.visible);
    }

    #[test]
    fn unknown_id_goes_idle_from_every_state() {
        let priors = [
            (None, RouterState::Idle),
            (Some("photo_0"), RouterState::PhotoSelected),
            (Some("line_0"), RouterState::TrackSelected),
            (Some("poi_0"), RouterState::PoiSelected),
        ];
        for (prior, expected) in priors {
            for target in [Some("photo_missing"), Some("path"), None] {
                let mut f = Fixture::new();
                if prior.is_some() {
                    assert_eq!(f.select(prior), expected);
                }
                assert_eq!(f.select(target), RouterState::Idle, "{prior:?} -> {target:?}");
                assert_eq!(f.router.state(), RouterState::Idle);
                assert!(!f.host.panel.visible);
                assert_eq!(f.host.panel.content, None);
                assert_eq!(f.selection.last_infobox(), None);
            }
        }
    }

    #[test]
    fn track_and_poi_do_not_move_camera_or_clock() {
        let mut f = Fixture::new();
        assert_eq!(f.select(Some("line_0")), RouterState::TrackSelected);
        assert!(matches!(f.host.panel.content, Some(PanelContent::Track(_))));
        assert_eq!(f.select(Some("poi_0")), RouterState::PoiSelected);
        assert_eq!(
            f.host.panel.content,
            Some(PanelContent::Poi { label: "Summit".into() })
        );
        assert!(f.host.camera.flights().is_empty());
        assert_eq!(f.host.clock.time, Time(0.0));
        assert!(f.host.filmstrip.scrolled.is_empty());
    }

    #[test]
    fn kind_change_resets_framing_reference() {
        let mut f = Fixture::new();
        f.select(Some("photo_0"));
        assert!(f.selection.last_selected().is_some());
        f.select(Some("poi_0"));
        assert_eq!(f.selection.last_selected(), None);
    }

    #[test]
    fn animating_clock_suppresses_camera_only() {
        let mut f = Fixture::new();
        f.host.clock.animating = true;
        f.select(Some("photo_2"));
        assert!(f.host.camera.flights().is_empty());
        assert_eq!(f.host.clock.time, Time(300.0));
        assert_eq!(f.host.filmstrip.last(), Some(&EntityId::from("photo_2")));
        assert!(f.host.panel.visible);
    }

    #[test]
    fn navigation_requests_follow_panel_kind() {
        let mut f = Fixture::new();
        assert_eq!(f.router.request_next(&f.selection, &f.lists), None);

        f.select(Some("photo_2"));
        assert_eq!(
            f.router.request_next(&f.selection, &f.lists),
            Some(EntityId::from("photo_0"))
        );
        assert_eq!(
            f.router.request_previous(&f.selection, &f.lists),
            Some(EntityId::from("photo_1"))
        );

        f.select(Some("line_0"));
        assert_eq!(
            f.router.request_next(&f.selection, &f.lists),
            Some(EntityId::from("line_0"))
        );
    }
}
