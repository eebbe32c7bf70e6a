use std::rc::Rc;

use foundation::math::{Ecef, Geodetic, ecef_to_geodetic};
use formats::config::Home;
use runtime::time_source::{SystemTimeSource, TimeSource};
use scene::entity::EntityId;
use scene::picking::Ray;
use scene::world::World;
use tracing::info;

use crate::camera_sync::CameraSync;
use crate::config::SyncConfig;
use crate::host::{Flight, Host};
use crate::router::{EntityLists, Route, RouterState, SelectionRouter};
use crate::state::SelectionState;
use crate::timeline::{ClockBridge, PhotoTimeline};

/// Keyboard input the viewer reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// One viewer instance: data, selection bookkeeping and the host it drives.
///
/// Every selection source (pick, filmstrip, keyboard, panel buttons) writes
/// the shared selected-entity slot; the router runs once per change of that
/// slot.
pub struct Viewer<H: Host> {
    host: H,
    world: World,
    lists: EntityLists,
    selection: SelectionState,
    selected: Option<EntityId>,
    router: SelectionRouter,
    camera_sync: CameraSync,
    clock_bridge: ClockBridge,
    time_source: Rc<dyn TimeSource>,
    home_applied: bool,
}

impl<H: Host> Viewer<H> {
    pub fn new(host: H, world: World, config: &SyncConfig) -> Self {
        Self::with_time_source(host, world, config, Rc::new(SystemTimeSource::new()))
    }

    pub fn with_time_source(
        host: H,
        world: World,
        config: &SyncConfig,
        time_source: Rc<dyn TimeSource>,
    ) -> Self {
        let lists = EntityLists::from_world(&world);
        let timeline = PhotoTimeline::new(&world, &lists.photos);
        Self {
            host,
            lists,
            selection: SelectionState::new(),
            selected: None,
            router: SelectionRouter::new(),
            camera_sync: CameraSync::new(config),
            clock_bridge: ClockBridge::new(timeline, config.throttle_window()),
            time_source,
            home_applied: false,
            world,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn lists(&self) -> &EntityLists {
        &self.lists
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected(&self) -> Option<&EntityId> {
        self.selected.as_ref()
    }

    pub fn router_state(&self) -> RouterState {
        self.router.state()
    }

    pub fn timeline(&self) -> &PhotoTimeline {
        self.clock_bridge.timeline()
    }

    /// Writes the selected-entity slot. The router only runs when the value
    /// actually changes.
    pub fn set_selected_entity(&mut self, id: Option<EntityId>) -> RouterState {
        if self.selected == id {
            return self.router.state();
        }
        self.selected = id;
        let mut route = Route {
            world: &self.world,
            lists: &mut self.lists,
            selection: &mut self.selection,
            camera_sync: &self.camera_sync,
            host: self.host.parts(),
        };
        self.router
            .on_selection_changed(self.selected.as_ref(), &mut route)
    }

    /// Engine pick result; `None` when the click hit nothing selectable.
    pub fn on_pick(&mut self, id: Option<EntityId>) -> RouterState {
        self.set_selected_entity(id)
    }

    pub fn next(&mut self) -> RouterState {
        match self.router.request_next(&self.selection, &self.lists) {
            Some(id) => self.set_selected_entity(Some(id)),
            None => self.router.state(),
        }
    }

    pub fn previous(&mut self) -> RouterState {
        match self.router.request_previous(&self.selection, &self.lists) {
            Some(id) => self.set_selected_entity(Some(id)),
            None => self.router.state(),
        }
    }

    pub fn on_key(&mut self, key: Key) -> RouterState {
        match key {
            Key::ArrowRight => self.next(),
            Key::ArrowLeft => self.previous(),
            Key::Other => self.router.state(),
        }
    }

    /// Hides the panel and clears the selection.
    pub fn close_panel(&mut self) -> RouterState {
        self.host.parts().panel.hide();
        self.set_selected_entity(None)
    }

    pub fn on_filmstrip_click(&mut self, id: &EntityId) -> RouterState {
        self.set_selected_entity(Some(id.clone()))
    }

    /// Logs the clicked ground position. Selection is left alone.
    pub fn on_globe_click(&mut self, ray: Ray) -> Option<Geodetic> {
        let point = self.host.parts().globe.pick_ground(ray)?;
        let geo = ecef_to_geodetic(Ecef::from(point));
        info!(
            lon = geo.lon_deg(),
            lat = geo.lat_deg(),
            height = geo.alt_m,
            "globe click"
        );
        Some(geo)
    }

    /// Time slider dragged.
    pub fn on_scrub(&mut self) -> Option<EntityId> {
        let now = self.time_source.now();
        let parts = self.host.parts();
        self.clock_bridge.on_scrub(now, &*parts.clock, parts.filmstrip)
    }

    /// Clock advanced during playback.
    pub fn on_tick(&mut self) -> Option<EntityId> {
        let now = self.time_source.now();
        let parts = self.host.parts();
        self.clock_bridge.on_tick(now, &*parts.clock, parts.filmstrip)
    }

    /// Runs trailing filmstrip scans whose window has elapsed.
    pub fn poll_timers(&mut self) -> usize {
        let now = self.time_source.now();
        let parts = self.host.parts();
        self.clock_bridge.poll(now, &*parts.clock, parts.filmstrip)
    }

    /// `fraction` is how much of the viewport the user moved the camera.
    pub fn on_camera_changed(&mut self, fraction: f64) -> bool {
        self.camera_sync
            .on_camera_changed(&mut self.selection, fraction)
    }

    pub fn on_camera_move_end(&mut self) {
        self.camera_sync.on_move_end(&mut self.selection);
    }

    /// Flies to the configured home view. Only the first call has an effect.
    pub fn apply_config(&mut self, home: Home) -> Option<Flight> {
        if self.home_applied {
            return None;
        }
        self.home_applied = true;
        let parts = self.host.parts();
        Some(self.camera_sync.fly_home(parts.camera, home))
    }
}
