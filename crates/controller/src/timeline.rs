use std::time::Duration;

use foundation::math::stable_total_cmp_f64;
use foundation::time::Time;
use runtime::throttle::RateLimiter;
use scene::entity::{Entity, EntityId};
use scene::selection::EntityList;
use scene::world::World;
use tracing::trace;

use crate::host::{Clock, Filmstrip};

/// Photos ordered by timestamp, for play-head lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoTimeline {
    entries: Vec<(Time, EntityId)>,
}

impl PhotoTimeline {
    /// Builds from the photo list; photos without a timestamp are left out.
    pub fn new(world: &World, photos: &EntityList) -> Self {
        let mut entries: Vec<(Time, EntityId)> = photos
            .iter()
            .filter_map(|id| {
                let time = world.get(id)?.timestamp()?;
                Some((time, id.clone()))
            })
            .collect();
        entries.sort_by(|a, b| stable_total_cmp_f64(a.0.0, b.0.0));
        Self { entries }
    }

    /// The last photo taken at or before `time`.
    pub fn photo_at(&self, time: Time) -> Option<&EntityId> {
        let idx = self.entries.partition_point(|(t, _)| t.0 <= time.0);
        idx.checked_sub(1).map(|i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Moves the clock to the entity's timestamp. Returns `false` when it has none.
pub fn timeline_to_entity(entity: &Entity, clock: &mut dyn Clock) -> bool {
    match entity.timestamp() {
        Some(time) => {
            clock.set_current_time(time);
            true
        }
        None => false,
    }
}

/// Keeps the filmstrip following the play-head.
///
/// Scrub and tick events are rate limited independently. A suppressed event
/// leaves a trailing scan for [`ClockBridge::poll`].
#[derive(Debug, Clone)]
pub struct ClockBridge {
    timeline: PhotoTimeline,
    scrub: RateLimiter,
    tick: RateLimiter,
}

impl ClockBridge {
    pub fn new(timeline: PhotoTimeline, window: Duration) -> Self {
        Self {
            timeline,
            scrub: RateLimiter::new(window),
            tick: RateLimiter::new(window),
        }
    }

    pub fn timeline(&self) -> &PhotoTimeline {
        &self.timeline
    }

    /// Scrolls the filmstrip to the photo under the play-head without
    /// selecting it.
    pub fn photo_timeline_to_timeline(
        &self,
        clock: &dyn Clock,
        filmstrip: &mut dyn Filmstrip,
    ) -> Option<EntityId> {
        let id = self.timeline.photo_at(clock.current_time())?;
        filmstrip.scroll_to(id);
        Some(id.clone())
    }

    /// Returns `None` when the scan was suppressed or found no photo.
    pub fn on_scrub(
        &mut self,
        now: Duration,
        clock: &dyn Clock,
        filmstrip: &mut dyn Filmstrip,
    ) -> Option<EntityId> {
        if !self.scrub.try_acquire(now) {
            return None;
        }
        self.photo_timeline_to_timeline(clock, filmstrip)
    }

    pub fn on_tick(
        &mut self,
        now: Duration,
        clock: &dyn Clock,
        filmstrip: &mut dyn Filmstrip,
    ) -> Option<EntityId> {
        if !self.tick.try_acquire(now) {
            return None;
        }
        self.photo_timeline_to_timeline(clock, filmstrip)
    }

    /// Runs due trailing scans. Returns how many ran (at most one per limiter,
    /// and both read the same clock, so a second scan is redundant).
    pub fn poll(&mut self, now: Duration, clock: &dyn Clock, filmstrip: &mut dyn Filmstrip) -> usize {
        let scrub_due = self.scrub.take_trailing(now);
        let tick_due = self.tick.take_trailing(now);
        if !(scrub_due || tick_due) {
            return 0;
        }
        trace!(scrub_due, tick_due, "trailing filmstrip scan");
        self.photo_timeline_to_timeline(clock, filmstrip);
        1
    }

    pub fn has_pending(&self) -> bool {
        self.scrub.has_pending() || self.tick.has_pending()
    }
}
