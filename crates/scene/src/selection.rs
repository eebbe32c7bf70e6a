use crate::entity::EntityId;

/// Ordered cursor over a fixed set of selectable entities.
///
/// The cursor is either unset or a valid position; it only moves through
/// [`EntityList::select`]. [`EntityList::next`] and [`EntityList::previous`]
/// compute the neighbour to request, wrapping at both ends, and leave the
/// cursor alone: the request travels through the viewer's selection slot and
/// comes back here as a `select`, so every view reacts to one selection change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityList {
    ids: Vec<EntityId>,
    cursor: Option<usize>,
}

impl EntityList {
    pub fn new(ids: Vec<EntityId>) -> Self {
        Self { ids, cursor: None }
    }

    pub fn current(&self) -> Option<&EntityId> {
        self.cursor.and_then(|i| self.ids.get(i))
    }

    /// Moves the cursor to `id`.
    ///
    /// Returns `false` and leaves the cursor unchanged if `id` is not a member.
    pub fn select(&mut self, id: &EntityId) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.cursor = Some(idx);
                true
            }
            None => false,
        }
    }

    /// The entity after the current one, wrapping to the first.
    pub fn next(&self) -> Option<&EntityId> {
        let idx = self.cursor?;
        self.ids.get((idx + 1) % self.ids.len())
    }

    /// The entity before the current one, wrapping to the last.
    pub fn previous(&self) -> Option<&EntityId> {
        let idx = self.cursor?;
        let len = self.ids.len();
        self.ids.get((idx + len - 1) % len)
    }

    pub fn position(&self, id: &EntityId) -> Option<usize> {
        self.ids.iter().position(|e| e == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityId> + '_ {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::EntityList;
    use crate::entity::EntityId;
    use proptest::prelude::*;

    fn list(ids: &[&str]) -> EntityList {
        EntityList::new(ids.iter().map(|s| EntityId::from(*s)).collect())
    }

    fn follow(list: &mut EntityList, request: Option<&EntityId>) {
        let request = request.cloned().expect("request");
        assert!(list.select(&request));
    }

    #[test]
    fn navigation_without_cursor_is_noop() {
        let l = list(&["line_a", "line_b", "line_c"]);
        assert!(l.current().is_none());
        assert!(l.next().is_none());
        assert!(l.previous().is_none());
    }

    #[test]
    fn next_wraps_after_select() {
        let mut l = list(&["line_a", "line_b", "line_c"]);
        assert!(l.select(&"line_b".into()));

        let n = l.next().cloned();
        assert_eq!(n.as_ref().map(EntityId::as_str), Some("line_c"));
        follow(&mut l, n.as_ref());

        let n = l.next().cloned();
        assert_eq!(n.as_ref().map(EntityId::as_str), Some("line_a"));
        follow(&mut l, n.as_ref());
        assert_eq!(l.current().map(EntityId::as_str), Some("line_a"));
    }

    #[test]
    fn next_does_not_move_cursor_by_itself() {
        let mut l = list(&["poi_1", "poi_2"]);
        l.select(&"poi_1".into());
        let _ = l.next();
        assert_eq!(l.current().map(EntityId::as_str), Some("poi_1"));
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut l = list(&["poi_1", "poi_2", "poi_3"]);
        l.select(&"poi_1".into());
        assert_eq!(l.previous().map(EntityId::as_str), Some("poi_3"));
    }

    #[test]
    fn selecting_non_member_keeps_cursor() {
        let mut l = list(&["poi_1", "poi_2"]);
        assert!(!l.select(&"poi_9".into()));
        assert!(l.current().is_none());

        l.select(&"poi_2".into());
        assert!(!l.select(&"line_0".into()));
        assert_eq!(l.current().map(EntityId::as_str), Some("poi_2"));
    }

    #[test]
    fn single_entry_cycles_to_itself() {
        let mut l = list(&["photo_x_0"]);
        l.select(&"photo_x_0".into());
        assert_eq!(l.next(), l.current());
        assert_eq!(l.previous(), l.current());
    }

    #[test]
    fn empty_list_never_selects() {
        let mut l = EntityList::default();
        assert!(!l.select(&"photo_x_0".into()));
        assert!(l.next().is_none());
        assert!(l.is_empty());
    }

    fn ids(n: usize) -> EntityList {
        EntityList::new((0..n).map(|i| EntityId::new(format!("photo_p_{i}"))).collect())
    }

    proptest! {
        #[test]
        fn len_nexts_return_to_start(n in 1usize..24, start in 0usize..24) {
            let start = start % n;
            let mut l = ids(n);
            let first = EntityId::new(format!("photo_p_{start}"));
            prop_assert!(l.select(&first));
            for _ in 0..n {
                let req = l.next().cloned().expect("cursor set");
                prop_assert!(l.select(&req));
            }
            prop_assert_eq!(l.current(), Some(&first));
        }

        #[test]
        fn previous_undoes_next(n in 1usize..24, start in 0usize..24) {
            let start = start % n;
            let mut l = ids(n);
            let first = EntityId::new(format!("photo_p_{start}"));
            l.select(&first);
            let req = l.next().cloned().expect("cursor set");
            l.select(&req);
            let back = l.previous().cloned().expect("cursor set");
            prop_assert_eq!(back, first);
        }
    }
}
