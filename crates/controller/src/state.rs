use scene::entity::EntityId;

/// Viewer-scoped selection bookkeeping.
///
/// Each field has exactly one writer: the router owns `last_infobox`, camera
/// sync owns `last_selected` and `flying`. Everything else reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Framing reference for relative fly-to. `None` means the next fly-to
    /// frames from the viewport center.
    pub(crate) last_selected: Option<EntityId>,
    /// Entity shown in the info panel; drives prev/next.
    pub(crate) last_infobox: Option<EntityId>,
    /// Set while a fly-to started by camera sync is in progress.
    pub(crate) flying: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_selected(&self) -> Option<&EntityId> {
        self.last_selected.as_ref()
    }

    pub fn last_infobox(&self) -> Option<&EntityId> {
        self.last_infobox.as_ref()
    }

    pub fn is_flying(&self) -> bool {
        self.flying
    }
}
