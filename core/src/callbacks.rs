//! A single sink trait the host implements to observe library activity
//! (§6). Implementations are invoked from worker tasks and must be
//! non-blocking or repost work elsewhere — see §5's callback contract.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Media,
    Album,
    Artist,
    Genre,
    Show,
    Playlist,
    MediaGroup,
    Folder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryPhase {
    Started,
    Completed,
}

pub trait Callbacks: Send + Sync {
    /// A batch of entities of one kind were added.
    fn entities_added(&self, _kind: EntityKind, _ids: &[i32]) {}
    /// A batch of entities of one kind were modified.
    fn entities_modified(&self, _kind: EntityKind, _ids: &[i32]) {}
    /// A batch of entities of one kind were deleted.
    fn entities_deleted(&self, _kind: EntityKind, _ids: &[i32]) {}

    /// Discovery progress for a root, 0..100.
    fn discovery_progress(&self, _root_mrl: &str, _percent: u8) {}
    fn discovery_phase(&self, _root_mrl: &str, _phase: DiscoveryPhase) {}

    fn reload_started(&self) {}
    fn reload_completed(&self) {}

    fn folder_banned(&self, _folder_id: i32) {}
    fn folder_unbanned(&self, _folder_id: i32) {}
    fn root_removed(&self, _root_mrl: &str) {}

    /// Parser progress across the whole pipeline, 0..100.
    fn parsing_progress(&self, _percent: u8) {}

    fn background_idle_changed(&self, _idle: bool) {}

    fn thumbnail_ready(&self, _kind: EntityKind, _id: i32, _mrl: &str) {}
}

/// A no-op sink, useful as a default and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCallbacks;

impl Callbacks for NullCallbacks {}
