//! Device-local session markers.
//!
//! Two opaque boolean flags: the promotional banner dismissal, which
//! survives across sessions, and the content-warning dismissal, which is
//! forgotten when the session ends.

use std::collections::HashMap;

/// Key of the cross-session banner flag.
pub const BANNER_DISMISSED_KEY: &str = "promo_banner_dismissed";
/// Key of the per-session content warning flag.
pub const CONTENT_WARNING_DISMISSED_KEY: &str = "content_warning_dismissed";

/// Minimal key/value flag storage. Implementations decide how long a flag
/// lives; the catalog only reads and writes booleans.
pub trait MarkerStore {
    fn get(&self, key: &str) -> bool;
    fn set(&mut self, key: &str, value: bool);
    fn clear(&mut self);
}

/// In-memory store, used for the session scope and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryMarkerStore {
    flags: HashMap<String, bool>,
}

impl MarkerStore for MemoryMarkerStore {
    fn get(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    fn set(&mut self, key: &str, value: bool) {
        self.flags.insert(key.to_string(), value);
    }

    fn clear(&mut self) {
        self.flags.clear();
    }
}

/// The two markers, each backed by the store with the right lifetime.
#[derive(Debug, Default)]
pub struct SessionMarkers<L: MarkerStore> {
    local: L,
    session: MemoryMarkerStore,
}

impl<L: MarkerStore> SessionMarkers<L> {
    pub fn new(local: L) -> Self {
        Self {
            local,
            session: MemoryMarkerStore::default(),
        }
    }

    pub fn banner_visible(&self) -> bool {
        !self.local.get(BANNER_DISMISSED_KEY)
    }

    pub fn dismiss_banner(&mut self) {
        self.local.set(BANNER_DISMISSED_KEY, true);
    }

    /// Whether opening a detail view should show the graphic-content
    /// warning first. Once dismissed it stays off for the whole session,
    /// whichever record is opened next.
    pub fn content_warning_required(&self) -> bool {
        !self.session.get(CONTENT_WARNING_DISMISSED_KEY)
    }

    pub fn dismiss_content_warning(&mut self) {
        self.session.set(CONTENT_WARNING_DISMISSED_KEY, true);
    }

    /// Drop session-scoped flags; cross-session flags are kept.
    pub fn end_session(&mut self) {
        self.session.clear();
    }

    pub fn local_store(&self) -> &L {
        &self.local
    }
}
