use std::{collections::VecDeque, sync::Arc};

use shared::domain::{GeneratedMap, MapId};

pub const HISTORY_CAPACITY: usize = 10;
/// Prior maps offered in the quick-switch strip, not counting the newest entry.
pub const THUMBNAIL_STRIP_LEN: usize = 5;

/// Most-recent-first list of generated maps, bounded at [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<Arc<GeneratedMap>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, map: Arc<GeneratedMap>) {
        self.entries.push_front(map);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: MapId) -> Option<&Arc<GeneratedMap>> {
        self.entries.iter().find(|map| map.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<GeneratedMap>> {
        self.entries.iter()
    }

    pub fn thumbnails(&self) -> impl Iterator<Item = &Arc<GeneratedMap>> {
        self.entries.iter().skip(1).take(THUMBNAIL_STRIP_LEN)
    }
}
