//! Per-zone group lookup cache used by the user manager
//!
//! Each zone is populated once, on first use, and is never refreshed for the
//! lifetime of the session. A group renamed or created after its zone was
//! loaded is invisible to later role updates until [`GroupCache::invalidate`]
//! or [`GroupCache::reset`] is called.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Groups of one identity zone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneGroups {
    ids_by_name: HashMap<String, String>,
    default_groups: HashSet<String>,
}

impl ZoneGroups {
    pub fn new<G, D>(groups: G, default_groups: D) -> Self
    where
        G: IntoIterator<Item = (String, String)>,
        D: IntoIterator<Item = String>,
    {
        Self {
            ids_by_name: groups.into_iter().collect(),
            default_groups: default_groups.into_iter().collect(),
        }
    }

    /// Server id of the group called `display_name`
    pub fn group_id(&self, display_name: &str) -> Option<&str> {
        self.ids_by_name.get(display_name).map(String::as_str)
    }

    pub fn is_default(&self, display_name: &str) -> bool {
        self.default_groups.contains(display_name)
    }

    pub fn len(&self) -> usize {
        self.ids_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids_by_name.is_empty()
    }
}

/// Zone id → [`ZoneGroups`]; clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct GroupCache {
    zones: Arc<RwLock<HashMap<String, Arc<ZoneGroups>>>>,
}

impl GroupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, zone_id: &str) -> Option<Arc<ZoneGroups>> {
        self.zones.read().await.get(zone_id).cloned()
    }

    /// Store `groups` for `zone_id` unless the zone is already present.
    ///
    /// Returns whichever entry ends up cached.
    pub async fn insert(&self, zone_id: &str, groups: ZoneGroups) -> Arc<ZoneGroups> {
        let mut zones = self.zones.write().await;
        zones
            .entry(zone_id.to_string())
            .or_insert_with(|| Arc::new(groups))
            .clone()
    }

    pub async fn contains(&self, zone_id: &str) -> bool {
        self.zones.read().await.contains_key(zone_id)
    }

    /// Drop one zone so the next lookup reloads it
    pub async fn invalidate(&self, zone_id: &str) {
        self.zones.write().await.remove(zone_id);
    }

    /// Drop every zone
    pub async fn reset(&self) {
        self.zones.write().await.clear();
    }
}
