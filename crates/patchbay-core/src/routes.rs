//! Per-port route caches read by the render thread.
//!
//! The manager's indices are control-thread state. The render thread never
//! touches them; instead every port carries a [`RouteCache`], an
//! `ArcSwap<PortRoutes>` that the control thread republishes whole when the
//! graph is recalculated ([`PortConnectionsManager::publish_routes`]).
//!
//! # Thread Safety
//!
//! - **Readers** (`RouteCache::load`): wait-free, never allocate, always see
//!   a complete snapshot.
//! - **Writers** (`RouteCache::store`): control thread only. The replaced
//!   snapshot is parked in the cache until the following store, so a reader
//!   guard that outlives one publication never drops the last reference and
//!   never frees on the render thread. Readers must not hold a guard across
//!   two publications.
//!
//! [`PortConnectionsManager::publish_routes`]: crate::PortConnectionsManager::publish_routes

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::identity::PortIdentity;
use crate::registry::PluginInfo;

/// One enabled edge as seen from a port.
#[derive(Clone, Debug)]
pub struct RouteEntry {
    /// The port at the other end of the edge.
    pub peer: PortIdentity,
    /// Edge gain.
    pub multiplier: f32,
    /// Health handle of the peer's owner, when the peer belongs to a plugin.
    pub plugin: Option<Arc<PluginInfo>>,
}

impl RouteEntry {
    /// Returns `false` if the peer belongs to a plugin that failed to
    /// instantiate.
    #[inline]
    pub fn peer_usable(&self) -> bool {
        self.plugin
            .as_ref()
            .is_none_or(|p| !p.instantiation_failed())
    }
}

/// Immutable snapshot of a port's enabled neighbours.
#[derive(Clone, Debug, Default)]
pub struct PortRoutes {
    /// Enabled edges pointing at the port.
    pub srcs: Vec<RouteEntry>,
    /// Enabled edges leaving the port.
    pub dests: Vec<RouteEntry>,
}

impl PortRoutes {
    /// Returns the single destination if there is exactly one.
    #[inline]
    pub fn sole_dest(&self) -> Option<&RouteEntry> {
        match self.dests.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Shared handle to a port's published [`PortRoutes`].
///
/// Clones share the same slot: the registry holds one clone so the manager
/// can publish, the port holds another so processing code can read.
#[derive(Clone, Debug)]
pub struct RouteCache {
    current: Arc<ArcSwap<PortRoutes>>,
    retired: Arc<Mutex<Option<Arc<PortRoutes>>>>,
}

impl Default for RouteCache {
    fn default() -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(PortRoutes::default())),
            retired: Arc::new(Mutex::new(None)),
        }
    }
}

impl RouteCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the current snapshot (wait-free).
    #[inline]
    pub fn load(&self) -> arc_swap::Guard<Arc<PortRoutes>> {
        self.current.load()
    }

    /// Loads an owned handle to the current snapshot, for holding across
    /// publications.
    pub fn load_full(&self) -> Arc<PortRoutes> {
        self.current.load_full()
    }

    /// Publishes a new snapshot. The previous one stays parked until the
    /// next store; the one before that is dropped here, on the caller's
    /// thread.
    pub fn store(&self, routes: PortRoutes) {
        let previous = self.current.swap(Arc::new(routes));
        let stale = self
            .retired
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(previous);
        drop(stale);
    }

    /// Number of published destinations.
    #[inline]
    pub fn dest_count(&self) -> usize {
        self.current.load().dests.len()
    }

    /// Number of published sources.
    #[inline]
    pub fn src_count(&self) -> usize {
        self.current.load().srcs.len()
    }

    /// Returns `true` if both handles share the same slot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.current, &other.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{OwnerId, PortFlow, PortOwner, PortType};

    fn peer() -> PortIdentity {
        PortIdentity::new(
            PortOwner::Plugin(OwnerId(3)),
            PortType::Audio,
            PortFlow::Input,
            0,
        )
    }

    #[test]
    fn test_clones_share_slot() {
        let cache = RouteCache::new();
        let reader = cache.clone();
        assert!(cache.ptr_eq(&reader));
        assert_eq!(reader.dest_count(), 0);

        cache.store(PortRoutes {
            srcs: Vec::new(),
            dests: vec![RouteEntry {
                peer: peer(),
                multiplier: 1.0,
                plugin: None,
            }],
        });
        assert_eq!(reader.dest_count(), 1);
        assert!(reader.load().sole_dest().is_some());
    }

    #[test]
    fn test_old_snapshot_survives_store() {
        let cache = RouteCache::new();
        let held = cache.load_full();
        cache.store(PortRoutes {
            srcs: Vec::new(),
            dests: vec![RouteEntry {
                peer: peer(),
                multiplier: 0.5,
                plugin: None,
            }],
        });
        assert!(held.dests.is_empty());
        assert_eq!(cache.dest_count(), 1);
    }

    #[test]
    fn test_replaced_snapshot_parked_until_next_store() {
        let cache = RouteCache::new();
        let first = cache.load_full();
        assert_eq!(Arc::strong_count(&first), 2);

        cache.store(PortRoutes::default());
        // Still owned by the cache, so a reader's drop is never the last.
        assert_eq!(Arc::strong_count(&first), 2);

        cache.store(PortRoutes::default());
        assert_eq!(Arc::strong_count(&first), 1);
    }

    #[test]
    fn test_failed_plugin_peer_unusable() {
        let info = Arc::new(PluginInfo::new("Comp", Some(OwnerId(1))));
        let entry = RouteEntry {
            peer: peer(),
            multiplier: 1.0,
            plugin: Some(Arc::clone(&info)),
        };
        assert!(entry.peer_usable());
        info.set_instantiation_failed(true);
        assert!(!entry.peer_usable());
    }
}
