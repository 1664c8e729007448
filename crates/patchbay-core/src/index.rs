//! Derived adjacency index over the manager's edge list.

use std::collections::HashMap;

use crate::connection::PortConnection;
use crate::identity::PortIdentity;

/// Which endpoint of an edge an index is keyed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum IndexKey {
    Src,
    Dest,
}

/// Map from a port identity to the positions of the edges that carry it at
/// one endpoint.
///
/// Positions refer to the manager's edge list and are in list order, so the
/// lookup order is the insertion order of the surviving edges. An index is
/// never patched: it is rebuilt whole by [`ConnectionIndex::rebuild`].
#[derive(Clone, Debug)]
pub(crate) struct ConnectionIndex {
    key: IndexKey,
    map: HashMap<PortIdentity, Vec<usize>>,
}

impl ConnectionIndex {
    pub(crate) fn new(key: IndexKey) -> Self {
        Self {
            key,
            map: HashMap::new(),
        }
    }

    /// Discards the current contents and indexes `edges` from scratch.
    pub(crate) fn rebuild(&mut self, edges: &[PortConnection]) {
        self.map.clear();
        for (pos, conn) in edges.iter().enumerate() {
            let id = match self.key {
                IndexKey::Src => conn.src(),
                IndexKey::Dest => conn.dest(),
            };
            self.map.entry(id.clone()).or_default().push(pos);
        }
    }

    /// Positions of the edges keyed by `id`, empty if none.
    #[inline]
    pub(crate) fn positions(&self, id: &PortIdentity) -> &[usize] {
        self.map.get(id).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct keys.
    #[inline]
    pub(crate) fn key_count(&self) -> usize {
        self.map.len()
    }
}
