//! The port connections manager.
//!
//! Owns the authoritative edge list of a project plus two derived indices,
//! one keyed by source and one keyed by destination.
//!
//! # Index discipline
//!
//! [`PortConnectionsManager::regenerate_hashtables`] is the only code that
//! writes the indices, and it always rebuilds both from scratch. Every
//! operation that changes the edge list calls it exactly once, as its last
//! step. No caller ever observes an index that disagrees with the edge
//! list.
//!
//! # Threading
//!
//! Mutators run on the control thread. Calling one inside a
//! [`ProcessingScope`](crate::ProcessingScope) logs an error and trips a debug
//! assertion. The render thread reads the per-port [`RouteCache`] snapshots
//! written by [`publish_routes`](PortConnectionsManager::publish_routes), not
//! the indices.
//!
//! [`RouteCache`]: crate::RouteCache

use core::fmt;

use crate::connection::PortConnection;
use crate::error::RoutingError;
use crate::identity::PortIdentity;
use crate::index::{ConnectionIndex, IndexKey};
use crate::registry::PortRegistry;
use crate::routes::{PortRoutes, RouteEntry};
use crate::thread::is_processing_thread;

/// Result of [`PortConnectionsManager::get_unlocked_sources_or_dests`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceDestCount {
    /// All matching edges.
    pub total: usize,
    /// Matching edges with `locked == false`.
    pub unlocked: usize,
}

/// Edge list plus by-source and by-destination indices.
///
/// # Example
///
/// ```rust
/// use patchbay_core::{
///     OwnerId, PortConnectionsManager, PortFlow, PortIdentity, PortOwner, PortType,
/// };
///
/// let a = PortIdentity::new(PortOwner::Fader(OwnerId(1)), PortType::Audio, PortFlow::Output, 0);
/// let b = PortIdentity::new(PortOwner::TrackProcessor(OwnerId(2)), PortType::Audio, PortFlow::Input, 0);
///
/// let mut mgr = PortConnectionsManager::new();
/// mgr.ensure_connect(&a, &b, 1.0, false, true);
/// assert_eq!(mgr.get_source_or_dest(&b, true).map(|c| c.src()), Some(&a));
/// assert!(mgr.ensure_disconnect(&a, &b));
/// assert!(mgr.find_connection(&a, &b).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct PortConnectionsManager {
    connections: Vec<PortConnection>,
    by_src: ConnectionIndex,
    by_dest: ConnectionIndex,
}

impl Default for PortConnectionsManager {
    fn default() -> Self {
        Self::new()
    }
}

fn assert_control_thread(op: &str) {
    let on_render = is_processing_thread();
    if on_render {
        tracing::error!("{op} called on the processing thread");
    }
    debug_assert!(!on_render, "{op} called on the processing thread");
}

impl PortConnectionsManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self {
            connections: Vec::new(),
            by_src: ConnectionIndex::new(IndexKey::Src),
            by_dest: ConnectionIndex::new(IndexKey::Dest),
        }
    }

    /// Position of the `src -> dest` edge, found through the source index.
    fn position(&self, src: &PortIdentity, dest: &PortIdentity) -> Option<usize> {
        self.by_src
            .positions(src)
            .iter()
            .copied()
            .find(|&pos| self.connections[pos].dest() == dest)
    }

    /// Connects `src -> dest`, or updates the existing edge in place.
    ///
    /// At most one edge exists per pair; a repeated call overwrites the
    /// multiplier and flags.
    pub fn ensure_connect(
        &mut self,
        src: &PortIdentity,
        dest: &PortIdentity,
        multiplier: f32,
        locked: bool,
        enabled: bool,
    ) -> &PortConnection {
        assert_control_thread("ensure_connect");

        let pos = if let Some(pos) = self.position(src, dest) {
            self.connections[pos].update(multiplier, locked, enabled);
            pos
        } else {
            self.connections.push(PortConnection::new(
                src.clone(),
                dest.clone(),
                multiplier,
                locked,
                enabled,
            ));
            self.connections.len() - 1
        };
        self.regenerate_hashtables();

        tracing::debug!(
            "connections_connect: {}; have {} connections",
            self.connections[pos],
            self.connections.len()
        );
        &self.connections[pos]
    }

    /// Removes the `src -> dest` edge. Returns whether one existed.
    pub fn ensure_disconnect(&mut self, src: &PortIdentity, dest: &PortIdentity) -> bool {
        assert_control_thread("ensure_disconnect");

        let removed = self.position(src, dest).map(|pos| self.connections.remove(pos));
        self.regenerate_hashtables();

        if let Some(conn) = &removed {
            tracing::debug!(
                "connections_disconnect: {conn}; have {} connections",
                self.connections.len()
            );
        }
        removed.is_some()
    }

    /// Removes every edge with `id` at either end. Returns how many went.
    ///
    /// Owners call this before dropping a port.
    pub fn ensure_disconnect_all(&mut self, id: &PortIdentity) -> usize {
        assert_control_thread("ensure_disconnect_all");

        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(id));
        self.regenerate_hashtables();

        let removed = before - self.connections.len();
        if removed > 0 {
            tracing::debug!("connections_disconnect_all: {id}; removed {removed}");
        }
        removed
    }

    /// Batch form of [`ensure_disconnect_all`](Self::ensure_disconnect_all)
    /// for tearing down every port of a processor at once.
    pub fn ensure_disconnect_all_of(&mut self, ids: &[PortIdentity]) -> usize {
        assert_control_thread("ensure_disconnect_all_of");

        let before = self.connections.len();
        self.connections
            .retain(|c| !ids.iter().any(|id| c.touches(id)));
        self.regenerate_hashtables();

        let removed = before - self.connections.len();
        if removed > 0 {
            tracing::debug!(
                "connections_disconnect_all: {} ports; removed {removed}",
                ids.len()
            );
        }
        removed
    }

    /// Swaps the edge matching `before`'s endpoints for `after`, keeping its
    /// position. An existing edge on `after`'s pair is dropped so the pair
    /// stays unique. Returns `false` (and changes nothing) if no edge matches
    /// `before`.
    pub fn replace_connection(&mut self, before: &PortConnection, after: PortConnection) -> bool {
        assert_control_thread("replace_connection");

        let Some(pos) = self.position(before.src(), before.dest()) else {
            self.regenerate_hashtables();
            return false;
        };
        let dup = self
            .position(after.src(), after.dest())
            .filter(|&other| other != pos);

        tracing::debug!("connections_replace: {} -> {after}", self.connections[pos]);
        self.connections[pos] = after;
        if let Some(dup) = dup {
            self.connections.remove(dup);
        }
        self.regenerate_hashtables();
        true
    }

    /// Appends the edges adjacent to `id` to `out` and returns their count.
    ///
    /// With `sources == true` this finds edges pointing *at* `id`, which live
    /// in the destination-keyed index; with `false`, edges leaving `id`,
    /// which live in the source-keyed index. Matches come in insertion
    /// order. Pass `None` to count only; with a pre-sized `out` the query
    /// does not allocate.
    pub fn get_sources_or_dests<'a>(
        &'a self,
        out: Option<&mut Vec<&'a PortConnection>>,
        id: &PortIdentity,
        sources: bool,
    ) -> usize {
        let positions = self.index_for(sources).positions(id);
        if let Some(out) = out {
            out.extend(positions.iter().map(|&pos| &self.connections[pos]));
        }
        positions.len()
    }

    /// Like [`get_sources_or_dests`](Self::get_sources_or_dests), and also
    /// counts the unlocked matches. All matches are appended to `out`.
    pub fn get_unlocked_sources_or_dests<'a>(
        &'a self,
        out: Option<&mut Vec<&'a PortConnection>>,
        id: &PortIdentity,
        sources: bool,
    ) -> SourceDestCount {
        let positions = self.index_for(sources).positions(id);
        let unlocked = positions
            .iter()
            .filter(|&&pos| !self.connections[pos].locked())
            .count();
        if let Some(out) = out {
            out.extend(positions.iter().map(|&pos| &self.connections[pos]));
        }
        SourceDestCount {
            total: positions.len(),
            unlocked,
        }
    }

    /// Returns the single source (or destination) edge of `id`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::UnexpectedConnectionCount`] when there is not exactly
    /// one match.
    pub fn try_source_or_dest(
        &self,
        id: &PortIdentity,
        sources: bool,
    ) -> Result<&PortConnection, RoutingError> {
        match self.index_for(sources).positions(id) {
            [pos] => Ok(&self.connections[*pos]),
            other => Err(RoutingError::unexpected_count(id, sources, other.len())),
        }
    }

    /// Returns the single source (or destination) edge of `id`, or logs and
    /// returns `None` when the count is not exactly one.
    pub fn get_source_or_dest(&self, id: &PortIdentity, sources: bool) -> Option<&PortConnection> {
        match self.try_source_or_dest(id, sources) {
            Ok(conn) => Some(conn),
            Err(err) => {
                tracing::error!("{err}");
                None
            }
        }
    }

    /// Finds the `src -> dest` edge by scanning the whole edge list.
    pub fn find_connection(&self, src: &PortIdentity, dest: &PortIdentity) -> Option<&PortConnection> {
        self.connections.iter().find(|c| c.matches(src, dest))
    }

    /// Structural membership test (all fields compared).
    pub fn contains_connection(&self, conn: &PortConnection) -> bool {
        self.connections.iter().any(|c| c == conn)
    }

    /// Clears every edge, then copies `other`'s edges if given.
    pub fn reset_connections(&mut self, other: Option<&PortConnectionsManager>) {
        assert_control_thread("reset_connections");

        self.connections.clear();
        if let Some(other) = other {
            self.connections.extend_from_slice(&other.connections);
        }
        self.regenerate_hashtables();
        tracing::debug!("connections_reset: have {} connections", self.connections.len());
    }

    /// Rebuilds the whole edge set from persisted records.
    ///
    /// Records may come in any order. A pair that appears more than once
    /// keeps the fields of its last record, so feeding the same list twice
    /// yields the same state.
    pub fn reset_from<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = PortConnection>,
    {
        assert_control_thread("reset_from");

        self.connections.clear();
        for record in records {
            if let Some(existing) = self
                .connections
                .iter_mut()
                .find(|c| c.matches(record.src(), record.dest()))
            {
                *existing = record;
            } else {
                self.connections.push(record);
            }
        }
        self.regenerate_hashtables();
        tracing::debug!("connections_reset: loaded {} connections", self.connections.len());
    }

    /// Rebuilds both indices from the edge list.
    ///
    /// The only writer of the indices. Never patch them incrementally.
    pub fn regenerate_hashtables(&mut self) {
        assert_control_thread("regenerate_hashtables");

        self.by_src.rebuild(&self.connections);
        self.by_dest.rebuild(&self.connections);
        tracing::trace!(
            "connections_reindex: {} edges, {} sources, {} destinations",
            self.connections.len(),
            self.by_src.key_count(),
            self.by_dest.key_count()
        );
    }

    /// Publishes a fresh route snapshot to every registered port.
    ///
    /// Only enabled edges are published. Plugin-owned peers carry their
    /// plugin's health handle. Returns the number of ports published to.
    pub fn publish_routes(&self, registry: &PortRegistry) -> usize {
        assert_control_thread("publish_routes");

        let entry = |peer: &PortIdentity, conn: &PortConnection| RouteEntry {
            peer: peer.clone(),
            multiplier: conn.multiplier(),
            plugin: registry.plugin_of(peer).cloned(),
        };

        let mut published = 0;
        for (id, port) in registry.ports() {
            let srcs = self
                .by_dest
                .positions(id)
                .iter()
                .map(|&pos| &self.connections[pos])
                .filter(|c| c.enabled())
                .map(|c| entry(c.src(), c))
                .collect();
            let dests = self
                .by_src
                .positions(id)
                .iter()
                .map(|&pos| &self.connections[pos])
                .filter(|c| c.enabled())
                .map(|c| entry(c.dest(), c))
                .collect();
            port.routes().store(PortRoutes { srcs, dests });
            published += 1;
        }
        tracing::trace!("connections_publish: {published} ports");
        published
    }

    /// Checks that every edge endpoint resolves in `registry`, including the
    /// owning plugin of plugin-owned ports.
    ///
    /// # Errors
    ///
    /// [`RoutingError::MissingPort`] or [`RoutingError::MissingPlugin`] for
    /// the first dangling endpoint.
    pub fn verify_ports(&self, registry: &PortRegistry) -> Result<(), RoutingError> {
        for conn in &self.connections {
            registry.resolve_endpoint(conn.src())?;
            registry.resolve_endpoint(conn.dest())?;
        }
        Ok(())
    }

    /// Sets the modulation scratch value of the `src -> dest` edge. Returns
    /// `false` if no such edge exists.
    ///
    /// Edge positions do not move, so the indices are left as they are.
    pub fn set_base_value(&mut self, src: &PortIdentity, dest: &PortIdentity, value: f32) -> bool {
        assert_control_thread("set_base_value");

        let Some(pos) = self.position(src, dest) else {
            return false;
        };
        self.connections[pos].set_base_value(value);
        true
    }

    /// All edges in insertion order.
    #[inline]
    pub fn connections(&self) -> &[PortConnection] {
        &self.connections
    }

    /// Number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns true if there are no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    #[inline]
    fn index_for(&self, sources: bool) -> &ConnectionIndex {
        if sources { &self.by_dest } else { &self.by_src }
    }
}

impl fmt::Display for PortConnectionsManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Port connections ({}):", self.connections.len())?;
        for (i, conn) in self.connections.iter().enumerate() {
            writeln!(f, "[{i}] {conn}")?;
        }
        Ok(())
    }
}
