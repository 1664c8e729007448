//! Port registry: resolves identities to live ports and owners.
//!
//! Connections refer to ports by [`PortIdentity`] only. The registry is where
//! an identity is turned back into something live (a port's label and route
//! cache, a track name, a plugin's health handle) and every lookup returns
//! `Result`, so a stale identity surfaces as [`RoutingError`] instead of a
//! dangling reference.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::RoutingError;
use crate::identity::{OwnerId, PortIdentity};
use crate::routes::RouteCache;

/// A registered port.
#[derive(Clone, Debug)]
pub struct RegisteredPort {
    label: String,
    routes: RouteCache,
}

impl RegisteredPort {
    /// Human-readable port label (e.g. the port symbol).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The port's published route cache.
    pub fn routes(&self) -> &RouteCache {
        &self.routes
    }
}

/// A registered track.
#[derive(Clone, Debug)]
pub struct TrackInfo {
    name: String,
}

impl TrackInfo {
    /// Track display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Shared descriptor of a hosted plugin.
///
/// The `instantiation_failed` flag is atomic: the plugin host may flip it at
/// any time and render-thread route entries hold an `Arc` to read it.
#[derive(Debug)]
pub struct PluginInfo {
    name: String,
    track: Option<OwnerId>,
    instantiation_failed: AtomicBool,
}

impl PluginInfo {
    /// Creates a descriptor for a plugin living on `track`.
    pub fn new(name: impl Into<String>, track: Option<OwnerId>) -> Self {
        Self {
            name: name.into(),
            track,
            instantiation_failed: AtomicBool::new(false),
        }
    }

    /// Plugin display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Track hosting the plugin, if any.
    pub fn track(&self) -> Option<OwnerId> {
        self.track
    }

    /// Returns `true` if the plugin failed to instantiate.
    #[inline]
    pub fn instantiation_failed(&self) -> bool {
        self.instantiation_failed.load(Ordering::Acquire)
    }

    /// Marks the plugin as (not) failed.
    pub fn set_instantiation_failed(&self, failed: bool) {
        self.instantiation_failed.store(failed, Ordering::Release);
    }
}

/// Registry of live ports, tracks and plugins.
#[derive(Debug, Default)]
pub struct PortRegistry {
    ports: HashMap<PortIdentity, RegisteredPort>,
    tracks: HashMap<OwnerId, TrackInfo>,
    plugins: HashMap<OwnerId, Arc<PluginInfo>>,
}

impl PortRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a port. Returns `false` if the identity was already
    /// registered, in which case the entry is replaced.
    pub fn register_port(
        &mut self,
        id: PortIdentity,
        label: impl Into<String>,
        routes: RouteCache,
    ) -> bool {
        let label = label.into();
        tracing::trace!("register port {id} ({label})");
        let replaced = self
            .ports
            .insert(id, RegisteredPort { label, routes })
            .is_some();
        if replaced {
            tracing::warn!("port registered twice; previous entry replaced");
        }
        !replaced
    }

    /// Removes a port. Edges touching it must already be gone.
    pub fn unregister_port(&mut self, id: &PortIdentity) -> Option<RegisteredPort> {
        self.ports.remove(id)
    }

    /// Resolves a port identity.
    pub fn port(&self, id: &PortIdentity) -> Result<&RegisteredPort, RoutingError> {
        self.ports
            .get(id)
            .ok_or_else(|| RoutingError::MissingPort(id.clone()))
    }

    /// Resolves a connection endpoint: the port itself and, for plugin-owned
    /// ports, the owning plugin.
    ///
    /// # Errors
    ///
    /// [`RoutingError::MissingPort`] or [`RoutingError::MissingPlugin`].
    pub fn resolve_endpoint(&self, id: &PortIdentity) -> Result<&RegisteredPort, RoutingError> {
        let port = self.port(id)?;
        if let Some(plugin) = id.owner().plugin() {
            self.plugin(plugin)?;
        }
        Ok(port)
    }

    /// Returns `true` if the identity resolves.
    pub fn contains_port(&self, id: &PortIdentity) -> bool {
        self.ports.contains_key(id)
    }

    /// Iterates over every registered port.
    pub fn ports(&self) -> impl Iterator<Item = (&PortIdentity, &RegisteredPort)> {
        self.ports.iter()
    }

    /// Number of registered ports.
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Registers or renames a track.
    pub fn register_track(&mut self, id: OwnerId, name: impl Into<String>) {
        self.tracks.insert(id, TrackInfo { name: name.into() });
    }

    /// Removes a track.
    pub fn unregister_track(&mut self, id: OwnerId) -> Option<TrackInfo> {
        self.tracks.remove(&id)
    }

    /// Resolves a track id.
    pub fn track(&self, id: OwnerId) -> Result<&TrackInfo, RoutingError> {
        self.tracks.get(&id).ok_or(RoutingError::MissingTrack(id))
    }

    /// Registers a plugin and returns its shared descriptor.
    pub fn register_plugin(
        &mut self,
        id: OwnerId,
        name: impl Into<String>,
        track: Option<OwnerId>,
    ) -> Arc<PluginInfo> {
        let info = Arc::new(PluginInfo::new(name, track));
        self.plugins.insert(id, Arc::clone(&info));
        info
    }

    /// Removes a plugin.
    pub fn unregister_plugin(&mut self, id: OwnerId) -> Option<Arc<PluginInfo>> {
        self.plugins.remove(&id)
    }

    /// Resolves a plugin id.
    pub fn plugin(&self, id: OwnerId) -> Result<&Arc<PluginInfo>, RoutingError> {
        self.plugins.get(&id).ok_or(RoutingError::MissingPlugin(id))
    }

    /// Plugin descriptor of the port's owner, for plugin-owned ports.
    pub fn plugin_of(&self, id: &PortIdentity) -> Option<&Arc<PluginInfo>> {
        id.owner().plugin().and_then(|p| self.plugins.get(&p))
    }

    /// Track the port belongs to, resolving plugin owners through their
    /// descriptor.
    pub fn track_of(&self, id: &PortIdentity) -> Option<OwnerId> {
        id.owner_track()
            .or_else(|| self.plugin_of(id).and_then(|p| p.track()))
    }

    /// Designation of a plugin port group, `"<track>/<plugin>/<group>"`.
    ///
    /// The track segment is omitted when the plugin has no known track.
    pub fn port_group_designation(
        &self,
        plugin: OwnerId,
        group: &str,
    ) -> Result<String, RoutingError> {
        let info = self.plugin(plugin)?;
        let track = info.track().and_then(|t| self.tracks.get(&t));
        Ok(match track {
            Some(track) => format!("{}/{}/{}", track.name(), info.name(), group),
            None => format!("{}/{}", info.name(), group),
        })
    }
}
