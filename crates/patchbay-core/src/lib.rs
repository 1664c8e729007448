//! Patchbay Core - the port connection graph
//!
//! This crate holds the routing topology of a mixing engine: typed ports,
//! the weighted edges between them, and the caches the render thread reads
//! while the control thread rewires the graph.
//!
//! # Core Abstractions
//!
//! ## Graph
//!
//! - [`PortIdentity`] - Hashable key naming one port endpoint
//! - [`PortConnection`] - Directed edge with gain, lock and enable flags
//! - [`PortConnectionsManager`] - Edge list plus by-source and by-destination indices
//!
//! ## Live State
//!
//! - [`PortRegistry`] - Resolves identities to live ports, tracks and plugins
//! - [`RouteCache`] - Per-port snapshot of enabled neighbours, published lock-free
//! - [`AudioPort`], [`StereoPorts`], [`MidiPort`], [`ControlPort`] - Typed ports
//! - [`MidiEvents`] - Bounded event queue; [`copy_window`] / [`mix_scaled_window`] block ops
//!
//! ## Threading
//!
//! - [`ProcessingScope`] / [`is_processing_thread`] - Marks the render thread
//!
//! Topology changes run on the control thread and end with a full index
//! rebuild. New topology reaches the render thread only when the router calls
//! [`PortConnectionsManager::publish_routes`].
//!
//! # Example
//!
//! ```rust
//! use patchbay_core::{
//!     AudioPort, OwnerId, Port, PortConnectionsManager, PortFlow, PortIdentity, PortOwner,
//!     PortRegistry, PortType,
//! };
//!
//! let a = AudioPort::new(
//!     PortIdentity::new(PortOwner::Fader(OwnerId(1)), PortType::Audio, PortFlow::Output, 0),
//!     "out",
//!     256,
//! );
//! let b = AudioPort::new(
//!     PortIdentity::new(PortOwner::TrackProcessor(OwnerId(2)), PortType::Audio, PortFlow::Input, 0),
//!     "in",
//!     256,
//! );
//!
//! let mut registry = PortRegistry::new();
//! a.register(&mut registry);
//! b.register(&mut registry);
//!
//! let mut mgr = PortConnectionsManager::new();
//! mgr.ensure_connect(a.identity(), b.identity(), 0.5, false, true);
//! mgr.publish_routes(&registry);
//!
//! assert_eq!(a.routes().dest_count(), 1);
//! ```

pub mod buffer;
pub mod connection;
pub mod error;
pub mod identity;
mod index;
pub mod manager;
pub mod port;
pub mod registry;
pub mod routes;
pub mod thread;

pub use buffer::{MidiEvent, MidiEvents, copy_window, mix_scaled_window};
pub use connection::PortConnection;
pub use error::{Endpoint, RoutingError};
pub use identity::{OwnerId, PortFlags, PortFlow, PortIdentity, PortOwner, PortType};
pub use manager::{PortConnectionsManager, SourceDestCount};
pub use port::{AudioPort, ControlPort, MidiPort, Port, StereoPorts, TOGGLE_THRESHOLD};
pub use registry::{PluginInfo, PortRegistry, RegisteredPort, TrackInfo};
pub use routes::{PortRoutes, RouteCache, RouteEntry};
pub use thread::{ProcessingScope, is_processing_thread};
