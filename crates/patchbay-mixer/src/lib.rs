//! Patchbay Mixer - channel sends on top of the port graph
//!
//! A mixer channel taps its signal before and after the fader. Each of its
//! [`ChannelSend`] slots can forward a scaled copy of that tap to one
//! destination: another track's input, or a plugin's sidechain input group.
//!
//! # Core Abstractions
//!
//! - [`Channel`] - Owns the pre-fader/fader taps and a fixed array of sends
//! - [`ChannelSend`] - Enable toggle, amount control, and stereo or MIDI ports
//! - [`RoutingContext`] - Manager, registry, router and validator for one operation
//! - [`GraphRouter`] / [`PublishingRouter`] - "Topology changed" notification
//! - [`ConnectionValidator`] / [`TypeCompatibility`] - Target compatibility check
//! - [`MixerConfig`] - Block length, slot layout and tolerances, loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use patchbay_core::{OwnerId, PortConnectionsManager, PortFlow, PortOwner, PortRegistry, StereoPorts};
//! use patchbay_mixer::{
//!     Channel, MixerConfig, PublishingRouter, RoutingContext, SignalType, TypeCompatibility,
//! };
//!
//! let config = MixerConfig::default();
//! let mut registry = PortRegistry::new();
//! registry.register_track(OwnerId(2), "Reverb Bus");
//!
//! let mut channel = Channel::new(OwnerId(1), SignalType::Audio, &config);
//! channel.register_ports(&mut registry);
//! let bus_in = StereoPorts::new(
//!     PortOwner::TrackProcessor(OwnerId(2)),
//!     PortFlow::Input,
//!     0,
//!     "stereo_in",
//!     config.block_length,
//! );
//! bus_in.register(&mut registry);
//!
//! let mut connections = PortConnectionsManager::new();
//! let mut router = PublishingRouter::new();
//! let mut ctx = RoutingContext::new(&mut connections, &registry, &mut router, &TypeCompatibility);
//!
//! let (l, r) = bus_in.identities();
//! let send = channel.send_mut(6).unwrap();
//! send.connect_stereo(&mut ctx, l, r, false, true, true).unwrap();
//! assert_eq!(send.dest_name(&connections, &registry).unwrap(), "Reverb Bus input");
//! ```

pub mod channel;
pub mod config;
pub mod context;
pub mod error;
pub mod fader;
pub mod router;
pub mod send;
pub mod signal;
pub mod time;
pub mod validate;

pub use channel::Channel;
pub use config::MixerConfig;
pub use context::RoutingContext;
pub use error::{ConfigError, SendError};
pub use fader::{amp_to_fader, fader_to_amp, floats_equal_epsilon};
pub use router::{GraphRouter, PublishingRouter};
pub use send::{ChannelSend, ChannelSendRecord, SendIo};
pub use signal::{SignalIo, SignalPorts, SignalType};
pub use time::ProcessTimeInfo;
pub use validate::{ConnectionValidator, TypeCompatibility};
