//! Signal kinds, target port sets and the live port sets carrying them.

use core::fmt;

use patchbay_core::{
    MidiPort, Port, PortFlow, PortIdentity, PortOwner, PortRegistry, PortType, RouteCache,
    StereoPorts,
};
use serde::{Deserialize, Serialize};

use crate::config::MixerConfig;

/// Signal a channel (and therefore each of its sends) carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    /// Stereo audio.
    Audio,
    /// MIDI events.
    Event,
}

impl SignalType {
    /// Port type carrying this signal.
    pub fn port_type(self) -> PortType {
        match self {
            Self::Audio => PortType::Audio,
            Self::Event => PortType::Event,
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Audio => "audio",
            Self::Event => "event",
        })
    }
}

/// A set of port identities a send can connect to, or is connected to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalPorts {
    /// Left/right audio pair.
    Stereo {
        /// Left channel.
        l: PortIdentity,
        /// Right channel.
        r: PortIdentity,
    },
    /// Single event port.
    Midi(PortIdentity),
}

impl SignalPorts {
    /// Signal kind of the set.
    pub fn signal_type(&self) -> SignalType {
        match self {
            Self::Stereo { .. } => SignalType::Audio,
            Self::Midi(_) => SignalType::Event,
        }
    }

    /// Ports in channel order (left then right for stereo).
    pub fn iter(&self) -> impl Iterator<Item = &PortIdentity> {
        let (first, second) = match self {
            Self::Stereo { l, r } => (l, Some(r)),
            Self::Midi(port) => (port, None),
        };
        core::iter::once(first).chain(second)
    }

    /// First port of the set (left channel, or the MIDI port).
    pub fn first(&self) -> &PortIdentity {
        match self {
            Self::Stereo { l, .. } => l,
            Self::Midi(port) => port,
        }
    }
}

/// Live ports carrying one signal: a stereo pair or a MIDI port.
#[derive(Debug)]
pub enum SignalIo {
    /// Left/right audio ports.
    Stereo(StereoPorts),
    /// Event port.
    Midi(MidiPort),
}

impl SignalIo {
    /// Creates the ports for `signal`, labelled `<prefix>_l`/`<prefix>_r`
    /// for audio or `<prefix>` for MIDI.
    pub fn new(
        signal: SignalType,
        owner: PortOwner,
        flow: PortFlow,
        prefix: &str,
        config: &MixerConfig,
    ) -> Self {
        match signal {
            SignalType::Audio => Self::Stereo(StereoPorts::new(
                owner,
                flow,
                0,
                prefix,
                config.block_length,
            )),
            SignalType::Event => Self::Midi(MidiPort::new(
                PortIdentity::new(owner, PortType::Event, flow, 0),
                prefix,
                config.midi_event_capacity,
            )),
        }
    }

    /// Signal kind carried.
    pub fn signal_type(&self) -> SignalType {
        match self {
            Self::Stereo(_) => SignalType::Audio,
            Self::Midi(_) => SignalType::Event,
        }
    }

    /// Identities of the ports.
    pub fn identities(&self) -> SignalPorts {
        match self {
            Self::Stereo(pair) => SignalPorts::Stereo {
                l: pair.l.identity().clone(),
                r: pair.r.identity().clone(),
            },
            Self::Midi(port) => SignalPorts::Midi(port.identity().clone()),
        }
    }

    /// Route cache of the first port (left channel, or the MIDI port).
    pub fn primary_routes(&self) -> &RouteCache {
        match self {
            Self::Stereo(pair) => pair.l.routes(),
            Self::Midi(port) => port.routes(),
        }
    }

    /// Resets the per-block state of every port.
    pub fn clear_buffers(&mut self) {
        match self {
            Self::Stereo(pair) => pair.clear_buffers(),
            Self::Midi(port) => port.clear_buffer(),
        }
    }

    /// Registers every port.
    pub fn register(&self, registry: &mut PortRegistry) {
        match self {
            Self::Stereo(pair) => pair.register(registry),
            Self::Midi(port) => {
                port.register(registry);
            }
        }
    }

    /// Unregisters every port.
    pub fn unregister(&self, registry: &mut PortRegistry) {
        match self {
            Self::Stereo(pair) => pair.unregister(registry),
            Self::Midi(port) => port.unregister(registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchbay_core::OwnerId;

    #[test]
    fn test_iter_order() {
        let owner = PortOwner::TrackProcessor(OwnerId(1));
        let l = PortIdentity::new(owner, PortType::Audio, PortFlow::Input, 0);
        let r = PortIdentity::new(owner, PortType::Audio, PortFlow::Input, 1);
        let set = SignalPorts::Stereo {
            l: l.clone(),
            r: r.clone(),
        };
        let ids: Vec<_> = set.iter().collect();
        assert_eq!(ids, vec![&l, &r]);
        assert_eq!(set.signal_type(), SignalType::Audio);

        let midi = SignalPorts::Midi(PortIdentity::new(owner, PortType::Event, PortFlow::Input, 0));
        assert_eq!(midi.iter().count(), 1);
        assert_eq!(midi.signal_type().port_type(), PortType::Event);
    }
}
