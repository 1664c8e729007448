//! Port identities, the node keys of the connection graph.
//!
//! A [`PortIdentity`] names one port endpoint without holding a reference to
//! it: who owns the port ([`PortOwner`]), what flows through it ([`PortType`]),
//! its direction ([`PortFlow`]), its index among the owner's ports, a set of
//! capability [`PortFlags`], and an optional port-group label (plugins use the
//! group to designate sidechain inputs).
//!
//! Identities are plain values: cloning one never extends the lifetime of the
//! port it names. Equality and hashing cover every field, so an identity can be
//! used directly as a `HashMap` key.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a processing entity (track, plugin) that owns ports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub u32);

impl OwnerId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The entity a port belongs to.
///
/// Closed set: every behavioral decision keyed on the owner (track input vs.
/// plugin sidechain, pre- vs. post-fader tap) matches on this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortOwner {
    /// A track's input processor (the destination of track sends).
    TrackProcessor(OwnerId),
    /// A channel's pre-fader stage.
    Prefader(OwnerId),
    /// A channel's fader stage.
    Fader(OwnerId),
    /// One send slot of a channel.
    ChannelSend {
        /// Track owning the channel.
        track: OwnerId,
        /// Send slot within the channel.
        slot: u8,
    },
    /// A hosted plugin instance.
    Plugin(OwnerId),
    /// Engine-level control ports (transport, monitor).
    Engine,
}

impl PortOwner {
    /// Returns the track this owner belongs to, for track-scoped owners.
    ///
    /// Plugins are resolved to their track through the registry, not here.
    pub fn track(self) -> Option<OwnerId> {
        match self {
            Self::TrackProcessor(t) | Self::Prefader(t) | Self::Fader(t) => Some(t),
            Self::ChannelSend { track, .. } => Some(track),
            Self::Plugin(_) | Self::Engine => None,
        }
    }

    /// Returns the plugin id if this owner is a plugin.
    pub fn plugin(self) -> Option<OwnerId> {
        match self {
            Self::Plugin(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for PortOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrackProcessor(t) => write!(f, "track[{t}]"),
            Self::Prefader(t) => write!(f, "prefader[{t}]"),
            Self::Fader(t) => write!(f, "fader[{t}]"),
            Self::ChannelSend { track, slot } => write!(f, "send[{track}:{slot}]"),
            Self::Plugin(p) => write!(f, "plugin[{p}]"),
            Self::Engine => write!(f, "engine"),
        }
    }
}

/// The kind of signal a port carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortType {
    /// Mono audio samples.
    Audio,
    /// MIDI / note events.
    Event,
    /// A single control value per block.
    Control,
    /// Audio-rate control voltage.
    Cv,
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Audio => "audio",
            Self::Event => "event",
            Self::Control => "control",
            Self::Cv => "cv",
        })
    }
}

/// Signal direction relative to the owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortFlow {
    /// The owner reads from this port.
    Input,
    /// The owner writes to this port.
    Output,
}

/// Capability and role flags attached to a port identity.
///
/// # Example
///
/// ```rust
/// use patchbay_core::PortFlags;
///
/// let flags = PortFlags::AMPLITUDE.union(PortFlags::AUTOMATABLE);
/// assert!(flags.contains(PortFlags::AMPLITUDE));
/// assert!(!flags.contains(PortFlags::TOGGLE));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortFlags(u32);

impl PortFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Control value is a linear amplitude.
    pub const AMPLITUDE: Self = Self(1 << 0);
    /// Control value is an on/off toggle.
    pub const TOGGLE: Self = Self(1 << 1);
    /// Control value may be automated.
    pub const AUTOMATABLE: Self = Self(1 << 2);
    /// Port is part of a plugin sidechain input group.
    pub const SIDECHAIN: Self = Self(1 << 3);
    /// Left channel of a stereo pair.
    pub const STEREO_L: Self = Self(1 << 4);
    /// Right channel of a stereo pair.
    pub const STEREO_R: Self = Self(1 << 5);
    /// The enable toggle of a channel send.
    pub const CHANNEL_SEND_ENABLED: Self = Self(1 << 6);
    /// The amount control of a channel send.
    pub const CHANNEL_SEND_AMOUNT: Self = Self(1 << 7);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if no flags are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw bit pattern.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Immutable, hashable identity of one port endpoint.
///
/// Two identities compare equal only if every field matches; an owner never
/// exposes two ports with the same type, flow and index, so distinct ports
/// never collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortIdentity {
    owner: PortOwner,
    port_type: PortType,
    flow: PortFlow,
    index: u16,
    #[serde(default)]
    flags: PortFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    port_group: Option<String>,
}

impl PortIdentity {
    /// Creates an identity with no flags and no port group.
    pub fn new(owner: PortOwner, port_type: PortType, flow: PortFlow, index: u16) -> Self {
        Self {
            owner,
            port_type,
            flow,
            index,
            flags: PortFlags::NONE,
            port_group: None,
        }
    }

    /// Adds `flags` to the identity.
    #[must_use]
    pub fn with_flags(mut self, flags: PortFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Sets the port-group label.
    #[must_use]
    pub fn with_port_group(mut self, group: impl Into<String>) -> Self {
        self.port_group = Some(group.into());
        self
    }

    /// Returns the owning entity.
    #[inline]
    pub fn owner(&self) -> PortOwner {
        self.owner
    }

    /// Returns the signal type.
    #[inline]
    pub fn port_type(&self) -> PortType {
        self.port_type
    }

    /// Returns the direction.
    #[inline]
    pub fn flow(&self) -> PortFlow {
        self.flow
    }

    /// Returns the index among the owner's ports.
    #[inline]
    pub fn index(&self) -> u16 {
        self.index
    }

    /// Returns the flag set.
    #[inline]
    pub fn flags(&self) -> PortFlags {
        self.flags
    }

    /// Returns the port-group label, if any.
    #[inline]
    pub fn port_group(&self) -> Option<&str> {
        self.port_group.as_deref()
    }

    /// Returns `true` for input ports.
    #[inline]
    pub fn is_input(&self) -> bool {
        self.flow == PortFlow::Input
    }

    /// Returns `true` for output ports.
    #[inline]
    pub fn is_output(&self) -> bool {
        self.flow == PortFlow::Output
    }

    /// Returns `true` if the port belongs to a sidechain input group.
    #[inline]
    pub fn is_sidechain(&self) -> bool {
        self.flags.contains(PortFlags::SIDECHAIN)
    }

    /// Returns the owning track for track-scoped owners.
    #[inline]
    pub fn owner_track(&self) -> Option<OwnerId> {
        self.owner.track()
    }

    /// Default compatibility rule for a `self -> dest` connection.
    ///
    /// Requires an output feeding an input on a different owner, with a
    /// compatible signal pairing: audio, event and CV connect to their own
    /// kind, CV may modulate a control, and controls may drive controls.
    pub fn can_connect_to(&self, dest: &PortIdentity) -> bool {
        if !self.is_output() || !dest.is_input() || self.owner == dest.owner {
            return false;
        }
        matches!(
            (self.port_type, dest.port_type),
            (PortType::Audio, PortType::Audio)
                | (PortType::Event, PortType::Event)
                | (PortType::Cv, PortType::Cv | PortType::Control)
                | (PortType::Control, PortType::Control)
        )
    }
}

impl fmt::Display for PortIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.flow {
            PortFlow::Input => "in",
            PortFlow::Output => "out",
        };
        write!(f, "{}/{}-{}{}", self.owner, self.port_type, dir, self.index)?;
        if let Some(group) = &self.port_group {
            write!(f, " [{group}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn audio_out(owner: PortOwner, index: u16) -> PortIdentity {
        PortIdentity::new(owner, PortType::Audio, PortFlow::Output, index)
    }

    fn audio_in(owner: PortOwner, index: u16) -> PortIdentity {
        PortIdentity::new(owner, PortType::Audio, PortFlow::Input, index)
    }

    #[test]
    fn distinct_ports_never_compare_equal() {
        let t = PortOwner::TrackProcessor(OwnerId(1));
        let ids = [
            audio_in(t, 0),
            audio_in(t, 1),
            audio_out(t, 0),
            PortIdentity::new(t, PortType::Event, PortFlow::Input, 0),
            audio_in(PortOwner::TrackProcessor(OwnerId(2)), 0),
            audio_in(PortOwner::Fader(OwnerId(1)), 0),
        ];
        let set: HashSet<_> = ids.iter().cloned().collect();
        assert_eq!(set.len(), ids.len());
    }

    #[test]
    fn equal_identities_hash_equal() {
        let a = audio_in(PortOwner::Plugin(OwnerId(4)), 2).with_port_group("Sidechain");
        let b = audio_in(PortOwner::Plugin(OwnerId(4)), 2).with_port_group("Sidechain");
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn flags_accumulate() {
        let id = audio_in(PortOwner::Engine, 0)
            .with_flags(PortFlags::AMPLITUDE)
            .with_flags(PortFlags::AUTOMATABLE);
        assert!(id.flags().contains(PortFlags::AMPLITUDE));
        assert!(id.flags().contains(PortFlags::AUTOMATABLE));
        assert!(!id.flags().contains(PortFlags::TOGGLE));
        assert!(PortFlags::NONE.is_empty());
    }

    #[test]
    fn owner_track_resolution() {
        let send = PortOwner::ChannelSend {
            track: OwnerId(9),
            slot: 3,
        };
        assert_eq!(send.track(), Some(OwnerId(9)));
        assert_eq!(PortOwner::Fader(OwnerId(2)).track(), Some(OwnerId(2)));
        assert_eq!(PortOwner::Plugin(OwnerId(5)).track(), None);
        assert_eq!(PortOwner::Plugin(OwnerId(5)).plugin(), Some(OwnerId(5)));
        assert_eq!(PortOwner::Engine.track(), None);
    }

    #[test]
    fn compatibility_rules() {
        let a = PortOwner::Fader(OwnerId(1));
        let b = PortOwner::TrackProcessor(OwnerId(2));

        assert!(audio_out(a, 0).can_connect_to(&audio_in(b, 0)));
        // wrong direction
        assert!(!audio_in(a, 0).can_connect_to(&audio_in(b, 0)));
        assert!(!audio_out(a, 0).can_connect_to(&audio_out(b, 0)));
        // same owner
        assert!(!audio_out(b, 0).can_connect_to(&audio_in(b, 0)));
        // type mismatch
        let midi_in = PortIdentity::new(b, PortType::Event, PortFlow::Input, 0);
        assert!(!audio_out(a, 0).can_connect_to(&midi_in));
        // cv -> control modulation
        let cv = PortIdentity::new(a, PortType::Cv, PortFlow::Output, 0);
        let ctl = PortIdentity::new(b, PortType::Control, PortFlow::Input, 0);
        assert!(cv.can_connect_to(&ctl));
        assert!(!ctl.can_connect_to(&cv));
    }

    #[test]
    fn display_is_readable() {
        let id = audio_in(PortOwner::Plugin(OwnerId(3)), 1).with_port_group("Sidechain");
        assert_eq!(id.to_string(), "plugin[3]/audio-in1 [Sidechain]");
        let send = PortIdentity::new(
            PortOwner::ChannelSend {
                track: OwnerId(2),
                slot: 0,
            },
            PortType::Event,
            PortFlow::Output,
            0,
        );
        assert_eq!(send.to_string(), "send[2:0]/event-out0");
    }
}
