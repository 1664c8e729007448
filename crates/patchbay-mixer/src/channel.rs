//! Mixer channel: pre-fader and fader taps plus a fixed array of sends.

use patchbay_core::{OwnerId, PortConnectionsManager, PortFlow, PortIdentity, PortOwner, PortRegistry};

use crate::config::MixerConfig;
use crate::error::SendError;
use crate::send::ChannelSend;
use crate::signal::{SignalIo, SignalType};
use crate::time::ProcessTimeInfo;

/// The send-related part of a track's mixer channel.
///
/// The channel exclusively owns its sends; slot `i` lives at index `i`.
/// Before a channel is dropped its edges must be removed with
/// [`disconnect_all`](Self::disconnect_all).
#[derive(Debug)]
pub struct Channel {
    track: OwnerId,
    signal: SignalType,
    prefader_out: SignalIo,
    fader_out: SignalIo,
    sends: Vec<ChannelSend>,
}

impl Channel {
    /// Creates the channel for `track` with `config.send_slots` empty sends,
    /// at most 255 (the limit [`MixerConfig::validate`] enforces).
    pub fn new(track: OwnerId, signal: SignalType, config: &MixerConfig) -> Self {
        let (prefader, fader) = match signal {
            SignalType::Audio => ("prefader_stereo_out", "fader_stereo_out"),
            SignalType::Event => ("prefader_midi_out", "fader_midi_out"),
        };
        let max_slots = usize::from(u8::MAX);
        if config.send_slots > max_slots {
            tracing::warn!(
                "channel_new: track {track}; send_slots {} clamped to {max_slots}",
                config.send_slots
            );
        }
        let sends = (0..u8::MAX)
            .take(config.send_slots)
            .map(|slot| ChannelSend::new(track, slot, signal, config))
            .collect();

        Self {
            track,
            signal,
            prefader_out: SignalIo::new(
                signal,
                PortOwner::Prefader(track),
                PortFlow::Output,
                prefader,
                config,
            ),
            fader_out: SignalIo::new(
                signal,
                PortOwner::Fader(track),
                PortFlow::Output,
                fader,
                config,
            ),
            sends,
        }
    }

    /// Owning track.
    pub fn track(&self) -> OwnerId {
        self.track
    }

    /// Signal kind of the channel and its sends.
    pub fn signal_type(&self) -> SignalType {
        self.signal
    }

    /// Pre-fader output ports.
    pub fn prefader_out(&self) -> &SignalIo {
        &self.prefader_out
    }

    /// Pre-fader output ports, mutably.
    pub fn prefader_out_mut(&mut self) -> &mut SignalIo {
        &mut self.prefader_out
    }

    /// Fader output ports.
    pub fn fader_out(&self) -> &SignalIo {
        &self.fader_out
    }

    /// Fader output ports, mutably.
    pub fn fader_out_mut(&mut self) -> &mut SignalIo {
        &mut self.fader_out
    }

    /// All sends in slot order.
    pub fn sends(&self) -> &[ChannelSend] {
        &self.sends
    }

    /// The send in `slot`.
    pub fn send(&self, slot: usize) -> Option<&ChannelSend> {
        self.sends.get(slot)
    }

    /// The send in `slot`, mutably.
    pub fn send_mut(&mut self, slot: usize) -> Option<&mut ChannelSend> {
        self.sends.get_mut(slot)
    }

    /// Every port identity the channel and its sends own.
    pub fn port_identities(&self) -> Vec<PortIdentity> {
        let mut ids: Vec<PortIdentity> = self.prefader_out.identities().iter().cloned().collect();
        ids.extend(self.fader_out.identities().iter().cloned());
        for send in &self.sends {
            ids.extend(send.port_identities());
        }
        ids
    }

    /// Registers the taps and every send port.
    pub fn register_ports(&self, registry: &mut PortRegistry) {
        self.prefader_out.register(registry);
        self.fader_out.register(registry);
        for send in &self.sends {
            send.register_ports(registry);
        }
    }

    /// Unregisters the taps and every send port.
    pub fn unregister_ports(&self, registry: &mut PortRegistry) {
        self.prefader_out.unregister(registry);
        self.fader_out.unregister(registry);
        for send in &self.sends {
            send.unregister_ports(registry);
        }
    }

    /// Connects every send's inputs to its tap.
    pub fn connect_sends_to_owner(
        &self,
        connections: &mut PortConnectionsManager,
    ) -> Result<(), SendError> {
        let prefader = self.prefader_out.identities();
        let fader = self.fader_out.identities();
        for send in &self.sends {
            send.connect_to_owner(connections, &prefader, &fader)?;
        }
        Ok(())
    }

    /// Clears every send's buffers ahead of a cycle.
    pub fn prepare_process(&mut self) {
        for send in &mut self.sends {
            send.prepare_process();
        }
    }

    /// Feeds each send from its tap and renders it.
    pub fn process_sends(&mut self, time: &ProcessTimeInfo) {
        let Self {
            prefader_out,
            fader_out,
            sends,
            ..
        } = self;
        for send in sends.iter_mut() {
            let tap = if send.is_prefader() {
                &*prefader_out
            } else {
                &*fader_out
            };
            send.receive_tap(tap, time);
            send.process_block(time);
        }
    }

    /// Removes every edge touching the channel's ports. Returns how many
    /// went.
    pub fn disconnect_all(&self, connections: &mut PortConnectionsManager) -> usize {
        let removed = connections.ensure_disconnect_all_of(&self.port_identities());
        tracing::debug!("channel_disconnect_all: track {}; removed {removed}", self.track);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MixerConfig {
        MixerConfig {
            block_length: 16,
            ..MixerConfig::default()
        }
    }

    #[test]
    fn test_sends_created_per_slot() {
        let ch = Channel::new(OwnerId(2), SignalType::Audio, &config());
        assert_eq!(ch.sends().len(), 9);
        for (i, send) in ch.sends().iter().enumerate() {
            assert_eq!(usize::from(send.slot()), i);
            assert_eq!(send.track(), OwnerId(2));
            assert!(send.is_empty());
        }
        assert!(ch.send(9).is_none());
    }

    #[test]
    fn test_connect_sends_to_owner_taps() {
        let ch = Channel::new(OwnerId(2), SignalType::Audio, &config());
        let mut mgr = PortConnectionsManager::new();
        ch.connect_sends_to_owner(&mut mgr).unwrap();
        assert_eq!(mgr.len(), 18);

        let pre = ch.prefader_out().identities();
        let post = ch.fader_out().identities();
        assert_eq!(mgr.get_sources_or_dests(None, pre.first(), false), 6);
        assert_eq!(mgr.get_sources_or_dests(None, post.first(), false), 3);
        assert!(mgr.connections().iter().all(|c| c.locked() && c.enabled()));

        assert_eq!(ch.disconnect_all(&mut mgr), 18);
        assert!(mgr.is_empty());
    }

    #[test]
    fn test_unvalidated_slot_count_clamped() {
        let cfg = MixerConfig {
            send_slots: 300,
            ..config()
        };
        assert!(cfg.validate().is_err());
        let ch = Channel::new(OwnerId(1), SignalType::Audio, &cfg);
        assert_eq!(ch.sends().len(), 255);
        assert_eq!(ch.sends().last().map(ChannelSend::slot), Some(254));
    }

    #[test]
    fn test_register_round_trip() {
        let ch = Channel::new(OwnerId(1), SignalType::Event, &config());
        let mut reg = PortRegistry::new();
        ch.register_ports(&mut reg);
        assert_eq!(reg.port_count(), ch.port_identities().len());
        ch.unregister_ports(&mut reg);
        assert_eq!(reg.port_count(), 0);
    }
}
