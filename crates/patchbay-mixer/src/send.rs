//! Channel sends.
//!
//! A [`ChannelSend`] taps its channel before or after the fader and forwards
//! a scaled copy to one destination: another track's input, or a plugin's
//! sidechain input group.
//!
//! # States
//!
//! The `enabled` toggle and the outgoing edges of the send's output ports
//! give three steady states:
//!
//! - **Empty**: toggle off, no outgoing edge.
//! - **Connected to a track**: toggle on, one edge per output port into a
//!   track input.
//! - **Connected to a sidechain**: one edge per output port into a plugin's
//!   sidechain group, with `is_sidechain` set.
//!
//! Connecting always removes the previous outgoing edges first, so a send
//! never has two destinations.
//!
//! # Thread Safety
//!
//! [`process_block`](ChannelSend::process_block) and the render-thread
//! branch of [`is_enabled`](ChannelSend::is_enabled) read only the output
//! port's published route cache and the atomic control values. Everything
//! that takes a [`RoutingContext`] or a manager reference is control-thread
//! work.

use patchbay_core::{
    ControlPort, MidiPort, OwnerId, Port, PortConnection, PortConnectionsManager, PortFlags,
    PortFlow, PortIdentity, PortOwner, PortRegistry, PortType, RouteCache, RouteEntry,
    StereoPorts, copy_window, is_processing_thread, mix_scaled_window,
};
use serde::{Deserialize, Serialize};

use crate::config::MixerConfig;
use crate::context::RoutingContext;
use crate::error::SendError;
use crate::fader::{amp_to_fader, fader_to_amp, floats_equal_epsilon};
use crate::signal::{SignalIo, SignalPorts, SignalType};
use crate::time::ProcessTimeInfo;

/// Ports a send reads from and writes to. Fixed at construction.
#[derive(Debug)]
pub enum SendIo {
    /// Stereo audio send.
    Audio {
        /// Tapped channel signal.
        stereo_in: StereoPorts,
        /// Scaled copy towards the destination.
        stereo_out: StereoPorts,
    },
    /// MIDI send.
    Midi {
        /// Tapped channel events.
        midi_in: MidiPort,
        /// Events towards the destination.
        midi_out: MidiPort,
    },
}

/// Persisted state of a send.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelSendRecord {
    /// Slot within the channel.
    pub slot: u8,
    /// Linear send amount.
    pub amount: f32,
    /// Enable toggle.
    pub enabled: bool,
    /// Whether the destination is a sidechain group.
    pub is_sidechain: bool,
    /// Identity of the amount control.
    pub amount_port: PortIdentity,
    /// Identity of the enable toggle.
    pub enabled_port: PortIdentity,
    /// Input port identities.
    pub inputs: SignalPorts,
    /// Output port identities.
    pub outputs: SignalPorts,
}

/// One send slot of a mixer channel.
#[derive(Debug)]
pub struct ChannelSend {
    track: OwnerId,
    slot: u8,
    post_fader_start: usize,
    unity_epsilon: f32,
    enabled: ControlPort,
    amount: ControlPort,
    is_sidechain: bool,
    io: SendIo,
}

impl ChannelSend {
    /// Creates an empty send in `slot` of `track`'s channel.
    ///
    /// Port symbols are numbered from 1: slot 0 owns
    /// `channel_send_1_enabled`, `channel_send_1_amount`, and so on.
    pub fn new(track: OwnerId, slot: u8, signal: SignalType, config: &MixerConfig) -> Self {
        let owner = PortOwner::ChannelSend { track, slot };
        let n = u16::from(slot) + 1;

        let enabled = ControlPort::new(
            PortIdentity::new(owner, PortType::Control, PortFlow::Input, 0)
                .with_flags(PortFlags::TOGGLE.union(PortFlags::CHANNEL_SEND_ENABLED)),
            format!("channel_send_{n}_enabled"),
            0.0,
        );
        let amount = ControlPort::new(
            PortIdentity::new(owner, PortType::Control, PortFlow::Input, 1).with_flags(
                PortFlags::AMPLITUDE
                    .union(PortFlags::AUTOMATABLE)
                    .union(PortFlags::CHANNEL_SEND_AMOUNT),
            ),
            format!("channel_send_{n}_amount"),
            1.0,
        );

        let io = match signal {
            SignalType::Audio => SendIo::Audio {
                stereo_in: StereoPorts::new(
                    owner,
                    PortFlow::Input,
                    0,
                    &format!("channel_send_{n}_audio_in"),
                    config.block_length,
                ),
                stereo_out: StereoPorts::new(
                    owner,
                    PortFlow::Output,
                    0,
                    &format!("channel_send_{n}_audio_out"),
                    config.block_length,
                ),
            },
            SignalType::Event => SendIo::Midi {
                midi_in: MidiPort::new(
                    PortIdentity::new(owner, PortType::Event, PortFlow::Input, 0),
                    format!("channel_send_{n}_midi_in"),
                    config.midi_event_capacity,
                ),
                midi_out: MidiPort::new(
                    PortIdentity::new(owner, PortType::Event, PortFlow::Output, 0),
                    format!("channel_send_{n}_midi_out"),
                    config.midi_event_capacity,
                ),
            },
        };

        Self {
            track,
            slot,
            post_fader_start: config.post_fader_start_slot,
            unity_epsilon: config.unity_epsilon,
            enabled,
            amount,
            is_sidechain: false,
            io,
        }
    }

    /// Owning track.
    pub fn track(&self) -> OwnerId {
        self.track
    }

    /// Slot within the channel.
    pub fn slot(&self) -> u8 {
        self.slot
    }

    /// Port owner shared by all of the send's ports.
    pub fn owner(&self) -> PortOwner {
        PortOwner::ChannelSend {
            track: self.track,
            slot: self.slot,
        }
    }

    /// Signal kind carried.
    pub fn signal_type(&self) -> SignalType {
        match self.io {
            SendIo::Audio { .. } => SignalType::Audio,
            SendIo::Midi { .. } => SignalType::Event,
        }
    }

    /// Returns `true` if the send taps the pre-fader signal.
    pub fn is_prefader(&self) -> bool {
        usize::from(self.slot) < self.post_fader_start
    }

    /// Returns `true` if the enable toggle is off.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.enabled.is_toggled()
    }

    /// Returns `true` if the send was connected as a sidechain.
    pub fn is_sidechain(&self) -> bool {
        self.is_sidechain
    }

    /// Returns `true` if the send is on and feeds a sidechain group.
    pub fn is_target_sidechain(&self) -> bool {
        !self.is_empty() && self.is_sidechain
    }

    /// The enable toggle.
    pub fn enabled_port(&self) -> &ControlPort {
        &self.enabled
    }

    /// The amount control.
    pub fn amount_port(&self) -> &ControlPort {
        &self.amount
    }

    /// Raw value of the enable toggle.
    pub fn enabled_value(&self) -> f32 {
        self.enabled.get()
    }

    /// Linear send amount.
    pub fn amount(&self) -> f32 {
        self.amount.get()
    }

    /// Sets the linear send amount.
    pub fn set_amount(&self, amount: f32) {
        self.amount.set(amount);
    }

    /// Send amount as a fader position in `[0, 1]`.
    pub fn amount_for_widgets(&self) -> f32 {
        amp_to_fader(self.amount())
    }

    /// Sets the send amount from a fader position in `[0, 1]`.
    pub fn set_amount_from_widget(&self, position: f32) {
        self.set_amount(fader_to_amp(position));
    }

    /// The send's ports.
    pub fn io(&self) -> &SendIo {
        &self.io
    }

    /// The send's ports, mutably.
    pub fn io_mut(&mut self) -> &mut SendIo {
        &mut self.io
    }

    /// Identities of the input ports.
    pub fn inputs(&self) -> SignalPorts {
        match &self.io {
            SendIo::Audio { stereo_in, .. } => SignalPorts::Stereo {
                l: stereo_in.l.identity().clone(),
                r: stereo_in.r.identity().clone(),
            },
            SendIo::Midi { midi_in, .. } => SignalPorts::Midi(midi_in.identity().clone()),
        }
    }

    /// Identities of the output ports.
    pub fn outputs(&self) -> SignalPorts {
        match &self.io {
            SendIo::Audio { stereo_out, .. } => SignalPorts::Stereo {
                l: stereo_out.l.identity().clone(),
                r: stereo_out.r.identity().clone(),
            },
            SendIo::Midi { midi_out, .. } => SignalPorts::Midi(midi_out.identity().clone()),
        }
    }

    /// Every port identity the send owns.
    pub fn port_identities(&self) -> Vec<PortIdentity> {
        let mut ids = vec![
            self.enabled.identity().clone(),
            self.amount.identity().clone(),
        ];
        ids.extend(self.inputs().iter().cloned());
        ids.extend(self.outputs().iter().cloned());
        ids
    }

    fn primary_out_routes(&self) -> &RouteCache {
        match &self.io {
            SendIo::Audio { stereo_out, .. } => stereo_out.l.routes(),
            SendIo::Midi { midi_out, .. } => midi_out.routes(),
        }
    }

    /// Registers every port of the send.
    pub fn register_ports(&self, registry: &mut PortRegistry) {
        self.enabled.register(registry);
        self.amount.register(registry);
        match &self.io {
            SendIo::Audio {
                stereo_in,
                stereo_out,
            } => {
                stereo_in.register(registry);
                stereo_out.register(registry);
            }
            SendIo::Midi { midi_in, midi_out } => {
                midi_in.register(registry);
                midi_out.register(registry);
            }
        }
    }

    /// Unregisters every port of the send. Edges must already be gone.
    pub fn unregister_ports(&self, registry: &mut PortRegistry) {
        self.enabled.unregister(registry);
        self.amount.unregister(registry);
        match &self.io {
            SendIo::Audio {
                stereo_in,
                stereo_out,
            } => {
                stereo_in.unregister(registry);
                stereo_out.unregister(registry);
            }
            SendIo::Midi { midi_in, midi_out } => {
                midi_in.unregister(registry);
                midi_out.unregister(registry);
            }
        }
    }

    /// Returns `true` if the send is on and its destination is usable.
    ///
    /// On the processing thread this reads the output port's published
    /// routes: exactly one destination, not owned by a plugin that failed to
    /// instantiate. Elsewhere it asks the manager for the single destination
    /// and resolves plugin owners through the registry.
    pub fn is_enabled(&self, connections: &PortConnectionsManager, registry: &PortRegistry) -> bool {
        if self.is_empty() {
            return false;
        }
        if is_processing_thread() {
            return self.render_dest_usable();
        }

        let outputs = self.outputs();
        let Some(conn) = connections.get_source_or_dest(outputs.first(), false) else {
            return false;
        };
        match conn.dest().owner().plugin() {
            Some(plugin) => match registry.plugin(plugin) {
                Ok(info) => !info.instantiation_failed(),
                Err(err) => {
                    tracing::error!("{err}");
                    false
                }
            },
            None => true,
        }
    }

    #[inline]
    fn render_dest_usable(&self) -> bool {
        self.primary_out_routes()
            .load()
            .sole_dest()
            .is_some_and(RouteEntry::peer_usable)
    }

    /// Clears the buffers of the send's ports ahead of a cycle.
    pub fn prepare_process(&mut self) {
        match &mut self.io {
            SendIo::Audio {
                stereo_in,
                stereo_out,
            } => {
                stereo_in.clear_buffers();
                stereo_out.clear_buffers();
            }
            SendIo::Midi { midi_in, midi_out } => {
                midi_in.clear_buffer();
                midi_out.clear_buffer();
            }
        }
    }

    /// Pulls the tapped channel signal into the send's inputs over the
    /// window. A tap of the other signal kind is ignored.
    pub fn receive_tap(&mut self, tap: &SignalIo, time: &ProcessTimeInfo) {
        let (offset, nframes) = (time.local_offset, time.nframes);
        match (&mut self.io, tap) {
            (SendIo::Audio { stereo_in, .. }, SignalIo::Stereo(src)) => {
                copy_window(stereo_in.l.buf_mut(), src.l.buf(), offset, nframes);
                copy_window(stereo_in.r.buf_mut(), src.r.buf(), offset, nframes);
            }
            (SendIo::Midi { midi_in, .. }, SignalIo::Midi(src)) => {
                midi_in
                    .events_mut()
                    .append_window(src.events(), offset, nframes);
            }
            _ => {}
        }
    }

    /// Renders one block. Does nothing when the send is empty or its
    /// published routing is not a single usable destination.
    ///
    /// Audio is copied when the amount is within the unity tolerance of 1.0,
    /// otherwise scaled by the amount and mixed into the (cleared) output.
    /// MIDI events inside the window are appended to the output queue. Only
    /// `[local_offset, local_offset + nframes)` is touched.
    pub fn process_block(&mut self, time: &ProcessTimeInfo) {
        if self.is_empty() || !self.render_dest_usable() {
            return;
        }
        let amount = self.amount.get();
        let (offset, nframes) = (time.local_offset, time.nframes);

        match &mut self.io {
            SendIo::Audio {
                stereo_in,
                stereo_out,
            } => {
                if floats_equal_epsilon(amount, 1.0, self.unity_epsilon) {
                    copy_window(stereo_out.l.buf_mut(), stereo_in.l.buf(), offset, nframes);
                    copy_window(stereo_out.r.buf_mut(), stereo_in.r.buf(), offset, nframes);
                } else {
                    mix_scaled_window(stereo_out.l.buf_mut(), stereo_in.l.buf(), amount, offset, nframes);
                    mix_scaled_window(stereo_out.r.buf_mut(), stereo_in.r.buf(), amount, offset, nframes);
                }
            }
            SendIo::Midi { midi_in, midi_out } => {
                midi_out
                    .events_mut()
                    .append_window(midi_in.events(), offset, nframes);
            }
        }
    }

    /// Connects the send to a stereo pair (a track input, or a plugin
    /// sidechain group when `sidechain` is set).
    ///
    /// With `validate`, each pair is checked first. Every endpoint must then
    /// resolve in the registry. Either failure leaves the send untouched.
    /// Any previous destination is then removed, one locked unity edge is
    /// made per channel, and the send is switched on.
    ///
    /// # Errors
    ///
    /// - [`SendError::SignalMismatch`] on a MIDI send
    /// - [`SendError::ConnectionRejected`] if validation fails
    /// - [`SendError::Routing`] if an endpoint (or its plugin) is not
    ///   registered, or if the requested recalculation fails
    pub fn connect_stereo(
        &mut self,
        ctx: &mut RoutingContext<'_>,
        l: &PortIdentity,
        r: &PortIdentity,
        sidechain: bool,
        recalc_graph: bool,
        validate: bool,
    ) -> Result<(), SendError> {
        let SignalPorts::Stereo { l: out_l, r: out_r } = self.outputs() else {
            return Err(SendError::SignalMismatch {
                expected: self.signal_type(),
                found: SignalType::Audio,
            });
        };
        if validate {
            for (src, dest) in [(&out_l, l), (&out_r, r)] {
                if !ctx.validator.can_connect(src, dest) {
                    tracing::warn!("send_connect: rejected {src} -> {dest}");
                    return Err(SendError::rejected(src, dest));
                }
            }
        }
        resolve_endpoints(ctx, &[(&out_l, l), (&out_r, r)])?;

        self.disconnect(ctx, false)?;
        ctx.connections.ensure_connect(&out_l, l, 1.0, true, true);
        ctx.connections.ensure_connect(&out_r, r, 1.0, true, true);
        self.enabled.set_toggled(true);
        self.is_sidechain = sidechain;
        tracing::debug!(
            "send_connect: {} -> {l}, {r} (sidechain: {sidechain})",
            self.owner()
        );

        if recalc_graph {
            ctx.recalc(false)?;
        }
        Ok(())
    }

    /// Connects the send to an event input. See
    /// [`connect_stereo`](Self::connect_stereo).
    ///
    /// # Errors
    ///
    /// - [`SendError::SignalMismatch`] on an audio send
    /// - [`SendError::ConnectionRejected`] if validation fails
    /// - [`SendError::Routing`] if an endpoint (or its plugin) is not
    ///   registered, or if the requested recalculation fails
    pub fn connect_midi(
        &mut self,
        ctx: &mut RoutingContext<'_>,
        port: &PortIdentity,
        recalc_graph: bool,
        validate: bool,
    ) -> Result<(), SendError> {
        let SignalPorts::Midi(out) = self.outputs() else {
            return Err(SendError::SignalMismatch {
                expected: self.signal_type(),
                found: SignalType::Event,
            });
        };
        if validate && !ctx.validator.can_connect(&out, port) {
            tracing::warn!("send_connect: rejected {out} -> {port}");
            return Err(SendError::rejected(&out, port));
        }
        resolve_endpoints(ctx, &[(&out, port)])?;

        self.disconnect(ctx, false)?;
        ctx.connections.ensure_connect(&out, port, 1.0, true, true);
        self.enabled.set_toggled(true);
        self.is_sidechain = false;
        tracing::debug!("send_connect: {} -> {port}", self.owner());

        if recalc_graph {
            ctx.recalc(false)?;
        }
        Ok(())
    }

    /// Removes every outgoing edge of the send and switches it off.
    ///
    /// A no-op when the toggle is already off and nothing is connected.
    ///
    /// # Errors
    ///
    /// [`SendError::Routing`] if the requested recalculation fails.
    pub fn disconnect(
        &mut self,
        ctx: &mut RoutingContext<'_>,
        recalc_graph: bool,
    ) -> Result<(), SendError> {
        let edges = self.outgoing_edges(&*ctx.connections);
        if self.is_empty() && edges.is_empty() {
            return Ok(());
        }

        for (src, dest) in &edges {
            ctx.connections.ensure_disconnect(src, dest);
        }
        self.enabled.set_toggled(false);
        self.is_sidechain = false;
        tracing::debug!(
            "send_disconnect: {}; removed {} edges",
            self.owner(),
            edges.len()
        );

        if recalc_graph {
            ctx.recalc(false)?;
        }
        Ok(())
    }

    fn outgoing_edges(&self, connections: &PortConnectionsManager) -> Vec<(PortIdentity, PortIdentity)> {
        let mut found = Vec::new();
        for out in self.outputs().iter() {
            connections.get_sources_or_dests(Some(&mut found), out, false);
        }
        found
            .iter()
            .map(|c| (c.src().clone(), c.dest().clone()))
            .collect()
    }

    /// Makes the locked unity edges from the channel's tap into the send's
    /// inputs: the pre-fader outputs for pre-fader slots, the fader outputs
    /// otherwise.
    ///
    /// # Errors
    ///
    /// [`SendError::SignalMismatch`] if the tap carries the other signal.
    pub fn connect_to_owner(
        &self,
        connections: &mut PortConnectionsManager,
        prefader_out: &SignalPorts,
        fader_out: &SignalPorts,
    ) -> Result<(), SendError> {
        let tap = if self.is_prefader() { prefader_out } else { fader_out };
        if tap.signal_type() != self.signal_type() {
            return Err(SendError::SignalMismatch {
                expected: self.signal_type(),
                found: tap.signal_type(),
            });
        }
        for (src, dest) in tap.iter().zip(self.inputs().iter()) {
            connections.ensure_connect(src, dest, 1.0, true, true);
        }
        Ok(())
    }

    /// Human-readable destination.
    ///
    /// `"Pre-fader send"` / `"Post-fader send"` when empty, the plugin
    /// port-group designation for sidechains, `"<track> input"` for track
    /// inputs, or the destination port's label.
    ///
    /// # Errors
    ///
    /// [`SendError::Routing`] when the send does not have exactly one
    /// destination or the destination no longer resolves.
    pub fn dest_name(
        &self,
        connections: &PortConnectionsManager,
        registry: &PortRegistry,
    ) -> Result<String, SendError> {
        if self.is_empty() {
            let name = if self.is_prefader() {
                "Pre-fader send"
            } else {
                "Post-fader send"
            };
            return Ok(name.to_string());
        }

        let outputs = self.outputs();
        let dest = connections.try_source_or_dest(outputs.first(), false)?.dest();
        match dest.owner() {
            PortOwner::Plugin(plugin) if self.is_sidechain => {
                let group = match dest.port_group() {
                    Some(group) => group.to_string(),
                    None => registry.port(dest)?.label().to_string(),
                };
                Ok(registry.port_group_designation(plugin, &group)?)
            }
            PortOwner::TrackProcessor(track) => {
                Ok(format!("{} input", registry.track(track)?.name()))
            }
            _ => Ok(registry.port(dest)?.label().to_string()),
        }
    }

    /// Track the send feeds (for sidechains, the track hosting the plugin).
    /// `None` when the send is empty.
    ///
    /// # Errors
    ///
    /// [`SendError::Routing`] when the send does not have exactly one
    /// destination.
    pub fn target_track(
        &self,
        connections: &PortConnectionsManager,
        registry: &PortRegistry,
    ) -> Result<Option<OwnerId>, SendError> {
        if self.is_empty() {
            return Ok(None);
        }
        let outputs = self.outputs();
        let conn = connections.try_source_or_dest(outputs.first(), false)?;
        Ok(registry.track_of(conn.dest()))
    }

    /// The sidechain pair the send feeds, if it is a connected audio
    /// sidechain send.
    pub fn target_sidechain(&self, connections: &PortConnectionsManager) -> Option<SignalPorts> {
        if !self.is_target_sidechain() {
            return None;
        }
        let SignalPorts::Stereo { l, r } = self.outputs() else {
            return None;
        };
        let l = connections.get_source_or_dest(&l, false)?.dest().clone();
        let r = connections.get_source_or_dest(&r, false)?.dest().clone();
        Some(SignalPorts::Stereo { l, r })
    }

    /// Appends the send's outgoing edges to `out`. Returns how many were
    /// appended; none when the send is empty.
    pub fn append_connections<'a>(
        &self,
        connections: &'a PortConnectionsManager,
        out: &mut Vec<&'a PortConnection>,
    ) -> usize {
        if self.is_empty() {
            return 0;
        }
        let mut count = 0;
        for port in self.outputs().iter() {
            count += connections.get_sources_or_dests(Some(&mut *out), port, false);
        }
        count
    }

    /// Returns `true` if the send is on and connected to every port of
    /// `target`.
    pub fn is_connected_to(&self, connections: &PortConnectionsManager, target: &SignalPorts) -> bool {
        if self.is_empty() {
            return false;
        }
        let outputs = self.outputs();
        outputs.signal_type() == target.signal_type()
            && outputs
                .iter()
                .zip(target.iter())
                .all(|(src, dest)| connections.find_connection(src, dest).is_some())
    }

    /// Checks that an enabled send has exactly one destination per output
    /// port. Logs and returns `false` otherwise.
    pub fn validate(&self, connections: &PortConnectionsManager) -> bool {
        if self.is_empty() {
            return true;
        }
        for port in self.outputs().iter() {
            let n = connections.get_sources_or_dests(None, port, false);
            if n != 1 {
                tracing::error!("send_validate: {port} has {n} destinations, expected 1");
                return false;
            }
        }
        true
    }

    /// Copies amount, toggle and sidechain flag from `other`.
    pub fn copy_values_from(&mut self, other: &ChannelSend) {
        self.amount.set(other.amount());
        self.enabled.set(other.enabled_value());
        self.is_sidechain = other.is_sidechain;
    }

    /// Snapshot for persistence.
    pub fn record(&self) -> ChannelSendRecord {
        ChannelSendRecord {
            slot: self.slot,
            amount: self.amount(),
            enabled: !self.is_empty(),
            is_sidechain: self.is_sidechain,
            amount_port: self.amount.identity().clone(),
            enabled_port: self.enabled.identity().clone(),
            inputs: self.inputs(),
            outputs: self.outputs(),
        }
    }

    /// Restores amount, toggle and sidechain flag from a record.
    ///
    /// # Errors
    ///
    /// [`SendError::SignalMismatch`] if the record is for the other signal
    /// kind; nothing is applied.
    pub fn apply_record(&mut self, record: &ChannelSendRecord) -> Result<(), SendError> {
        let found = record.outputs.signal_type();
        if found != self.signal_type() {
            return Err(SendError::SignalMismatch {
                expected: self.signal_type(),
                found,
            });
        }
        if record.slot != self.slot {
            tracing::warn!(
                "send_record: slot {} applied to slot {}",
                record.slot,
                self.slot
            );
        }
        self.amount.set(record.amount);
        self.enabled.set_toggled(record.enabled);
        self.is_sidechain = record.is_sidechain;
        Ok(())
    }
}

fn resolve_endpoints(
    ctx: &RoutingContext<'_>,
    pairs: &[(&PortIdentity, &PortIdentity)],
) -> Result<(), SendError> {
    for (src, dest) in pairs {
        for id in [*src, *dest] {
            if let Err(err) = ctx.registry.resolve_endpoint(id) {
                tracing::error!("send_connect: {err}");
                return Err(err.into());
            }
        }
    }
    Ok(())
}
