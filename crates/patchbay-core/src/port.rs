//! Typed ports.
//!
//! A port couples a [`PortIdentity`] with the state the render thread works
//! on: a sample buffer, an event queue or an atomic control value. Each port
//! also carries a [`RouteCache`] that the manager publishes into once the
//! port is registered.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::buffer::MidiEvents;
use crate::identity::{PortFlags, PortFlow, PortIdentity, PortOwner, PortType};
use crate::registry::PortRegistry;
use crate::routes::RouteCache;

/// Threshold above which a toggle control reads as on.
pub const TOGGLE_THRESHOLD: f32 = 0.001;

/// Common surface of every port kind.
pub trait Port {
    /// The port's identity.
    fn identity(&self) -> &PortIdentity;

    /// Human-readable label (port symbol).
    fn label(&self) -> &str;

    /// The render-thread route cache.
    fn routes(&self) -> &RouteCache;

    /// Resets the port's per-block state.
    fn clear_buffer(&mut self);

    /// Registers the port so the manager can publish its routes.
    fn register(&self, registry: &mut PortRegistry) -> bool {
        registry.register_port(self.identity().clone(), self.label(), self.routes().clone())
    }

    /// Removes the port from the registry.
    fn unregister(&self, registry: &mut PortRegistry) {
        registry.unregister_port(self.identity());
    }
}

/// Mono audio port.
#[derive(Debug)]
pub struct AudioPort {
    id: PortIdentity,
    label: String,
    routes: RouteCache,
    buf: Vec<f32>,
}

impl AudioPort {
    /// Creates a port with a zeroed buffer of `block_length` samples.
    pub fn new(id: PortIdentity, label: impl Into<String>, block_length: usize) -> Self {
        Self {
            id,
            label: label.into(),
            routes: RouteCache::new(),
            buf: vec![0.0; block_length],
        }
    }

    /// Sample buffer.
    #[inline]
    pub fn buf(&self) -> &[f32] {
        &self.buf
    }

    /// Mutable sample buffer.
    #[inline]
    pub fn buf_mut(&mut self) -> &mut [f32] {
        &mut self.buf
    }
}

impl Port for AudioPort {
    fn identity(&self) -> &PortIdentity {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn routes(&self) -> &RouteCache {
        &self.routes
    }

    fn clear_buffer(&mut self) {
        self.buf.fill(0.0);
    }
}

/// Left/right pair of audio ports.
#[derive(Debug)]
pub struct StereoPorts {
    /// Left channel.
    pub l: AudioPort,
    /// Right channel.
    pub r: AudioPort,
}

impl StereoPorts {
    /// Creates a pair at indices `base_index` and `base_index + 1`, labelled
    /// `<prefix>_l` and `<prefix>_r`.
    pub fn new(
        owner: PortOwner,
        flow: PortFlow,
        base_index: u16,
        prefix: &str,
        block_length: usize,
    ) -> Self {
        let l = PortIdentity::new(owner, PortType::Audio, flow, base_index)
            .with_flags(PortFlags::STEREO_L);
        let r = PortIdentity::new(owner, PortType::Audio, flow, base_index + 1)
            .with_flags(PortFlags::STEREO_R);
        Self {
            l: AudioPort::new(l, format!("{prefix}_l"), block_length),
            r: AudioPort::new(r, format!("{prefix}_r"), block_length),
        }
    }

    /// Identities of both channels.
    pub fn identities(&self) -> (&PortIdentity, &PortIdentity) {
        (self.l.identity(), self.r.identity())
    }

    /// Zeroes both buffers.
    pub fn clear_buffers(&mut self) {
        self.l.clear_buffer();
        self.r.clear_buffer();
    }

    /// Registers both channels.
    pub fn register(&self, registry: &mut PortRegistry) {
        self.l.register(registry);
        self.r.register(registry);
    }

    /// Unregisters both channels.
    pub fn unregister(&self, registry: &mut PortRegistry) {
        self.l.unregister(registry);
        self.r.unregister(registry);
    }
}

/// MIDI / event port.
#[derive(Debug)]
pub struct MidiPort {
    id: PortIdentity,
    label: String,
    routes: RouteCache,
    events: MidiEvents,
}

impl MidiPort {
    /// Creates a port whose queue holds at most `capacity` events.
    pub fn new(id: PortIdentity, label: impl Into<String>, capacity: usize) -> Self {
        Self {
            id,
            label: label.into(),
            routes: RouteCache::new(),
            events: MidiEvents::new(capacity),
        }
    }

    /// Event queue.
    #[inline]
    pub fn events(&self) -> &MidiEvents {
        &self.events
    }

    /// Mutable event queue.
    #[inline]
    pub fn events_mut(&mut self) -> &mut MidiEvents {
        &mut self.events
    }
}

impl Port for MidiPort {
    fn identity(&self) -> &PortIdentity {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn routes(&self) -> &RouteCache {
        &self.routes
    }

    fn clear_buffer(&mut self) {
        self.events.clear();
    }
}

/// Control port holding one `f32` as atomic bits.
///
/// Any thread may write; the render thread reads without locking.
#[derive(Debug)]
pub struct ControlPort {
    id: PortIdentity,
    label: String,
    routes: RouteCache,
    value: Arc<AtomicU32>,
    default: f32,
}

impl ControlPort {
    /// Creates a control initialised to `default`.
    pub fn new(id: PortIdentity, label: impl Into<String>, default: f32) -> Self {
        Self {
            id,
            label: label.into(),
            routes: RouteCache::new(),
            value: Arc::new(AtomicU32::new(default.to_bits())),
            default,
        }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Acquire))
    }

    /// Sets the value.
    #[inline]
    pub fn set(&self, value: f32) {
        self.value.store(value.to_bits(), Ordering::Release);
    }

    /// Restores the construction-time default.
    pub fn reset(&self) {
        self.set(self.default);
    }

    /// Construction-time default.
    pub fn default_value(&self) -> f32 {
        self.default
    }

    /// Returns `true` if the value reads as a toggle that is on.
    #[inline]
    pub fn is_toggled(&self) -> bool {
        self.get() > TOGGLE_THRESHOLD
    }

    /// Sets a toggle value to 1 or 0.
    #[inline]
    pub fn set_toggled(&self, on: bool) {
        self.set(if on { 1.0 } else { 0.0 });
    }

    /// Shared handle to the value, for automation and UI writers.
    pub fn value_handle(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.value)
    }
}

impl Port for ControlPort {
    fn identity(&self) -> &PortIdentity {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn routes(&self) -> &RouteCache {
        &self.routes
    }

    // A control value persists across blocks.
    fn clear_buffer(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::OwnerId;

    #[test]
    fn test_stereo_pair_layout() {
        let pair = StereoPorts::new(
            PortOwner::Fader(OwnerId(1)),
            PortFlow::Output,
            0,
            "stereo_out",
            16,
        );
        let (l, r) = pair.identities();
        assert_eq!(l.index(), 0);
        assert_eq!(r.index(), 1);
        assert!(l.flags().contains(PortFlags::STEREO_L));
        assert!(r.flags().contains(PortFlags::STEREO_R));
        assert_eq!(pair.l.label(), "stereo_out_l");
        assert_eq!(pair.r.buf().len(), 16);
    }

    #[test]
    fn test_clear_buffer_zeroes_samples() {
        let id = PortIdentity::new(
            PortOwner::Engine,
            PortType::Audio,
            PortFlow::Output,
            0,
        );
        let mut port = AudioPort::new(id, "out", 4);
        port.buf_mut().fill(0.7);
        port.clear_buffer();
        assert!(port.buf().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_control_toggle_threshold() {
        let id = PortIdentity::new(
            PortOwner::Engine,
            PortType::Control,
            PortFlow::Input,
            0,
        )
        .with_flags(PortFlags::TOGGLE);
        let port = ControlPort::new(id, "enabled", 0.0);
        assert!(!port.is_toggled());
        port.set(0.0005);
        assert!(!port.is_toggled());
        port.set_toggled(true);
        assert!(port.is_toggled());
        port.reset();
        assert_eq!(port.get(), 0.0);
    }

    #[test]
    fn test_control_value_shared_across_threads() {
        let id = PortIdentity::new(
            PortOwner::Engine,
            PortType::Control,
            PortFlow::Input,
            1,
        );
        let port = ControlPort::new(id, "amount", 1.0);
        let handle = port.value_handle();
        std::thread::spawn(move || handle.store(0.25f32.to_bits(), Ordering::Release))
            .join()
            .unwrap();
        assert_eq!(port.get(), 0.25);
    }

    #[test]
    fn test_register_publishes_cache_handle() {
        let mut reg = PortRegistry::new();
        let id = PortIdentity::new(
            PortOwner::Engine,
            PortType::Event,
            PortFlow::Input,
            0,
        );
        let port = MidiPort::new(id.clone(), "midi_in", 8);
        assert!(port.register(&mut reg));
        assert!(reg.port(&id).unwrap().routes().ptr_eq(port.routes()));
        port.unregister(&mut reg);
        assert!(!reg.contains_port(&id));
    }
}
