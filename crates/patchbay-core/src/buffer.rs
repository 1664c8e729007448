//! Sample and event buffers carried by ports, and the windowed block
//! operations the render thread runs on them.
//!
//! Every operation takes an engine-provided window `[local_offset,
//! local_offset + nframes)` and touches nothing outside it. Windows that run
//! past the end of a buffer are clipped to the buffer rather than panicking.
//! Nothing here allocates once the buffers are constructed.

/// Clips a window to a buffer of length `len`.
#[inline]
fn clip(len: usize, local_offset: usize, nframes: usize) -> core::ops::Range<usize> {
    let start = local_offset.min(len);
    let end = local_offset.saturating_add(nframes).min(len);
    start..end
}

/// Copies `src` into `dst` over the window.
#[inline]
pub fn copy_window(dst: &mut [f32], src: &[f32], local_offset: usize, nframes: usize) {
    let range = clip(dst.len().min(src.len()), local_offset, nframes);
    dst[range.clone()].copy_from_slice(&src[range]);
}

/// Adds `src * gain` into `dst` over the window.
///
/// On a cleared destination this is a plain linear gain stage.
#[inline]
pub fn mix_scaled_window(
    dst: &mut [f32],
    src: &[f32],
    gain: f32,
    local_offset: usize,
    nframes: usize,
) {
    let range = clip(dst.len().min(src.len()), local_offset, nframes);
    for (d, s) in dst[range.clone()].iter_mut().zip(&src[range]) {
        *d += *s * gain;
    }
}

/// A short MIDI message stamped with its frame offset in the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiEvent {
    /// Frame offset within the current cycle.
    pub time: u32,
    /// Raw status and data bytes.
    pub data: [u8; 3],
}

impl MidiEvent {
    /// Creates an event.
    pub const fn new(time: u32, data: [u8; 3]) -> Self {
        Self { time, data }
    }
}

/// Bounded MIDI event queue.
///
/// Capacity is fixed at construction; pushes past it are dropped and
/// counted instead of reallocating on the render thread.
#[derive(Clone, Debug)]
pub struct MidiEvents {
    events: Vec<MidiEvent>,
    capacity: usize,
    dropped: usize,
}

impl MidiEvents {
    /// Creates an empty queue holding at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Appends an event; returns `false` and counts a drop when full.
    #[inline]
    pub fn push(&mut self, event: MidiEvent) -> bool {
        if self.events.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.events.push(event);
        true
    }

    /// Appends the events of `src` whose time lies in the window, keeping
    /// their timestamps. Returns how many were appended.
    pub fn append_window(&mut self, src: &MidiEvents, local_offset: usize, nframes: usize) -> usize {
        let end = local_offset.saturating_add(nframes);
        let mut appended = 0;
        for ev in &src.events {
            let t = ev.time as usize;
            if t >= local_offset && t < end && self.push(*ev) {
                appended += 1;
            }
        }
        appended
    }

    /// Removes all events. The drop counter is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Queued events in arrival order.
    pub fn events(&self) -> &[MidiEvent] {
        &self.events
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are queued.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Maximum number of queued events.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events dropped since the last [`take_dropped`](Self::take_dropped).
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Returns and resets the drop counter.
    pub fn take_dropped(&mut self) -> usize {
        core::mem::take(&mut self.dropped)
    }
}
