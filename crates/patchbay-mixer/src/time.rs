//! Block timing handed to processing nodes.

/// The window of the current cycle a node must process.
///
/// `local_offset + nframes` never exceeds the configured block length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessTimeInfo {
    /// Timeline position of the start of the cycle, in frames.
    pub global_start_frame: u64,
    /// Offset of the window within the cycle's buffers.
    pub local_offset: usize,
    /// Frames in the window.
    pub nframes: usize,
}

impl ProcessTimeInfo {
    /// A window covering `nframes` from the start of the buffers.
    pub fn block(global_start_frame: u64, nframes: usize) -> Self {
        Self {
            global_start_frame,
            local_offset: 0,
            nframes,
        }
    }

    /// One past the last frame of the window.
    #[inline]
    pub fn end(&self) -> usize {
        self.local_offset + self.nframes
    }
}
