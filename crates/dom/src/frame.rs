//! Display-refresh scheduling.
//!
//! Callbacks requested with [`FrameQueue::request`] run once, on the next
//! frame the host drives. A callback that wants to run again requests itself
//! from inside the frame; it then lands in the following frame, never the
//! current one.

/// Frame timestamp in milliseconds, as supplied by the host.
pub type FrameTime = f64;

pub type FrameCallback<C> = Box<dyn FnOnce(&mut C, FrameTime)>;

pub struct FrameQueue<C> {
    pending: Vec<FrameCallback<C>>,
    frame: u64,
}

impl<C> Default for FrameQueue<C> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            frame: 0,
        }
    }
}

impl<C> std::fmt::Debug for FrameQueue<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.pending.len())
            .field("frame", &self.frame)
            .finish()
    }
}

impl<C> FrameQueue<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, callback: impl FnOnce(&mut C, FrameTime) + 'static) {
        self.pending.push(Box::new(callback));
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of frames started so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Start a frame: hand out everything queued so far.
    pub fn begin_frame(&mut self) -> Vec<FrameCallback<C>> {
        self.frame += 1;
        std::mem::take(&mut self.pending)
    }
}
