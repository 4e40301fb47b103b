//! Progress reporting for long growth passes.
//!
//! A growth pass on a large cloud can absorb millions of tetrahedra. Callers
//! that want feedback pass a [`Progress`] to the `*_with_progress` entry
//! points and receive `(consumed, total, message)` updates.
//!
//! # Example
//!
//! ```
//! use hullgrow::algo::Progress;
//!
//! let progress = Progress::new(|current, total, message| {
//!     println!("[{}/{}] {}", current, total, message);
//! })
//! .with_interval(1000);
//! progress.report(0, 10, "Growing surface");
//! ```

/// A progress callback that receives updates during growth.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
    interval: usize,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
            interval: 1,
        }
    }

    /// Only forward every `interval`-th step from [`Progress::tick`].
    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Report progress unconditionally.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Report progress if `step` falls on the reporting interval.
    #[inline]
    pub fn tick(&self, step: usize, current: usize, total: usize, message: &str) {
        if step % self.interval == 0 {
            self.report(current, total, message);
        }
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
