//! Pointer sampling and throttled averaging.
//!
//! Raw pointer-move events arrive far faster than the sheet needs to move.
//! While a drag is active the [`PointerSampler`] buffers every sample; the
//! [`ThrottledAverager`] collapses the buffer into a single averaged
//! coordinate once per accumulation window, dropping the intermediates.

use std::time::{Duration, Instant};

use super::geometry::Coordinate;

/// Buffers pointer-move samples while a drag is active.  Samples pushed
/// while no drag is active are dropped.
#[derive(Debug, Default)]
pub struct PointerSampler {
    samples: Vec<Coordinate>,
    active: bool,
}

impl PointerSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag.  Any samples left over from a previous drag are stale
    /// and discarded.
    pub fn begin(&mut self) {
        self.active = true;
        self.samples.clear();
    }

    /// Stop accepting samples, keeping whatever is buffered so the final
    /// flush can still consume it.
    pub fn end(&mut self) {
        self.active = false;
    }

    /// Abort the drag and throw the buffer away (pointer cancel / focus loss).
    pub fn cancel(&mut self) {
        self.active = false;
        self.samples.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Buffer a sample.  Returns `true` if it was accepted.
    pub fn push(&mut self, sample: Coordinate) -> bool {
        if !self.active {
            return false;
        }
        self.samples.push(sample);
        true
    }

    /// Average the buffered samples into one coordinate and clear the
    /// buffer.  `None` when nothing is buffered.
    pub fn take_average(&mut self) -> Option<Coordinate> {
        if self.samples.is_empty() {
            return None;
        }
        let n = self.samples.len() as f64;
        let (sx, sy) = self
            .samples
            .iter()
            .fold((0.0, 0.0), |(sx, sy), c| (sx + c.x, sy + c.y));
        self.samples.clear();
        Some(Coordinate::new(sx / n, sy / n))
    }
}

/// Trailing-edge throttle over a [`PointerSampler`].
///
/// The first sample after an idle period arms a deadline one accumulation
/// window in the future; when the deadline passes, the buffer is averaged
/// and the throttle disarms until the next sample arms it again.
#[derive(Debug)]
pub struct ThrottledAverager {
    window: Duration,
    deadline: Option<Instant>,
}

impl ThrottledAverager {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arm the deadline if it is not already armed.
    pub fn arm(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.window);
        }
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// Flush the buffer if the armed deadline has passed.
    pub fn poll(&mut self, now: Instant, sampler: &mut PointerSampler) -> Option<Coordinate> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                sampler.take_average()
            }
            _ => None,
        }
    }

    /// Flush immediately, ignoring the deadline.  Used on pointer-up so the
    /// last samples of a drag are not lost to the window.
    pub fn flush_now(&mut self, sampler: &mut PointerSampler) -> Option<Coordinate> {
        self.deadline = None;
        sampler.take_average()
    }
}
