//! Render pass timing and opt-in profiling of input and drawing hot paths.
//!
//! [`PerfMonitor`] lives on the view and samples every render pass.
//! [`profile_scope!`] wraps a block in a [`ScopedTimer`] when the crate is
//! built with the `profiling` feature and compiles to nothing otherwise:
//!
//! ```ignore
//! pub fn mouse_press(&mut self, arena: &mut NodeArena, event: &PointerEvent) {
//!     profile_scope!("mouse_press");
//!     // ...
//! }
//! ```

use std::collections::VecDeque;
use std::time::Instant;
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

/// Frame budget at 60 Hz
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Render passes kept for the rolling statistics
const WINDOW: usize = 60;

/// A pass slower than this many budgets is reported
const SLOW_FACTOR: f64 = 2.0;

/// Time a scope under the `profiling` feature; a no-op without it.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

/// One finished render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub elapsed_ms: f64,
    /// Visible nodes drawn in the pass
    pub nodes: usize,
}

/// Rolling statistics over the most recent render passes.
#[derive(Debug)]
pub struct PerfMonitor {
    samples: VecDeque<FrameSample>,
    started: Option<Instant>,
    budget_ms: f64,
    slow: u64,
    total: u64,
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfMonitor {
    pub fn new() -> Self {
        Self::with_budget(TARGET_FRAME_MS)
    }

    /// Monitor that reports passes slower than twice `budget_ms`.
    pub fn with_budget(budget_ms: f64) -> Self {
        Self {
            samples: VecDeque::with_capacity(WINDOW),
            started: None,
            budget_ms,
            slow: 0,
            total: 0,
        }
    }

    pub fn begin_frame(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Close the pass opened by [`Self::begin_frame`].
    ///
    /// `None` if no pass was open.
    pub fn end_frame(&mut self, nodes: usize) -> Option<FrameSample> {
        let started = self.started.take()?;
        let sample = FrameSample {
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
            nodes,
        };

        if self.samples.len() == WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.total += 1;

        if sample.elapsed_ms > self.budget_ms * SLOW_FACTOR {
            self.slow += 1;
            warn!(
                frame_ms = format!("{:.2}", sample.elapsed_ms),
                budget_ms = format!("{:.2}", self.budget_ms),
                nodes,
                "Slow render pass"
            );
        }
        Some(sample)
    }

    pub fn last_frame(&self) -> Option<FrameSample> {
        self.samples.back().copied()
    }

    /// Mean pass duration over the window, 0 when empty.
    pub fn average_frame_time(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.elapsed_ms).sum::<f64>() / self.samples.len() as f64
    }

    pub fn max_frame_time(&self) -> f64 {
        self.samples.iter().map(|s| s.elapsed_ms).fold(0.0, f64::max)
    }

    pub fn estimated_fps(&self) -> f64 {
        match self.average_frame_time() {
            avg if avg > 0.0 => 1000.0 / avg,
            _ => 0.0,
        }
    }

    /// Passes recorded since creation or the last reset
    pub fn total_frames(&self) -> u64 {
        self.total
    }

    pub fn slow_frames(&self) -> u64 {
        self.slow
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.started = None;
        self.slow = 0;
        self.total = 0;
    }
}

/// Logs the time spent in a scope when it exceeds a threshold.
pub struct ScopedTimer {
    name: &'static str,
    started: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            started: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer used by [`profile_scope!`]: anything over 1ms is traced.
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.threshold_ms {
            return;
        }

        #[cfg(feature = "profiling")]
        trace!(scope = self.name, elapsed_ms = format!("{:.2}", elapsed_ms), "Profiled scope");

        #[cfg(not(feature = "profiling"))]
        warn!(
            scope = self.name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", self.threshold_ms),
            "Slow scope"
        );
    }
}

/// Run `f`, returning its result and the milliseconds it took.
#[inline]
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let started = Instant::now();
    let value = f();
    (value, started.elapsed().as_secs_f64() * 1000.0)
}
