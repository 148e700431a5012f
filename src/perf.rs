//! Render-path timing.
//!
//! Scoped timers for the grid's hot paths (column model rebuilds, row
//! lookups while scrolling). With the `profiling` feature enabled every
//! timed scope is traced with its nesting depth; without it only scopes
//! that blow their threshold are reported.
//!
//! ```ignore
//! fn build_columns(..) {
//!     profile_scope!("build_columns");
//!     // ...
//! }
//! ```

use std::time::Instant;
#[cfg(not(feature = "profiling"))]
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

/// Time a scope. Compiles to nothing without the `profiling` feature.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
}

/// Logs the duration of a scope on drop
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Timer for profiling builds (1ms threshold)
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));

            if elapsed_ms > self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        {
            if elapsed_ms > self.threshold_ms {
                warn!(
                    operation = self.name,
                    elapsed_ms = format!("{:.2}", elapsed_ms),
                    threshold_ms = format!("{:.2}", self.threshold_ms),
                    "Slow operation"
                );
            }
        }
    }
}
