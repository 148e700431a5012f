//! Container measurement and debounced window-resize notification.
//!
//! The grid does not own an event loop. The host forwards window resize
//! events to a `ResizeBus` and polls the grid's subscription from its
//! frame tick; a subscription fires once the events have been quiet for
//! the debounce interval (trailing edge).

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Measures the grid's container in layout pixels
pub trait ContainerMeasure: Send + Sync {
    /// `(width, height)`, or `None` while the container is detached
    fn measure(&self) -> Option<(f32, f32)>;
}

/// Measured container size, each dimension clamped to a floor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Viewport before the first measurement
    pub fn initial(floor: f32) -> Self {
        Self {
            width: floor,
            height: floor,
        }
    }

    pub fn from_measured(width: f32, height: f32, floor: f32) -> Self {
        Self {
            width: width.max(floor),
            height: height.max(floor),
        }
    }

    /// Minimum `(width, height)` for the rendering primitive: the stored
    /// size minus the grid border
    pub fn min_size(&self, border: f32) -> (f32, f32) {
        (self.width - border, self.height - border)
    }
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    /// Subscriber id -> time of the latest unconsumed resize
    subscribers: HashMap<u64, Option<Instant>>,
}

/// Fan-out point for window resize events
#[derive(Clone, Default)]
pub struct ResizeBus {
    inner: Arc<Mutex<BusInner>>,
}

impl ResizeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a window resize at `now`
    pub fn notify_resize(&self, now: Instant) {
        let mut inner = self.inner.lock();
        for pending in inner.subscribers.values_mut() {
            *pending = Some(now);
        }
    }

    pub fn subscribe(&self, debounce: Duration) -> ResizeSubscription {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, None);
        ResizeSubscription {
            id,
            debounce,
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}

/// A live subscription. Dropping it unsubscribes.
pub struct ResizeSubscription {
    id: u64,
    debounce: Duration,
    inner: Arc<Mutex<BusInner>>,
}

impl ResizeSubscription {
    /// Returns true once per burst of resizes, after `debounce` of quiet
    pub fn poll(&self, now: Instant) -> bool {
        let mut inner = self.inner.lock();
        let Some(pending) = inner.subscribers.get_mut(&self.id) else {
            return false;
        };
        match *pending {
            Some(last) if now.saturating_duration_since(last) >= self.debounce => {
                *pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.inner.lock().subscribers.remove(&self.id);
    }
}
