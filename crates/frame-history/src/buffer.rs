//! Overwrite-oldest ring buffer for frame snapshots

use crate::FrameSnapshot;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default history depth (10 frames = ~2 s at 5 Hz sampling)
pub const DEFAULT_CAPACITY: usize = 10;

/// Single-writer ring buffer of recent frame snapshots.
///
/// The owning session is the only writer; reads may come from another thread
/// (e.g. a telemetry task inspecting a live session), so head/tail are
/// atomics and the buffer never reallocates after construction.
pub struct FrameHistory {
    /// Pre-allocated storage
    storage: Box<[FrameSnapshot]>,
    /// Capacity of the buffer
    capacity: usize,
    /// Head position (write pointer)
    head: AtomicUsize,
    /// Tail position (read pointer)
    tail: AtomicUsize,
    /// Total snapshots written across the session
    total_written: AtomicUsize,
}

impl FrameHistory {
    /// Create a history buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let storage: Vec<FrameSnapshot> = (0..capacity).map(|_| FrameSnapshot::default()).collect();
        Self {
            storage: storage.into_boxed_slice(),
            capacity,
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            total_written: AtomicUsize::new(0),
        }
    }

    /// Create a buffer with the default depth (10 frames).
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Push a snapshot, overwriting the oldest entry when full.
    pub fn push(&self, snapshot: FrameSnapshot) {
        let head = self.head.load(Ordering::Relaxed);
        let next_head = (head + 1) % self.capacity;

        // SAFETY: single writer, storage is pre-allocated
        unsafe {
            let ptr = self.storage.as_ptr() as *mut FrameSnapshot;
            std::ptr::write(ptr.add(head), snapshot);
        }

        self.head.store(next_head, Ordering::Release);
        self.total_written.fetch_add(1, Ordering::Relaxed);

        // If buffer is full, advance tail
        let tail = self.tail.load(Ordering::Relaxed);
        if next_head == tail {
            self.tail.store((tail + 1) % self.capacity, Ordering::Release);
        }
    }

    /// Number of snapshots currently held.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        if head >= tail {
            head - tail
        } else {
            self.capacity - tail + head
        }
    }

    /// Check if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read the last N snapshots (most recent first).
    pub fn read_last(&self, count: usize) -> Vec<FrameSnapshot> {
        let len = self.len();
        let count = count.min(len);
        let head = self.head.load(Ordering::Acquire);

        let mut snapshots = Vec::with_capacity(count);
        for i in 0..count {
            let idx = if head >= i + 1 {
                head - i - 1
            } else {
                self.capacity - (i + 1 - head)
            };
            snapshots.push(self.storage[idx].clone());
        }
        snapshots
    }

    /// Total snapshots written since construction (survives overwrites).
    pub fn total_written(&self) -> usize {
        self.total_written.load(Ordering::Relaxed)
    }

    /// Drop all held snapshots.
    pub fn clear(&self) {
        self.tail.store(self.head.load(Ordering::Relaxed), Ordering::Release);
    }
}

// SAFETY: single-writer use is the contract; marked Send+Sync so a session
// handle can be shared with a telemetry reader.
unsafe impl Send for FrameHistory {}
unsafe impl Sync for FrameHistory {}
