//! Runtime statistics sampled by the agent.
//!
//! Allocation figures come from `CountingAlloc`, which the agent binary
//! installs as its global allocator. Without it those gauges stay at zero.
//! Memory and CPU figures come from `sysinfo`.

use std::alloc::{GlobalAlloc, Layout, System as SystemAlloc};
use std::sync::atomic::{AtomicU64, Ordering};

use sysinfo::{Pid, System};

/// Every gauge a sample carries, always in this order.
pub const RUNTIME_GAUGES: [&str; 11] = [
    "Alloc",
    "TotalAlloc",
    "Mallocs",
    "Frees",
    "HeapObjects",
    "HeapSys",
    "Sys",
    "TotalMemory",
    "FreeMemory",
    "UsedMemory",
    "CPUutilization1",
];

static LIVE_BYTES: AtomicU64 = AtomicU64::new(0);
static TOTAL_BYTES: AtomicU64 = AtomicU64::new(0);
static MALLOCS: AtomicU64 = AtomicU64::new(0);
static FREES: AtomicU64 = AtomicU64::new(0);

/// System allocator wrapper that counts allocations.
pub struct CountingAlloc;

impl CountingAlloc {
    pub const fn new() -> Self {
        CountingAlloc
    }
}

impl Default for CountingAlloc {
    fn default() -> Self {
        Self::new()
    }
}

fn on_alloc(size: usize) {
    LIVE_BYTES.fetch_add(size as u64, Ordering::Relaxed);
    TOTAL_BYTES.fetch_add(size as u64, Ordering::Relaxed);
    MALLOCS.fetch_add(1, Ordering::Relaxed);
}

fn on_free(size: usize) {
    LIVE_BYTES.fetch_sub(size as u64, Ordering::Relaxed);
    FREES.fetch_add(1, Ordering::Relaxed);
}

// SAFETY: every call is forwarded unchanged to the system allocator; the
// wrapper only updates counters.
unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = SystemAlloc.alloc(layout);
        if !ptr.is_null() {
            on_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = SystemAlloc.alloc_zeroed(layout);
        if !ptr.is_null() {
            on_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        SystemAlloc.dealloc(ptr, layout);
        on_free(layout.size());
    }

    // A successful realloc counts as one free plus one allocation.
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = SystemAlloc.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            on_free(layout.size());
            on_alloc(new_size);
        }
        new_ptr
    }
}

/// Reads the fixed gauge set. Owned by the poll loop.
pub struct RuntimeSampler {
    sys: System,
    pid: Option<Pid>,
}

impl RuntimeSampler {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = e, "current pid unavailable, process gauges will read 0");
                None
            }
        };
        Self {
            sys: System::new(),
            pid,
        }
    }

    /// One value per entry of `RUNTIME_GAUGES`, in order.
    pub fn sample(&mut self) -> Vec<(&'static str, f64)> {
        self.sys.refresh_memory();
        self.sys.refresh_cpu();

        let (rss, virt) = match self.pid {
            Some(pid) if self.sys.refresh_process(pid) => self
                .sys
                .process(pid)
                .map(|p| (p.memory(), p.virtual_memory()))
                .unwrap_or((0, 0)),
            _ => (0, 0),
        };

        let mallocs = MALLOCS.load(Ordering::Relaxed);
        let frees = FREES.load(Ordering::Relaxed);

        let values = [
            LIVE_BYTES.load(Ordering::Relaxed) as f64,
            TOTAL_BYTES.load(Ordering::Relaxed) as f64,
            mallocs as f64,
            frees as f64,
            mallocs.saturating_sub(frees) as f64,
            rss as f64,
            virt as f64,
            self.sys.total_memory() as f64,
            self.sys.free_memory() as f64,
            self.sys.used_memory() as f64,
            self.sys.global_cpu_info().cpu_usage() as f64,
        ];

        RUNTIME_GAUGES.iter().copied().zip(values).collect()
    }
}

impl Default for RuntimeSampler {
    fn default() -> Self {
        Self::new()
    }
}
