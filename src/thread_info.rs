use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::hex::bytes_to_hex;

/// Source of per-thread identifiers. Starts at 1, 0 is never handed out.
static NEXT_TID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    // no destructor, so it stays readable while other thread locals are torn down
    static TID: Cell<u64> = const { Cell::new(0) };
}

/// Identity of the calling thread as it appears in every log line.
///
/// Captured once per thread on first use and never updated afterwards.
/// `tid` is a process-local counter, so it stays stable for the life of the
/// thread and is never reused while the process runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadInfo {
    pub pid: u32,
    pub tid: u64,
    /// Pre-rendered `[pid:........][tid:................]` fragment.
    pub info: String,
}

impl ThreadInfo {
    /// Returns the identity of the calling thread.
    pub fn current() -> Self {
        let pid = std::process::id();
        let tid = Self::current_tid();
        Self {
            pid,
            tid,
            info: format!("[pid:{pid:08}][tid:{tid:016}]"),
        }
    }

    /// The calling thread's id, assigned on first use.
    ///
    /// Safe to call from thread-local destructors.
    pub fn current_tid() -> u64 {
        TID.with(|tid| {
            if tid.get() == 0 {
                tid.set(NEXT_TID.fetch_add(1, Ordering::Relaxed));
            }
            tid.get()
        })
    }

    /// Thread id as big-endian hex, handy for diagnostics.
    pub fn tid_hex(&self) -> String {
        bytes_to_hex(&self.tid.to_be_bytes())
    }
}
