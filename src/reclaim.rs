//! Periodic memory reclamation.
//!
//! A single detached background thread invokes a hook on a fixed interval for
//! the rest of the process lifetime. It shares nothing with the resolver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// Interval used when the caller does not pick one.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

static STARTED: AtomicBool = AtomicBool::new(false);

/// Starts the reclamation timer. Only the first call in a process starts a
/// thread; later calls return `false` and drop their hook.
pub fn start<H>(interval: Duration, hook: H) -> bool
where
    H: Fn() + Send + 'static,
{
    if STARTED.swap(true, Ordering::SeqCst) {
        debug!("Reclamation timer already running");
        return false;
    }

    let spawned = thread::Builder::new()
        .name("procfind-reclaim".into())
        .spawn(move || loop {
            thread::sleep(interval);
            hook();
        });

    match spawned {
        Ok(_) => {
            debug!("Reclamation timer started, interval {:?}", interval);
            true
        }
        Err(e) => {
            warn!("Failed to start reclamation timer: {}", e);
            STARTED.store(false, Ordering::SeqCst);
            false
        }
    }
}

/// Whether a timer has been started in this process.
pub fn is_running() -> bool {
    STARTED.load(Ordering::SeqCst)
}

/// Returns freed heap memory to the OS where the allocator supports it.
pub fn trim_heap() {
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    {
        // SAFETY: malloc_trim only walks allocator-internal state.
        unsafe {
            libc::malloc_trim(0);
        }
    }
}
