//! Time source for entity timestamps
//!
//! Every `created_at` and `last_updated` written by the repositories is read
//! from the [`Clock`] owned by the [`Store`](crate::Store), in whole Unix
//! seconds.
//!
//! ```
//! use todokv::{Clock, SystemClock};
//!
//! assert!(SystemClock.now_secs() > 0);
//! ```

use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

/// Source of the current time, shared by every clone of a store.
pub trait Clock: Send + Sync + Debug {
    /// Current time as whole seconds since the Unix epoch.
    fn now_secs(&self) -> i64;
}

/// Wall-clock time from [`std::time::SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

/// Deterministic clock for tests.
///
/// Each read returns the current second and then steps one second forward, so
/// two records written one after another never share a timestamp. While a
/// [`ClockHold`] is alive every read returns the same second.
///
/// ```ignore
/// use todokv::{Clock, FixedClock};
///
/// let clock = FixedClock::new(100);
/// assert_eq!(clock.now_secs(), 100);
/// assert_eq!(clock.now_secs(), 101);
///
/// let _hold = clock.hold();
/// assert_eq!(clock.now_secs(), clock.now_secs());
/// ```
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct FixedClock {
    secs: AtomicI64,
    held: AtomicBool,
}

/// Freezes a [`FixedClock`] until dropped.
#[cfg(any(test, feature = "testing"))]
#[must_use = "the clock resumes stepping as soon as the hold is dropped"]
pub struct ClockHold<'a>(&'a FixedClock);

#[cfg(any(test, feature = "testing"))]
impl Drop for ClockHold<'_> {
    fn drop(&mut self) {
        self.0.held.store(false, Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Start the clock at `secs` seconds since the Unix epoch.
    pub fn new(secs: i64) -> Self {
        Self {
            secs: AtomicI64::new(secs),
            held: AtomicBool::new(false),
        }
    }

    /// Stop stepping until the returned guard is dropped.
    pub fn hold(&self) -> ClockHold<'_> {
        self.held.store(true, Ordering::SeqCst);
        ClockHold(self)
    }

    /// Jump to `secs`, forwards or backwards.
    pub fn set(&self, secs: i64) {
        self.secs.store(secs, Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        if self.held.load(Ordering::SeqCst) {
            self.secs.load(Ordering::SeqCst)
        } else {
            self.secs.fetch_add(1, Ordering::SeqCst)
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    /// 2024-01-01T00:00:00Z
    fn default() -> Self {
        Self::new(1_704_067_200)
    }
}
