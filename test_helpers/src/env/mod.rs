//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation acquires a global re-entrant mutex and returns an RAII
//! guard that restores the previous state when dropped, removing the
//! variable if it was previously absent. Stacked guards for the same key
//! restore in LIFO order. Use [`lock`] when a test needs exclusive access
//! across several operations, for example while reading `COLUMNS` back
//! through library code.
//!
//! # Examples
//!
//! ```
//! use cliflag_test_helpers::env;
//!
//! let _g = env::set_var("COLUMNS", "80");
//! assert!(matches!(std::env::var("COLUMNS"), Ok(ref value) if value == "80"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Wrapper around `std::env::set_var`.
///
/// # Safety
///
/// Callers must ensure the global environment is synchronised.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around `std::env::remove_var`.
///
/// # Safety
///
/// Callers must ensure the global environment is synchronised.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

fn mutate_env_var<K, F>(key: K, mutator: F) -> EnvVarGuard
where
    K: Into<String>,
    F: FnOnce(&str),
{
    let key_string = key.into();
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key_string);
    mutator(&key_string);
    EnvVarGuard {
        key: key_string,
        original,
    }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        if let Some(val) = self.original.take() {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env_set_var(&self.key, &val) };
        } else {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env_remove_var(&self.key) };
        }
    }
}

/// RAII guard that serialises environment access for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvVarLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarLock").finish_non_exhaustive()
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use cliflag_test_helpers::env;
/// let _g = env::set_var("FOO", "bar");
/// assert!(matches!(std::env::var("FOO"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    mutate_env_var(key, |k| unsafe { env_set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use cliflag_test_helpers::env;
/// let _g = env::remove_var("FOO");
/// assert!(std::env::var("FOO").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    mutate_env_var(key, |k| unsafe { env_remove_var(k) })
}

/// Acquires the global environment lock for the lifetime of the guard.
///
/// The lock is re-entrant, so [`set_var`] and [`remove_var`] keep working
/// on the thread that holds it.
///
/// # Examples
/// ```
/// use cliflag_test_helpers::env;
///
/// let _lock = env::lock();
/// let _guard = env::set_var("KEY", "VALUE");
/// ```
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Runs a closure while holding the global environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock();
    f()
}
