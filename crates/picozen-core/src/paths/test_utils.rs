//! Environment isolation for tests touching `PICOZEN_*` variables.

use std::env;
use std::sync::Mutex;

/// Serializes tests that read or write process environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Sets an environment variable and restores the previous
/// value on drop. Hold [`ENV_LOCK`] for the guard's whole lifetime.
pub struct EnvVarGuard {
    key: String,
    previous: Option<String>,
}

impl EnvVarGuard {
    pub fn set(key: &str, value: &str) -> Self {
        let previous = env::var(key).ok();
        write_var(key, Some(value));
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        write_var(&self.key, self.previous.as_deref());
    }
}

#[allow(unsafe_code)]
fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: callers hold ENV_LOCK, so no other test thread touches the env.
    unsafe {
        match value {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }
    }
}
