//! Process-level run ID for correlating one comparison run.
//!
//! Each process gets a unique ULID at startup; the report and every log
//! line produced by the same run share it.

use once_cell::sync::Lazy;
use ulid::Ulid;

/// Process-level run ID, generated once at first access.
static RUN_ID: Lazy<String> = Lazy::new(|| Ulid::new().to_string());

/// Returns the process-level run ID (26 chars, time-ordered, URL-safe).
#[inline]
pub fn get() -> &'static str {
    &RUN_ID
}

/// Generates a fresh ULID for sub-operations that need their own ID.
#[inline]
pub fn generate() -> String {
    Ulid::new().to_string()
}
