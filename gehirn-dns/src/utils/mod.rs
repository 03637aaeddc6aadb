//! Utility modules.

/// Keeps response bodies short enough to log.
pub mod log_sanitizer;
