//! Timing and memory measurement for the experiment runners.
//!
//! Memory figures come from `/proc/self/status` and are only available on Linux.

use std::time::{Duration, Instant};

/// Runs `f` and returns its result together with the elapsed wall-clock time.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Reads the resident set size high-water mark (`VmHWM`) of this process, in kilobytes.
///
/// Returns 0 if the value cannot be read.
#[cfg(target_os = "linux")]
pub fn get_peak_rss_kb() -> u64 {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| parse_status_field(&status, "VmHWM:"))
        .unwrap_or(0)
}

/// Peak RSS is not measured outside Linux; always returns 0.
#[cfg(not(target_os = "linux"))]
pub fn get_peak_rss_kb() -> u64 {
    use std::sync::Once;
    static WARN_ONCE: Once = Once::new();
    WARN_ONCE.call_once(|| {
        log::warn!("Peak RSS measurement is only supported on Linux; reporting 0.");
    });
    0
}

/// Extracts the numeric value of a `Key:   1234 kB` line.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_status_field(status: &str, key: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with(key))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|value| value.parse().ok())
}
