//! Wall-clock source for the policy layer.
//!
//! The original `time() == -1` failure sentinel is surfaced here as an
//! explicit `Option`-shaped return rather than encoded in-band into
//! `created`. `time::OffsetDateTime::now_utc()` has no fallible syscall
//! path to mirror directly, so a negative timestamp (impossible in
//! practice, but not ruled out by the type) is the trigger for the same
//! clock-failure handling the policy layer expects.

/// Seconds since the Unix epoch, or `None` on clock failure.
pub(crate) fn current_unix_time() -> Option<i64> {
    let now = time::OffsetDateTime::now_utc().unix_timestamp();
    if now < 0 {
        None
    } else {
        Some(now)
    }
}
