//! Rate-limit hints and optional client-side pacing
//!
//! A 429 response may say when to come back in three places. They are read
//! in this order, first hit wins:
//! 1. `Retry-After` header: delay in seconds (fractional allowed) or an
//!    HTTP date
//! 2. `retry_after` in the JSON error body: delay in milliseconds
//! 3. `X-RateLimit-Reset` header: epoch seconds, or epoch milliseconds for
//!    values above 10^11

use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use tokio::time::Instant;
use tracing::debug;

const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

// Epoch values above this are milliseconds (10^11 seconds is year 5138).
const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

/// Extract the wait hint from a 429 response.
pub fn retry_after_hint(
    headers: &HeaderMap,
    body_retry_after_ms: Option<u64>,
    now: DateTime<Utc>,
) -> Option<Duration> {
    header_str(headers, RETRY_AFTER.as_str())
        .and_then(|value| parse_retry_after(value, now))
        .or_else(|| body_retry_after_ms.map(Duration::from_millis))
        .or_else(|| header_str(headers, RATE_LIMIT_RESET).and_then(|value| parse_reset(value, now)))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok()).map(str::trim)
}

fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    if let Ok(seconds) = value.parse::<f64>() {
        return seconds_to_duration(seconds);
    }

    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}

fn parse_reset(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let raw = value.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)?;
    let epoch_seconds = if raw > EPOCH_MILLIS_THRESHOLD { raw / 1000.0 } else { raw };
    let now_seconds = now.timestamp_millis() as f64 / 1000.0;
    let remaining = epoch_seconds - now_seconds;
    if remaining <= 0.0 {
        return Some(Duration::ZERO);
    }
    // A reset too far out to represent is no hint at all
    seconds_to_duration(remaining)
}

fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    if seconds.is_finite() && seconds >= 0.0 {
        Duration::try_from_secs_f64(seconds).ok()
    } else {
        None
    }
}

/// Whole milliseconds, saturating, for log fields and config values.
pub(crate) fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Spaces outgoing requests to at most `rate` per second, allowing a burst
/// of `rate` requests from idle.
///
/// Generic cell rate algorithm: a single "theoretical arrival time" replaces
/// the token counter, so reserving a slot is one short critical section and
/// the wait itself happens outside the lock.
#[derive(Debug)]
pub struct RequestPacer {
    interval: Duration,
    burst_tolerance: Duration,
    next_arrival: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// `None` when `requests_per_second` is zero.
    pub fn new(requests_per_second: u32) -> Option<Self> {
        if requests_per_second == 0 {
            return None;
        }
        let interval = Duration::from_secs(1) / requests_per_second;
        Some(Self {
            interval,
            burst_tolerance: interval * (requests_per_second - 1),
            next_arrival: Mutex::new(None),
        })
    }

    /// Reserve the next slot and return how long the caller must wait for it.
    pub fn reserve(&self) -> Duration {
        let now = Instant::now();
        let mut next_arrival = self.next_arrival.lock();
        let arrival = next_arrival.map_or(now, |at| at.max(now));
        *next_arrival = Some(arrival + self.interval);

        let allowed_at = arrival.checked_sub(self.burst_tolerance).unwrap_or(now);
        allowed_at.saturating_duration_since(now)
    }

    /// Wait until a request may be sent.
    pub async fn acquire(&self) {
        let wait = self.reserve();
        if !wait.is_zero() {
            debug!(wait_ms = duration_millis(wait), "pacing outgoing request");
            tokio::time::sleep(wait).await;
        }
    }
}
