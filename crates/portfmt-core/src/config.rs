//! Fallback policy configuration.
//!
//! The policy is set via the `PORTFMT_ON_ERROR` environment variable:
//! - `fail` (default): a formatting error leaves an empty, terminated buffer
//!   and `format_lossy` returns 0.
//! - `raw`: a formatting error copies the unformatted format string into the
//!   buffer instead, so log call sites still emit something readable.
//!
//! Only `format_lossy` consults the policy. `format_into` and friends always
//! report errors and never read process state.

use std::sync::atomic::{AtomicU8, Ordering};

/// What `format_lossy` does when a format string fails to render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackPolicy {
    /// Emit nothing; the error is swallowed and the length is 0.
    #[default]
    Fail,
    /// Emit the raw format string, bounded like any other output.
    Raw,
}

impl FallbackPolicy {
    /// Parse from string (case-insensitive). Unknown values map to `Fail`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "passthrough" | "verbatim" => Self::Raw,
            _ => Self::Fail,
        }
    }

    /// Returns true if the raw format string replaces failed output.
    #[must_use]
    pub const fn emits_raw_format(self) -> bool {
        matches!(self, Self::Raw)
    }
}

// 0=unresolved, 1=Fail, 2=Raw, 255=resolving.
static CACHED_POLICY: AtomicU8 = AtomicU8::new(0);

const POLICY_UNRESOLVED: u8 = 0;
const POLICY_FAIL: u8 = 1;
const POLICY_RAW: u8 = 2;
const POLICY_RESOLVING: u8 = 255;

const fn policy_to_u8(policy: FallbackPolicy) -> u8 {
    match policy {
        FallbackPolicy::Fail => POLICY_FAIL,
        FallbackPolicy::Raw => POLICY_RAW,
    }
}

const fn u8_to_policy(v: u8) -> FallbackPolicy {
    match v {
        POLICY_RAW => FallbackPolicy::Raw,
        _ => FallbackPolicy::Fail,
    }
}

/// Get the configured fallback policy (reads env var on first call, caches thereafter).
///
/// A call that races the first resolution sees `Fail` until the winner
/// stores the parsed value.
#[must_use]
pub fn fallback_policy() -> FallbackPolicy {
    let cached = CACHED_POLICY.load(Ordering::Acquire);
    if cached != POLICY_UNRESOLVED && cached != POLICY_RESOLVING {
        return u8_to_policy(cached);
    }
    if cached == POLICY_RESOLVING {
        return FallbackPolicy::Fail;
    }

    if CACHED_POLICY
        .compare_exchange(
            POLICY_UNRESOLVED,
            POLICY_RESOLVING,
            Ordering::SeqCst,
            Ordering::Relaxed,
        )
        .is_err()
    {
        let v = CACHED_POLICY.load(Ordering::Acquire);
        return if v != POLICY_UNRESOLVED && v != POLICY_RESOLVING {
            u8_to_policy(v)
        } else {
            FallbackPolicy::Fail
        };
    }

    let policy = std::env::var("PORTFMT_ON_ERROR")
        .map(|v| FallbackPolicy::from_str_loose(&v))
        .unwrap_or_default();
    CACHED_POLICY.store(policy_to_u8(policy), Ordering::Release);
    policy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_policies() {
        assert_eq!(FallbackPolicy::from_str_loose("fail"), FallbackPolicy::Fail);
        assert_eq!(FallbackPolicy::from_str_loose("RAW"), FallbackPolicy::Raw);
        assert_eq!(
            FallbackPolicy::from_str_loose(" passthrough "),
            FallbackPolicy::Raw
        );
        assert_eq!(FallbackPolicy::from_str_loose("bogus"), FallbackPolicy::Fail);
        assert_eq!(FallbackPolicy::from_str_loose(""), FallbackPolicy::Fail);
    }

    #[test]
    fn default_is_fail() {
        assert_eq!(FallbackPolicy::default(), FallbackPolicy::Fail);
        assert!(!FallbackPolicy::Fail.emits_raw_format());
        assert!(FallbackPolicy::Raw.emits_raw_format());
    }

    #[test]
    fn cached_policy_is_sticky_until_cache_reset() {
        let previous = CACHED_POLICY.swap(POLICY_RAW, Ordering::SeqCst);
        assert_eq!(fallback_policy(), FallbackPolicy::Raw);
        assert_eq!(fallback_policy(), FallbackPolicy::Raw);

        CACHED_POLICY.store(POLICY_FAIL, Ordering::SeqCst);
        assert_eq!(fallback_policy(), FallbackPolicy::Fail);

        CACHED_POLICY.store(previous, Ordering::SeqCst);
    }

    #[test]
    fn resolving_state_returns_fail() {
        let previous = CACHED_POLICY.swap(POLICY_RESOLVING, Ordering::SeqCst);
        assert_eq!(fallback_policy(), FallbackPolicy::Fail);
        CACHED_POLICY.store(previous, Ordering::SeqCst);
    }
}
