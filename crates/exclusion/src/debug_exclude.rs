//! Structured tracing for exclude-filter construction and caching.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag;
//! without it every function here is an empty inline no-op.

use crate::combine::Operator;
use crate::filter::ExcludeFilter;
use crate::session::CacheStats;

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const EXCLUDE_TARGET: &str = "exclusion::filter";

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces a leaf rule being built.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_rule_created(filter: &ExcludeFilter) {
    tracing::trace!(
        target: EXCLUDE_TARGET,
        rule = %filter,
        "exclude_rule_created"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_rule_created(_filter: &ExcludeFilter) {}

/// Traces the canonical result of a combination.
///
/// * `inputs` - number of filters handed to the combinator before flattening
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_combined(operator: Operator, inputs: usize, result: &ExcludeFilter) {
    tracing::trace!(
        target: EXCLUDE_TARGET,
        operator = %operator,
        inputs = inputs,
        kind = ?result.kind(),
        children = result.children().len(),
        "exclude_combined"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_combined(_operator: Operator, _inputs: usize, _result: &ExcludeFilter) {}

/// Traces a session lookup answered from the combination memo.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_memo_hit(operator: Operator, inputs: usize) {
    tracing::trace!(
        target: EXCLUDE_TARGET,
        operator = %operator,
        inputs = inputs,
        "exclude_memo_hit"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_memo_hit(_operator: Operator, _inputs: usize) {}

/// Traces a new canonical filter entering the session.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_interned(filter: &ExcludeFilter) {
    tracing::debug!(
        target: EXCLUDE_TARGET,
        fingerprint = filter.fingerprint(),
        kind = ?filter.kind(),
        "exclude_interned"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_interned(_filter: &ExcludeFilter) {}

/// Traces session teardown with the final cache statistics.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_session_cleared(stats: &CacheStats) {
    tracing::info!(
        target: EXCLUDE_TARGET,
        interned = stats.interned,
        memoized = stats.memoized,
        hits = stats.hits,
        misses = stats.misses,
        hit_ratio = stats.hit_ratio(),
        "exclude_session_cleared"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_session_cleared(_stats: &CacheStats) {}
