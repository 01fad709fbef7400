//! crates/exclusion/src/session.rs
//!
//! Session-scoped canonicalization of exclude filters using DashMap.
//!
//! A resolution session owns one [`ExclusionSession`]. Workers traversing
//! different parts of the dependency graph share it by reference and combine
//! filters through it, so every distinct canonical shape is represented by a
//! single shared instance for the lifetime of the session.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxBuildHasher;

use crate::combine::Operator;
use crate::config::SessionConfig;
use crate::debug_exclude::{trace_interned, trace_memo_hit, trace_session_cleared};
use crate::error::ExcludeResult;
use crate::filter::ExcludeFilter;

/// Memo key: an operator and its sorted, duplicate-free inputs.
#[derive(Debug, Eq, Hash, PartialEq)]
struct CombineKey {
    operator: Operator,
    inputs: Box<[ExcludeFilter]>,
}

/// Concurrent canonicalizer for exclude filters.
///
/// Two tables back the session:
///
/// - **Interned** filters, keyed by structural identity. Looking up a filter
///   returns the first instance inserted with that shape.
/// - **Memoized** combinations, keyed by operator and input set, so repeated
///   requests skip flattening and simplification entirely.
///
/// Both tables use insert-if-absent semantics. When two threads race to
/// publish the same shape, one instance wins and the other is dropped.
/// Nothing is evicted until [`clear`](Self::clear) or drop.
///
/// # Examples
///
/// ```
/// use exclusion::{ExcludeFilter, ExclusionSession};
///
/// let session = ExclusionSession::new();
/// let a = ExcludeFilter::group("com.acme").unwrap();
/// let b = ExcludeFilter::module_name("utils").unwrap();
///
/// let first = session.union([a.clone(), b.clone()]);
/// let second = session.union([b, a]);
/// assert!(ExcludeFilter::ptr_eq(&first, &second));
/// ```
#[derive(Debug)]
pub struct ExclusionSession {
    config: SessionConfig,
    interned: DashMap<ExcludeFilter, (), FxBuildHasher>,
    memo: DashMap<CombineKey, ExcludeFilter, FxBuildHasher>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ExclusionSession {
    /// Creates a session with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(SessionConfig::default())
    }

    /// Creates a session from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExcludeError::InvalidConfig`](crate::ExcludeError::InvalidConfig)
    /// when [`SessionConfig::validate`] rejects `config`.
    pub fn with_config(config: SessionConfig) -> ExcludeResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SessionConfig) -> Self {
        let capacity = config.initial_capacity;
        let (interned, memo) = match config.shard_amount {
            Some(shards) => (
                DashMap::with_capacity_and_hasher_and_shard_amount(capacity, FxBuildHasher, shards),
                DashMap::with_capacity_and_hasher_and_shard_amount(capacity, FxBuildHasher, shards),
            ),
            None => (
                DashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
                DashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            ),
        };
        Self {
            config,
            interned,
            memo,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the canonical instance structurally equal to `filter`.
    ///
    /// Combinator children are interned first, so a retained filter only
    /// ever references canonical instances.
    pub fn intern(&self, filter: ExcludeFilter) -> ExcludeFilter {
        if let Some(existing) = self.interned.get(&filter) {
            return existing.key().clone();
        }

        let children = filter.children();
        let candidate = if children.is_empty() {
            filter
        } else {
            let canonical: Vec<ExcludeFilter> =
                children.iter().map(|child| self.intern(child.clone())).collect();
            if canonical
                .iter()
                .zip(children)
                .all(|(canonical, child)| ExcludeFilter::ptr_eq(canonical, child))
            {
                filter
            } else {
                filter.with_children(canonical)
            }
        };

        match self.interned.entry(candidate) {
            Entry::Occupied(entry) => entry.key().clone(),
            Entry::Vacant(entry) => {
                let winner = entry.key().clone();
                entry.insert(());
                trace_interned(&winner);
                winner
            }
        }
    }

    /// Session-cached [`ExcludeFilter::union`].
    pub fn union<I>(&self, filters: I) -> ExcludeFilter
    where
        I: IntoIterator<Item = ExcludeFilter>,
    {
        self.combine(Operator::Union, filters)
    }

    /// Session-cached [`ExcludeFilter::intersection`].
    pub fn intersection<I>(&self, filters: I) -> ExcludeFilter
    where
        I: IntoIterator<Item = ExcludeFilter>,
    {
        self.combine(Operator::Intersection, filters)
    }

    /// Combines `filters` and returns the session's canonical instance.
    ///
    /// The same set of inputs, in any order and with any repetition, yields
    /// the same instance for the lifetime of the session.
    pub fn combine<I>(&self, operator: Operator, filters: I) -> ExcludeFilter
    where
        I: IntoIterator<Item = ExcludeFilter>,
    {
        let mut inputs: Vec<ExcludeFilter> = filters.into_iter().collect();
        inputs.sort_unstable();
        inputs.dedup();

        if !self.config.memoize_combinations {
            return self.intern(ExcludeFilter::combine(operator, inputs));
        }

        let key = CombineKey {
            operator,
            inputs: inputs.into_boxed_slice(),
        };
        if let Some(hit) = self.memo.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace_memo_hit(operator, key.inputs.len());
            return hit.value().clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let candidate = ExcludeFilter::combine(operator, key.inputs.iter().cloned());
        let canonical = self.intern(candidate);
        self.memo.entry(key).or_insert(canonical).value().clone()
    }

    /// Returns the number of distinct canonical filters retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interned.len()
    }

    /// Returns `true` if no filter has been interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interned.is_empty()
    }

    /// Returns a snapshot of the table sizes and memo counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            interned: self.interned.len(),
            memoized: self.memo.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Discards every retained filter and resets the counters.
    ///
    /// Filters already handed out stay valid; they are simply no longer
    /// canonical for this session.
    pub fn clear(&self) {
        trace_session_cleared(&self.stats());
        self.memo.clear();
        self.interned.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl Default for ExclusionSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of session cache activity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    /// Distinct canonical filters retained.
    pub interned: usize,
    /// Memoized combinations.
    pub memoized: usize,
    /// Combinations answered from the memo.
    pub hits: u64,
    /// Combinations that had to be simplified.
    pub misses: u64,
}

impl CacheStats {
    /// Returns the fraction of memo lookups that hit.
    ///
    /// Returns 0.0 if no combination has been requested.
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
