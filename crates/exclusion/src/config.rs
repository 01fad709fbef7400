//! crates/exclusion/src/config.rs
//! Tuning knobs for an [`ExclusionSession`](crate::ExclusionSession).

use crate::error::{ExcludeError, ExcludeResult};

/// Configuration for the canonical filter tables of a session.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Capacity reserved up front in each table.
    pub initial_capacity: usize,
    /// Shard count of the concurrent tables. Must be a power of two greater
    /// than one; `None` uses the table's default.
    pub shard_amount: Option<usize>,
    /// Whether combination results are memoized by their input set.
    pub memoize_combinations: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            shard_amount: None,
            memoize_combinations: true,
        }
    }
}

impl SessionConfig {
    /// Sets the reserved capacity.
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the shard count.
    #[must_use]
    pub const fn with_shard_amount(mut self, shards: usize) -> Self {
        self.shard_amount = Some(shards);
        self
    }

    /// Enables or disables memoization of combination results.
    #[must_use]
    pub const fn with_memoization(mut self, enabled: bool) -> Self {
        self.memoize_combinations = enabled;
        self
    }

    /// Checks the configuration before any table is allocated.
    ///
    /// # Errors
    ///
    /// Returns [`ExcludeError::InvalidConfig`] when the shard amount is not a
    /// power of two greater than one.
    pub fn validate(&self) -> ExcludeResult<()> {
        match self.shard_amount {
            Some(shards) if shards <= 1 || !shards.is_power_of_two() => {
                Err(ExcludeError::InvalidConfig(format!(
                    "shard amount {shards} must be a power of two greater than one"
                )))
            }
            _ => Ok(()),
        }
    }
}
