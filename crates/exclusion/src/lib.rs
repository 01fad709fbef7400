#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `exclusion` decides whether a module, or one artifact of a module, is
//! excluded while resolving a dependency graph. Exclude rules arrive from many
//! places (dependency declarations, transitive metadata, configuration-wide
//! excludes) and must be combined two ways:
//!
//! - along a single dependency edge a module is excluded when **any** rule
//!   excludes it ([`ExcludeFilter::union`]);
//! - a module reached over several edges is excluded only when **every** path
//!   excludes it ([`ExcludeFilter::intersection`]).
//!
//! Rather than evaluating raw rule lists per node, the crate builds an algebra
//! of immutable filters that simplify at construction. Equivalent combinations
//! collapse to the same canonical shape and degenerate results
//! (accept-everything, reject-everything) short-circuit in O(1).
//!
//! # Design
//!
//! - [`ExcludeFilter`] is a cheap, shareable handle over a closed set of
//!   shapes: the degenerate filters, exact-match leaves (group, module name,
//!   module, artifact), pattern leaves ([`PatternRule`]) and the two
//!   combinators.
//! - Combination flattens nested combinators of the same [`Operator`],
//!   absorbs identity and absorbing elements, removes duplicates, narrows
//!   related leaves and sorts the survivors.
//! - [`ExclusionSession`] interns canonical filters and memoizes combination
//!   results in concurrent tables so workers traversing different parts of a
//!   graph share one instance per distinct shape.
//!
//! # Invariants
//!
//! - A filter never changes after construction.
//! - If a filter rejects a module it rejects every artifact of that module.
//! - A combinator never holds a same-operator child, a duplicate child or a
//!   degenerate child, and never has fewer than two children.
//! - Reordering or repeating combination inputs never changes the result.
//!
//! # Errors
//!
//! Evaluation is total. Leaf constructors and session configuration report
//! [`ExcludeError`] for malformed input such as an empty group or an invalid
//! glob.
//!
//! # Examples
//!
//! Merge the excludes of two paths reaching the same module:
//!
//! ```
//! use exclusion::{ExcludeFilter, ExclusionSession, ModuleId};
//!
//! let session = ExclusionSession::new();
//! let logging = ExcludeFilter::group("org.slf4j").unwrap();
//! let legacy = ExcludeFilter::module_name("commons-logging").unwrap();
//!
//! // Path one excludes both; path two only excludes the slf4j group.
//! let path_one = session.union([logging.clone(), legacy]);
//! let merged = session.intersection([path_one, logging]);
//!
//! assert!(!merged.accept_module(&ModuleId::new("org.slf4j", "slf4j-api")));
//! assert!(merged.accept_module(&ModuleId::new("commons-logging", "commons-logging")));
//! ```

mod combine;
mod config;
mod debug_exclude;
mod error;
mod filter;
mod ids;
mod pattern;
mod relation;
mod session;

pub use combine::Operator;
pub use config::SessionConfig;
pub use error::{ExcludeError, ExcludeResult};
pub use filter::{ExcludeFilter, FilterKind};
pub use ids::{ArtifactName, ModuleId};
pub use pattern::{PatternMatcher, PatternRule, PatternRuleBuilder};
pub use session::{CacheStats, ExclusionSession};
