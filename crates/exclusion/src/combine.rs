//! Union and intersection of exclude filters.
//!
//! Construction normalizes eagerly. Nested combinators of the same operator
//! are flattened and degenerate children absorbed; the survivors are sorted,
//! deduplicated and narrowed by leaf relations. The result depends only on
//! the set of inputs, never on their order or multiplicity.

use std::fmt;

use crate::debug_exclude::trace_combined;
use crate::filter::{ExcludeFilter, Node};
use crate::relation::{drop_covered, narrow_intersection};

/// Operator joining exclude filters.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    /// Excluded when any input excludes. Used for the rules along one edge.
    Union,
    /// Excluded only when every input excludes. Used to merge the rules of
    /// several paths reaching the same module.
    Intersection,
}

impl Operator {
    /// Result of combining zero filters.
    #[must_use]
    pub fn identity(self) -> ExcludeFilter {
        match self {
            Self::Union => ExcludeFilter::accept_all(),
            Self::Intersection => ExcludeFilter::reject_all(),
        }
    }

    /// Result of combining any filter with the absorbing element.
    #[must_use]
    pub fn absorbing(self) -> ExcludeFilter {
        match self {
            Self::Union => ExcludeFilter::reject_all(),
            Self::Intersection => ExcludeFilter::accept_all(),
        }
    }

    fn wrap(self, children: Vec<ExcludeFilter>) -> Node {
        match self {
            Self::Union => Node::Union(children.into_boxed_slice()),
            Self::Intersection => Node::Intersection(children.into_boxed_slice()),
        }
    }

    fn is_absorbing(self, filter: &ExcludeFilter) -> bool {
        match self {
            Self::Union => matches!(filter.node(), Node::RejectAll),
            Self::Intersection => filter.accepts_everything(),
        }
    }

    fn is_identity(self, filter: &ExcludeFilter) -> bool {
        match self {
            Self::Union => filter.accepts_everything(),
            Self::Intersection => matches!(filter.node(), Node::RejectAll),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Union => f.write_str("union"),
            Self::Intersection => f.write_str("intersection"),
        }
    }
}

impl ExcludeFilter {
    /// Excludes whatever any of `filters` excludes.
    ///
    /// An empty input yields [`accept_all`](Self::accept_all).
    #[must_use]
    pub fn union<I>(filters: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::combine(Operator::Union, filters)
    }

    /// Excludes only what every one of `filters` excludes.
    ///
    /// An empty input yields [`reject_all`](Self::reject_all).
    #[must_use]
    pub fn intersection<I>(filters: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::combine(Operator::Intersection, filters)
    }

    /// Combines `filters` under `operator` and returns the canonical result.
    #[must_use]
    pub fn combine<I>(operator: Operator, filters: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut children = Vec::new();
        let mut inputs = 0usize;
        for filter in filters {
            inputs += 1;
            if filter.operator() == Some(operator) {
                children.extend(filter.children().iter().cloned());
            } else {
                children.push(filter);
            }
        }

        let result = simplify(operator, children);
        trace_combined(operator, inputs, &result);
        result
    }

    /// Rebuilds a combinator over equal replacement children.
    pub(crate) fn with_children(&self, children: Vec<Self>) -> Self {
        match self.operator() {
            Some(operator) => Self::from_node(operator.wrap(children)),
            None => self.clone(),
        }
    }
}

fn simplify(operator: Operator, mut children: Vec<ExcludeFilter>) -> ExcludeFilter {
    if children.iter().any(|child| operator.is_absorbing(child)) {
        return operator.absorbing();
    }
    children.retain(|child| !operator.is_identity(child));
    children.sort_unstable();
    children.dedup();

    match operator {
        Operator::Union => drop_covered(&mut children),
        Operator::Intersection => {
            if narrow_intersection(&mut children) {
                return operator.absorbing();
            }
            children.sort_unstable();
        }
    }

    match children.len() {
        0 => operator.identity(),
        1 => children.swap_remove(0),
        _ => ExcludeFilter::from_node(operator.wrap(children)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArtifactName, FilterKind, ModuleId};

    fn group(value: &str) -> ExcludeFilter {
        ExcludeFilter::group(value).unwrap()
    }

    fn name(value: &str) -> ExcludeFilter {
        ExcludeFilter::module_name(value).unwrap()
    }

    #[test]
    fn empty_inputs_yield_identity() {
        assert_eq!(ExcludeFilter::union(Vec::new()).kind(), FilterKind::AcceptAll);
        assert_eq!(ExcludeFilter::intersection(Vec::new()).kind(), FilterKind::RejectAll);
    }

    #[test]
    fn single_input_is_returned_unwrapped() {
        let filter = group("com.acme");
        let union = ExcludeFilter::union([filter.clone()]);
        assert!(ExcludeFilter::ptr_eq(&union, &filter));
        let intersection = ExcludeFilter::intersection([filter.clone()]);
        assert!(ExcludeFilter::ptr_eq(&intersection, &filter));
    }

    #[test]
    fn duplicates_collapse() {
        let union = ExcludeFilter::union([group("com.acme"), group("com.acme")]);
        assert_eq!(union, group("com.acme"));
    }

    #[test]
    fn union_absorbed_by_reject_all() {
        let union = ExcludeFilter::union([group("com.acme"), ExcludeFilter::reject_all()]);
        assert_eq!(union.kind(), FilterKind::RejectAll);
    }

    #[test]
    fn union_ignores_accept_all() {
        let union = ExcludeFilter::union([group("com.acme"), ExcludeFilter::accept_all()]);
        assert_eq!(union, group("com.acme"));
    }

    #[test]
    fn intersection_absorbed_by_accept_all() {
        let intersection =
            ExcludeFilter::intersection([group("com.acme"), ExcludeFilter::accept_all()]);
        assert_eq!(intersection.kind(), FilterKind::AcceptAll);
    }

    #[test]
    fn intersection_ignores_reject_all() {
        let intersection =
            ExcludeFilter::intersection([group("com.acme"), ExcludeFilter::reject_all()]);
        assert_eq!(intersection, group("com.acme"));

        let only_reject = ExcludeFilter::intersection([
            ExcludeFilter::reject_all(),
            ExcludeFilter::reject_all(),
        ]);
        assert_eq!(only_reject.kind(), FilterKind::RejectAll);
    }

    #[test]
    fn nested_same_operator_is_flattened() {
        let inner = ExcludeFilter::union([group("a"), group("b")]);
        let outer = ExcludeFilter::union([inner, group("c")]);

        assert_eq!(outer.kind(), FilterKind::Union);
        assert_eq!(outer.children().len(), 3);
        assert!(outer.children().iter().all(|child| child.operator().is_none()));
    }

    #[test]
    fn mixed_operators_stay_nested() {
        let any = ExcludeFilter::union([group("a"), name("x")]);
        let all = ExcludeFilter::intersection([any.clone(), name("y")]);

        assert_eq!(all.kind(), FilterKind::Intersection);
        assert!(all.children().contains(&any));
    }

    #[test]
    fn children_are_sorted() {
        let union = ExcludeFilter::union([group("c"), group("a"), group("b")]);
        let mut sorted = union.children().to_vec();
        sorted.sort();
        assert_eq!(union.children(), sorted.as_slice());
    }

    #[test]
    fn order_does_not_change_shape() {
        let forward = ExcludeFilter::union([group("a"), name("x"), group("b")]);
        let backward = ExcludeFilter::union([group("b"), name("x"), group("a")]);
        assert_eq!(forward, backward);
        assert_eq!(forward.fingerprint(), backward.fingerprint());
    }

    #[test]
    fn precomputed_flags_follow_children() {
        let owner = ModuleId::new("com.acme", "dist");
        let artifacts = ExcludeFilter::union([
            ExcludeFilter::artifact(owner.clone(), ArtifactName::new("dist", "zip")).unwrap(),
            ExcludeFilter::artifact(owner, ArtifactName::new("dist", "tar")).unwrap(),
        ]);
        assert!(artifacts.accepts_all_modules());
        assert!(!artifacts.accepts_all_artifacts());

        let mixed = ExcludeFilter::intersection([artifacts, name("other")]);
        assert!(mixed.accepts_all_modules());
    }

    #[test]
    fn with_children_preserves_equality() {
        let union = ExcludeFilter::union([group("a"), group("b")]);
        let rebuilt = union.with_children(union.children().to_vec());
        assert_eq!(rebuilt, union);
        assert!(!ExcludeFilter::ptr_eq(&rebuilt, &union));
    }

    #[test]
    fn operator_display() {
        assert_eq!(Operator::Union.to_string(), "union");
        assert_eq!(Operator::Intersection.to_string(), "intersection");
    }

    #[test]
    fn display_renders_combinators() {
        let union = ExcludeFilter::union([group("b"), group("a")]);
        assert_eq!(union.to_string(), "{any-of {group a} {group b}}");
    }
}
