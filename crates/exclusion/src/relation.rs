//! Containment and disjointness between exact-match leaves.
//!
//! Every exact-match leaf excludes a set of modules and a set of artifacts.
//! Module-scoped leaves exclude all artifacts of the modules they exclude;
//! artifact leaves exclude no module and a single artifact. The rewrites
//! below only drop or merge leaves when these sets prove the combinator's
//! answer is unchanged. Pattern leaves and nested combinators are left alone.

use rustc_hash::FxHashSet;

use crate::filter::{ExcludeFilter, Node};
use crate::ids::ModuleId;

#[derive(Default)]
struct LeafIndex<'a> {
    groups: FxHashSet<&'a str>,
    names: FxHashSet<&'a str>,
    modules: FxHashSet<&'a ModuleId>,
    artifact_modules: FxHashSet<&'a ModuleId>,
    artifacts: usize,
}

impl<'a> LeafIndex<'a> {
    /// Indexes deduplicated children.
    fn new(children: &'a [ExcludeFilter]) -> Self {
        let mut index = Self::default();
        for child in children {
            match child.node() {
                Node::Group(group) => {
                    index.groups.insert(group);
                }
                Node::ModuleName(name) => {
                    index.names.insert(name);
                }
                Node::Module(module) => {
                    index.modules.insert(module);
                }
                Node::Artifact { module, .. } => {
                    index.artifact_modules.insert(module);
                    index.artifacts += 1;
                }
                _ => {}
            }
        }
        index
    }

    /// Whether another leaf of a union already excludes everything `child` does.
    fn covers(&self, child: &ExcludeFilter) -> bool {
        match child.node() {
            Node::Module(module) => {
                self.groups.contains(module.group()) || self.names.contains(module.name())
            }
            Node::Artifact { module, .. } => {
                self.groups.contains(module.group())
                    || self.names.contains(module.name())
                    || self.modules.contains(module)
            }
            _ => false,
        }
    }

    /// Whether two leaves can never exclude the same module or artifact.
    fn has_disjoint_pair(&self) -> bool {
        if self.groups.len() > 1
            || self.names.len() > 1
            || self.modules.len() > 1
            || self.artifacts > 1
        {
            return true;
        }
        let mut scoped = self.modules.iter().chain(self.artifact_modules.iter());
        if let Some(group) = self.groups.iter().next() {
            if scoped.clone().any(|module| module.group() != *group) {
                return true;
            }
        }
        if let Some(name) = self.names.iter().next() {
            if scoped.clone().any(|module| module.name() != *name) {
                return true;
            }
        }
        if let Some(module) = self.modules.iter().next() {
            return scoped.any(|other| other != module);
        }
        false
    }
}

/// Drops union children whose exclusions are covered by a sibling leaf.
pub(crate) fn drop_covered(children: &mut Vec<ExcludeFilter>) {
    let keep: Vec<bool> = {
        let index = LeafIndex::new(children);
        if index.groups.is_empty() && index.names.is_empty() && index.modules.is_empty() {
            return;
        }
        children.iter().map(|child| !index.covers(child)).collect()
    };
    let mut keep = keep.into_iter();
    children.retain(|_| keep.next().unwrap_or(true));
}

/// Narrows intersection leaves to the smallest equivalent set.
///
/// Returns `true` when two leaves are disjoint, in which case the whole
/// intersection excludes nothing and `children` is left untouched.
pub(crate) fn narrow_intersection(children: &mut Vec<ExcludeFilter>) -> bool {
    let (merged, had_module, has_artifact) = {
        let index = LeafIndex::new(children);
        if index.has_disjoint_pair() {
            return true;
        }
        // One group and one name intersect to exactly one module.
        let merged = match (index.groups.iter().next(), index.names.iter().next()) {
            (Some(group), Some(name)) => Some(ModuleId::new(*group, *name)),
            _ => None,
        };
        (merged, !index.modules.is_empty(), index.artifacts > 0)
    };

    let has_module = had_module || merged.is_some();
    children.retain(|child| match child.node() {
        Node::Group(_) | Node::ModuleName(_) => !(has_module || has_artifact),
        Node::Module(_) => !has_artifact,
        _ => true,
    });
    if let Some(module) = merged {
        if !had_module && !has_artifact {
            children.push(ExcludeFilter::from_node(Node::Module(module)));
        }
    }
    false
}
