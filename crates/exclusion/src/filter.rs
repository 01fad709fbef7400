use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use rustc_hash::FxHasher;

use crate::combine::Operator;
use crate::debug_exclude::trace_rule_created;
use crate::error::{ExcludeResult, require_non_empty};
use crate::ids::{ArtifactName, ModuleId};
use crate::pattern::PatternRule;

static ACCEPT_ALL: LazyLock<ExcludeFilter> =
    LazyLock::new(|| ExcludeFilter::from_node(Node::AcceptAll));
static REJECT_ALL: LazyLock<ExcludeFilter> =
    LazyLock::new(|| ExcludeFilter::from_node(Node::RejectAll));

/// Variant tag of an [`ExcludeFilter`], for inspection without borrowing its
/// contents.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterKind {
    /// Excludes nothing.
    AcceptAll,
    /// Excludes everything.
    RejectAll,
    /// Excludes modules of one group.
    Group,
    /// Excludes modules with one name, in any group.
    ModuleName,
    /// Excludes one module.
    Module,
    /// Excludes one artifact of one module.
    Artifact,
    /// Pattern-matched rule.
    Pattern,
    /// Excluded when any child excludes.
    Union,
    /// Excluded only when every child excludes.
    Intersection,
}

/// Closed set of filter shapes. Combinator children are sorted and unique.
#[derive(Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Node {
    AcceptAll,
    RejectAll,
    Group(String),
    ModuleName(String),
    Module(ModuleId),
    Artifact {
        module: ModuleId,
        artifact: ArtifactName,
    },
    Pattern(PatternRule),
    Union(Box<[ExcludeFilter]>),
    Intersection(Box<[ExcludeFilter]>),
}

#[derive(Debug)]
struct FilterInner {
    node: Node,
    fingerprint: u64,
    accepts_all_modules: bool,
    accepts_all_artifacts: bool,
}

/// Immutable exclude filter.
///
/// A filter answers whether a module, or one artifact of a module, survives
/// the exclude rules it encodes. Filters are built from leaf rules and
/// combined with [`union`](Self::union) and
/// [`intersection`](Self::intersection); combination simplifies eagerly so
/// the resulting shape is canonical for its set of inputs.
///
/// `ExcludeFilter` is cheaply cloneable (the node is behind an [`Arc`]) and
/// can be shared across threads.
///
/// Equality is structural: two filters are equal when their canonical shapes
/// match. Each filter carries a fingerprint computed once at construction, so
/// hashing is O(1) and unequal filters are usually rejected without walking
/// the tree.
///
/// # Examples
///
/// ```
/// use exclusion::{ExcludeFilter, ModuleId};
///
/// let acme = ExcludeFilter::group("com.acme").unwrap();
/// let utils = ExcludeFilter::module_name("utils").unwrap();
/// let either = ExcludeFilter::union([acme, utils]);
///
/// assert!(!either.accept_module(&ModuleId::new("com.acme", "core")));
/// assert!(!either.accept_module(&ModuleId::new("org.other", "utils")));
/// assert!(either.accept_module(&ModuleId::new("org.other", "core")));
/// ```
#[derive(Clone)]
pub struct ExcludeFilter {
    inner: Arc<FilterInner>,
}

impl ExcludeFilter {
    pub(crate) fn from_node(node: Node) -> Self {
        let (accepts_all_modules, accepts_all_artifacts) = match &node {
            Node::AcceptAll => (true, true),
            Node::RejectAll | Node::Group(_) | Node::ModuleName(_) | Node::Module(_) => {
                (false, false)
            }
            Node::Artifact { .. } => (true, false),
            Node::Pattern(rule) => (rule.is_artifact_scoped(), false),
            Node::Union(children) => (
                children.iter().all(Self::accepts_all_modules),
                children.iter().all(Self::accepts_all_artifacts),
            ),
            Node::Intersection(children) => (
                children.iter().any(Self::accepts_all_modules),
                children.iter().any(Self::accepts_all_artifacts),
            ),
        };
        let mut hasher = FxHasher::default();
        node.hash(&mut hasher);
        Self {
            inner: Arc::new(FilterInner {
                fingerprint: hasher.finish(),
                node,
                accepts_all_modules,
                accepts_all_artifacts,
            }),
        }
    }

    fn leaf(node: Node) -> Self {
        let filter = Self::from_node(node);
        trace_rule_created(&filter);
        filter
    }

    /// Returns the filter that excludes nothing.
    #[must_use]
    pub fn accept_all() -> Self {
        ACCEPT_ALL.clone()
    }

    /// Returns the filter that excludes everything.
    #[must_use]
    pub fn reject_all() -> Self {
        REJECT_ALL.clone()
    }

    /// Excludes every module whose group equals `group`.
    ///
    /// # Errors
    ///
    /// Returns [`ExcludeError::EmptyPattern`](crate::ExcludeError::EmptyPattern)
    /// when `group` is empty.
    pub fn group(group: impl Into<String>) -> ExcludeResult<Self> {
        let group = group.into();
        require_non_empty(&group, "group")?;
        Ok(Self::leaf(Node::Group(group)))
    }

    /// Excludes every module named `name`, whatever its group.
    ///
    /// # Errors
    ///
    /// Returns [`ExcludeError::EmptyPattern`](crate::ExcludeError::EmptyPattern)
    /// when `name` is empty.
    pub fn module_name(name: impl Into<String>) -> ExcludeResult<Self> {
        let name = name.into();
        require_non_empty(&name, "module name")?;
        Ok(Self::leaf(Node::ModuleName(name)))
    }

    /// Excludes exactly one module.
    ///
    /// # Errors
    ///
    /// Returns [`ExcludeError::EmptyPattern`](crate::ExcludeError::EmptyPattern)
    /// when the group or name is empty.
    pub fn module(module: ModuleId) -> ExcludeResult<Self> {
        require_module(&module)?;
        Ok(Self::leaf(Node::Module(module)))
    }

    /// Excludes one artifact of `module`. The module itself stays accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ExcludeError::EmptyPattern`](crate::ExcludeError::EmptyPattern)
    /// when a module field, the artifact name or the extension is empty.
    pub fn artifact(module: ModuleId, artifact: ArtifactName) -> ExcludeResult<Self> {
        require_module(&module)?;
        require_non_empty(artifact.name(), "artifact name")?;
        require_non_empty(artifact.extension(), "artifact extension")?;
        Ok(Self::leaf(Node::Artifact { module, artifact }))
    }

    /// Wraps a compiled [`PatternRule`].
    ///
    /// A module-scoped rule whose group and module are both `*` excludes
    /// everything and is returned as [`reject_all`](Self::reject_all).
    #[must_use]
    pub fn pattern(rule: PatternRule) -> Self {
        if rule.matches_everything() {
            return Self::reject_all();
        }
        Self::leaf(Node::Pattern(rule))
    }

    pub(crate) fn node(&self) -> &Node {
        &self.inner.node
    }

    /// Returns the variant tag.
    #[must_use]
    pub fn kind(&self) -> FilterKind {
        match self.node() {
            Node::AcceptAll => FilterKind::AcceptAll,
            Node::RejectAll => FilterKind::RejectAll,
            Node::Group(_) => FilterKind::Group,
            Node::ModuleName(_) => FilterKind::ModuleName,
            Node::Module(_) => FilterKind::Module,
            Node::Artifact { .. } => FilterKind::Artifact,
            Node::Pattern(_) => FilterKind::Pattern,
            Node::Union(_) => FilterKind::Union,
            Node::Intersection(_) => FilterKind::Intersection,
        }
    }

    /// Returns the operator of a combinator, or `None` for a leaf.
    #[must_use]
    pub fn operator(&self) -> Option<Operator> {
        match self.node() {
            Node::Union(_) => Some(Operator::Union),
            Node::Intersection(_) => Some(Operator::Intersection),
            _ => None,
        }
    }

    /// Returns the children of a combinator in canonical order; empty for a
    /// leaf.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self.node() {
            Node::Union(children) | Node::Intersection(children) => &children[..],
            _ => &[],
        }
    }

    /// Returns the structural fingerprint computed at construction.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.inner.fingerprint
    }

    /// Returns `true` when both handles point at the same instance.
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Returns `true` if the filter provably excludes no module.
    #[must_use]
    pub fn accepts_all_modules(&self) -> bool {
        self.inner.accepts_all_modules
    }

    /// Returns `true` if the filter provably excludes no artifact.
    #[must_use]
    pub fn accepts_all_artifacts(&self) -> bool {
        self.inner.accepts_all_artifacts
    }

    pub(crate) fn accepts_everything(&self) -> bool {
        self.inner.accepts_all_modules && self.inner.accepts_all_artifacts
    }

    /// Returns `true` if `module` is not excluded.
    #[must_use]
    pub fn accept_module(&self, module: &ModuleId) -> bool {
        if self.inner.accepts_all_modules {
            return true;
        }
        match self.node() {
            Node::AcceptAll | Node::Artifact { .. } => true,
            Node::RejectAll => false,
            Node::Group(group) => module.group() != group,
            Node::ModuleName(name) => module.name() != name,
            Node::Module(id) => module != id,
            Node::Pattern(rule) => rule.accept_module(module),
            Node::Union(children) => children.iter().all(|child| child.accept_module(module)),
            Node::Intersection(children) => {
                children.iter().any(|child| child.accept_module(module))
            }
        }
    }

    /// Returns `true` if `artifact` of `module` is not excluded.
    ///
    /// Whenever [`accept_module`](Self::accept_module) rejects a module, every
    /// artifact of that module is rejected as well.
    #[must_use]
    pub fn accept_artifact(&self, module: &ModuleId, artifact: &ArtifactName) -> bool {
        if self.inner.accepts_all_artifacts {
            return true;
        }
        match self.node() {
            Node::AcceptAll => true,
            Node::RejectAll => false,
            Node::Group(_) | Node::ModuleName(_) | Node::Module(_) => self.accept_module(module),
            Node::Artifact {
                module: excluded_module,
                artifact: excluded_artifact,
            } => module != excluded_module || artifact != excluded_artifact,
            Node::Pattern(rule) => rule.accept_artifact(module, artifact),
            Node::Union(children) => children
                .iter()
                .all(|child| child.accept_artifact(module, artifact)),
            Node::Intersection(children) => children
                .iter()
                .any(|child| child.accept_artifact(module, artifact)),
        }
    }
}

fn require_module(module: &ModuleId) -> ExcludeResult<()> {
    require_non_empty(module.group(), "group")?;
    require_non_empty(module.name(), "module name")
}

impl PartialEq for ExcludeFilter {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
            || (self.inner.fingerprint == other.inner.fingerprint
                && self.inner.node == other.inner.node)
    }
}

impl Eq for ExcludeFilter {}

impl Hash for ExcludeFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.inner.fingerprint);
    }
}

impl PartialOrd for ExcludeFilter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExcludeFilter {
    fn cmp(&self, other: &Self) -> Ordering {
        if Self::ptr_eq(self, other) {
            return Ordering::Equal;
        }
        self.inner.node.cmp(&other.inner.node)
    }
}

impl fmt::Display for ExcludeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, children) = match self.node() {
            Node::AcceptAll => return f.write_str("{accept-all}"),
            Node::RejectAll => return f.write_str("{reject-all}"),
            Node::Group(group) => return write!(f, "{{group {group}}}"),
            Node::ModuleName(name) => return write!(f, "{{module-name {name}}}"),
            Node::Module(id) => return write!(f, "{{module {id}}}"),
            Node::Artifact { module, artifact } => {
                return write!(f, "{{artifact {module} {artifact}}}");
            }
            Node::Pattern(rule) => return write!(f, "{rule}"),
            Node::Union(children) => ("any-of", children),
            Node::Intersection(children) => ("all-of", children),
        };
        write!(f, "{{{label}")?;
        for child in children.iter() {
            write!(f, " {child}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for ExcludeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExcludeFilter")
            .field(&format_args!("{self}"))
            .finish()
    }
}
