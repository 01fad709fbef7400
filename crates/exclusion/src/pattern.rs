//! Pattern-matched exclude rules.
//!
//! A [`PatternRule`] matches each identifier field against a pattern instead of
//! an exact value. `*` always means "any value"; with [`PatternMatcher::Glob`]
//! the remaining fields use [`globset`] syntax.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use globset::{Glob, GlobMatcher};

use crate::error::{ExcludeError, ExcludeResult, require_non_empty};
use crate::ids::{ArtifactName, ModuleId};

const ANY: &str = "*";

/// How pattern text is compared with identifier fields.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternMatcher {
    /// Literal equality, except that `*` matches anything.
    Exact,
    /// Glob matching (`*`, `?`, `[...]`, `{a,b}`).
    Glob,
}

impl fmt::Display for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Glob => f.write_str("glob"),
        }
    }
}

/// One compiled field pattern. Identity is the pattern text alone.
#[derive(Clone, Debug)]
struct FieldPattern {
    text: String,
    glob: Option<GlobMatcher>,
}

impl FieldPattern {
    fn compile(text: String, matcher: PatternMatcher, field: &'static str) -> ExcludeResult<Self> {
        require_non_empty(&text, field)?;
        let glob = match matcher {
            PatternMatcher::Glob if text != ANY => Some(
                Glob::new(&text)
                    .map_err(|source| ExcludeError::InvalidGlob {
                        pattern: text.clone(),
                        source,
                    })?
                    .compile_matcher(),
            ),
            PatternMatcher::Glob | PatternMatcher::Exact => None,
        };
        Ok(Self { text, glob })
    }

    fn is_any(&self) -> bool {
        self.text == ANY
    }

    fn matches(&self, value: &str) -> bool {
        if self.is_any() {
            return true;
        }
        match &self.glob {
            Some(glob) => glob.is_match(value),
            None => self.text == value,
        }
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for FieldPattern {}

impl PartialOrd for FieldPattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldPattern {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl Hash for FieldPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

/// Exclude rule whose fields are patterns rather than exact values.
///
/// When every artifact-side field is `*` the rule is module-scoped and
/// excludes whole modules. Otherwise it only excludes matching artifacts and
/// never rejects a module outright.
///
/// # Examples
///
/// ```
/// use exclusion::{ArtifactName, ModuleId, PatternMatcher, PatternRule};
///
/// let rule = PatternRule::builder(PatternMatcher::Glob)
///     .group("org.slf4j*")
///     .build()
///     .unwrap();
///
/// assert!(!rule.is_artifact_scoped());
/// assert!(!rule.accept_module(&ModuleId::new("org.slf4j.impl", "simple")));
/// assert!(rule.accept_module(&ModuleId::new("com.acme", "utils")));
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PatternRule {
    matcher: PatternMatcher,
    group: FieldPattern,
    module: FieldPattern,
    artifact: FieldPattern,
    extension: FieldPattern,
    classifier: FieldPattern,
}

impl PatternRule {
    /// Starts a rule where every field matches anything.
    #[must_use]
    pub fn builder(matcher: PatternMatcher) -> PatternRuleBuilder {
        PatternRuleBuilder::new(matcher)
    }

    /// Returns the matcher kind.
    #[must_use]
    pub const fn matcher(&self) -> PatternMatcher {
        self.matcher
    }

    /// Returns whether the rule targets artifacts rather than whole modules.
    #[must_use]
    pub fn is_artifact_scoped(&self) -> bool {
        !(self.artifact.is_any() && self.extension.is_any() && self.classifier.is_any())
    }

    /// Returns whether the rule matches every module (module-scoped `*:*`).
    #[must_use]
    pub fn matches_everything(&self) -> bool {
        !self.is_artifact_scoped() && self.group.is_any() && self.module.is_any()
    }

    fn matches_module(&self, module: &ModuleId) -> bool {
        self.group.matches(module.group()) && self.module.matches(module.name())
    }

    /// Returns `true` if the module is not excluded by this rule.
    #[must_use]
    pub fn accept_module(&self, module: &ModuleId) -> bool {
        self.is_artifact_scoped() || !self.matches_module(module)
    }

    /// Returns `true` if the artifact is not excluded by this rule.
    #[must_use]
    pub fn accept_artifact(&self, module: &ModuleId, artifact: &ArtifactName) -> bool {
        if !self.is_artifact_scoped() {
            return self.accept_module(module);
        }
        !(self.matches_module(module)
            && self.artifact.matches(artifact.name())
            && self.extension.matches(artifact.extension())
            && self.classifier.matches(artifact.classifier().unwrap_or_default()))
    }
}

impl fmt::Display for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{} {}:{}",
            self.matcher, self.group.text, self.module.text
        )?;
        if self.is_artifact_scoped() {
            write!(
                f,
                " {}-{}.{}",
                self.artifact.text, self.classifier.text, self.extension.text
            )?;
        }
        f.write_str("}")
    }
}

/// Builder for [`PatternRule`]. Unset fields default to `*`.
#[derive(Clone, Debug)]
pub struct PatternRuleBuilder {
    matcher: PatternMatcher,
    group: String,
    module: String,
    artifact: String,
    extension: String,
    classifier: String,
}

impl PatternRuleBuilder {
    fn new(matcher: PatternMatcher) -> Self {
        Self {
            matcher,
            group: ANY.to_owned(),
            module: ANY.to_owned(),
            artifact: ANY.to_owned(),
            extension: ANY.to_owned(),
            classifier: ANY.to_owned(),
        }
    }

    /// Sets the group pattern.
    #[must_use]
    pub fn group(mut self, pattern: impl Into<String>) -> Self {
        self.group = pattern.into();
        self
    }

    /// Sets the module name pattern.
    #[must_use]
    pub fn module(mut self, pattern: impl Into<String>) -> Self {
        self.module = pattern.into();
        self
    }

    /// Sets the artifact name pattern.
    #[must_use]
    pub fn artifact(mut self, pattern: impl Into<String>) -> Self {
        self.artifact = pattern.into();
        self
    }

    /// Sets the artifact extension pattern.
    #[must_use]
    pub fn extension(mut self, pattern: impl Into<String>) -> Self {
        self.extension = pattern.into();
        self
    }

    /// Sets the artifact classifier pattern.
    #[must_use]
    pub fn classifier(mut self, pattern: impl Into<String>) -> Self {
        self.classifier = pattern.into();
        self
    }

    /// Compiles the field patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ExcludeError::EmptyPattern`] for an empty field and
    /// [`ExcludeError::InvalidGlob`] when a glob fails to compile.
    pub fn build(self) -> ExcludeResult<PatternRule> {
        let matcher = self.matcher;
        Ok(PatternRule {
            matcher,
            group: FieldPattern::compile(self.group, matcher, "group pattern")?,
            module: FieldPattern::compile(self.module, matcher, "module pattern")?,
            artifact: FieldPattern::compile(self.artifact, matcher, "artifact pattern")?,
            extension: FieldPattern::compile(self.extension, matcher, "extension pattern")?,
            classifier: FieldPattern::compile(self.classifier, matcher, "classifier pattern")?,
        })
    }
}
