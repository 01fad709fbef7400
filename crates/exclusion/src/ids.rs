//! crates/exclusion/src/ids.rs
//!
//! Identifier values consumed by exclude filters.
//!
//! The resolution engine owns identifier creation; filters only compare the
//! fields for equality (or against patterns for [`PatternRule`](crate::PatternRule)).

use std::fmt;

/// Coordinates of a module: its group and name.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ModuleId {
    group: String,
    name: String,
}

impl ModuleId {
    /// Creates a module identifier from `group` and `name`.
    #[must_use]
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Returns the module group.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

/// Name of an artifact published by a module.
///
/// Two artifact names are equal when name, extension and classifier all match.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ArtifactName {
    name: String,
    extension: String,
    classifier: Option<String>,
}

impl ArtifactName {
    /// Creates an artifact name without a classifier.
    #[must_use]
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            classifier: None,
        }
    }

    /// Sets the artifact classifier (for example `sources` or `javadoc`).
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Returns the artifact name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the artifact extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the classifier, if any.
    #[must_use]
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(classifier) = &self.classifier {
            write!(f, "-{classifier}")?;
        }
        write!(f, ".{}", self.extension)
    }
}
