//! Integration tests for union of exclude filters.
//!
//! A union is the combination used along a single dependency edge: a module
//! is excluded as soon as any of the rules declared on that edge excludes it.

use exclusion::{ArtifactName, ExcludeFilter, FilterKind, ModuleId, PatternMatcher, PatternRule};

fn group(value: &str) -> ExcludeFilter {
    ExcludeFilter::group(value).unwrap()
}

fn name(value: &str) -> ExcludeFilter {
    ExcludeFilter::module_name(value).unwrap()
}

fn module(group: &str, name: &str) -> ExcludeFilter {
    ExcludeFilter::module(ModuleId::new(group, name)).unwrap()
}

fn id(group: &str, name: &str) -> ModuleId {
    ModuleId::new(group, name)
}

// ============================================================================
// Acceptance
// ============================================================================

#[test]
fn union_rejects_when_any_child_rejects() {
    let filter = ExcludeFilter::union([group("org.slf4j"), name("commons-logging")]);

    assert!(!filter.accept_module(&id("org.slf4j", "slf4j-api")));
    assert!(!filter.accept_module(&id("commons-logging", "commons-logging")));
    assert!(filter.accept_module(&id("com.google.guava", "guava")));
}

#[test]
fn union_of_module_rules_rejects_each_module() {
    let filter = ExcludeFilter::union([
        module("junit", "junit"),
        module("org.hamcrest", "hamcrest-core"),
    ]);

    assert!(!filter.accept_module(&id("junit", "junit")));
    assert!(!filter.accept_module(&id("org.hamcrest", "hamcrest-core")));
    assert!(filter.accept_module(&id("org.hamcrest", "hamcrest-library")));
    assert!(filter.accept_module(&id("junit", "hamcrest-core")));
}

#[test]
fn union_rejects_artifacts_of_rejected_modules() {
    let filter = ExcludeFilter::union([group("com.acme"), name("utils")]);
    let jar = ArtifactName::new("utils", "jar");

    assert!(!filter.accept_artifact(&id("com.acme", "core"), &jar));
    assert!(!filter.accept_artifact(&id("org.other", "utils"), &jar));
    assert!(filter.accept_artifact(&id("org.other", "core"), &jar));
}

#[test]
fn artifact_only_union_keeps_every_module() {
    let owner = id("com.acme", "dist");
    let filter = ExcludeFilter::union([
        ExcludeFilter::artifact(owner.clone(), ArtifactName::new("dist", "zip")).unwrap(),
        ExcludeFilter::artifact(owner.clone(), ArtifactName::new("dist", "tar")).unwrap(),
    ]);

    assert!(filter.accepts_all_modules());
    assert!(filter.accept_module(&owner));
    assert!(!filter.accept_artifact(&owner, &ArtifactName::new("dist", "zip")));
    assert!(!filter.accept_artifact(&owner, &ArtifactName::new("dist", "tar")));
    assert!(filter.accept_artifact(&owner, &ArtifactName::new("dist", "jar")));
}

// ============================================================================
// Canonical Shape
// ============================================================================

#[test]
fn module_covered_by_group_is_dropped() {
    let filter = ExcludeFilter::union([group("com.acme"), module("com.acme", "utils")]);
    assert_eq!(filter, group("com.acme"));
}

#[test]
fn module_covered_by_name_is_dropped() {
    let filter = ExcludeFilter::union([name("utils"), module("com.acme", "utils")]);
    assert_eq!(filter, name("utils"));
}

#[test]
fn artifact_covered_by_module_is_dropped() {
    let owner = id("com.acme", "dist");
    let filter = ExcludeFilter::union([
        module("com.acme", "dist"),
        ExcludeFilter::artifact(owner, ArtifactName::new("dist", "zip")).unwrap(),
    ]);
    assert_eq!(filter, module("com.acme", "dist"));
}

#[test]
fn unrelated_leaves_are_all_kept() {
    let filter = ExcludeFilter::union([
        group("com.acme"),
        name("utils"),
        module("org.other", "core"),
    ]);

    assert_eq!(filter.kind(), FilterKind::Union);
    assert_eq!(filter.children().len(), 3);
}

#[test]
fn nested_unions_flatten_to_one_level() {
    let left = ExcludeFilter::union([group("a"), group("b")]);
    let right = ExcludeFilter::union([group("c"), group("d")]);
    let flat = ExcludeFilter::union([left, right]);

    assert_eq!(flat.children().len(), 4);
    assert_eq!(
        flat,
        ExcludeFilter::union([group("d"), group("c"), group("b"), group("a")])
    );
}

#[test]
fn union_with_wildcard_pattern_rejects_everything() {
    let everything = PatternRule::builder(PatternMatcher::Glob).build().unwrap();
    let filter = ExcludeFilter::union([group("com.acme"), ExcludeFilter::pattern(everything)]);

    assert_eq!(filter.kind(), FilterKind::RejectAll);
    assert!(!filter.accept_module(&id("any", "thing")));
}

#[test]
fn union_display_lists_sorted_children() {
    let filter = ExcludeFilter::union([name("utils"), group("com.acme")]);
    assert_eq!(
        filter.to_string(),
        "{any-of {group com.acme} {module-name utils}}"
    );
}
