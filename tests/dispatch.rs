//! Dispatch behavior over real directory trees, for both dispatcher variants.

use std::collections::BTreeMap;
use std::path::PathBuf;

use fs_dispatch::dispatch::{
    BuildError, CollisionPolicy, Dispatch, DispatchResult, DispatchStatus, DispatcherOptions,
    TreeDispatcher,
};

mod common;
use common::{dispatchers, options, resolve, www};

fn wildcards(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Dispatch `raw` on every variant and hand each result to `check`.
fn each(entries: &[&str], raw: &str, check: impl Fn(&str, &tempfile::TempDir, DispatchResult)) {
    let dir = www(entries);
    for (variant, dispatcher) in dispatchers(options(&dir)) {
        check(variant, &dir, dispatcher.dispatch_raw(raw));
    }
}

fn assert_fs(entries: &[&str], raw: &str, expected: &str) {
    each(entries, raw, |variant, dir, result| {
        assert_eq!(result.status, DispatchStatus::Okay, "{variant}: {raw} -> {result:?}");
        assert_eq!(result.matched, Some(resolve(dir, expected)), "{variant}: {raw}");
    });
}

fn assert_missing(entries: &[&str], raw: &str) {
    each(entries, raw, |variant, _, result| {
        assert_eq!(result.status, DispatchStatus::Missing, "{variant}: {raw} -> {result:?}");
        assert_eq!(result.matched, None, "{variant}: {raw}");
    });
}

fn assert_canonical(entries: &[&str], raw: &str, expected: Option<&str>) {
    each(entries, raw, |variant, _, result| {
        assert_eq!(result.canonical.as_deref(), expected, "{variant}: {raw} -> {result:?}");
    });
}

fn assert_wildcards(entries: &[&str], raw: &str, expected: &[(&str, &str)]) {
    each(entries, raw, |variant, _, result| {
        assert_eq!(result.wildcards, wildcards(expected), "{variant}: {raw} -> {result:?}");
    });
}

// Basics

#[test]
fn test_dispatcher_returns_a_result() {
    let dir = www(&["index.html"]);
    let options = DispatcherOptions::new(dir.path()).indices(["index.html"]);
    for (variant, dispatcher) in common::dispatchers(options) {
        let result = dispatcher.dispatch("/", &[String::new()]);
        assert_eq!(result.status, DispatchStatus::Okay, "{variant}");
        assert_eq!(result.matched, Some(resolve(&dir, "index.html")), "{variant}");
        assert!(result.wildcards.is_empty());
        assert_eq!(result.canonical, None);
    }
}

#[test]
fn test_unindexed_directory() {
    let dir = www(&[]);
    let options = DispatcherOptions::new(dir.path());
    for (variant, dispatcher) in common::dispatchers(options) {
        let result = dispatcher.dispatch("/", &[String::new()]);
        assert_eq!(result.status, DispatchStatus::Unindexed, "{variant}");
        let mut expected = dir.path().canonicalize().unwrap().into_os_string();
        expected.push(std::path::MAIN_SEPARATOR_STR);
        assert_eq!(result.matched, Some(PathBuf::from(expected)), "{variant}");
    }
}

#[test]
fn test_empty_segment_list_is_root() {
    let dir = www(&["index.html"]);
    for (variant, dispatcher) in dispatchers(options(&dir)) {
        let result = dispatcher.dispatch("/", &[]);
        assert_eq!(result.matched, Some(resolve(&dir, "index.html")), "{variant}");
    }
}

#[test]
fn test_static_leaf() {
    assert_fs(&["f"], "/f", "f");
}

#[test]
fn test_repeated_dispatch_is_deterministic() {
    let dir = www(&["%name/index.html.spt", "%name/%cheese.txt.spt", "foo.spt"]);
    let tree = TreeDispatcher::build(&options(&dir)).unwrap();
    let rebuilt = TreeDispatcher::build(&options(&dir)).unwrap();
    for raw in ["/chad/cheddar.txt", "/foo.json", "/x/", "/nope/nope/nope"] {
        let first = tree.dispatch_raw(raw);
        assert_eq!(first, tree.dispatch_raw(raw), "{raw}");
        assert_eq!(first, rebuilt.dispatch_raw(raw), "{raw}");
    }
}

// Indices

#[test]
fn test_index_is_found() {
    assert_fs(&["index.html"], "/", "index.html");
}

#[test]
fn test_negotiated_index_is_found() {
    assert_fs(&["index"], "/", "index");
}

#[test]
fn test_dynamic_index_is_found() {
    assert_fs(&["index.html.spt"], "/", "index.html.spt");
}

#[test]
fn test_indices_take_the_first_present() {
    let dir = www(&["index.html", "default.html"]);
    let options = DispatcherOptions::new(dir.path()).indices(["index.html", "default.html"]);
    for (variant, dispatcher) in dispatchers(options) {
        assert_eq!(
            dispatcher.dispatch_raw("/").matched,
            Some(resolve(&dir, "index.html")),
            "{variant}"
        );
        // Only the chosen index redirects.
        let second = dispatcher.dispatch_raw("/default.html");
        assert_eq!(second.matched, Some(resolve(&dir, "default.html")), "{variant}");
        assert_eq!(second.canonical, None, "{variant}");
    }
}

#[test]
fn test_indices_fall_through_to_the_second() {
    let dir = www(&["default.html"]);
    let options = DispatcherOptions::new(dir.path()).indices(["index.html", "default.html"]);
    for (variant, dispatcher) in dispatchers(options) {
        assert_eq!(
            dispatcher.dispatch_raw("/").matched,
            Some(resolve(&dir, "default.html")),
            "{variant}"
        );
        assert_eq!(
            dispatcher.dispatch_raw("/default.html").canonical.as_deref(),
            Some("/"),
            "{variant}"
        );
    }
}

#[test]
fn test_unlisted_index_is_not_found() {
    let dir = www(&["index.html"]);
    let options = DispatcherOptions::new(dir.path()).indices(["default.html"]);
    for (variant, dispatcher) in dispatchers(options) {
        assert_eq!(dispatcher.dispatch_raw("/").status, DispatchStatus::Unindexed, "{variant}");
    }
}

#[test]
fn test_index_redirects_to_slash() {
    assert_canonical(&["index.html"], "/", None);
    assert_canonical(&["index.html"], "/index.html", Some("/"));
    assert_canonical(&["foo/index.html"], "/foo/index.html", Some("/foo/"));
}

// Negotiation

#[test]
fn test_negotiation_passes_through_static() {
    assert_fs(&["foo.html"], "/foo.html", "foo.html");
}

#[test]
fn test_negotiation_passes_through_rendered() {
    assert_fs(&["foo.html.spt"], "/foo.html", "foo.html.spt");
}

#[test]
fn test_negotiation_modifies_one_dot() {
    assert_fs(&["foo.spt"], "/foo.html", "foo.spt");
    assert_fs(&["foo.bar.spt"], "/foo.bar.html", "foo.bar.spt");
}

#[test]
fn test_negotiation_prefers_rendered() {
    assert_fs(&["foo.html", "foo"], "/foo.html", "foo.html");
    assert_fs(&["foo.html", "foo.spt"], "/foo.html", "foo.html");
}

#[test]
fn test_negotiation_does_not_do_dirs() {
    assert_missing(&[], "/foo.html");
    assert_missing(&["foo/"], "/foo.html");
}

#[test]
fn test_negotiated_extension() {
    each(&["foo.spt"], "/foo.css", |variant, _, result| {
        assert_eq!(result.extension.as_deref(), Some("css"), "{variant}");
    });
    each(&["foo.spt"], "/foo.unknown-extension", |variant, _, result| {
        assert_eq!(result.extension.as_deref(), Some("unknown-extension"), "{variant}");
    });
    each(&["foo.spt"], "/foo", |variant, _, result| {
        assert!(result.is_okay(), "{variant}");
        assert_eq!(result.extension, None, "{variant}");
    });
}

#[test]
fn test_dynamic_source_is_never_served() {
    assert_missing(&["foo.html.spt"], "/foo.html.spt");
    assert_missing(&["name.spt"], "/name.spt");
}

#[test]
fn test_dont_confuse_files_for_dirs() {
    assert_missing(&["foo.html"], "/foo.html/bar");
}

// Wildcards

#[test]
fn test_unfound_wildcard_path() {
    assert_missing(&["%bar/foo.html"], "/blah/flah.html");
}

#[test]
fn test_wildcard_directory() {
    assert_fs(&["%bar/foo.html"], "/blah/foo.html", "%bar/foo.html");
    assert_wildcards(&["%bar/foo.html"], "/blah/foo.html", &[("bar", "blah")]);
}

#[test]
fn test_wildcard_directory_with_negotiation() {
    assert_fs(&["%foo/bar.spt"], "/greet/bar.html", "%foo/bar.spt");
    assert_fs(&["%foo/bar"], "/greet/bar", "%foo/bar");
    assert_wildcards(&["%bar/foo.spt"], "/blah/foo.html", &[("bar", "blah")]);
}

#[test]
fn test_wildcard_captures_are_decoded() {
    assert_wildcards(&["%bar/foo.html"], "/%E2%98%83/foo.html", &[("bar", "\u{2603}")]);
    assert_wildcards(&["foo/%bar.spt"], "/foo/%25blah", &[("bar", "%blah")]);
}

#[test]
fn test_typecast_is_not_applied() {
    assert_wildcards(&["%year.int/foo.html"], "/1999/foo.html", &[("year", "1999")]);
    assert_wildcards(&["foo/%bar.int.html.spt"], "/foo/537.html", &[("bar", "537")]);
}

#[test]
fn test_raw_wildcard_name_is_not_a_path() {
    assert_missing(&[], "/%name/foo.html");
    assert_missing(&["%name/foo.html"], "/%25name/bar.html");
}

#[test]
fn test_wildcard_matches_the_first() {
    assert_fs(
        &["%first/foo.html", "%second/foo.html"],
        "/1999/foo.html",
        "%first/foo.html",
    );
}

#[test]
fn test_wildcard_directory_index() {
    assert_fs(&["%first/index.html"], "/foo/", "%first/index.html");
}

#[test]
fn test_wildcard_leaf() {
    assert_fs(&["foo/%bar.html.spt"], "/foo/blah.html", "foo/%bar.html.spt");
    assert_wildcards(&["foo/%bar.html.spt"], "/foo/blah.html", &[("bar", "blah")]);
    assert_wildcards(&["foo/%bar.html.spt"], "/foo/537.html", &[("bar", "537")]);
}

#[test]
fn test_wildcard_leaf_captures_the_tail() {
    assert_fs(&["foo/%bar.html.spt"], "/foo/blah/baz.html", "foo/%bar.html.spt");
    assert_wildcards(&["foo/%bar.html.spt"], "/foo/blah/baz.html", &[("bar", "blah/baz")]);
    assert_wildcards(
        &["foo/%bar.spt"],
        "/foo/baz/buz;a=1;b=;a=2;b=3/blam.html",
        &[("bar", "baz/buz/blam.html")],
    );
}

#[test]
fn test_wildcard_leaf_wants_its_extension() {
    assert_missing(&["foo/%bar.html.spt"], "/foo/blah.html/");
    assert_missing(&["%name/%cheese.txt.spt"], "/chad/cheddar.txt/");
}

#[test]
fn test_wildcard_leaf_over_wildcard_directory() {
    assert_fs(&["%foo/bar.html", "%baz.html.spt"], "/bal.html", "%baz.html.spt");
    assert_fs(&["%foo/bar.html", "%baz.spt"], "/bal.html", "%baz.spt");
    assert_wildcards(
        &["%page/index.html.spt", "%value.txt.spt"],
        "/baz.txt",
        &[("value", "baz")],
    );
}

#[test]
fn test_wildcard_leaf_selected_by_extension() {
    let entries = ["%value.json.spt", "%value.txt.spt"];
    assert_fs(&entries, "/baz.json", "%value.json.spt");
    assert_fs(&entries, "/baz.txt", "%value.txt.spt");
}

#[test]
fn test_wildcard_leaf_without_extension() {
    assert_fs(&["%value.spt"], "/baz.txt", "%value.spt");
    assert_fs(&["%value.spt", "value"], "/baz.txt", "%value.spt");
    assert_fs(&["%value.spt", "value"], "/baz", "%value.spt");
    assert_wildcards(&["%value.spt", "value"], "/baz", &[("value", "baz")]);
}

#[test]
fn test_static_files_are_not_wild() {
    assert_missing(&["foo/%bar.html"], "/foo/blah.html");
    assert_fs(&["foo/%bar.html"], "/foo/%25bar.html", "foo/%bar.html");
}

#[test]
fn test_nested_wildcards() {
    let entries = ["%name/index.html.spt", "%name/%cheese.txt.spt"];
    assert_fs(&entries, "/chad/cheddar.txt", "%name/%cheese.txt.spt");
    assert_wildcards(
        &entries,
        "/chad/cheddar.txt",
        &[("name", "chad"), ("cheese", "cheddar")],
    );
    assert_wildcards(&entries, "/python/", &[("name", "python")]);
}

#[test]
fn test_first_wildcard_directory_wins() {
    let entries = [
        "%name/index.html.spt",
        "%name/%cheese.txt.spt",
        "%year.int/index.html.spt",
    ];
    assert_fs(&entries, "/1999/", "%name/index.html.spt");
    assert_wildcards(&entries, "/1999/", &[("name", "1999")]);
}

#[test]
fn test_wildcard_segments_can_be_empty() {
    assert_wildcards(&["foo/%bar/index.html.spt"], "/foo//", &[("bar", "")]);
}

// Trailing slashes

#[test]
fn test_trailing_slash_passes_dirs_through() {
    assert_missing(&["foo/index.html"], "/foo/537.html");
    assert_fs(&["foo/index.html"], "/foo/", "foo/index.html");
    assert_fs(&["%foo/index.html"], "/foo/", "%foo/index.html");
}

#[test]
fn test_directory_without_trailing_slash() {
    each(&["foo/"], "/foo", |variant, dir, result| {
        assert_eq!(result.status, DispatchStatus::Unindexed, "{variant}");
        let mut expected = resolve(dir, "foo").into_os_string();
        expected.push(std::path::MAIN_SEPARATOR_STR);
        assert_eq!(result.matched, Some(PathBuf::from(expected)), "{variant}");
        assert_eq!(result.canonical.as_deref(), Some("/foo/"), "{variant}");
    });
    assert_canonical(&["foo/index.html"], "/foo", Some("/foo/"));
}

#[test]
fn test_wildcard_directory_without_trailing_slash() {
    assert_canonical(&["%foo/"], "/foo", Some("/foo/"));
    assert_canonical(&["%foo/%bar/%baz/"], "/foo/bar/baz", Some("/foo/bar/baz/"));
    assert_fs(
        &["%foo/%bar/%baz/index.html"],
        "/foo/bar/baz/",
        "%foo/%bar/%baz/index.html",
    );
}

#[test]
fn test_trailing_slash_matches_wildcard_leaf() {
    assert_fs(&["foo/%bar.html.spt"], "/foo/", "foo/%bar.html.spt");
    assert_canonical(&["foo/%bar.html.spt"], "/foo", Some("/foo/"));
}

// Path parameters

#[test]
fn test_path_params_are_ignored() {
    assert_fs(&["foo/index.html"], "/foo;a=1/", "foo/index.html");
    assert_fs(&["%bar/index.html"], "/foo;a=1;b=;a=2;b=3/", "%bar/index.html");
    assert_fs(&["foo/bar.html"], "/foo/bar.html;a=1;b=;a=2;b=3", "foo/bar.html");
    assert_fs(&["foo/bar.html.spt"], "/foo/bar.html;a=1", "foo/bar.html.spt");
    assert_fs(&["foo/bar.spt"], "/foo/bar.txt;a=1;b=;a=2;b=3", "foo/bar.spt");
}

#[test]
fn test_undecodable_path_is_missing() {
    assert_missing(&["foo.html"], "/%FF.html");
}

// Hidden entries and escapes

#[test]
fn test_hidden_files_are_not_served() {
    assert_missing(&[".secret_data"], "/.secret_data");
    assert_missing(&[".git/config"], "/.git/config");
}

#[test]
fn test_well_known_is_served() {
    assert_fs(
        &[".well-known/security.txt"],
        "/.well-known/security.txt",
        ".well-known/security.txt",
    );
}

#[test]
fn test_dot_segments_do_not_escape() {
    assert_missing(&["foo/bar.html"], "/../foo/bar.html");
    assert_missing(&["foo/bar.html"], "/foo/../../etc/passwd");
}

#[cfg(unix)]
#[test]
fn test_symlink_out_of_root_is_missing() {
    let outside = common::www(&["secret.html"]);
    let dir = www(&["index.html"]);
    std::os::unix::fs::symlink(outside.path(), dir.path().join("leak")).unwrap();
    std::os::unix::fs::symlink(
        outside.path().join("secret.html"),
        dir.path().join("secret.html"),
    )
    .unwrap();
    for (variant, dispatcher) in dispatchers(options(&dir)) {
        assert!(dispatcher.dispatch_raw("/leak/secret.html").is_missing(), "{variant}");
        assert!(dispatcher.dispatch_raw("/secret.html").is_missing(), "{variant}");
    }
}

// Build errors

#[test]
fn test_wildcard_collision_is_a_build_error() {
    let dir = www(&["%foo/%foo.spt"]);
    assert!(matches!(
        TreeDispatcher::build(&options(&dir)),
        Err(BuildError::WildcardCollision { name, .. }) if name == "foo"
    ));
}

#[test]
fn test_collision_policies() {
    let dir = www(&["foo.html", "foo.html.spt"]);

    let strict = options(&dir).collisions(CollisionPolicy::Strict);
    assert!(matches!(
        TreeDispatcher::build(&strict),
        Err(BuildError::SlugCollision { slug, .. }) if slug == "foo.html"
    ));

    for policy in [CollisionPolicy::Hybrid, CollisionPolicy::Permissive] {
        let tree = TreeDispatcher::build(&options(&dir).collisions(policy)).unwrap();
        assert_eq!(
            tree.dispatch_raw("/foo.html").matched,
            Some(resolve(&dir, "foo.html")),
            "{policy:?}"
        );
    }
}

#[test]
fn test_missing_root_is_a_build_error() {
    let dir = www(&[]);
    let options = DispatcherOptions::new(dir.path().join("nope"));
    assert!(matches!(
        TreeDispatcher::build(&options),
        Err(BuildError::Root { .. })
    ));
    assert!(fs_dispatch::dispatch::LiveDispatcher::new(options).is_err());
}
