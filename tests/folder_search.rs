use std::fs;
use std::path::Path;

use ctxsearch::catalog::{extension_of, ExtensionSet};
use ctxsearch::{highlight, matches, search, MatchMode, SearchConfig, SearchError};
use proptest::prelude::*;

fn exts(list: &[&str]) -> ExtensionSet {
    list.iter().collect()
}

fn greeting_folder() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("a.txt"), "hello world").expect("write a.txt");
    fs::write(dir.path().join("b.md"), "goodbye").expect("write b.md");
    dir
}

fn run(
    root: &Path,
    keyword: &str,
    mode: MatchMode,
    allowed: &[&str],
) -> ctxsearch::Result<Vec<String>> {
    let result = search(&SearchConfig::new(root, keyword, mode, exts(allowed)))?;
    Ok(result
        .iter()
        .map(|path| {
            path.strip_prefix(root)
                .expect("result under root")
                .to_string_lossy()
                .into_owned()
        })
        .collect())
}

#[test]
fn literal_search_respects_extension_filter() {
    let dir = greeting_folder();
    let found = run(dir.path(), "hello", MatchMode::Literal, &["txt"]).unwrap();
    assert_eq!(found, vec!["a.txt"]);
}

#[test]
fn regex_search_over_two_extensions() {
    let dir = greeting_folder();
    let found = run(dir.path(), "^g.*", MatchMode::Regex, &["txt", "md"]).unwrap();
    assert_eq!(found, vec!["b.md"]);
}

#[test]
fn invalid_regex_fails_before_searching() {
    let dir = greeting_folder();
    let err = run(dir.path(), "(", MatchMode::Regex, &["txt", "md"]).unwrap_err();
    assert!(matches!(err, SearchError::InvalidPattern { .. }));
}

#[test]
fn empty_folder_yields_no_results() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let found = run(dir.path(), "hello", MatchMode::Literal, &["txt"]).unwrap();
    assert!(found.is_empty());
}

#[test]
fn literal_keyword_is_not_a_pattern() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("price.txt"), "costs $5.00 (net)").unwrap();
    fs::write(dir.path().join("other.txt"), "costs 5500 net").unwrap();

    let found = run(dir.path(), "$5.00 (net)", MatchMode::Literal, &["txt"]).unwrap();
    assert_eq!(found, vec!["price.txt"]);
}

#[test]
fn nested_folders_are_searched_in_sorted_order() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::create_dir_all(dir.path().join("b/deep")).unwrap();
    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::write(dir.path().join("b/deep/x.txt"), "needle").unwrap();
    fs::write(dir.path().join("a/y.TXT"), "needle").unwrap();
    fs::write(dir.path().join("z.txt"), "needle").unwrap();
    fs::write(dir.path().join("z.csv"), "needle").unwrap();

    let found = run(dir.path(), "needle", MatchMode::Literal, &["txt"]).unwrap();
    let expected: Vec<String> = ["a/y.TXT", "b/deep/x.txt", "z.txt"]
        .iter()
        .map(|p| Path::new(p).to_string_lossy().into_owned())
        .collect();
    assert_eq!(found, expected);
}

#[cfg(unix)]
#[test]
fn padded_extensions_are_filtered_out() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("notes.txt "), "needle").unwrap();
    fs::write(dir.path().join("report. TXT"), "needle").unwrap();
    fs::write(dir.path().join("plain.txt"), "needle").unwrap();

    let found = run(dir.path(), "needle", MatchMode::Literal, &["txt"]).unwrap();
    assert_eq!(found, vec!["plain.txt"]);
}

#[test]
fn invalid_utf8_content_still_matches() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("bin.txt"), b"\xff\xfe needle \xc3").unwrap();

    let found = run(dir.path(), "needle", MatchMode::Literal, &["txt"]).unwrap();
    assert_eq!(found, vec!["bin.txt"]);
}

#[test]
fn missing_root_is_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = run(&dir.path().join("nope"), "x", MatchMode::Literal, &["txt"]).unwrap_err();
    assert!(matches!(err, SearchError::PathNotFound { .. }));
}

#[test]
fn highlight_escapes_then_marks() {
    let html = highlight("<a> & hello", "hello", MatchMode::Literal).unwrap();
    assert_eq!(
        html,
        r#"&lt;a&gt; &amp; <span style="color: #8B0000;">hello</span>"#
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn results_only_have_allowed_extensions(
        names in prop::collection::btree_set("[a-c]{1,3}\\.( ?)(txt|md|csv|json|TXT)( ?)", 0..12),
        allowed in prop::sample::subsequence(vec!["txt", "md", "csv", "json"], 1..4),
    ) {
        let dir = tempfile::tempdir().unwrap();
        for name in &names {
            fs::write(dir.path().join(name), "shared needle").unwrap();
        }

        let allowed_set = exts(&allowed);
        let result = search(&SearchConfig::new(
            dir.path(),
            "needle",
            MatchMode::Literal,
            allowed_set.clone(),
        ))
        .unwrap();

        for path in result.iter() {
            let name = path.file_name().unwrap().to_string_lossy();
            let ext = extension_of(&name).unwrap().to_lowercase();
            prop_assert!(allowed_set.iter().any(|allowed| allowed == ext));
        }
    }

    #[test]
    fn literal_match_is_substring_containment(
        content in "[ab\\n.*]{0,40}",
        keyword in "[ab.*]{1,4}",
    ) {
        prop_assert_eq!(
            matches(&content, &keyword, MatchMode::Literal).unwrap(),
            content.contains(&keyword)
        );
    }
}
