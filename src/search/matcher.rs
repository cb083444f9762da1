//! Content matching in literal and regex mode.
//!
//! A [`ContentMatcher`] is compiled once per search and reused for every file,
//! so an invalid pattern is reported before any file is touched. Literal search
//! uses a `memchr` substring finder; regex search uses ripgrep's `grep-regex`
//! matcher over the whole content (no implicit multi-line mode).

use crate::error::{Result, SearchError};
use crate::search::options::MatchMode;
use grep_matcher::Matcher;
use grep_regex::RegexMatcher;
use memchr::memmem;
use std::ops::Range;

/// Compiled keyword ready to test file content.
///
/// Regex keywords follow Rust `regex` syntax. `$` matches only at the very end of
/// the content, so `b$` does not match `"ab\n"`; write `b\n?$` or `(?m)b$` for that.
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    keyword: String,
    kind: MatcherKind,
}

#[derive(Debug, Clone)]
enum MatcherKind {
    Literal(memmem::Finder<'static>),
    Regex(RegexMatcher),
}

impl ContentMatcher {
    /// Compile `keyword` for the given mode.
    ///
    /// # Errors
    /// * `InvalidPattern` if `mode` is `Regex` and the keyword does not compile
    pub fn new(keyword: &str, mode: MatchMode) -> Result<Self> {
        let kind = match mode {
            MatchMode::Literal => MatcherKind::Literal(memmem::Finder::new(keyword).into_owned()),
            MatchMode::Regex => {
                let regex = RegexMatcher::new(keyword)
                    .map_err(|e| SearchError::invalid_pattern(keyword, e.to_string()))?;
                MatcherKind::Regex(regex)
            }
        };

        Ok(Self {
            keyword: keyword.to_string(),
            kind,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn mode(&self) -> MatchMode {
        match self.kind {
            MatcherKind::Literal(_) => MatchMode::Literal,
            MatcherKind::Regex(_) => MatchMode::Regex,
        }
    }

    /// True if the keyword occurs anywhere in `content`
    pub fn is_match(&self, content: &str) -> bool {
        match &self.kind {
            MatcherKind::Literal(finder) => finder.find(content.as_bytes()).is_some(),
            MatcherKind::Regex(regex) => matches!(regex.is_match(content.as_bytes()), Ok(true)),
        }
    }

    /// Byte ranges of all non-overlapping, non-empty matches, left to right.
    pub fn find_ranges(&self, content: &str) -> Vec<Range<usize>> {
        if self.keyword.is_empty() {
            return Vec::new();
        }

        let haystack = content.as_bytes();
        match &self.kind {
            MatcherKind::Literal(finder) => finder
                .find_iter(haystack)
                .map(|start| start..start + self.keyword.len())
                .collect(),
            MatcherKind::Regex(regex) => {
                let mut ranges = Vec::new();
                let _ = regex.find_iter(haystack, |m| {
                    if !m.is_empty() {
                        ranges.push(m.start()..m.end());
                    }
                    true
                });
                ranges
            }
        }
    }
}

/// One-shot match test: compile `keyword` and test `content`.
///
/// # Errors
/// * `InvalidPattern` for a regex keyword that does not compile
pub fn matches(content: &str, keyword: &str, mode: MatchMode) -> Result<bool> {
    Ok(ContentMatcher::new(keyword, mode)?.is_match(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn dollar_anchors_at_end_of_content_only() {
        assert!(matches("ab", "b$", MatchMode::Regex).unwrap());
        assert!(!matches("ab\n", "b$", MatchMode::Regex).unwrap());
        assert!(matches("ab\n", r"b\n?$", MatchMode::Regex).unwrap());
        assert!(matches("ab\n", "(?m)b$", MatchMode::Regex).unwrap());
    }

    #[test]
    fn literal_is_case_sensitive_substring() {
        assert!(matches("hello world", "lo wo", MatchMode::Literal).unwrap());
        assert!(!matches("hello world", "Hello", MatchMode::Literal).unwrap());
        assert!(!matches("", "x", MatchMode::Literal).unwrap());
    }

    #[test]
    fn literal_does_not_interpret_pattern_syntax() {
        assert!(matches("cost: $5 (approx.)", "$5 (", MatchMode::Literal).unwrap());
        assert!(!matches("aaa", "a+", MatchMode::Literal).unwrap());
    }

    #[test]
    fn regex_matches_anywhere() {
        assert!(matches("goodbye", "^g.*", MatchMode::Regex).unwrap());
        assert!(matches("error 404 here", r"\d{3}", MatchMode::Regex).unwrap());
        assert!(!matches("hello world", "^g.*", MatchMode::Regex).unwrap());
    }

    #[test]
    fn regex_caret_anchors_to_content_start() {
        assert!(!matches("first\ngoodbye", "^g", MatchMode::Regex).unwrap());
        assert!(matches("first\ngoodbye", "(?m)^g", MatchMode::Regex).unwrap());
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = ContentMatcher::new("(", MatchMode::Regex).unwrap_err();
        assert!(err.is_invalid_pattern());
        match err {
            SearchError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "("),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_regex_is_fine_as_literal() {
        assert!(matches("f(x)", "(", MatchMode::Literal).unwrap());
    }

    #[test]
    fn literal_ranges_are_non_overlapping() {
        let matcher = ContentMatcher::new("aa", MatchMode::Literal).unwrap();
        assert_eq!(matcher.find_ranges("aaaaa"), vec![0..2, 2..4]);
    }

    #[test]
    fn regex_ranges_skip_empty_matches() {
        let matcher = ContentMatcher::new("b*", MatchMode::Regex).unwrap();
        assert_eq!(matcher.find_ranges("abba"), vec![1..3]);
    }

    #[test]
    fn regex_ranges_follow_greediness() {
        let greedy = ContentMatcher::new("a.*c", MatchMode::Regex).unwrap();
        assert_eq!(greedy.find_ranges("abcabc"), vec![0..6]);

        let lazy = ContentMatcher::new("a.*?c", MatchMode::Regex).unwrap();
        assert_eq!(lazy.find_ranges("abcabc"), vec![0..3, 3..6]);
    }

    #[test]
    fn ranges_land_on_char_boundaries() {
        let matcher = ContentMatcher::new("界", MatchMode::Literal).unwrap();
        let content = "世界, 世界";
        for range in matcher.find_ranges(content) {
            assert_eq!(&content[range], "界");
        }
    }

    #[test]
    fn empty_keyword_yields_no_ranges() {
        let matcher = ContentMatcher::new("", MatchMode::Literal).unwrap();
        assert!(matcher.find_ranges("abc").is_empty());
        assert_eq!(matcher.mode(), MatchMode::Literal);
    }

    proptest! {
        #[test]
        fn literal_match_is_substring_containment(content in ".{0,64}", keyword in ".{0,6}") {
            let expected = content.contains(keyword.as_str());
            prop_assert_eq!(matches(&content, &keyword, MatchMode::Literal).unwrap(), expected);
        }

        #[test]
        fn literal_ranges_cover_keyword(content in "[ab ]{0,40}", keyword in "[ab]{1,3}") {
            let matcher = ContentMatcher::new(&keyword, MatchMode::Literal).unwrap();
            let mut last_end = 0;
            for range in matcher.find_ranges(&content) {
                prop_assert!(range.start >= last_end);
                prop_assert_eq!(&content[range.clone()], keyword.as_str());
                last_end = range.end;
            }
        }
    }
}
