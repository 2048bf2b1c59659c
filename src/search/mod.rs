//! Pattern search and cyclic match navigation.
//!
//! A scan collects every non-overlapping occurrence of a pattern in a
//! snapshot of the document text; navigation then walks the collected
//! matches forward or backward, wrapping at both ends. Scans run on a
//! worker thread (see [`spawn_scan`]) so typing stays responsive while a
//! large document is being searched.

use std::ops::Range;
use std::sync::mpsc::Sender;
use std::thread;

use thiserror::Error;

/// What to search for: the pattern text and how to interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSpec {
    /// Pattern text. May be empty, which matches nothing.
    pub pattern: String,
    /// When true the pattern is compiled as a regular expression;
    /// otherwise it is an exact, case-sensitive substring.
    pub use_regex: bool,
}

/// The pattern could not be compiled as a regular expression.
#[derive(Debug, Clone, Error)]
#[error("invalid pattern: {0}")]
pub struct PatternError(#[from] regex::Error);

/// Navigation was requested on an empty match set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no matches")]
pub struct NoMatchesError;

/// The matches of a single scan.
///
/// Start offsets are byte offsets into the scanned text, ascending because
/// the scan walks left to right. `match_len` is a single length shared by
/// every span: the length of the match found *last* during the scan. With
/// variable-length regex matches this mis-sizes earlier spans; the behavior
/// is kept deliberately (see DESIGN.md).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    offsets: Vec<usize>,
    match_len: usize,
}

impl MatchSet {
    /// Number of matches found.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the scan found nothing.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Start offsets in ascending order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// The shared span length applied to every match.
    pub const fn match_len(&self) -> usize {
        self.match_len
    }

    /// The highlight span for match `idx`, or `None` when out of range.
    pub fn span_at(&self, idx: usize) -> Option<Range<usize>> {
        self.offsets
            .get(idx)
            .map(|&start| start..start + self.match_len)
    }
}

/// Scan `text` for every non-overlapping occurrence of the pattern,
/// left to right.
///
/// An empty pattern yields an empty [`MatchSet`]; only a malformed regular
/// expression is an error. The document itself is never touched: the scan
/// reads one snapshot string.
///
/// # Errors
///
/// Returns [`PatternError`] when `use_regex` is set and the pattern does not
/// compile.
pub fn scan(text: &str, spec: &SearchSpec) -> Result<MatchSet, PatternError> {
    let mut set = MatchSet::default();
    if spec.pattern.is_empty() {
        return Ok(set);
    }

    if spec.use_regex {
        let re = regex::Regex::new(&spec.pattern)?;
        for found in re.find_iter(text) {
            // Last match wins; every span is sized with this length.
            set.match_len = found.len();
            set.offsets.push(found.start());
        }
    } else {
        let mut from = 0;
        while let Some(rel) = text[from..].find(&spec.pattern) {
            let start = from + rel;
            set.match_len = spec.pattern.len();
            set.offsets.push(start);
            from = start + spec.pattern.len();
        }
    }

    Ok(set)
}

/// Advance to the next match, wrapping past the end.
///
/// An unset cursor behaves like -1, so the first call lands on index 0.
/// Returns the new cursor index and the span to select; the caller places
/// the caret at the span's end.
///
/// # Errors
///
/// Returns [`NoMatchesError`] when the set is empty.
pub fn next_match(
    set: &MatchSet,
    cursor: Option<usize>,
) -> Result<(usize, Range<usize>), NoMatchesError> {
    if set.is_empty() {
        return Err(NoMatchesError);
    }
    let next = cursor.map_or(0, |idx| (idx + 1) % set.len());
    let span = set.span_at(next).ok_or(NoMatchesError)?;
    Ok((next, span))
}

/// Step to the previous match, wrapping past the start.
///
/// Symmetric to [`next_match`]: an unset cursor wraps straight to the last
/// match.
///
/// # Errors
///
/// Returns [`NoMatchesError`] when the set is empty.
pub fn prev_match(
    set: &MatchSet,
    cursor: Option<usize>,
) -> Result<(usize, Range<usize>), NoMatchesError> {
    if set.is_empty() {
        return Err(NoMatchesError);
    }
    let prev = match cursor {
        None | Some(0) => set.len() - 1,
        Some(idx) => idx - 1,
    };
    let span = set.span_at(prev).ok_or(NoMatchesError)?;
    Ok((prev, span))
}

/// Result of a background scan, tagged with the generation that requested it.
///
/// Generations are monotonic per search request; the receiver drops any
/// outcome whose generation is no longer the latest, so a slow stale scan
/// never clobbers a newer one.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub generation: u64,
    pub result: Result<MatchSet, PatternError>,
}

/// Run [`scan`] on a worker thread over a snapshot of the document text.
///
/// The outcome is delivered over `tx`. A send failure means the receiving
/// event loop is gone and the result is no longer wanted.
pub fn spawn_scan(text: String, spec: SearchSpec, generation: u64, tx: Sender<ScanOutcome>) {
    thread::spawn(move || {
        let result = scan(&text, &spec);
        let _ = tx.send(ScanOutcome { generation, result });
    });
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn literal(pattern: &str) -> SearchSpec {
        SearchSpec {
            pattern: pattern.to_string(),
            use_regex: false,
        }
    }

    fn regex(pattern: &str) -> SearchSpec {
        SearchSpec {
            pattern: pattern.to_string(),
            use_regex: true,
        }
    }

    // --- Scanning ---

    #[test]
    fn test_literal_scan_collects_ascending_offsets() {
        let set = scan("ababab", &literal("ab")).unwrap();
        assert_eq!(set.offsets(), &[0, 2, 4]);
        assert_eq!(set.match_len(), 2);
    }

    #[test]
    fn test_literal_scan_is_non_overlapping() {
        let set = scan("aaaa", &literal("aa")).unwrap();
        assert_eq!(set.offsets(), &[0, 2]);
    }

    #[test]
    fn test_literal_scan_is_case_sensitive() {
        let set = scan("Hay hay HAY", &literal("hay")).unwrap();
        assert_eq!(set.offsets(), &[4]);
    }

    #[test]
    fn test_literal_metacharacters_are_not_special() {
        let set = scan("a.c abc", &literal("a.c")).unwrap();
        assert_eq!(set.offsets(), &[0]);
    }

    #[test]
    fn test_empty_pattern_yields_empty_set() {
        let set = scan("anything at all", &literal("")).unwrap();
        assert!(set.is_empty());
        let set = scan("anything at all", &regex("")).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_regex_scan_finds_pattern_forms() {
        let set = scan("cat cot cut", &regex("c[ao]t")).unwrap();
        assert_eq!(set.offsets(), &[0, 4]);
    }

    #[test]
    fn test_invalid_regex_is_a_pattern_error() {
        let err = scan("text", &regex("[unclosed")).unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }

    #[test]
    fn test_regex_matchset_keeps_last_match_length() {
        // Variable-length matches: "aaa" then "a". Every span is sized with
        // the last match's length, including the first one.
        let set = scan("aaa b a", &regex("a+")).unwrap();
        assert_eq!(set.offsets(), &[0, 6]);
        assert_eq!(set.match_len(), 1);
        assert_eq!(set.span_at(0), Some(0..1));
    }

    #[test]
    fn test_multibyte_offsets_are_byte_offsets() {
        let set = scan("héllo héllo", &literal("llo")).unwrap();
        assert_eq!(set.offsets(), &[3, 10]);
    }

    // --- Navigation ---

    #[test]
    fn test_navigation_on_empty_set_fails_cleanly() {
        let set = MatchSet::default();
        assert_eq!(next_match(&set, None), Err(NoMatchesError));
        assert_eq!(prev_match(&set, None), Err(NoMatchesError));
    }

    #[test]
    fn test_first_next_match_lands_on_index_zero() {
        let set = scan("ababab", &literal("ab")).unwrap();
        let (idx, span) = next_match(&set, None).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(span, 0..2);
    }

    #[test]
    fn test_next_match_wraps_at_end() {
        let set = scan("ababab", &literal("ab")).unwrap();
        let (idx, span) = next_match(&set, Some(2)).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(span, 0..2);
    }

    #[test]
    fn test_next_match_walks_the_documented_example() {
        // "ababab" / "ab": offsets [0, 2, 4], cycle 0 → 2 → 4 → 0.
        let set = scan("ababab", &literal("ab")).unwrap();
        let mut cursor = None;
        let mut starts = Vec::new();
        for _ in 0..4 {
            let (idx, span) = next_match(&set, cursor).unwrap();
            cursor = Some(idx);
            starts.push(span.start);
        }
        assert_eq!(starts, vec![0, 2, 4, 0]);
    }

    #[test]
    fn test_prev_match_wraps_from_first_to_last() {
        let set = scan("ababab", &literal("ab")).unwrap();
        let (idx, span) = prev_match(&set, Some(0)).unwrap();
        assert_eq!(idx, 2);
        assert_eq!(span, 4..6);
    }

    #[test]
    fn test_prev_match_from_unset_lands_on_last() {
        let set = scan("ababab", &literal("ab")).unwrap();
        let (idx, _) = prev_match(&set, None).unwrap();
        assert_eq!(idx, 2);
    }

    proptest! {
        #[test]
        fn prop_next_match_full_cycle_returns_to_first(len in 1usize..48) {
            let text = "a".repeat(len);
            let set = scan(&text, &literal("a")).unwrap();
            let (first, _) = next_match(&set, None).unwrap();
            let mut cursor = Some(first);
            for _ in 0..len {
                let (idx, _) = next_match(&set, cursor).unwrap();
                cursor = Some(idx);
            }
            prop_assert_eq!(cursor, Some(first));
        }

        #[test]
        fn prop_prev_match_undoes_next_match(len in 1usize..48, steps in 0usize..96) {
            let text = "a".repeat(len);
            let set = scan(&text, &literal("a")).unwrap();
            let mut cursor = None;
            for _ in 0..steps {
                let (idx, _) = next_match(&set, cursor).unwrap();
                cursor = Some(idx);
            }
            let (forward, _) = next_match(&set, cursor).unwrap();
            let (back, _) = prev_match(&set, Some(forward)).unwrap();
            let expected = cursor.map_or(len - 1, |idx| idx);
            prop_assert_eq!(back, expected);
        }
    }
}
