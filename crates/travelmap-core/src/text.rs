// crates/travelmap-core/src/text.rs

//! Text folding and the fuzzy matcher behind the trip search box.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Share of a query token's length that may be edited and still match.
pub const TYPO_RATIO: f64 = 0.34;

/// Normalize a string for matching.
///
/// This performs:
/// 1\) Lowercasing
/// 2\) Unicode NFD decomposition
/// 3\) Removal of combining (diacritic) marks
///
/// Unlike [`fold_key`], letters without a decomposition (`ß`, `ł`) are kept
/// as they are.
///
/// # Examples
///
/// ```rust
/// use travelmap_core::text::normalize;
///
/// assert_eq!(normalize("Città del Vaticano"), "citta del vaticano");
/// assert_eq!(normalize("ÉVORA"), "evora");
/// ```
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Transliterate to ASCII and lowercase (`Łódź` -> `lodz`, `Straße` -> `strasse`).
///
/// Used for keys that must be plain ASCII, such as file names.
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Edit distance between two strings, counted in Unicode scalar values.
///
/// Standard dynamic-programming recurrence over a single rolling row, so
/// memory is `O(len(b))`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        // `diag` holds row[j - 1] from the previous iteration of i.
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diag + cost);
            diag = above;
        }
    }
    row[b.len()]
}

/// Maximum edit distance tolerated for a query token of `len` characters:
/// `max(1, floor(len * 0.34))`.
#[inline]
pub fn typo_threshold(len: usize) -> usize {
    ((len as f64 * TYPO_RATIO).floor() as usize).max(1)
}

/// Split a normalized query on whitespace.
pub fn query_tokens(q: &str) -> impl Iterator<Item = &str> {
    q.split_whitespace()
}

/// Split normalized text on every run of characters outside `[a-z0-9]`.
pub fn text_tokens(t: &str) -> impl Iterator<Item = &str> {
    t.split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|s| !s.is_empty())
}

/// Does `text` fuzzily contain `query`?
///
/// This match is:
/// - **case-insensitive** and **accent-insensitive** (via [`normalize`])
/// - `true` for an empty query
/// - `true` if the normalized text contains the normalized query
/// - otherwise `true` only if **every** query token is contained in, or
///   within [`typo_threshold`] edits of, some token of the text
///
/// # Examples
///
/// ```rust
/// use travelmap_core::text::fuzzy_contains;
///
/// assert!(fuzzy_contains("Budapest Long Weekend", "buda"));
/// assert!(fuzzy_contains("Budapest", "Budapset"));
/// assert!(!fuzzy_contains("Paris", "Tokyo"));
/// ```
pub fn fuzzy_contains(text: &str, query: &str) -> bool {
    let q = normalize(query);
    if q.trim().is_empty() {
        return true;
    }
    let t = normalize(text);
    if t.contains(&q) {
        return true;
    }

    let t_tokens: Vec<&str> = text_tokens(&t).collect();
    let q_tokens: Vec<&str> = query_tokens(&q).collect();
    q_tokens.iter().all(|&qt| {
        let threshold = typo_threshold(qt.chars().count());
        t_tokens
            .iter()
            .any(|tt| tt.contains(qt) || levenshtein(tt, qt) <= threshold)
    })
}

/// Lowercase ASCII slug: transliterated, runs of whitespace and dashes
/// collapsed to one dash, anything else dropped.
pub fn slugify(s: &str) -> String {
    let folded = fold_key(s);
    let mut out = String::with_capacity(folded.len());
    let mut pending_dash = false;

    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }
    out
}
