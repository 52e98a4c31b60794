//! Domain-matching engine: congruent vs. superdomain vs. no match.
//!
//! A pure function over label slices. The original `hsts_match`/
//! `hsts_find_entry` (Chromium: net/http/transport_security_state.cc)
//! walks two C strings right-to-left with raw pointer arithmetic, which
//! accepts non-label-boundary suffixes like `"ww.foo.com"` against
//! `"www.foo.com"`. Splitting into labels up front makes that class of
//! bug structurally impossible.

/// Result of comparing a query host against a stored host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    NoMatch,
    SuperdomainMatch,
    CongruentMatch,
}

/// Split `host` into its dot-separated labels. `None` if splitting would
/// produce an empty label (leading/trailing/doubled dots); such hosts
/// never match anything.
fn labels(host: &str) -> Option<Vec<&str>> {
    if host.is_empty() {
        return None;
    }
    let parts: Vec<&str> = host.split('.').collect();
    if parts.iter().any(|label| label.is_empty()) {
        return None;
    }
    Some(parts)
}

/// Classify `query` against `stored`. Both must already be canonicalised
/// (lowercased, no trailing dot); this function still compares
/// case-insensitively as a defensive second layer.
pub fn match_hosts(query: &str, stored: &str) -> MatchKind {
    let (q, s) = match (labels(query), labels(stored)) {
        (Some(q), Some(s)) => (q, s),
        _ => return MatchKind::NoMatch,
    };

    if s.len() > q.len() {
        return MatchKind::NoMatch;
    }

    for (ql, sl) in q.iter().rev().zip(s.iter().rev()) {
        if !ql.eq_ignore_ascii_case(sl) {
            return MatchKind::NoMatch;
        }
    }

    if s.len() == q.len() {
        MatchKind::CongruentMatch
    } else {
        MatchKind::SuperdomainMatch
    }
}
