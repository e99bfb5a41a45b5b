//! Candidate cleanup: raw model output to canonical base names

use crate::config::TldSet;
use crate::types::BaseName;
use std::collections::HashSet;

/// Map an arbitrary candidate to its base name.
///
/// Lowercases, turns each whitespace run into one hyphen, keeps only
/// `[a-z0-9.-]`, then strips trailing TLDs from `tlds` for as long as a
/// non-empty remainder is left. Stripping to a fixed point keeps the function
/// idempotent: `a.com.io` becomes `a`, not `a.com`.
///
/// Total: a string with nothing usable in it normalizes to an empty or
/// punctuation-only name, see [`is_usable`].
pub fn normalize(candidate: &str, tlds: &TldSet) -> BaseName {
    let lowered = candidate.to_lowercase();

    let mut cleaned = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                cleaned.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.' {
            cleaned.push(c);
        }
    }

    while let Some((rest, last)) = cleaned.rsplit_once('.') {
        if rest.is_empty() || last.is_empty() || !tlds.contains(last) {
            break;
        }
        let keep = rest.len();
        cleaned.truncate(keep);
    }

    BaseName::new(cleaned)
}

/// A base name worth checking: it has at least one letter or digit
pub fn is_usable(name: &BaseName) -> bool {
    name.as_str().chars().any(|c| c.is_ascii_alphanumeric())
}

/// Drop repeats, keeping first-seen order.
///
/// Names that differ only by hyphens (`eco-paws`, `ecopaws`) count as the same
/// name; the spelling seen first is kept.
pub fn dedup(names: Vec<BaseName>) -> Vec<BaseName> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .filter(|name| seen.insert(name.as_str().replace('-', "")))
        .collect()
}

/// Normalize every candidate, discard unusable names, then dedup
pub fn normalize_all<I, S>(candidates: I, tlds: &TldSet) -> Vec<BaseName>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalized = candidates
        .into_iter()
        .filter_map(|candidate| {
            let name = normalize(candidate.as_ref(), tlds);
            if is_usable(&name) {
                Some(name)
            } else {
                tracing::debug!(candidate = %candidate.as_ref(), "Dropping candidate with no usable characters");
                None
            }
        })
        .collect();

    dedup(normalized)
}
