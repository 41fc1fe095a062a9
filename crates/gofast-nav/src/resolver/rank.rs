use crate::{paths, symbols::SymbolEntry};

/// Why a candidate was chosen; lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    SameFile,
    SameDirectory,
    Fallback,
}

pub(crate) fn tier_of(
    candidate_path: &str,
    normalized_origin: &str,
) -> MatchTier {
    let candidate = paths::normalize(candidate_path);
    if candidate == normalized_origin {
        MatchTier::SameFile
    } else if paths::shares_directory_prefix(&candidate, normalized_origin) {
        MatchTier::SameDirectory
    } else {
        MatchTier::Fallback
    }
}

/// Pick the best declaration site for a reference made from `origin_path`.
///
/// Same file beats same directory beats anything else; within a tier the
/// earliest entry in index order wins.
pub fn pick_candidate<'a>(
    candidates: &'a [SymbolEntry],
    origin_path: &str,
) -> Option<(&'a SymbolEntry, MatchTier)> {
    let origin = paths::normalize(origin_path);
    candidates
        .iter()
        .enumerate()
        .map(|(order, entry)| (tier_of(&entry.path, &origin), order, entry))
        .min_by_key(|(tier, order, _)| (*tier, *order))
        .map(|(tier, _, entry)| (entry, tier))
}

#[cfg(test)]
#[path = "../../tests/src/resolver/rank_tests.rs"]
mod tests;
