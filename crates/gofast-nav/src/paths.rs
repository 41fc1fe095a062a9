//! Path canonicalization for location equality.
//!
//! The host reports paths with whatever separators the backend produced
//! (`C:\proj\main.go` from a Windows backend, `src/util.go` from a link).
//! Two paths denote the same location iff their normalized forms are equal.

pub const SEPARATOR: char = '/';

/// Rewrite every `\` to `/` and case-fold.
///
/// Pure and idempotent: `normalize(&normalize(p)) == normalize(p)`.
pub fn normalize(path: &str) -> String {
    path.chars().map(|ch| if ch == '\\' { SEPARATOR } else { ch }).collect::<String>().to_lowercase()
}

pub fn same_location(
    a: &str,
    b: &str,
) -> bool {
    a == b || normalize(a) == normalize(b)
}

/// Directory portion of an already-normalized path, without the trailing
/// separator. A bare file name has an empty directory.
pub fn parent_dir(normalized: &str) -> &str {
    normalized.rfind(SEPARATOR).map(|idx| &normalized[..idx]).unwrap_or("")
}

/// Loose same-directory test used by candidate ranking.
///
/// Checks whether `candidate` starts with the directory of `origin`. This is
/// a string-prefix test, so `ab/z.go` matches an origin in `a/`.
pub fn shares_directory_prefix(
    candidate: &str,
    origin: &str,
) -> bool {
    let dir = parent_dir(origin);
    !dir.is_empty() && candidate.starts_with(dir)
}

#[cfg(test)]
#[path = "../tests/src/paths_tests.rs"]
mod tests;
