//! Path string handling
//!
//! Splits path strings into segments and joins segment lists back into the
//! canonical absolute form (`/` or `/a/b`, no trailing separator).

pub const SEPARATOR: char = '/';
pub const ROOT: &str = "/";
pub const PARENT: &str = "..";
pub const CURRENT: &str = ".";

/// Security limit on the number of segments a single path may carry.
pub const MAX_PATH_DEPTH: usize = 64;

/// A path string split into its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath<'a> {
    pub absolute: bool,
    pub segments: Vec<&'a str>,
}

impl<'a> ParsedPath<'a> {
    /// Splits `raw` on the separator, dropping empty segments so that
    /// `a//b/` and `a/b` are the same path.
    pub fn parse(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        let absolute = trimmed.starts_with(SEPARATOR);
        let segments = trimmed
            .split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .collect();
        Self { absolute, segments }
    }

    /// True when the path names its starting folder itself.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Splits off the final segment.
    pub fn split_last(&self) -> Option<(&'a str, &[&'a str])> {
        self.segments
            .split_last()
            .map(|(last, parents)| (*last, parents))
    }
}

/// Joins absolute segments into the canonical path string.
pub fn join(segments: &[String]) -> String {
    if segments.is_empty() {
        ROOT.to_string()
    } else {
        segments
            .iter()
            .fold(String::new(), |mut acc, segment| {
                acc.push(SEPARATOR);
                acc.push_str(segment);
                acc
            })
    }
}

/// Joins a folder's segments with a child name.
pub fn child(parent: &[String], name: &str) -> String {
    let mut segments = parent.to_vec();
    segments.push(name.to_string());
    join(&segments)
}

/// Parses a stored absolute path into segments.
///
/// Returns `None` for relative paths or paths carrying navigation tokens,
/// which a canonical path never contains.
pub fn absolute_segments(path: &str) -> Option<Vec<String>> {
    let parsed = ParsedPath::parse(path);
    if !parsed.absolute {
        return None;
    }
    if parsed
        .segments
        .iter()
        .any(|segment| *segment == PARENT || *segment == CURRENT)
    {
        return None;
    }
    Some(parsed.segments.iter().map(|s| s.to_string()).collect())
}
