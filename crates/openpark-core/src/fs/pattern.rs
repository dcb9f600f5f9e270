//! Wildcard file patterns.
//!
//! A pattern is a directory prefix followed by one or more `;`-delimited
//! leaf wildcards, e.g. `tracks/*.td4;*.td6`. `*` matches any run of
//! characters and `?` exactly one; matching ignores ASCII case.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    dir: PathBuf,
    wildcards: Vec<String>,
}

impl FilePattern {
    /// Builds a pattern from a directory and a `;`-delimited wildcard list.
    pub fn new(dir: impl Into<PathBuf>, wildcards: &str) -> Self {
        Self {
            dir: dir.into(),
            wildcards: split_wildcards(wildcards),
        }
    }

    /// Parses the combined `<dir>/<wildcards>` form.
    pub fn parse(pattern: &str) -> Self {
        let first = pattern.split(';').next().unwrap_or("");
        match first.rfind(['/', '\\']) {
            Some(sep) => Self::new(&pattern[..sep], &pattern[sep + 1..]),
            None => Self::new(".", pattern),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn wildcards(&self) -> &[String] {
        &self.wildcards
    }

    /// Returns true if `name` matches any of the leaf wildcards.
    pub fn matches(&self, name: &str) -> bool {
        self.wildcards.iter().any(|w| wildcard_match(w, name))
    }
}

fn split_wildcards(list: &str) -> Vec<String> {
    list.split(';')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive `*`/`?` wildcard match over the whole of `name`.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();
    let n: Vec<char> = name.chars().map(|c| c.to_ascii_lowercase()).collect();

    let (mut pi, mut ni) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while ni < n.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ni));
            pi += 1;
        } else if let Some((sp, sn)) = star {
            pi = sp + 1;
            ni = sn + 1;
            star = Some((sp, sn + 1));
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_extension() {
        assert!(wildcard_match("*.sc6", "Forest Frontiers.SC6"));
        assert!(!wildcard_match("*.sc6", "Forest Frontiers.sc4"));
    }

    #[test]
    fn test_wildcard_rejects_longer_extension() {
        assert!(!wildcard_match("*.doc", "report.docx"));
        assert!(wildcard_match("*.doc*", "report.docx"));
    }

    #[test]
    fn test_wildcard_question_mark() {
        assert!(wildcard_match("*.td?", "Wooden.td6"));
        assert!(wildcard_match("*.td?", "Wooden.TD4"));
        assert!(!wildcard_match("*.td?", "Wooden.td"));
    }

    #[test]
    fn test_wildcard_multiple_stars() {
        assert!(wildcard_match("*a*b*", "xxaxxbxx"));
        assert!(!wildcard_match("*a*b*", "xxbxxaxx"));
        assert!(wildcard_match("*", ""));
    }

    #[test]
    fn test_parse_directory_prefix() {
        let pattern = FilePattern::parse("data/tracks/*.td4;*.td6");
        assert_eq!(pattern.dir(), Path::new("data/tracks"));
        assert_eq!(pattern.wildcards(), &["*.td4".to_string(), "*.td6".to_string()]);
        assert!(pattern.matches("a.TD6"));
        assert!(!pattern.matches("a.sv6"));
    }

    #[test]
    fn test_parse_without_directory() {
        let pattern = FilePattern::parse("*.parkseq");
        assert_eq!(pattern.dir(), Path::new("."));
        assert!(pattern.matches("rct2.parkseq"));
    }
}
