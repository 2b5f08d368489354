use std::ffi::OsStr;

/// Suffix-based admission policy for file names.
///
/// Matching is a plain byte suffix comparison: `"txt"` matches both
/// `"report.txt"` and `"notxt"`. Directories never go through the filter.
#[derive(Debug, Clone, Default)]
pub struct SuffixFilter {
    suffixes: Vec<String>,
    include: bool,
}

impl SuffixFilter {
    /// An empty suffix list disables filtering, whatever `include` says.
    pub fn new(suffixes: Vec<String>, include: bool) -> Self {
        let include = include && !suffixes.is_empty();
        SuffixFilter { suffixes, include }
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.suffixes.is_empty()
    }

    #[inline]
    pub fn include(&self) -> bool {
        self.include
    }

    fn has_suffix(&self, name: &OsStr) -> bool {
        let name = name.as_encoded_bytes();
        self.suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_bytes()))
    }

    #[inline]
    #[must_use]
    pub fn admits(&self, name: impl AsRef<OsStr>) -> bool {
        self.has_suffix(name.as_ref()) == self.include
    }
}

/// One-shot form of [`SuffixFilter::admits`].
pub fn matches(name: &str, suffixes: &[String], include: bool) -> bool {
    SuffixFilter::new(suffixes.to_vec(), include).admits(name)
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
