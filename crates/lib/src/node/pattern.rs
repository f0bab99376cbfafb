//! Name filters for child and property listings.
//!
//! A [`NameFilter::Pattern`] is a repository name pattern: alternatives
//! separated by `|`, surrounding whitespace ignored, `*` matching any run of
//! characters. [`NameFilter::Globs`] is a list of such globs taken verbatim,
//! without `|` splitting or trimming.

use regex::Regex;

/// Selects which children or properties a listing returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NameFilter {
    /// Every name
    #[default]
    All,
    /// A `|`-separated name pattern such as `"title | nav*"`
    Pattern(String),
    /// A list of globs such as `["title", "nav*"]`
    Globs(Vec<String>),
}

impl NameFilter {
    /// Creates a name-pattern filter.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        NameFilter::Pattern(pattern.into())
    }

    /// Creates a glob-list filter.
    pub fn globs<I, S>(globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NameFilter::Globs(globs.into_iter().map(Into::into).collect())
    }

    /// Compiles this filter for repeated matching.
    pub fn matcher(&self) -> NameMatcher {
        let globs: Vec<&str> = match self {
            NameFilter::All => return NameMatcher { globs: None },
            NameFilter::Pattern(pattern) => pattern.split('|').map(str::trim).collect(),
            NameFilter::Globs(globs) => globs.iter().map(String::as_str).collect(),
        };
        let globs = globs.into_iter().filter_map(compile_glob).collect();
        NameMatcher { globs: Some(globs) }
    }

    /// Returns true if `name` passes this filter.
    pub fn matches(&self, name: &str) -> bool {
        self.matcher().matches(name)
    }
}

/// A compiled [`NameFilter`].
#[derive(Debug, Clone)]
pub struct NameMatcher {
    globs: Option<Vec<Regex>>,
}

impl NameMatcher {
    pub fn matches(&self, name: &str) -> bool {
        match &self.globs {
            None => true,
            Some(globs) => globs.iter().any(|glob| glob.is_match(name)),
        }
    }
}

fn compile_glob(glob: &str) -> Option<Regex> {
    let body = glob
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).ok()
}
