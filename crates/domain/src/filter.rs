//! Block rules and the ordered rule set evaluated for every question.

use super::RecordType;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which query types a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    /// `ALL` in the configuration: every query type.
    All,
    Only(RecordType),
}

impl FilterType {
    pub fn accepts(&self, query_type: u16) -> bool {
        match self {
            FilterType::All => true,
            FilterType::Only(rt) => rt.to_u16() == query_type,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::All => "ALL",
            FilterType::Only(rt) => rt.as_str(),
        }
    }
}

impl FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ALL") {
            return Ok(FilterType::All);
        }
        s.parse::<RecordType>().map(FilterType::Only)
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The queried name contains the rule host anywhere.
    Contains,
    /// The queried name is exactly the rule host plus the root terminator.
    Exact,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Contains => "contains",
            MatchMode::Exact => "exact",
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contains" => Ok(MatchMode::Contains),
            "exact" => Ok(MatchMode::Exact),
            _ => Err(format!("Unknown matching mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    host: Arc<str>,
    filter_type: FilterType,
    mode: MatchMode,
}

impl FilterRule {
    /// Shortest host a rule may carry (`a.io`).
    pub const MIN_HOST_LEN: usize = 4;

    /// A rule for `ALL` types always matches by containment, whatever `mode` says.
    pub fn new(host: impl Into<Arc<str>>, filter_type: FilterType, mode: MatchMode) -> Self {
        let mode = match filter_type {
            FilterType::All => MatchMode::Contains,
            FilterType::Only(_) => mode,
        };
        Self {
            host: host.into(),
            filter_type,
            mode,
        }
    }

    pub fn any_type(host: impl Into<Arc<str>>) -> Self {
        Self::new(host, FilterType::All, MatchMode::Contains)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn is_exact(&self) -> bool {
        self.mode == MatchMode::Exact
    }

    /// `name` is the fully-qualified query name, e.g. `"ads.example.com."`.
    pub fn matches(&self, name: &str, query_type: u16) -> bool {
        if !self.filter_type.accepts(query_type) {
            return false;
        }
        match self.mode {
            MatchMode::Contains => name.contains(&*self.host),
            MatchMode::Exact => name.strip_suffix('.') == Some(&*self.host),
        }
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} {}]", self.host, self.filter_type, self.mode.as_str())
    }
}

/// Ordered rule collection; the first matching rule decides.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    rules: Vec<FilterRule>,
}

impl FilterSet {
    pub fn new(rules: Vec<FilterRule>) -> Self {
        Self { rules }
    }

    pub fn matches(&self, name: &str, query_type: u16) -> bool {
        self.find_match(name, query_type).is_some()
    }

    pub fn find_match(&self, name: &str, query_type: u16) -> Option<&FilterRule> {
        self.rules.iter().find(|rule| rule.matches(name, query_type))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterRule> {
        self.rules.iter()
    }
}

impl FromIterator<FilterRule> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
