use std::fmt;
use std::str::FromStr;
use super::error::FragmentError;

/// Whether the engine should also read/write a result column for this container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Inclusion {
    /// `+`: the matched values become a result column (reads) or come from one (writes)
    Include,
    /// No marker: filter only
    #[default]
    Exclude,
}

impl Inclusion {
    pub fn is_included(&self) -> bool {
        matches!(self, Inclusion::Include)
    }

    /// The marker written in front of the filter kind
    pub fn marker(&self) -> &'static str {
        match self {
            Inclusion::Include => "+",
            Inclusion::Exclude => "",
        }
    }
}

/// Category of compiled comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Calendar year
    Year,
    /// Ordinal model period
    Index,
    /// Container name
    Named,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Year => "YearFilter",
            FilterKind::Index => "IndexFilter",
            FilterKind::Named => "NamedFilter",
        }
    }

    /// Integer kinds compare against years or periods; names compare against strings
    pub fn is_integer(&self) -> bool {
        !matches!(self, FilterKind::Named)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YearFilter" => Ok(FilterKind::Year),
            "IndexFilter" => Ok(FilterKind::Index),
            "NamedFilter" => Ok(FilterKind::Named),
            _ => Err(FragmentError::UnknownKind(s.to_string())),
        }
    }
}

/// Comparator names understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    MatchesAny,
    IntEquals,
    IntLessThan,
    IntLessThanEq,
    IntGreaterThan,
    IntGreaterThanEq,
    StringEquals,
    StringRegexMatches,
}

impl Comparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::MatchesAny => "MatchesAny",
            Comparator::IntEquals => "IntEquals",
            Comparator::IntLessThan => "IntLessThan",
            Comparator::IntLessThanEq => "IntLessThanEq",
            Comparator::IntGreaterThan => "IntGreaterThan",
            Comparator::IntGreaterThanEq => "IntGreaterThanEq",
            Comparator::StringEquals => "StringEquals",
            Comparator::StringRegexMatches => "StringRegexMatches",
        }
    }

    /// Map a user operator (`*`, `=`, `<`, `<=`, `>`, `>=`) to an integer comparator
    pub fn from_int_operator(op: &str) -> Option<Self> {
        match op {
            "*" => Some(Comparator::MatchesAny),
            "=" => Some(Comparator::IntEquals),
            "<" => Some(Comparator::IntLessThan),
            "<=" => Some(Comparator::IntLessThanEq),
            ">" => Some(Comparator::IntGreaterThan),
            ">=" => Some(Comparator::IntGreaterThanEq),
            _ => None,
        }
    }

    /// Map a user operator (`*`, `=`, `=~`) to a string comparator
    pub fn from_str_operator(op: &str) -> Option<Self> {
        match op {
            "*" => Some(Comparator::MatchesAny),
            "=" => Some(Comparator::StringEquals),
            "=~" => Some(Comparator::StringRegexMatches),
            _ => None,
        }
    }

    /// Whether this comparator may be used with the given filter kind
    pub fn applies_to(&self, kind: FilterKind) -> bool {
        match self {
            Comparator::MatchesAny => true,
            Comparator::StringEquals | Comparator::StringRegexMatches => !kind.is_integer(),
            _ => kind.is_integer(),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparator {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MatchesAny" => Ok(Comparator::MatchesAny),
            "IntEquals" => Ok(Comparator::IntEquals),
            "IntLessThan" => Ok(Comparator::IntLessThan),
            "IntLessThanEq" => Ok(Comparator::IntLessThanEq),
            "IntGreaterThan" => Ok(Comparator::IntGreaterThan),
            "IntGreaterThanEq" => Ok(Comparator::IntGreaterThanEq),
            "StringEquals" => Ok(Comparator::StringEquals),
            "StringRegexMatches" => Ok(Comparator::StringRegexMatches),
            _ => Err(FragmentError::UnknownComparator(s.to_string())),
        }
    }
}

/// Characters the engine reads as filter syntax: `/` separates path steps,
/// `[` and `]` delimit a filter and `,` separates its parts
pub const RESERVED_CHARS: [char; 4] = ['/', '[', ']', ','];

/// Whether `operand` can sit inside a fragment without changing its structure
pub fn is_valid_operand(operand: &str) -> bool {
    !operand.contains(&RESERVED_CHARS[..])
}

/// One compiled filter, substituted for one placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFragment {
    pub inclusion: Inclusion,
    pub kind: FilterKind,
    pub comparator: Comparator,
    /// Right-hand side of the comparison; absent for match-any and for
    /// forced-inclusion writes, where the written data supplies it
    pub operand: Option<String>,
}

impl FilterFragment {
    pub fn new(inclusion: Inclusion, kind: FilterKind, comparator: Comparator) -> Self {
        Self {
            inclusion,
            kind,
            comparator,
            operand: None,
        }
    }

    /// A match-any fragment of the given kind
    pub fn matches_any(inclusion: Inclusion, kind: FilterKind) -> Self {
        Self::new(inclusion, kind, Comparator::MatchesAny)
    }

    pub fn with_operand(mut self, operand: impl Into<String>) -> Self {
        self.operand = Some(operand.into());
        self
    }
}

impl fmt::Display for FilterFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}{},{}", self.inclusion.marker(), self.kind, self.comparator)?;
        if let Some(operand) = &self.operand {
            write!(f, ",{}", operand)?;
        }
        f.write_str("]")
    }
}

impl FromStr for FilterFragment {
    type Err = FragmentError;

    /// Parse a fragment such as `[+YearFilter,IntEquals,2020]`
    ///
    /// The body splits on every comma into at most kind, comparator and
    /// operand, which is how the engine reads a filter step.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| FragmentError::MissingBrackets(s.to_string()))?;

        let (inclusion, body) = match inner.strip_prefix('+') {
            Some(rest) => (Inclusion::Include, rest),
            None => (Inclusion::Exclude, inner),
        };

        let parts: Vec<&str> = body.split(',').collect();
        let (kind, comparator, operand) = match parts.as_slice() {
            [kind, comparator] => (*kind, *comparator, None),
            [kind, comparator, operand] => (*kind, *comparator, Some(*operand)),
            [_] => return Err(FragmentError::MissingParts(s.to_string())),
            _ => return Err(FragmentError::TooManyParts(s.to_string())),
        };
        if let Some(operand) = operand.filter(|op| !is_valid_operand(op)) {
            return Err(FragmentError::InvalidOperand(operand.to_string()));
        }
        let kind: FilterKind = kind.parse()?;
        let comparator: Comparator = comparator.parse()?;

        if !comparator.applies_to(kind) {
            return Err(FragmentError::IncompatibleComparator {
                kind: kind.to_string(),
                comparator: comparator.to_string(),
            });
        }

        Ok(FilterFragment {
            inclusion,
            kind,
            comparator,
            operand: operand.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let frag = FilterFragment::new(Inclusion::Exclude, FilterKind::Year, Comparator::IntEquals)
            .with_operand("2020");
        assert_eq!(frag.to_string(), "[YearFilter,IntEquals,2020]");

        let frag = FilterFragment::matches_any(Inclusion::Include, FilterKind::Named);
        assert_eq!(frag.to_string(), "[+NamedFilter,MatchesAny]");
    }

    #[test]
    fn test_parse_fragment() {
        let frag: FilterFragment = "[+IndexFilter,IntLessThanEq,5]".parse().unwrap();
        assert!(frag.inclusion.is_included());
        assert_eq!(frag.kind, FilterKind::Index);
        assert_eq!(frag.comparator, Comparator::IntLessThanEq);
        assert_eq!(frag.operand.as_deref(), Some("5"));
    }

    #[test]
    fn test_parse_regex_operand() {
        let frag: FilterFragment = "[NamedFilter,StringRegexMatches,^(USA|EU-15)$]"
            .parse()
            .unwrap();
        assert_eq!(frag.operand.as_deref(), Some("^(USA|EU-15)$"));
    }

    #[test]
    fn test_parse_rejects_extra_parts() {
        // the engine would only ever see `^(a|b)` as the operand here
        assert!(matches!(
            "[NamedFilter,StringRegexMatches,^(a|b),c$]".parse::<FilterFragment>(),
            Err(FragmentError::TooManyParts(_))
        ));
        assert!(matches!(
            "[YearFilter,IntEquals,2020,2021]".parse::<FilterFragment>(),
            Err(FragmentError::TooManyParts(_))
        ));
    }

    #[test]
    fn test_parse_rejects_nested_syntax() {
        assert!(matches!(
            "[NamedFilter,StringEquals,USA]/x[YearFilter]".parse::<FilterFragment>(),
            Err(FragmentError::InvalidOperand(ref op)) if op == "USA]/x[YearFilter"
        ));
    }

    #[test]
    fn test_valid_operand() {
        assert!(is_valid_operand("^US.*$"));
        assert!(is_valid_operand("EU-15"));
        assert!(!is_valid_operand("a,b"));
        assert!(!is_valid_operand("USA]x["));
        assert!(!is_valid_operand("a/b"));
    }

    #[test]
    fn test_parse_forced_write_without_operand() {
        let frag: FilterFragment = "[+NamedFilter,StringEquals]".parse().unwrap();
        assert_eq!(frag.operand, None);
        assert_eq!(frag.to_string(), "[+NamedFilter,StringEquals]");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "YearFilter,MatchesAny".parse::<FilterFragment>(),
            Err(FragmentError::MissingBrackets(_))
        ));
        assert!(matches!(
            "[YearFilter]".parse::<FilterFragment>(),
            Err(FragmentError::MissingParts(_))
        ));
        assert!(matches!(
            "[DateFilter,MatchesAny]".parse::<FilterFragment>(),
            Err(FragmentError::UnknownKind(_))
        ));
        assert!(matches!(
            "[YearFilter,IntNotEquals,5]".parse::<FilterFragment>(),
            Err(FragmentError::UnknownComparator(_))
        ));
        assert!(matches!(
            "[NamedFilter,IntEquals,5]".parse::<FilterFragment>(),
            Err(FragmentError::IncompatibleComparator { .. })
        ));
    }

    #[test]
    fn test_operator_tables() {
        assert_eq!(Comparator::from_int_operator(">="), Some(Comparator::IntGreaterThanEq));
        assert_eq!(Comparator::from_int_operator("=~"), None);
        assert_eq!(Comparator::from_str_operator("=~"), Some(Comparator::StringRegexMatches));
        assert_eq!(Comparator::from_str_operator("<"), None);
    }
}
