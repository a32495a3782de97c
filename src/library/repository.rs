use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;
use crate::error::ParseError;
use crate::query::RawQuery;
use super::error::{LookupError, QueryError};

/// The query library shipped with the crate
pub const BUNDLED_LIBRARY: &str = include_str!("../../queries/query_library.yaml");

/// Nested query definitions
///
/// ```yaml
/// emissions:
///   co2_emissions:
///     - 'world/region{region@name}/.../emissions{year@year}'
///     - 'MTC'
/// ```
///
/// Categories nest to any depth; a leaf is `[query]` or `[query, units]`.
/// The library is read-only once loaded.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct QueryLibrary {
    root: Mapping,
}

impl QueryLibrary {
    /// The bundled library, parsed on first use
    pub fn bundled() -> &'static QueryLibrary {
        static BUNDLED: OnceLock<QueryLibrary> = OnceLock::new();
        BUNDLED.get_or_init(|| parse_str(BUNDLED_LIBRARY).expect("bundled query library is valid"))
    }

    /// Load a library from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        parse_file(path)
    }

    /// Resolve a category path to its raw query
    ///
    /// # Errors
    /// * [`LookupError::NotFound`] if any segment is missing
    /// * [`LookupError::EmptyDefinition`] if the leaf is an empty list
    /// * [`LookupError::InvalidDefinition`] if the path stops at a category or
    ///   the leaf is not a list of strings
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Result<RawQuery, LookupError> {
        let path_str = display_path(path);

        let mut node: Option<&Value> = None;
        for segment in path {
            let next = match node {
                None => self.root.get(segment.as_ref()),
                Some(value) => value.get(segment.as_ref()),
            };
            node = Some(next.ok_or_else(|| LookupError::NotFound { path: path_str.clone() })?);
        }

        let Some(Value::Sequence(items)) = node else {
            return Err(LookupError::InvalidDefinition {
                path: path_str,
                reason: "path names a category, not a query".to_string(),
            });
        };

        if items.is_empty() {
            return Err(LookupError::EmptyDefinition { path: path_str });
        }

        let text = string_item(&items[0], &path_str, "query")?;
        let mut query = RawQuery::new(text);

        if let Some(units) = items.get(1) {
            query = query.with_units(string_item(units, &path_str, "units")?);
        }
        if items.len() > 2 {
            warn!(
                "query {} has {} entries, only [query, units] are used",
                path_str,
                items.len()
            );
        }

        Ok(query)
    }

    /// Top-level category names
    pub fn categories(&self) -> Vec<&str> {
        self.root.keys().filter_map(Value::as_str).collect()
    }

    /// Every path that resolves to a query definition, in file order
    pub fn query_paths(&self) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        collect_paths(&self.root, &mut Vec::new(), &mut paths);
        paths
    }
}

/// Look up a query from the bundled library, or from `query_file` when given
///
/// A convenience for one-off lookups; load a [`QueryLibrary`] once when
/// resolving many queries from the same file.
pub fn get_query<S: AsRef<str>>(path: &[S], query_file: Option<&Path>) -> Result<RawQuery, QueryError> {
    match query_file {
        Some(file) => Ok(parse_file(file)?.lookup(path)?),
        None => Ok(QueryLibrary::bundled().lookup(path)?),
    }
}

/// Parse a query library from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<QueryLibrary, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::io(path_str, e))?;
    parse_str(&contents)
}

/// Parse a query library from a YAML string
pub fn parse_str(yaml: &str) -> Result<QueryLibrary, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

fn string_item(value: &Value, path: &str, what: &str) -> Result<String, LookupError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LookupError::InvalidDefinition {
            path: path.to_string(),
            reason: format!("{} must be a string", what),
        })
}

fn collect_paths(mapping: &Mapping, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    for (key, value) in mapping {
        let Some(key) = key.as_str() else { continue };
        prefix.push(key.to_string());
        match value {
            Value::Mapping(child) => collect_paths(child, prefix, out),
            Value::Sequence(_) => out.push(prefix.clone()),
            _ => {}
        }
        prefix.pop();
    }
}

fn display_path<S: AsRef<str>>(path: &[S]) -> String {
    let parts: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"
emissions:
  co2_emissions:
    - 'world/region{region@name}/period{year@year}/emissions'
    - 'MTC'
  no_units:
    - 'world/region{region@name}'
  empty: []
  extra:
    - 'q'
    - 'u'
    - 'ignored'
  bad_units:
    - 'q'
    - 12
nested:
  deeper:
    query:
      - 'marketplace/market{market@name}/price'
"#;

    fn library() -> QueryLibrary {
        parse_str(LIBRARY).unwrap()
    }

    #[test]
    fn test_lookup_with_units() {
        let query = library().lookup(&["emissions", "co2_emissions"]).unwrap();
        assert_eq!(query.text(), "world/region{region@name}/period{year@year}/emissions");
        assert_eq!(query.units(), Some("MTC"));
    }

    #[test]
    fn test_lookup_without_units() {
        let query = library().lookup(&["emissions", "no_units"]).unwrap();
        assert_eq!(query.units(), None);
    }

    #[test]
    fn test_lookup_nested() {
        let query = library().lookup(&["nested", "deeper", "query"]).unwrap();
        assert!(query.starts_with("marketplace/"));
    }

    #[test]
    fn test_lookup_missing_segment() {
        let err = library().lookup(&["emissions", "ch4"]).unwrap_err();
        assert_eq!(err, LookupError::NotFound { path: "[emissions, ch4]".to_string() });
        assert!(err.is_not_found());

        let err = library().lookup(&["emissions", "co2_emissions", "more"]).unwrap_err();
        assert!(matches!(err, LookupError::NotFound { .. }));
    }

    #[test]
    fn test_lookup_empty_definition() {
        let err = library().lookup(&["emissions", "empty"]).unwrap_err();
        assert!(matches!(err, LookupError::EmptyDefinition { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_lookup_category_is_not_a_query() {
        let err = library().lookup(&["emissions"]).unwrap_err();
        assert!(matches!(err, LookupError::InvalidDefinition { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_extra_entries_ignored() {
        let query = library().lookup(&["emissions", "extra"]).unwrap();
        assert_eq!(query.text(), "q");
        assert_eq!(query.units(), Some("u"));
    }

    #[test]
    fn test_non_string_units() {
        let err = library().lookup(&["emissions", "bad_units"]).unwrap_err();
        assert!(matches!(err, LookupError::InvalidDefinition { ref reason, .. } if reason.contains("units")));
    }

    #[test]
    fn test_query_paths() {
        let paths = library().query_paths();
        assert_eq!(paths.len(), 6);
        assert_eq!(paths[0], vec!["emissions", "co2_emissions"]);
        assert!(paths.contains(&vec!["nested".to_string(), "deeper".to_string(), "query".to_string()]));
        assert_eq!(library().categories(), vec!["emissions", "nested"]);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(parse_str("not: [valid: yaml").is_err());
        assert!(parse_str("- a list\n- not a mapping\n").is_err());
    }

    #[test]
    fn test_bundled_library() {
        let library = QueryLibrary::bundled();
        let query = library.lookup(&["emissions", "co2_emissions"]).unwrap();
        assert_eq!(query.units(), Some("MTC"));
        assert!(query.placeholders().is_ok());

        // every bundled query has well formed placeholders
        for path in library.query_paths() {
            let query = library.lookup(&path).unwrap();
            assert!(query.placeholders().is_ok(), "bad placeholders in {:?}", path);
        }
    }
}
