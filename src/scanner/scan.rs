//! Placeholder extraction
//!
//! A placeholder is any `{...}` run of word characters and `@`. Anything
//! matched this way must then be a well formed `tag@type` pair.

use regex::Regex;
use std::sync::OnceLock;
use crate::query::{PlaceholderMap, PlaceholderType};
use super::error::SyntaxError;

/// The placeholder pattern; capture group 1 is the text between the braces
pub(crate) fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([\w@]+)\}").expect("placeholder pattern is valid")
    })
}

/// Find all placeholders in a raw query
///
/// Returns the tags mapped to their types, e.g. `{region@name}` and
/// `{year@year}` give `region → Name, year → Year`.
///
/// # Errors
/// * [`SyntaxError::InvalidPlaceholder`] if a placeholder is not exactly `tag@type`
///   with a non-empty tag
/// * [`SyntaxError::UnknownType`] if the type is not `name` or `year`
/// * [`SyntaxError::DuplicateTag`] if a tag is used twice, even with the same type
pub fn find_placeholders(query: &str) -> Result<PlaceholderMap, SyntaxError> {
    let mut placeholders = PlaceholderMap::new();

    for caps in placeholder_regex().captures_iter(query) {
        let placeholder = &caps[1];
        let parts: Vec<&str> = placeholder.split('@').collect();
        if parts.len() != 2 || parts[0].is_empty() {
            return Err(SyntaxError::InvalidPlaceholder(placeholder.to_string()));
        }
        let (tag, type_name) = (parts[0], parts[1]);

        let ty = PlaceholderType::parse(type_name).ok_or_else(|| SyntaxError::UnknownType {
            placeholder: placeholder.to_string(),
            type_name: type_name.to_string(),
        })?;

        if !placeholders.insert(tag, ty) {
            return Err(SyntaxError::DuplicateTag {
                tag: tag.to_string(),
                query: query.to_string(),
            });
        }
    }

    Ok(placeholders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_placeholders() {
        let placeholders =
            find_placeholders("world/region{region@name}/sector{sector@name}/period{year@year}")
                .unwrap();

        assert_eq!(placeholders.len(), 3);
        assert_eq!(placeholders.tags(), vec!["region", "sector", "year"]);
        assert_eq!(placeholders.get("region"), Some(PlaceholderType::Name));
        assert_eq!(placeholders.get("year"), Some(PlaceholderType::Year));
    }

    #[test]
    fn test_no_placeholders() {
        let placeholders = find_placeholders("world/region[NamedFilter,MatchesAny]/gdp").unwrap();
        assert!(placeholders.is_empty());
    }

    #[test]
    fn test_braces_with_other_characters_are_not_placeholders() {
        // Spaces and punctuation fall outside the pattern
        let placeholders = find_placeholders("a{not a tag} b{x-y@name} c{}").unwrap();
        assert!(placeholders.is_empty());
    }

    #[test]
    fn test_missing_type() {
        let err = find_placeholders("region{region}").unwrap_err();
        assert_eq!(err, SyntaxError::InvalidPlaceholder("region".to_string()));
    }

    #[test]
    fn test_too_many_parts() {
        let err = find_placeholders("region{region@name@year}").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidPlaceholder(p) if p == "region@name@year"));
    }

    #[test]
    fn test_empty_tag() {
        let err = find_placeholders("p{@name}").unwrap_err();
        assert_eq!(err, SyntaxError::InvalidPlaceholder("@name".to_string()));
    }

    #[test]
    fn test_unknown_type() {
        let err = find_placeholders("region{region@string}").unwrap_err();
        assert!(matches!(
            err,
            SyntaxError::UnknownType { ref type_name, .. } if type_name == "string"
        ));
        assert!(err.to_string().contains("region@string"));
    }

    #[test]
    fn test_duplicate_tag() {
        let err = find_placeholders("period{year@year}/vintage{year@year}").unwrap_err();
        assert!(matches!(err, SyntaxError::DuplicateTag { ref tag, .. } if tag == "year"));

        // Same tag with a different type is still a duplicate
        let err = find_placeholders("a{x@name}/b{x@year}").unwrap_err();
        assert!(matches!(err, SyntaxError::DuplicateTag { .. }));
    }
}
