use std::collections::HashMap;
use tracing::{debug, warn};
use crate::compiler::{compile_default, compile_param};
use crate::query::{ParamSpec, PlaceholderMap};
use crate::scanner::{find_placeholders, placeholder_regex, SyntaxError};
use super::error::ComposeError;

/// Translate a raw query into the engine's filter syntax
///
/// Every `{tag@type}` placeholder is replaced by a compiled filter fragment:
/// - tags present in `params` are compiled from the user's tokens
///   (`name` tags with the string rules, `year` tags with the integer rules)
/// - tags absent from `params` get their type's default fragment
///
/// Parameters naming a tag the query does not contain are dropped with a
/// warning. `is_get_data` selects get-data (read) or set-data (write) rules.
///
/// # Example
/// ```
/// use fusion_query::{apply_query_params, ParamSpec};
///
/// let params = ParamSpec::new().with("region", ["=", "USA"]);
/// let query = apply_query_params("get {region@name} {year@year}", &params, true).unwrap();
/// assert_eq!(query, "get [NamedFilter,StringEquals,USA] [+YearFilter,MatchesAny]");
/// ```
pub fn apply_query_params(
    query: &str,
    params: &ParamSpec,
    is_get_data: bool,
) -> Result<String, ComposeError> {
    let placeholders = find_placeholders(query)?;
    let mut substitutions: HashMap<String, String> = HashMap::with_capacity(placeholders.len());

    for (tag, tokens) in params.iter() {
        let Some(ty) = placeholders.get(tag) else {
            warn!("ignoring parameter '{}': no placeholder with that tag in {}", tag, query);
            continue;
        };
        let fragment = compile_param(ty, tokens, is_get_data).map_err(|source| {
            ComposeError::Validation {
                tag: tag.to_string(),
                source,
            }
        })?;
        debug!(tag, fragment = %fragment, "compiled query parameter");
        substitutions.insert(PlaceholderMap::key(tag, ty), fragment.to_string());
    }

    for (tag, ty) in placeholders.iter() {
        if params.contains(tag) {
            continue;
        }
        let fragment = compile_default(ty, is_get_data).map_err(|source| {
            ComposeError::Validation {
                tag: tag.to_string(),
                source,
            }
        })?;
        substitutions.insert(PlaceholderMap::key(tag, ty), fragment.to_string());
    }

    Ok(substitute(query, &substitutions)?)
}

/// Replace each `{tag@type}` in `query` with its entry in `substitutions`
///
/// Lookup is by the `tag@type` key, not by position.
///
/// # Errors
/// [`SyntaxError::UnresolvedPlaceholder`] if a placeholder has no entry.
pub fn substitute(query: &str, substitutions: &HashMap<String, String>) -> Result<String, SyntaxError> {
    let mut out = String::with_capacity(query.len());
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(query) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let fragment = substitutions
            .get(key.as_str())
            .ok_or_else(|| SyntaxError::UnresolvedPlaceholder(key.as_str().to_string()))?;
        out.push_str(&query[last..whole.start()]);
        out.push_str(fragment);
        last = whole.end();
    }

    out.push_str(&query[last..]);
    Ok(out)
}
