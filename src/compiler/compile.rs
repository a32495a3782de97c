//! Token list → filter fragment
//!
//! Rules, in order:
//! 1. `+`/`-` select the inclusion mode (see [`split_inclusion`])
//! 2. no operator defaults to `*` when getting data and `=` when setting it
//! 3. `*` matches anything and takes no operand; it cannot be combined with
//!    `+` when setting data
//! 4. setting data with `+`: the operator alone, the operand comes from the
//!    data being written
//! 5. otherwise: exactly an operator and an operand; name operands may not
//!    contain `/`, `[`, `]` or `,`

use tracing::warn;
use crate::fragment::{is_valid_operand, Comparator, FilterFragment, FilterKind};
use crate::query::{PlaceholderType, Token};
use super::error::ValidationError;
use super::inclusion::split_inclusion;

/// Integer operands above this are calendar years, at or below it model periods
const YEAR_THRESHOLD: i64 = 1000;

/// Compile the tokens for a `year` placeholder
pub fn compile_int_param(tokens: &[Token], is_get_data: bool) -> Result<FilterFragment, ValidationError> {
    compile_param(PlaceholderType::Year, tokens, is_get_data)
}

/// Compile the tokens for a `name` placeholder
pub fn compile_str_param(tokens: &[Token], is_get_data: bool) -> Result<FilterFragment, ValidationError> {
    compile_param(PlaceholderType::Name, tokens, is_get_data)
}

/// Compile the tokens for a placeholder of the given type
pub fn compile_param(
    ty: PlaceholderType,
    tokens: &[Token],
    is_get_data: bool,
) -> Result<FilterFragment, ValidationError> {
    let (inclusion, rest) = split_inclusion(tokens);
    let forced_write = !is_get_data && inclusion.is_included();

    let implicit = Token::from(if is_get_data { "*" } else { "=" });
    let rest = if rest.is_empty() { vec![&implicit] } else { rest };

    let operator = rest[0];
    if operator.is("*") {
        if forced_write {
            return Err(ValidationError::MatchAnyWithInclusion {
                tokens: render_tokens(tokens),
            });
        }
        return Ok(FilterFragment::matches_any(inclusion, base_kind(ty)));
    }

    let comparator = lookup_comparator(ty, operator)?;

    if forced_write {
        if rest.len() > 1 {
            warn!(
                "ignoring operand in {} for {} placeholder: values come from the data being set",
                render_tokens(tokens),
                ty
            );
        }
        return Ok(FilterFragment::new(inclusion, base_kind(ty), comparator));
    }

    if rest.len() != 2 {
        return Err(ValidationError::InvalidSpec {
            tokens: render_tokens(tokens),
        });
    }
    let operand = rest[1];

    match ty {
        PlaceholderType::Year => {
            let value = operand.as_int().ok_or_else(|| ValidationError::NonIntegerOperand {
                operand: operand.to_string(),
                tokens: render_tokens(tokens),
            })?;
            // four digit values look like dates, anything else is a model period
            let kind = if value > YEAR_THRESHOLD { FilterKind::Year } else { FilterKind::Index };
            Ok(FilterFragment::new(inclusion, kind, comparator).with_operand(value.to_string()))
        }
        PlaceholderType::Name => {
            let operand = operand.to_string();
            if !is_valid_operand(&operand) {
                return Err(ValidationError::InvalidOperand {
                    operand,
                    tokens: render_tokens(tokens),
                });
            }
            Ok(FilterFragment::new(inclusion, FilterKind::Named, comparator).with_operand(operand))
        }
    }
}

/// Tokens used for a placeholder the caller gave no parameters for
///
/// Years are always carried as a result column: matched by anything when
/// getting data, taken from the data when setting it. Names collapse when
/// getting data and are taken from the data when setting it.
pub fn default_tokens(ty: PlaceholderType, is_get_data: bool) -> Vec<Token> {
    let tokens: &[&str] = match (ty, is_get_data) {
        (PlaceholderType::Year, true) => &["+", "*"],
        (PlaceholderType::Name, true) => &["*"],
        (_, false) => &["+", "="],
    };
    tokens.iter().map(|t| Token::from(*t)).collect()
}

/// Compile the default fragment for a placeholder with no user parameters
pub fn compile_default(ty: PlaceholderType, is_get_data: bool) -> Result<FilterFragment, ValidationError> {
    compile_param(ty, &default_tokens(ty, is_get_data), is_get_data)
}

fn base_kind(ty: PlaceholderType) -> FilterKind {
    match ty {
        PlaceholderType::Year => FilterKind::Year,
        PlaceholderType::Name => FilterKind::Named,
    }
}

fn lookup_comparator(ty: PlaceholderType, operator: &Token) -> Result<Comparator, ValidationError> {
    let found = operator.as_str().and_then(|op| match ty {
        PlaceholderType::Year => Comparator::from_int_operator(op),
        PlaceholderType::Name => Comparator::from_str_operator(op),
    });
    found.ok_or_else(|| ValidationError::UnknownComparator {
        operator: operator.to_string(),
        placeholder_type: ty.to_string(),
    })
}

fn render_tokens(tokens: &[Token]) -> String {
    let parts: Vec<String> = tokens.iter().map(|t| format!("'{}'", t)).collect();
    format!("[{}]", parts.join(", "))
}
