use crate::fragment::Inclusion;
use crate::query::Token;

/// Separate the inclusion tokens (`+`, `-`) from the rest of a token list
///
/// `+` wins when both are present. With neither present the fragment is
/// filter-only ([`Inclusion::Exclude`]), so `-` never changes the result; it
/// is accepted and dropped. The input is left untouched; the remaining tokens are returned
/// in their original order.
pub fn split_inclusion(tokens: &[Token]) -> (Inclusion, Vec<&Token>) {
    let mut include = false;
    let mut rest = Vec::with_capacity(tokens.len());

    for token in tokens {
        if token.is("+") {
            include = true;
        } else if !token.is("-") {
            rest.push(token);
        }
    }

    let inclusion = if include { Inclusion::Include } else { Inclusion::Exclude };
    (inclusion, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<Token> {
        items.iter().map(|s| Token::from(*s)).collect()
    }

    #[test]
    fn test_no_inclusion_token() {
        let input = tokens(&["=", "USA"]);
        let (inclusion, rest) = split_inclusion(&input);
        assert_eq!(inclusion, Inclusion::Exclude);
        assert_eq!(rest, vec![&input[0], &input[1]]);
    }

    #[test]
    fn test_plus_and_minus() {
        let input = tokens(&["+", "="]);
        assert_eq!(split_inclusion(&input).0, Inclusion::Include);

        let input = tokens(&["-", "=", "USA"]);
        let (inclusion, rest) = split_inclusion(&input);
        assert_eq!(inclusion, Inclusion::Exclude);
        assert_eq!(rest.len(), 2);

        // plus wins
        let input = tokens(&["-", "+", "*"]);
        let (inclusion, rest) = split_inclusion(&input);
        assert_eq!(inclusion, Inclusion::Include);
        assert_eq!(rest, vec![&Token::from("*")]);
    }

    #[test]
    fn test_minus_matches_no_marker() {
        let with_minus = tokens(&["-", "=", "2020"]);
        let without = tokens(&["=", "2020"]);
        let (a, rest_a) = split_inclusion(&with_minus);
        let (b, rest_b) = split_inclusion(&without);
        assert_eq!(a, b);
        assert_eq!(rest_a, rest_b);
    }

    #[test]
    fn test_input_is_not_modified() {
        let input = tokens(&["+", "=", "2020"]);
        let _ = split_inclusion(&input);
        assert_eq!(input.len(), 3);
    }
}
