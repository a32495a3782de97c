use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use crate::error::ParseError;

/// A single parameter token: an operator (`+ - * = < <= > >= =~`) or an operand
///
/// Operands may be written as integers or strings in parameter files, so
/// `2020` and `"2020"` both deserialize. Floats, booleans and nulls are
/// rejected with the offending value in the message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Token {
    Int(i64),
    Text(String),
}

impl Token {
    /// The token as text, if it was given as text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Token::Text(s) => Some(s),
            Token::Int(_) => None,
        }
    }

    /// Check whether this token is exactly the given operator
    pub fn is(&self, op: &str) -> bool {
        self.as_str() == Some(op)
    }

    /// Interpret the token as an integer operand
    ///
    /// Text tokens are accepted when they parse as an integer after trimming.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Token::Int(n) => Some(*n),
            Token::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenVisitor;

        impl<'de> Visitor<'de> for TokenVisitor {
            type Value = Token;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an operator, a name or an integer")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Token, E> {
                Ok(Token::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Token, E> {
                i64::try_from(v)
                    .map(Token::Int)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Token, E> {
                Ok(Token::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Token, E> {
                Ok(Token::Text(v))
            }
        }

        deserializer.deserialize_any(TokenVisitor)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(n) => write!(f, "{}", n),
            Token::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Text(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token::Text(s)
    }
}

impl From<i64> for Token {
    fn from(n: i64) -> Self {
        Token::Int(n)
    }
}

impl From<i32> for Token {
    fn from(n: i32) -> Self {
        Token::Int(n.into())
    }
}

/// User filter parameters: tag → ordered token list
///
/// ```yaml
/// region: ["=~", "^US"]
/// year: ["+", "="]
/// ```
///
/// Tags missing from the map are legal; the composer substitutes a
/// type-specific default for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSpec {
    params: BTreeMap<String, Vec<Token>>,
}

impl ParamSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tokens for a tag, replacing any previous entry
    pub fn insert<I, T>(&mut self, tag: impl Into<String>, tokens: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        self.params
            .insert(tag.into(), tokens.into_iter().map(Into::into).collect());
    }

    /// Builder form of [`ParamSpec::insert`]
    pub fn with<I, T>(mut self, tag: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        self.insert(tag, tokens);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&[Token]> {
        self.params.get(tag).map(Vec::as_slice)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.params.contains_key(tag)
    }

    /// Iterate over (tag, tokens) in tag order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Token])> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parse a parameter spec from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ParseError> {
        serde_yaml::from_str(yaml).map_err(ParseError::from)
    }

    /// Parse a parameter spec from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(ParseError::from)
    }

    /// Load a parameter spec from a file; `.json` files are read as JSON, anything else as YAML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ParseError::io(path.display().to_string(), e))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ParamSpec
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<Token>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut spec = ParamSpec::new();
        for (tag, tokens) in iter {
            spec.insert(tag, tokens);
        }
        spec
    }
}
