//! Capture-path parser.
//!
//! A capture path selects a slice of a function module's result:
//! `NAME` captures the whole value of parameter NAME, `NAME[FIELD]`
//! captures column FIELD across every row of table parameter NAME.
//! This is deliberately a single-pass tokenizer, not an expression
//! grammar; nested brackets and multi-field selectors are rejected.

use crate::utils::error::ExtractError;

/// A parsed capture path.
///
/// Identity is the literal source string: `T[F]` and `t[f]` are distinct
/// paths, no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    raw: String,
    name: String,
    field: Option<String>,
}

impl PathExpr {
    /// Parse a capture path of the form `NAME` or `NAME[FIELD]`
    pub fn parse(raw: &str) -> Result<Self, ExtractError> {
        let malformed = |reason: &str| ExtractError::MalformedPath {
            raw: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(malformed("empty path"));
        }

        let Some(open) = raw.find('[') else {
            // Whole-parameter capture; a stray ']' is an unmatched bracket
            if raw.contains(']') {
                return Err(malformed("unmatched ']'"));
            }
            return Ok(Self {
                raw: raw.to_string(),
                name: raw.to_string(),
                field: None,
            });
        };

        let name = &raw[..open];
        if name.is_empty() {
            return Err(malformed("missing parameter name before '['"));
        }
        if name.contains(']') {
            return Err(malformed("unmatched ']'"));
        }

        let rest = &raw[open + 1..];
        let Some(close) = rest.find(']') else {
            return Err(malformed("unmatched '['"));
        };

        let field = &rest[..close];
        if field.is_empty() {
            return Err(malformed("empty field selector"));
        }
        if field.contains('[') {
            return Err(malformed("nested '[' in field selector"));
        }
        if !rest[close + 1..].is_empty() {
            return Err(malformed("trailing characters after ']'"));
        }

        Ok(Self {
            raw: raw.to_string(),
            name: name.to_string(),
            field: Some(field.to_string()),
        })
    }

    /// The literal capture string, used as the output document key
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parameter name being captured
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The table column selector, if this is a field capture
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}
