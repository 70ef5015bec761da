//! Splitting and classification of raw menu input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::errors::QueryError;
use crate::domain::model::{Action, Query, QueryValue};

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]+").expect("valid separator"));
static SPACED_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d)\s*-\s+(\d)").expect("valid spaced range"));
static RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*-\s*(\d+)$").expect("valid range pattern"));
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid integer pattern"));

/// Split a raw line into sub-query tokens.
///
/// Commas and whitespace separate tokens; everything else, including `/`, stays inside a token so
/// path-like names survive. A blank line produces no tokens.
pub fn split(line: &str) -> Vec<String> {
    let joined = SPACED_RANGE.replace_all(line.trim(), "$1-$2");
    SEPARATORS
        .split(&joined)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Classify a single token.
pub fn classify(token: &str) -> Result<Query, QueryError> {
    let normalized = token.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(QueryError::invalid(token, "empty sub-query"));
    }

    let (action, body) = match normalized.strip_prefix('-') {
        Some(rest) => (Action::Unselect, rest),
        None => (Action::Select, normalized.as_str()),
    };
    if body.is_empty() {
        return Err(QueryError::invalid(token, "sign without a target"));
    }

    Ok(Query {
        raw: token.to_owned(),
        action,
        value: classify_body(body),
    })
}

/// Split and classify a whole line. The first malformed token rejects the line.
pub fn parse_line(line: &str) -> Result<Vec<Query>, QueryError> {
    split(line).iter().map(|token| classify(token)).collect()
}

fn classify_body(body: &str) -> QueryValue {
    if let Some(range) = parse_range(body) {
        return range;
    }
    if INTEGER.is_match(body)
        && let Ok(id) = body.parse::<u32>()
    {
        return QueryValue::Id(id);
    }
    if body == "*" {
        return QueryValue::All;
    }
    QueryValue::Name(body.to_owned())
}

fn parse_range(body: &str) -> Option<QueryValue> {
    let captures = RANGE.captures(body)?;
    let min = captures.get(1)?.as_str().parse().ok()?;
    let max = captures.get(2)?.as_str().parse().ok()?;
    Some(QueryValue::Range { min, max })
}
