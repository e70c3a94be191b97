//! Query validation for upstream calls.
//!
//! # Rules
//! - `what` is required and must be one of `loc`, `wx`, `enter`, `list`
//! - `loc` and `wx` additionally need `name` or `lat`
//!
//! Empty values count as missing. `lat` without `lng` is accepted; the
//! upstream rejects incomplete coordinates on its own.

use crate::params::query::QueryParams;

/// Query types the upstream API understands.
pub const QUERY_TYPES: [&str; 4] = ["loc", "wx", "enter", "list"];

/// Outcome of validating a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(String),
}

/// Check that the parameters form a query the upstream will accept.
pub fn validate(params: &QueryParams) -> Validation {
    let Some(what) = params.get_non_empty("what") else {
        return Validation::Invalid("Missing required parameter: what".to_string());
    };

    if !QUERY_TYPES.contains(&what) {
        return Validation::Invalid(format!(
            "Invalid \"what\" parameter. Must be one of: {}",
            QUERY_TYPES.join(", ")
        ));
    }

    if matches!(what, "loc" | "wx")
        && params.get_non_empty("name").is_none()
        && params.get_non_empty("lat").is_none()
    {
        return Validation::Invalid(format!(
            "Missing required parameter for {} query: name or lat/lng",
            what
        ));
    }

    Validation::Valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(query: &str) -> Validation {
        validate(&QueryParams::parse(query))
    }

    fn accepted(query: &str) -> bool {
        check(query) == Validation::Valid
    }

    #[test]
    fn test_missing_what() {
        assert_eq!(
            check("apikey=k"),
            Validation::Invalid("Missing required parameter: what".into())
        );
        assert_eq!(
            check("what=&name=X"),
            Validation::Invalid("Missing required parameter: what".into())
        );
    }

    #[test]
    fn test_unknown_what() {
        assert_eq!(
            check("what=bogus"),
            Validation::Invalid(
                "Invalid \"what\" parameter. Must be one of: loc, wx, enter, list".into()
            )
        );
        // Case-sensitive
        assert!(!accepted("what=LOC&name=X"));
    }

    #[test]
    fn test_loc_and_wx_need_target() {
        assert_eq!(
            check("what=loc"),
            Validation::Invalid("Missing required parameter for loc query: name or lat/lng".into())
        );
        assert_eq!(
            check("what=wx&lng=24.9"),
            Validation::Invalid("Missing required parameter for wx query: name or lat/lng".into())
        );
        assert!(!accepted("what=loc&name="));
    }

    #[test]
    fn test_accepted_queries() {
        assert!(accepted("what=loc&name=OH7RDA"));
        assert!(accepted("what=wx&name=OH2TI"));
        assert!(accepted("what=loc&lat=45.0"));
        assert!(accepted("what=enter"));
        assert!(accepted("what=list"));
    }

    #[test]
    fn test_first_what_wins() {
        assert!(accepted("what=list&what=bogus"));
        assert!(!accepted("what=bogus&what=list"));
    }
}
