//! Query parameter handling.
//!
//! # Data Flow
//! ```text
//! raw query string
//!     → query.rs (parse into ordered multimap)
//!     → query::sanitize (drop client apikey, inject server credential)
//!     → validation.rs (what / name / lat rules)
//!     → query.rs (serialize for the upstream URL)
//! ```

pub mod query;
pub mod validation;

pub use query::{sanitize, QueryParams, API_KEY_PARAM};
pub use validation::{validate, Validation, QUERY_TYPES};
