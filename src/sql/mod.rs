//! SQL text for the `todo` table: identifiers are fixed, values always bound as parameters.

mod builder;
pub use builder::*;
