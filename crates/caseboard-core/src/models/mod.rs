//! Domain models for the caseboard system.

mod case;
mod form;
mod query;
mod seed;

pub use case::*;
pub use form::*;
pub use query::*;
pub use seed::*;
