pub mod mib;
pub mod oid;
pub mod value;

pub use oid::{Identifier, IdentifierError};
pub use value::{NormalizeError, NormalizedValue, QueryError, QueryResult, RawValue, Uptime};
