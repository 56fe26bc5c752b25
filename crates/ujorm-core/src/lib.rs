//! Key metamodel and criterion algebra.
//!
//! A [`meta::Key`] describes one named, typed attribute of an entity. A
//! [`criterion::Criterion`] is an immutable predicate tree built from keys,
//! operators and right-hand operands. Trees evaluate directly against
//! entities, and an external query layer can walk them to produce SQL.

mod error;
pub use error::{Error, IntoError};

pub mod meta;
pub use meta::{Entity, Key};

pub mod criterion;
pub use criterion::Criterion;

/// A Result type alias that uses the crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
