//! Entity to model mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects,
//! plus the table layout behind each reaction target kind.

mod comment;
mod counters;
mod post;
mod user;

pub use counters::{tables_for, TargetTables};
