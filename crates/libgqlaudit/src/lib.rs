//! Static auditing of GraphQL operations and data-model definitions that are
//! embedded in a codebase.
//!
//! The crate is a pure core: it turns source text into
//! [`ExtractedBlock`](extract::ExtractedBlock)s, checks them structurally
//! with the [`surface`] validator, compares two
//! [`SchemaSnapshot`](schema::SchemaSnapshot)s with the [`evolution`] engine
//! and hands back an ordered sequence of [`Issue`](issue::Issue)s. It never
//! prints or formats anything.

pub mod audit;
pub mod evolution;
pub mod extract;
pub mod issue;
pub mod loc;
pub mod schema;
pub mod surface;

#[cfg(test)]
mod test;
