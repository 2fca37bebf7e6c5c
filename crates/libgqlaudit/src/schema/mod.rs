mod field_key;
mod introspection;
mod schema_argument;
mod schema_field;
mod schema_malformed_error;
mod schema_snapshot;
mod schema_snapshot_builder;
mod schema_type;
mod schema_type_kind;
mod sdl;

pub use field_key::FieldKey;
pub use schema_argument::SchemaArgument;
pub(crate) use schema_argument::strip_type_wrappers;
pub use schema_field::SchemaField;
pub use schema_malformed_error::SchemaMalformedError;
pub use schema_snapshot::SchemaSnapshot;
pub use schema_snapshot_builder::SchemaSnapshotBuilder;
pub use schema_type::SchemaType;
pub use schema_type_kind::SchemaTypeKind;

type Result<T> = std::result::Result<T, SchemaMalformedError>;

#[cfg(test)]
mod tests;
