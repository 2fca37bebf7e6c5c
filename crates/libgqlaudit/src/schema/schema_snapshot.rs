use crate::schema::FieldKey;
use crate::schema::SchemaField;
use crate::schema::SchemaMalformedError;
use crate::schema::SchemaSnapshotBuilder;
use crate::schema::SchemaType;
use crate::schema::Result;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashSet;

/// An immutable, versioned type graph.
///
/// Type names are unique within a snapshot and field names are unique within
/// each type. Every `(type, field)` pair is also held in a secondary index
/// for constant-time membership tests (see [`SchemaSnapshot::has_field`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub(super) version: String,
    pub(super) query_type: String,
    pub(super) mutation_type: String,
    pub(super) subscription_type: String,
    pub(super) types: IndexMap<String, SchemaType>,

    #[serde(skip)]
    pub(super) field_index: HashSet<FieldKey>,
}
impl SchemaSnapshot {
    pub fn builder(version: impl Into<String>) -> SchemaSnapshotBuilder {
        SchemaSnapshotBuilder::new(version)
    }

    pub fn from_introspection_str(
        version: impl Into<String>,
        json: &str,
    ) -> Result<Self> {
        Ok(SchemaSnapshotBuilder::new(version)
            .load_introspection_str(json)?
            .build())
    }

    pub fn from_sdl_str(version: impl Into<String>, sdl: &str) -> Result<Self> {
        Ok(SchemaSnapshotBuilder::new(version)
            .load_sdl_str(sdl)?
            .build())
    }

    /// Decodes a snapshot previously produced by [`SchemaSnapshot::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (mut snapshot, _) =
            bincode::serde::decode_from_slice::<SchemaSnapshot, _>(
                bytes,
                bincode::config::standard(),
            ).map_err(|err| SchemaMalformedError::SnapshotDecodeError {
                err: err.to_string(),
            })?;
        snapshot.rebuild_field_index();
        Ok(snapshot)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|err| SchemaMalformedError::SnapshotEncodeError {
                err: err.to_string(),
            })
    }

    pub(super) fn rebuild_field_index(&mut self) {
        self.field_index = self.types.values()
            .flat_map(|type_| {
                type_.fields.keys().map(|field_name| {
                    FieldKey::new(type_.name.as_str(), field_name.as_str())
                })
            })
            .collect();
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn query_type_name(&self) -> &str {
        self.query_type.as_str()
    }

    pub fn mutation_type_name(&self) -> &str {
        self.mutation_type.as_str()
    }

    pub fn subscription_type_name(&self) -> &str {
        self.subscription_type.as_str()
    }

    pub fn types(&self) -> &IndexMap<String, SchemaType> {
        &self.types
    }

    pub fn get_type(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get_field(&self, type_name: &str, field_name: &str) -> Option<&SchemaField> {
        self.types.get(type_name)?.field(field_name)
    }

    pub fn has_field(&self, key: &FieldKey) -> bool {
        self.field_index.contains(key)
    }

    pub fn field_count(&self) -> usize {
        self.field_index.len()
    }
}
