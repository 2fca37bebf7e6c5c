use crate::schema::introspection;
use crate::schema::sdl;
use crate::schema::Result;
use crate::schema::SchemaSnapshot;
use crate::schema::SchemaType;
use indexmap::IndexMap;
use std::collections::HashSet;

const DEFAULT_QUERY_TYPE_NAMES: [&str; 2] = ["QueryRoot", "Query"];
const DEFAULT_MUTATION_TYPE_NAME: &str = "Mutation";
const DEFAULT_SUBSCRIPTION_TYPE_NAME: &str = "Subscription";

/// Utility for building a [`SchemaSnapshot`] from one or more schema
/// descriptions.
///
/// ```
/// use libgqlaudit::schema::SchemaSnapshotBuilder;
///
/// let snapshot = SchemaSnapshotBuilder::new("2024-01")
///     .load_sdl_str("type Query { shop: Shop } type Shop { name: String! }")
///     .unwrap()
///     .build();
///
/// assert_eq!(snapshot.version(), "2024-01");
/// assert!(snapshot.get_field("Shop", "name").is_some());
/// ```
#[derive(Debug)]
pub struct SchemaSnapshotBuilder {
    pub(super) mutation_type: Option<String>,
    pub(super) query_type: Option<String>,
    pub(super) subscription_type: Option<String>,
    pub(super) types: IndexMap<String, SchemaType>,
    version: String,
}
impl SchemaSnapshotBuilder {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            mutation_type: None,
            query_type: None,
            subscription_type: None,
            types: IndexMap::new(),
            version: version.into(),
        }
    }

    /// Loads an introspection result. Accepts the full response envelope
    /// (`{"data": {"__schema": ...}}`), the `{"__schema": ...}` object or the
    /// bare schema object.
    pub fn load_introspection_str(self, json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        self.load_introspection_value(&value)
    }

    pub fn load_introspection_value(
        mut self,
        value: &serde_json::Value,
    ) -> Result<Self> {
        introspection::load(&mut self, value)?;
        Ok(self)
    }

    pub fn load_sdl_str(mut self, sdl_source: &str) -> Result<Self> {
        sdl::load(&mut self, sdl_source)?;
        Ok(self)
    }

    /// Adds `type_`, keeping the first definition when the name is taken.
    pub fn add_type(&mut self, type_: SchemaType) -> bool {
        if self.types.contains_key(&type_.name) {
            log::warn!(
                "Ignoring duplicate definition of type `{}` in schema `{}`.",
                type_.name,
                self.version,
            );
            return false;
        }
        self.types.insert(type_.name.to_string(), type_);
        true
    }

    pub fn build(self) -> SchemaSnapshot {
        let query_type = self.query_type.unwrap_or_else(|| {
            DEFAULT_QUERY_TYPE_NAMES.iter()
                .find(|name| self.types.contains_key(**name))
                .unwrap_or(&DEFAULT_QUERY_TYPE_NAMES[1])
                .to_string()
        });

        let mut snapshot = SchemaSnapshot {
            version: self.version,
            query_type,
            mutation_type: self.mutation_type
                .unwrap_or_else(|| DEFAULT_MUTATION_TYPE_NAME.to_string()),
            subscription_type: self.subscription_type
                .unwrap_or_else(|| DEFAULT_SUBSCRIPTION_TYPE_NAME.to_string()),
            types: self.types,
            field_index: HashSet::new(),
        };
        snapshot.rebuild_field_index();

        log::debug!(
            "Built schema snapshot `{}` with {} types and {} fields.",
            snapshot.version,
            snapshot.types.len(),
            snapshot.field_index.len(),
        );
        snapshot
    }
}
