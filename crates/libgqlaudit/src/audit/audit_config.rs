use crate::surface::SurfaceRules;

/// Which passes an [`Auditor`](crate::audit::Auditor) runs.
#[derive(Clone, Debug, PartialEq)]
pub struct AuditConfig {
    /// Run the schema-independent surface validator.
    pub surface: bool,

    /// Diff two snapshots and check operations against the diff. Requires
    /// both snapshots.
    pub schema_evolution: bool,

    /// Also report the aggregate schema comparison (type and field
    /// additions, removals and deprecations) ahead of per-file issues.
    pub schema_changes: bool,

    pub rules: SurfaceRules,
}
impl AuditConfig {
    pub fn surface_only() -> Self {
        Self::default()
    }

    pub fn with_schema_evolution(mut self, enabled: bool) -> Self {
        self.schema_evolution = enabled;
        self
    }

    pub fn with_surface(mut self, enabled: bool) -> Self {
        self.surface = enabled;
        self
    }

    pub fn with_schema_changes(mut self, enabled: bool) -> Self {
        self.schema_changes = enabled;
        self
    }

    pub fn with_rules(mut self, rules: SurfaceRules) -> Self {
        self.rules = rules;
        self
    }
}
impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            surface: true,
            schema_evolution: false,
            schema_changes: false,
            rules: SurfaceRules::default(),
        }
    }
}
