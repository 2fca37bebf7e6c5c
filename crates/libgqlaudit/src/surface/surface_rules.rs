use serde::Deserialize;
use serde::Serialize;

/// Tunables for the [`SurfaceValidator`](crate::surface::SurfaceValidator).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceRules {
    /// When set, subscription operations are not flagged.
    pub allow_subscriptions: bool,

    /// Extra field names that should be treated as scalar leaves in
    /// addition to the built-in naming heuristics.
    pub scalar_leaf_names: Vec<String>,
}
impl SurfaceRules {
    pub fn allow_subscriptions(mut self, allow: bool) -> Self {
        self.allow_subscriptions = allow;
        self
    }

    pub fn with_scalar_leaf_name(mut self, name: impl Into<String>) -> Self {
        self.scalar_leaf_names.push(name.into());
        self
    }
}
