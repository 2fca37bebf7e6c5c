use crate::extract::operation::FieldArguments;
use crate::extract::operation::Selection;
use crate::extract::operation::SelectionPath;
use crate::extract::operation::SelectionSummary;
use serde::Deserialize;
use serde::Serialize;

/// A named fragment, e.g. `fragment OrderParts on Order { id }`.
///
/// Selection paths are rooted at `type_condition`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub directives: Vec<String>,
    pub selection_set: Vec<Selection>,
    pub selection_paths: Vec<SelectionPath>,
    pub fragment_spreads: Vec<String>,
    pub field_arguments: Vec<FieldArguments>,
}
impl FragmentDefinition {
    pub fn new(
        name: String,
        type_condition: String,
        directives: Vec<String>,
        selection_set: Vec<Selection>,
    ) -> Self {
        let summary = SelectionSummary::from_selection_set(&selection_set);
        Self {
            name,
            type_condition,
            directives,
            selection_set,
            selection_paths: summary.selection_paths,
            fragment_spreads: summary.fragment_spreads,
            field_arguments: summary.field_arguments,
        }
    }
}
