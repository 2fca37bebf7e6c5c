use crate::extract::operation::FieldArguments;
use crate::extract::operation::OperationKind;
use crate::extract::operation::Selection;
use crate::extract::operation::SelectionPath;
use crate::extract::operation::SelectionSummary;
use serde::Deserialize;
use serde::Serialize;

/// A parsed query, mutation or subscription.
///
/// `selection_paths` lists a path for every selected field, in depth-first
/// pre-order, in the order fields appear in the source.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OperationAst {
    pub name: Option<String>,
    pub kind: OperationKind,
    pub variables: Vec<String>,
    pub directives: Vec<String>,
    pub selection_set: Vec<Selection>,
    pub selection_paths: Vec<SelectionPath>,
    pub fragment_spreads: Vec<String>,
    pub field_arguments: Vec<FieldArguments>,
}
impl OperationAst {
    pub fn new(
        name: Option<String>,
        kind: OperationKind,
        variables: Vec<String>,
        directives: Vec<String>,
        selection_set: Vec<Selection>,
    ) -> Self {
        let summary = SelectionSummary::from_selection_set(&selection_set);
        Self {
            name,
            kind,
            variables,
            directives,
            selection_set,
            selection_paths: summary.selection_paths,
            fragment_spreads: summary.fragment_spreads,
            field_arguments: summary.field_arguments,
        }
    }

    /// The operation's name, or `<anonymous>`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}
