use crate::extract::operation::Argument;
use crate::extract::operation::is_placeholder_name;
use crate::extract::operation::Selection;
use crate::extract::operation::SelectionPath;
use serde::Deserialize;
use serde::Serialize;

/// The arguments passed to the field at `path`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldArguments {
    pub path: SelectionPath,
    pub arguments: Vec<Argument>,
}

/// Everything the validators need from a selection tree, flattened in
/// depth-first pre-order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct SelectionSummary {
    pub field_arguments: Vec<FieldArguments>,
    pub fragment_spreads: Vec<String>,
    pub selection_paths: Vec<SelectionPath>,
}
type PendingSelections<'a> = (std::slice::Iter<'a, Selection>, SelectionPath, Option<&'a str>);

impl SelectionSummary {
    pub fn from_selection_set(selection_set: &[Selection]) -> Self {
        let mut summary = Self::default();
        summary.visit(selection_set);
        summary
    }

    /// Walks the tree with an explicit stack so arbitrarily deep selection
    /// sets cannot exhaust the call stack.
    fn visit(&mut self, selection_set: &[Selection]) {
        let mut stack: Vec<PendingSelections<'_>> =
            vec![(selection_set.iter(), SelectionPath::new(), None)];
        while let Some((selections, parent_path, on_type)) = stack.last_mut() {
            let Some(selection) = selections.next() else {
                stack.pop();
                continue;
            };
            match selection {
                Selection::Field(field) => {
                    // Interpolated names cannot be resolved, and neither can
                    // anything beneath them.
                    if is_placeholder_name(&field.name) {
                        continue;
                    }
                    let path = parent_path.child(&field.name, *on_type);
                    self.selection_paths.push(path.clone());
                    if !field.arguments.is_empty() {
                        self.field_arguments.push(FieldArguments {
                            path: path.clone(),
                            arguments: field.arguments.clone(),
                        });
                    }
                    if let Some(sub_selections) = &field.selection_set {
                        stack.push((sub_selections.iter(), path, None));
                    }
                },

                Selection::FragmentSpread(spread) => {
                    if !is_placeholder_name(&spread.name)
                        && !self.fragment_spreads.contains(&spread.name) {
                        self.fragment_spreads.push(spread.name.to_string());
                    }
                },

                Selection::InlineFragment(inline) => {
                    let on_type = inline.type_condition.as_deref().or(*on_type);
                    let path = parent_path.clone();
                    stack.push((inline.selection_set.iter(), path, on_type));
                },
            }
        }
    }
}
