use crate::extract::BlockContent;
use crate::extract::ExtractedBlock;
use crate::extract::operation::OperationKind;
use crate::extract::operation::Selection;
use crate::issue::Issue;
use crate::issue::IssueCode;
use crate::surface::SurfaceRules;
use crate::surface::looks_like_scalar_leaf;
use std::collections::HashSet;

/// Checks one operation or fragment block. Every issue is attached at the
/// block's location.
pub(super) struct OperationValidator<'a> {
    block: &'a ExtractedBlock,
    issues: Vec<Issue>,
    known_fragments: &'a HashSet<&'a str>,
    rules: &'a SurfaceRules,
}
impl<'a> OperationValidator<'a> {
    pub fn new(
        block: &'a ExtractedBlock,
        known_fragments: &'a HashSet<&'a str>,
        rules: &'a SurfaceRules,
    ) -> Self {
        Self {
            block,
            issues: vec![],
            known_fragments,
            rules,
        }
    }

    pub fn validate(mut self) -> Vec<Issue> {
        let block = self.block;
        let (label, selection_set) = match &block.content {
            BlockContent::Operation(operation) => {
                if operation.name.is_none() {
                    self.push(
                        IssueCode::OperationUnnamed,
                        format!("Anonymous {} operation", operation.kind),
                    );
                }
                if operation.kind == OperationKind::Subscription && !self.rules.allow_subscriptions {
                    self.push(
                        IssueCode::SubscriptionDisallowed,
                        format!(
                            "Subscription `{}` is not allowed in this codebase",
                            operation.display_name(),
                        ),
                    );
                }
                (block.describe(), &operation.selection_set)
            },
            BlockContent::Fragment(fragment) => (block.describe(), &fragment.selection_set),
            BlockContent::Model(_) => return self.issues,
        };

        if selection_set.is_empty() {
            self.push(
                IssueCode::EmptySelectionSet,
                format!("`{label}` selects no fields"),
            );
        }
        self.check_selections(selection_set);

        for spread in block.fragment_spreads() {
            if !self.known_fragments.contains(spread.as_str()) {
                self.push(
                    IssueCode::DanglingFragmentSpread,
                    format!("`{label}` spreads fragment `{spread}`, which is not defined"),
                );
            }
        }

        self.issues
    }

    fn push(&mut self, code: IssueCode, message: String) {
        self.issues.push(Issue::new(code, message, self.block.location.clone()));
    }

    fn check_selections(&mut self, selections: &[Selection]) {
        for selection in selections {
            match selection {
                Selection::Field(field) => {
                    let Some(sub_selections) = &field.selection_set else {
                        continue;
                    };
                    if looks_like_scalar_leaf(&field.name, &self.rules.scalar_leaf_names) {
                        self.push(
                            IssueCode::ScalarLeafHasSelection,
                            format!(
                                "Field `{}` looks like a scalar but has a selection set",
                                field.name,
                            ),
                        );
                    }
                    if sub_selections.is_empty() {
                        self.push(
                            IssueCode::EmptySelectionSet,
                            format!("Field `{}` has an empty selection set", field.name),
                        );
                    }
                    self.check_selections(sub_selections);
                },
                Selection::InlineFragment(inline) => {
                    if inline.selection_set.is_empty() {
                        let on_type = inline.type_condition.as_deref().unwrap_or("<untyped>");
                        self.push(
                            IssueCode::EmptySelectionSet,
                            format!("Inline fragment on `{on_type}` has an empty selection set"),
                        );
                    }
                    self.check_selections(&inline.selection_set);
                },
                Selection::FragmentSpread(_) => (),
            }
        }
    }
}
