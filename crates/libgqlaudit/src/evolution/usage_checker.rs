use crate::evolution::FieldStatus;
use crate::evolution::SchemaDiff;
use crate::extract::BlockContent;
use crate::extract::ExtractedBlock;
use crate::extract::operation::FieldArguments;
use crate::extract::operation::OperationKind;
use crate::extract::operation::SelectionPath;
use crate::issue::Issue;
use crate::issue::IssueCode;
use crate::schema::FieldKey;
use crate::schema::SchemaField;
use crate::schema::SchemaSnapshot;
use crate::schema::SchemaTypeKind;
use std::collections::HashSet;
use std::collections::VecDeque;

const TYPENAME_FIELD: &str = "__typename";

/// Checks every operation and fragment in `blocks` against `diff`, resolving
/// selection paths in the `old` snapshot. See [`UsageChecker`].
pub fn check_operation_usage(
    old: &SchemaSnapshot,
    diff: &SchemaDiff,
    blocks: &[ExtractedBlock],
) -> Vec<Issue> {
    UsageChecker::new(old, diff).check(blocks)
}

/// Outcome of walking one selection path through the old snapshot.
enum PathResolution<'a> {
    /// The path ends at an existing field of `key.type_name`.
    Field {
        key: FieldKey,
        field: &'a SchemaField,
    },
    /// The path ends at `__typename`, which every composite type has.
    Meta,
    Unresolved {
        reason: String,
    },
}

/// Cross-references extracted operations with a schema comparison.
///
/// For every selection path of every operation and fragment, the terminal
/// field is located by walking field types through the old snapshot, starting
/// from the root type of the operation's kind (or the fragment's type
/// condition). Inline fragment type conditions switch the current type.
///
/// Each distinct finding is reported once per block, at the block's
/// location:
///
/// * `FIELD_REMOVED` when the terminal field was removed.
/// * `FIELD_DEPRECATED` when it became deprecated, or was already deprecated
///   in the old snapshot and still exists.
/// * `TYPE_REMOVED` when the type owning the terminal field is gone.
/// * `UNRESOLVED_FIELD_PATH` when the path does not exist in the old
///   snapshot at all. Longer paths under a failing one are not re-reported.
///
/// Mutations are also checked for `DEPRECATED_INPUT_FIELD`: every argument
/// the operation passes is looked up on the called field, and each deprecated
/// field of the argument's input type (or of input types nested inside it) is
/// reported once.
///
/// Added fields are never reported against operations.
pub struct UsageChecker<'a> {
    diff: &'a SchemaDiff,
    old: &'a SchemaSnapshot,
}
impl<'a> UsageChecker<'a> {
    pub fn new(old: &'a SchemaSnapshot, diff: &'a SchemaDiff) -> Self {
        if old.version() != diff.old_version {
            log::warn!(
                "Resolving operations against schema {} but the diff starts from schema {}.",
                old.version(),
                diff.old_version,
            );
        }
        Self {
            diff,
            old,
        }
    }

    pub fn check(&self, blocks: &[ExtractedBlock]) -> Vec<Issue> {
        blocks.iter()
            .flat_map(|block| self.check_block(block))
            .collect()
    }

    pub fn check_block(&self, block: &ExtractedBlock) -> Vec<Issue> {
        let root_type = match &block.content {
            BlockContent::Operation(operation) => match operation.kind {
                OperationKind::Query => self.old.query_type_name(),
                OperationKind::Mutation => self.old.mutation_type_name(),
                OperationKind::Subscription => self.old.subscription_type_name(),
            },
            BlockContent::Fragment(fragment) => fragment.type_condition.as_str(),
            BlockContent::Model(_) => return vec![],
        };
        let label = block.describe();

        let mut findings = BlockFindings::new(block);
        let mut failed_paths: Vec<&SelectionPath> = vec![];

        for path in block.selection_paths() {
            if failed_paths.iter().any(|failed| is_prefix_of(failed, path)) {
                continue;
            }

            let (key, field) = match self.resolve(root_type, path) {
                PathResolution::Meta => continue,
                PathResolution::Field { key, field } => (key, field),
                PathResolution::Unresolved { reason } => {
                    failed_paths.push(path);
                    findings.report(
                        IssueCode::UnresolvedFieldPath,
                        path.to_dotted(),
                        format!(
                            "`{label}` selects `{path}`, which cannot be resolved in schema {}: {reason}",
                            self.old.version(),
                        ),
                    );
                    continue;
                },
            };

            if self.diff.is_type_gone(&key.type_name) {
                findings.report(
                    IssueCode::TypeRemoved,
                    key.type_name.to_string(),
                    format!(
                        "`{label}` selects `{path}` on type `{}`, which no longer exists in schema {}",
                        key.type_name,
                        self.diff.new_version,
                    ),
                );
                continue;
            }

            match self.diff.entry(&key.type_name, &key.field_name) {
                Some(entry) if entry.status == FieldStatus::Removed => {
                    findings.report(
                        IssueCode::FieldRemoved,
                        key.to_string(),
                        format!(
                            "`{label}` selects `{path}`, but field `{key}` was removed in schema {}",
                            self.diff.new_version,
                        ),
                    );
                },
                Some(entry) if entry.status == FieldStatus::Deprecated => {
                    let reason = entry.reason.as_deref();
                    let issue = findings.report(
                        IssueCode::FieldDeprecated,
                        key.to_string(),
                        format!(
                            "`{label}` selects `{path}`, but field `{key}` is deprecated in schema {}",
                            self.diff.new_version,
                        ),
                    );
                    if let (Some(issue), Some(reason)) = (issue, reason) {
                        issue.suggestion = Some(reason.to_string());
                    }
                },
                Some(_) => (),
                None if field.deprecated => {
                    let issue = findings.report(
                        IssueCode::FieldDeprecated,
                        key.to_string(),
                        format!(
                            "`{label}` selects `{path}`, but field `{key}` has been deprecated since schema {}",
                            self.old.version(),
                        ),
                    );
                    if let (Some(issue), Some(reason)) = (issue, field.deprecation_reason.as_deref()) {
                        issue.suggestion = Some(reason.to_string());
                    }
                },
                None => (),
            }
        }

        if let BlockContent::Operation(operation) = &block.content
            && operation.kind == OperationKind::Mutation {
            for field_arguments in &operation.field_arguments {
                self.check_input_arguments(root_type, field_arguments, &label, &mut findings);
            }
        }

        findings.issues
    }

    fn check_input_arguments(
        &self,
        root_type: &str,
        field_arguments: &FieldArguments,
        label: &str,
        findings: &mut BlockFindings<'_>,
    ) {
        // Unresolvable paths were already reported while walking selections.
        let PathResolution::Field { field, .. } = self.resolve(root_type, &field_arguments.path) else {
            return;
        };
        let path = &field_arguments.path;

        for passed in &field_arguments.arguments {
            let Some(argument) = field.argument(&passed.name) else {
                log::debug!(
                    "`{label}` passes unknown argument `{}` to `{path}`.",
                    passed.name,
                );
                continue;
            };
            for deprecated in self.deprecated_input_fields(argument.named_type()) {
                let key = deprecated.key;
                let issue = findings.report(
                    IssueCode::DeprecatedInputField,
                    key.to_string(),
                    format!(
                        "`{label}` passes argument `{}` to `{path}`, which accepts input field \
                        `{key}`, deprecated in schema {}",
                        passed.name,
                        deprecated.version,
                    ),
                );
                if let (Some(issue), Some(reason)) = (issue, deprecated.reason) {
                    issue.suggestion = Some(reason);
                }
            }
        }
    }

    /// Deprecated fields of input type `type_name` and of every input type
    /// reachable through its fields, breadth first.
    fn deprecated_input_fields(&self, type_name: &str) -> Vec<DeprecatedInputField<'a>> {
        let mut found = vec![];
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([type_name]);

        while let Some(type_name) = queue.pop_front() {
            let Some(input_type) = self.old.get_type(type_name) else {
                continue;
            };
            if input_type.kind != SchemaTypeKind::Input || !seen.insert(input_type.name.as_str()) {
                continue;
            }

            for input_field in input_type.fields().values() {
                let entry = self.diff.entry(&input_type.name, &input_field.name);
                let deprecation = match entry {
                    Some(entry) if entry.status == FieldStatus::Deprecated =>
                        Some((entry.reason.clone(), self.diff.new_version.as_str())),
                    Some(_) => None,
                    None if input_field.deprecated =>
                        Some((input_field.deprecation_reason.clone(), self.old.version())),
                    None => None,
                };
                if let Some((reason, version)) = deprecation {
                    found.push(DeprecatedInputField {
                        key: FieldKey::new(input_type.name.as_str(), input_field.name.as_str()),
                        reason,
                        version,
                    });
                }
                queue.push_back(input_field.named_type());
            }
        }
        found
    }

    fn resolve(&self, root_type: &str, path: &SelectionPath) -> PathResolution<'a> {
        let mut current_type = root_type.to_string();
        let segments = path.segments();

        for (idx, segment) in segments.iter().enumerate() {
            if let Some(on_type) = &segment.on_type {
                current_type = on_type.to_string();
            }
            if segment.field == TYPENAME_FIELD {
                return PathResolution::Meta;
            }

            let Some(schema_type) = self.old.get_type(&current_type) else {
                return PathResolution::Unresolved {
                    reason: format!("type `{current_type}` is not defined"),
                };
            };
            let Some(field) = schema_type.field(&segment.field) else {
                return PathResolution::Unresolved {
                    reason: format!("type `{current_type}` has no field `{}`", segment.field),
                };
            };

            if idx + 1 == segments.len() {
                return PathResolution::Field {
                    key: FieldKey::new(current_type, segment.field.as_str()),
                    field,
                };
            }
            current_type = field.named_type().to_string();
        }

        PathResolution::Unresolved {
            reason: "the selection path is empty".to_string(),
        }
    }
}

struct DeprecatedInputField<'a> {
    key: FieldKey,
    reason: Option<String>,
    version: &'a str,
}

/// Issues for one block, deduplicated by code and subject.
struct BlockFindings<'b> {
    block: &'b ExtractedBlock,
    issues: Vec<Issue>,
    reported: HashSet<(IssueCode, String)>,
}
impl<'b> BlockFindings<'b> {
    fn new(block: &'b ExtractedBlock) -> Self {
        Self {
            block,
            issues: vec![],
            reported: HashSet::new(),
        }
    }

    /// Records an issue unless one with the same code and subject exists.
    fn report(
        &mut self,
        code: IssueCode,
        subject: String,
        message: String,
    ) -> Option<&mut Issue> {
        if !self.reported.insert((code, subject)) {
            return None;
        }
        self.issues.push(Issue::new(code, message, self.block.location.clone()));
        self.issues.last_mut()
    }
}

fn is_prefix_of(prefix: &SelectionPath, path: &SelectionPath) -> bool {
    prefix.len() < path.len() && path.segments().starts_with(prefix.segments())
}
