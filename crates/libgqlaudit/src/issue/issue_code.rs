use crate::issue::Severity;
use serde::Deserialize;
use serde::Serialize;

/// The stable taxonomy of findings. Each code serializes as its
/// SCREAMING_SNAKE_CASE name, which is the contract toward reporters.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    // Extraction
    ExtractionSyntaxError,
    UnparseableTypeExpression,

    // Schema evolution
    DeprecatedInputField,
    FieldAdded,
    FieldDeprecated,
    FieldRemoved,
    TypeAdded,
    TypeRemoved,
    UnresolvedFieldPath,

    // Surface validation of operations
    DanglingFragmentSpread,
    DuplicateOperationName,
    EmptySelectionSet,
    OperationUnnamed,
    ScalarLeafHasSelection,
    SubscriptionDisallowed,

    // Surface validation of models
    ConstraintRangeInverted,
    DoubleOptional,
    NoneDefaultNotOptional,
    RequiredFieldNoDefault,
    TypeConstraintMismatch,
    UnionTooFewMembers,
}
impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtractionSyntaxError => "EXTRACTION_SYNTAX_ERROR",
            Self::UnparseableTypeExpression => "UNPARSEABLE_TYPE_EXPRESSION",
            Self::DeprecatedInputField => "DEPRECATED_INPUT_FIELD",
            Self::FieldAdded => "FIELD_ADDED",
            Self::FieldDeprecated => "FIELD_DEPRECATED",
            Self::FieldRemoved => "FIELD_REMOVED",
            Self::TypeAdded => "TYPE_ADDED",
            Self::TypeRemoved => "TYPE_REMOVED",
            Self::UnresolvedFieldPath => "UNRESOLVED_FIELD_PATH",
            Self::DanglingFragmentSpread => "DANGLING_FRAGMENT_SPREAD",
            Self::DuplicateOperationName => "DUPLICATE_OPERATION_NAME",
            Self::EmptySelectionSet => "EMPTY_SELECTION_SET",
            Self::OperationUnnamed => "OPERATION_UNNAMED",
            Self::ScalarLeafHasSelection => "SCALAR_LEAF_HAS_SELECTION",
            Self::SubscriptionDisallowed => "SUBSCRIPTION_DISALLOWED",
            Self::ConstraintRangeInverted => "CONSTRAINT_RANGE_INVERTED",
            Self::DoubleOptional => "DOUBLE_OPTIONAL",
            Self::NoneDefaultNotOptional => "NONE_DEFAULT_NOT_OPTIONAL",
            Self::RequiredFieldNoDefault => "REQUIRED_FIELD_NO_DEFAULT",
            Self::TypeConstraintMismatch => "TYPE_CONSTRAINT_MISMATCH",
            Self::UnionTooFewMembers => "UNION_TOO_FEW_MEMBERS",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            Self::ExtractionSyntaxError
            | Self::FieldRemoved
            | Self::TypeRemoved
            | Self::DanglingFragmentSpread
            | Self::EmptySelectionSet
            | Self::ConstraintRangeInverted
            | Self::TypeConstraintMismatch
            | Self::UnionTooFewMembers => Severity::Error,

            Self::UnparseableTypeExpression
            | Self::DeprecatedInputField
            | Self::FieldDeprecated
            | Self::UnresolvedFieldPath
            | Self::DuplicateOperationName
            | Self::OperationUnnamed
            | Self::SubscriptionDisallowed
            | Self::DoubleOptional
            | Self::NoneDefaultNotOptional => Severity::Warning,

            Self::FieldAdded
            | Self::TypeAdded
            | Self::RequiredFieldNoDefault => Severity::Info,

            Self::ScalarLeafHasSelection => Severity::Advisory,
        }
    }

    /// The generic remediation hint for this code, if there is one.
    pub fn default_suggestion(&self) -> Option<&'static str> {
        Some(match self {
            Self::ExtractionSyntaxError =>
                "Fix the GraphQL syntax error: check for missing field names, \
                unbalanced braces or an unterminated string",
            Self::UnparseableTypeExpression =>
                "Simplify the annotation or check it for unbalanced brackets",
            Self::DeprecatedInputField =>
                "Stop sending this input field and use the replacement named \
                in the deprecation message",
            Self::FieldAdded =>
                "This field is new; consider whether you need to handle it",
            Self::FieldDeprecated =>
                "Replace with the suggested alternative field from the \
                deprecation message",
            Self::FieldRemoved =>
                "Remove this field as it no longer exists in the schema",
            Self::TypeRemoved =>
                "Remove selections through this type as it no longer exists \
                in the schema",
            Self::UnresolvedFieldPath =>
                "Check the field name for typos, or confirm the field exists \
                in the schema version being compared against",
            Self::DanglingFragmentSpread =>
                "Define the fragment alongside this operation or remove the \
                spread",
            Self::DuplicateOperationName =>
                "Give each operation a unique name",
            Self::EmptySelectionSet =>
                "Select at least one field",
            Self::OperationUnnamed =>
                "Add a name to the GraphQL operation",
            Self::ScalarLeafHasSelection =>
                "Remove sub-selection from scalar field or add sub-selection \
                to object field",
            Self::SubscriptionDisallowed =>
                "Replace the subscription with a query or mutation",
            Self::ConstraintRangeInverted
            | Self::TypeConstraintMismatch =>
                "Review and verify the constraint values are appropriate for \
                the declared type",
            Self::DoubleOptional =>
                "Remove the redundant inner Optional",
            Self::NoneDefaultNotOptional =>
                "Wrap the declared type in Optional or choose a non-None \
                default",
            Self::RequiredFieldNoDefault =>
                "Add default value or make field optional if appropriate",
            Self::UnionTooFewMembers =>
                "Use the single member type directly or add further members",
            Self::TypeAdded => return None,
        })
    }
}
impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
