use crate::extract::BlockContent;
use crate::extract::ExtractedBlock;
use crate::issue::Issue;
use crate::issue::IssueCode;
use crate::surface::ModelValidator;
use crate::surface::OperationValidator;
use crate::surface::SurfaceRules;
use std::collections::HashSet;

/// Validates `blocks` as one extraction unit. Issues come back in block
/// order.
pub fn validate_surface(rules: &SurfaceRules, blocks: &[ExtractedBlock]) -> Vec<Issue> {
    SurfaceValidator::new(rules).validate(blocks)
}

/// Structural, schema-independent validation of extracted blocks.
///
/// A validator represents one extraction unit: fragment definitions
/// registered with [`SurfaceValidator::with_fragments_from`] satisfy spreads
/// in any block later passed to [`SurfaceValidator::validate`], and operation
/// names are checked for duplicates across every call.
///
/// Validation is total: well-formed but flagged input always yields issues,
/// never an error.
pub struct SurfaceValidator<'a> {
    known_fragments: HashSet<&'a str>,
    operation_names: HashSet<&'a str>,
    rules: &'a SurfaceRules,
}
impl<'a> SurfaceValidator<'a> {
    pub fn new(rules: &'a SurfaceRules) -> Self {
        Self {
            known_fragments: HashSet::new(),
            operation_names: HashSet::new(),
            rules,
        }
    }

    /// Registers every fragment defined in `blocks` as part of this unit.
    pub fn with_fragments_from(
        mut self,
        blocks: impl IntoIterator<Item = &'a ExtractedBlock>,
    ) -> Self {
        self.known_fragments.extend(
            blocks.into_iter()
                .filter_map(ExtractedBlock::as_fragment)
                .map(|fragment| fragment.name.as_str()),
        );
        self
    }

    pub fn validate(&mut self, blocks: &'a [ExtractedBlock]) -> Vec<Issue> {
        self.known_fragments.extend(
            blocks.iter()
                .filter_map(ExtractedBlock::as_fragment)
                .map(|fragment| fragment.name.as_str()),
        );

        let mut issues = vec![];
        for block in blocks {
            match &block.content {
                BlockContent::Model(model) => issues.extend(ModelValidator::new(model).validate()),
                BlockContent::Fragment(_) => issues.extend(
                    OperationValidator::new(block, &self.known_fragments, self.rules).validate(),
                ),
                BlockContent::Operation(operation) => {
                    issues.extend(
                        OperationValidator::new(block, &self.known_fragments, self.rules).validate(),
                    );
                    if let Some(name) = operation.name.as_deref()
                        && !self.operation_names.insert(name) {
                        issues.push(Issue::new(
                            IssueCode::DuplicateOperationName,
                            format!("Another {} is already named `{name}`", operation.kind),
                            block.location.clone(),
                        ));
                    }
                },
            }
        }

        log::debug!("Surface validation of {} blocks found {} issues.", blocks.len(), issues.len());
        issues
    }
}
