use crate::extract::model::ModelDefinition;
use crate::extract::operation::FragmentDefinition;
use crate::extract::operation::OperationAst;
use crate::extract::operation::SelectionPath;
use crate::loc::SourceLocation;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum BlockKind {
    Fragment,
    Model,
    Operation,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BlockContent {
    Fragment(FragmentDefinition),
    Model(ModelDefinition),
    Operation(OperationAst),
}

/// One operation, fragment or model found in a source file.
///
/// `raw` is the block's exact source text and `location` points at its
/// first character.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExtractedBlock {
    pub location: SourceLocation,
    pub raw: String,
    pub content: BlockContent,
}
impl ExtractedBlock {
    pub fn kind(&self) -> BlockKind {
        match &self.content {
            BlockContent::Fragment(_) => BlockKind::Fragment,
            BlockContent::Model(_) => BlockKind::Model,
            BlockContent::Operation(_) => BlockKind::Operation,
        }
    }

    pub fn as_operation(&self) -> Option<&OperationAst> {
        match &self.content {
            BlockContent::Operation(operation) => Some(operation),
            _ => None,
        }
    }

    pub fn as_fragment(&self) -> Option<&FragmentDefinition> {
        match &self.content {
            BlockContent::Fragment(fragment) => Some(fragment),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&ModelDefinition> {
        match &self.content {
            BlockContent::Model(model) => Some(model),
            _ => None,
        }
    }

    /// Selection paths of an operation or fragment; empty for models.
    pub fn selection_paths(&self) -> &[SelectionPath] {
        match &self.content {
            BlockContent::Fragment(fragment) => &fragment.selection_paths,
            BlockContent::Operation(operation) => &operation.selection_paths,
            BlockContent::Model(_) => &[],
        }
    }

    pub fn fragment_spreads(&self) -> &[String] {
        match &self.content {
            BlockContent::Fragment(fragment) => &fragment.fragment_spreads,
            BlockContent::Operation(operation) => &operation.fragment_spreads,
            BlockContent::Model(_) => &[],
        }
    }

    /// A short human-readable label, e.g. `query GetOrder`.
    pub fn describe(&self) -> String {
        match &self.content {
            BlockContent::Fragment(fragment) => format!("fragment {}", fragment.name),
            BlockContent::Model(model) => format!("model {}", model.name),
            BlockContent::Operation(operation) =>
                format!("{} {}", operation.kind, operation.display_name()),
        }
    }
}
