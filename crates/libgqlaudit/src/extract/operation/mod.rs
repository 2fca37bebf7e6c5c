mod fragment_definition;
mod lexer;
mod operation_ast;
mod operation_kind;
mod parser;
mod selection;
mod selection_path;
mod selection_summary;
mod token;

pub use fragment_definition::FragmentDefinition;
pub(crate) use lexer::Lexer;
pub use operation_ast::OperationAst;
pub use operation_kind::OperationKind;
pub(crate) use parser::DocumentParser;
pub(crate) use parser::ParsedDefinitionKind;
pub(crate) use parser::ParsedDocument;
pub use selection::Argument;
pub use selection::FieldSelection;
pub use selection::FragmentSpread;
pub use selection::InlineFragment;
pub use selection::Selection;
pub(crate) use selection::is_placeholder_name;
pub use selection_path::PathSegment;
pub use selection_path::SelectionPath;
pub use selection_summary::FieldArguments;
pub(crate) use selection_summary::SelectionSummary;
pub(crate) use token::Token;
pub(crate) use token::TokenKind;

#[cfg(test)]
mod tests;
