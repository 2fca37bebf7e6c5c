mod byte_span;
mod extracted_block;
mod extractor;
mod file_extraction;
pub mod model;
pub mod operation;
mod source_dialect;
mod string_literal;

pub use byte_span::ByteSpan;
pub use extracted_block::BlockContent;
pub use extracted_block::BlockKind;
pub use extracted_block::ExtractedBlock;
pub use extractor::Extractor;
pub use extractor::extract_source;
pub use file_extraction::FileExtraction;
pub use source_dialect::SourceDialect;
pub(crate) use string_literal::LiteralScan;

#[cfg(test)]
mod tests;
