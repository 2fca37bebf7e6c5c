use crate::extract::BlockContent;
use crate::extract::ByteSpan;
use crate::extract::ExtractedBlock;
use crate::extract::FileExtraction;
use crate::extract::SourceDialect;
use crate::extract::model::ModelScanner;
use crate::extract::operation::DocumentParser;
use crate::extract::operation::ParsedDefinitionKind;
use crate::extract::string_literal::scan_python_literals;
use crate::extract::string_literal::StringLiteral;
use crate::extract::string_literal::UnterminatedLiteral;
use crate::issue::Issue;
use crate::issue::IssueCode;
use crate::loc::LineIndex;
use std::path::Path;

const DEFINITION_KEYWORDS: [&str; 4] = ["query", "mutation", "subscription", "fragment"];
const GRAPHQL_VARIABLE_HINTS: [&str; 5] = ["query", "mutation", "subscription", "fragment", "gql"];

/// Extracts every block from one file. See [`Extractor`].
pub fn extract_source(path: &Path, source: &str) -> FileExtraction {
    Extractor::new(path, source).extract()
}

/// Where a string literal sits in the surrounding host code.
#[derive(Clone, Copy, Debug, Default)]
struct LiteralContext {
    /// The literal is an argument of a `gql(...)` call.
    in_gql_call: bool,
    /// The literal is assigned to a variable whose name suggests GraphQL,
    /// such as `ORDER_QUERY`.
    assigned_to_graphql_name: bool,
}

/// Turns the text of one source file into [`ExtractedBlock`]s.
///
/// Extraction is fail-soft: a malformed candidate produces an
/// [`IssueCode::ExtractionSyntaxError`] issue and scanning carries on with
/// the next candidate.
pub struct Extractor<'src> {
    blocks: Vec<ExtractedBlock>,
    issues: Vec<Issue>,
    line_index: LineIndex<'src>,
    source: &'src str,
}
impl<'src> Extractor<'src> {
    pub fn new(path: &Path, source: &'src str) -> Self {
        Self {
            blocks: vec![],
            issues: vec![],
            line_index: LineIndex::new(path, source),
            source,
        }
    }

    pub fn extract(mut self) -> FileExtraction {
        match SourceDialect::from_path(self.line_index.file()) {
            SourceDialect::GraphQL => self.extract_graphql_region(0, self.source),
            SourceDialect::Python => self.extract_host_source(),
        }

        self.blocks.sort_by(|a, b| {
            (a.location.line, a.location.col).cmp(&(b.location.line, b.location.col))
        });
        log::debug!(
            "Extracted {} blocks and {} issues from {}.",
            self.blocks.len(),
            self.issues.len(),
            self.line_index.file().display(),
        );

        FileExtraction {
            path: self.line_index.file().to_path_buf(),
            blocks: self.blocks,
            issues: self.issues,
        }
    }

    fn extract_host_source(&mut self) {
        let literal_scan = scan_python_literals(self.source);

        for literal in &literal_scan.literals {
            let context = self.literal_context(literal.span.start);
            let body = &self.source[literal.body.start..literal.body.end];
            if !is_candidate(body, literal.is_triple_quoted, context) {
                continue;
            }
            self.extract_literal(literal);
        }

        for unterminated in &literal_scan.unterminated {
            self.report_unterminated(unterminated);
        }

        let model_scan = ModelScanner::new(&self.line_index, &literal_scan).scan();
        for error in model_scan.errors {
            self.issues.push(Issue::new(
                IssueCode::UnparseableTypeExpression,
                error.message,
                self.line_index.location(error.offset),
            ));
        }
        for model in model_scan.models {
            self.blocks.push(ExtractedBlock {
                location: self.line_index.location(model.span.start),
                raw: self.source[model.span.start..model.span.end].to_string(),
                content: BlockContent::Model(model.definition),
            });
        }
    }

    fn extract_literal(&mut self, literal: &StringLiteral) {
        let neutralized = literal.neutralized_body(self.source);
        self.extract_graphql_region(literal.body.start, &neutralized);
    }

    /// Parses `text`, which occupies the file from byte `base` onwards with
    /// identical byte offsets, as an executable GraphQL document.
    fn extract_graphql_region(&mut self, base: usize, text: &str) {
        let document = DocumentParser::new(text).parse();

        for error in document.errors {
            let location = self.line_index.location(base + error.span.start);
            log::debug!("GraphQL syntax error at {location}: {}", error.message);
            self.issues.push(Issue::new(
                IssueCode::ExtractionSyntaxError,
                error.message,
                location,
            ));
        }

        for definition in document.definitions {
            let span = definition.span.offset_by(base);
            let content = match definition.kind {
                ParsedDefinitionKind::Fragment(fragment) => BlockContent::Fragment(fragment),
                ParsedDefinitionKind::Operation(operation) => BlockContent::Operation(operation),
            };
            self.blocks.push(ExtractedBlock {
                location: self.line_index.location(span.start),
                raw: self.raw_text(span),
                content,
            });
        }
    }

    fn raw_text(&self, span: ByteSpan) -> String {
        self.source.get(span.start..span.end)
            .unwrap_or_default()
            .to_string()
    }

    fn report_unterminated(&mut self, unterminated: &UnterminatedLiteral) {
        let body = &self.source[unterminated.body.start..unterminated.body.end];
        let context = self.literal_context(unterminated.quote_offset);
        if !is_candidate(body, unterminated.is_triple_quoted, context) {
            return;
        }
        let closing = if unterminated.is_triple_quoted { "triple-quoted " } else { "" };
        self.issues.push(Issue::new(
            IssueCode::ExtractionSyntaxError,
            format!(
                "Unterminated {closing}string containing a GraphQL definition; \
                its block boundaries could not be determined"
            ),
            self.line_index.location(unterminated.quote_offset),
        ));
    }

    /// Inspects the code immediately before a literal starting at `offset`.
    fn literal_context(&self, offset: usize) -> LiteralContext {
        let before = self.source[..offset].trim_end();
        let mut context = LiteralContext::default();

        if let Some(before_paren) = before.strip_suffix('(') {
            let callee = trailing_identifier(before_paren.trim_end());
            context.in_gql_call = callee.rsplit('.').next() == Some("gql");
        } else if let Some(before_eq) = before.strip_suffix('=')
            && !before_eq.ends_with(['=', '!', '<', '>']) {
            let target = trailing_identifier(before_eq.trim_end()).to_ascii_lowercase();
            context.assigned_to_graphql_name =
                GRAPHQL_VARIABLE_HINTS.iter().any(|hint| target.contains(hint));
        }
        context
    }
}

fn trailing_identifier(text: &str) -> &str {
    let start = text
        .rfind(|c: char| !(c == '_' || c == '.' || c.is_alphanumeric()))
        .map(|idx| idx + text[idx..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(0);
    &text[start..]
}

/// Whether a literal body should be parsed as GraphQL.
fn is_candidate(body: &str, is_triple_quoted: bool, context: LiteralContext) -> bool {
    if context.in_gql_call {
        return true;
    }
    let trimmed = body.trim_start();
    let starts_with_keyword = DEFINITION_KEYWORDS.iter().any(|keyword| {
        trimmed.strip_prefix(keyword).is_some_and(|after| {
            !after.starts_with(|c: char| c == '_' || c.is_ascii_alphanumeric())
        })
    });
    if starts_with_keyword {
        return body.contains('{');
    }

    let Some(after_brace) = trimmed.strip_prefix('{') else {
        return false;
    };
    let starts_selection = after_brace.trim_start()
        .starts_with(|c: char| c == '_' || c.is_ascii_alphabetic());
    starts_selection && (is_triple_quoted || context.assigned_to_graphql_name)
}
