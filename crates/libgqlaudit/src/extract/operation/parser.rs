use crate::extract::ByteSpan;
use crate::extract::operation::Argument;
use crate::extract::operation::FieldSelection;
use crate::extract::operation::FragmentDefinition;
use crate::extract::operation::FragmentSpread;
use crate::extract::operation::InlineFragment;
use crate::extract::operation::Lexer;
use crate::extract::operation::OperationAst;
use crate::extract::operation::OperationKind;
use crate::extract::operation::Selection;
use crate::extract::operation::Token;
use crate::extract::operation::TokenKind;

type ParseResult<T> = std::result::Result<T, ParseError>;

const DEFINITION_KEYWORDS: [&str; 4] = ["fragment", "mutation", "query", "subscription"];
const TYPE_SYSTEM_KEYWORDS: [&str; 9] = [
    "directive", "enum", "extend", "input", "interface", "scalar", "schema",
    "type", "union",
];

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ParseError {
    pub message: String,
    pub span: ByteSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ParsedDefinitionKind {
    Fragment(FragmentDefinition),
    Operation(OperationAst),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ParsedDefinition {
    pub kind: ParsedDefinitionKind,
    pub span: ByteSpan,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ParsedDocument {
    pub definitions: Vec<ParsedDefinition>,
    pub errors: Vec<ParseError>,
}

/// A permissive recursive-descent parser for executable GraphQL documents.
///
/// On a syntax error the parser records a [`ParseError`], skips ahead to the
/// next top-level definition and keeps going, so one malformed definition
/// never hides the ones after it.
pub(crate) struct DocumentParser<'src> {
    errors: Vec<ParseError>,
    pos: usize,
    /// Incremented on entry to every self-recursive parse step and
    /// decremented on exit.
    recursion_depth: usize,
    source: &'src str,
    tokens: Vec<Token<'src>>,
}
impl<'src> DocumentParser<'src> {
    const MAX_RECURSION_DEPTH: usize = 64;

    pub fn new(source: &'src str) -> Self {
        Self {
            errors: vec![],
            pos: 0,
            recursion_depth: 0,
            source,
            tokens: Lexer::new(source).tokenize(),
        }
    }

    pub fn parse(mut self) -> ParsedDocument {
        let mut definitions = vec![];
        while !self.at_eof() {
            if self.at_type_system_definition() {
                self.skip_type_system_definition();
                continue;
            }
            let start_pos = self.pos;
            match self.parse_definition() {
                Ok(definition) => definitions.push(definition),
                Err(err) => {
                    log::trace!("Recovering from GraphQL syntax error: {}", err.message);
                    self.errors.push(err);
                    self.pos = self.find_recovery_point(start_pos);
                },
            }
        }

        ParsedDocument {
            definitions,
            errors: self.errors,
        }
    }

    // -------------------------------------------------------------------------
    // Token cursor
    // -------------------------------------------------------------------------

    fn peek(&self) -> &Token<'src> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> &Token<'src> {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token<'src> {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind<'_>) -> Option<Token<'src>> {
        if &self.peek().kind == kind {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind<'_>) -> ParseResult<Token<'src>> {
        match self.eat(&kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(&kind.describe())),
        }
    }

    fn expect_name(&mut self) -> ParseResult<&'src str> {
        match self.peek().name() {
            Some(name) => {
                self.advance();
                Ok(name)
            },
            None => Err(self.unexpected("a name")),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        let message = match &token.kind {
            TokenKind::Error(lex_message) => lex_message.to_string(),
            found => format!("Expected {expected}, found {}", found.describe()),
        };
        ParseError {
            message,
            span: token.span,
        }
    }

    /// Fails with a nesting error once the depth limit is passed. On success
    /// the caller must pair this with `exit_recursion()`.
    fn enter_recursion(&mut self) -> ParseResult<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > Self::MAX_RECURSION_DEPTH {
            self.recursion_depth -= 1;
            return Err(ParseError {
                message: "maximum nesting depth exceeded".to_string(),
                span: self.peek().span,
            });
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    fn prev_end(&self) -> usize {
        match self.pos {
            0 => 0,
            pos => self.tokens[pos - 1].span.end,
        }
    }

    // -------------------------------------------------------------------------
    // Error recovery
    // -------------------------------------------------------------------------

    fn at_type_system_definition(&self) -> bool {
        match &self.peek().kind {
            TokenKind::Name(name) => TYPE_SYSTEM_KEYWORDS.contains(name),
            // A description preceding a type-system definition.
            TokenKind::StringValue(_) => true,
            _ => false,
        }
    }

    /// Schema definitions can share a document with operations; they are not
    /// audited, so skip over them without reporting anything.
    fn skip_type_system_definition(&mut self) {
        let skipped = self.advance();
        log::trace!("Skipping type-system definition at {:?}.", skipped.span);
        let mut depth: i32 = 0;
        loop {
            let token = self.peek();
            let at_boundary = depth <= 0 && match &token.kind {
                TokenKind::Eof => true,
                TokenKind::StringValue(_) => true,
                TokenKind::Name(name) =>
                    DEFINITION_KEYWORDS.contains(name) || TYPE_SYSTEM_KEYWORDS.contains(name),
                _ => false,
            };
            if at_boundary {
                return;
            }
            match token.kind {
                TokenKind::CurlyBraceOpen => depth += 1,
                TokenKind::CurlyBraceClose => depth -= 1,
                _ => (),
            }
            self.advance();
        }
    }

    /// Finds the index of the next token that can begin a definition after a
    /// failed attempt that began at `start_pos`.
    fn find_recovery_point(&self, start_pos: usize) -> usize {
        let eof_idx = self.tokens.len() - 1;

        // Prefer a definition start at brace depth zero.
        let mut depth: i32 = 0;
        for idx in start_pos..eof_idx {
            let token = &self.tokens[idx];
            if idx > start_pos && depth <= 0 && self.starts_definition(idx) {
                return idx;
            }
            match token.kind {
                TokenKind::CurlyBraceOpen => depth += 1,
                TokenKind::CurlyBraceClose => depth -= 1,
                _ => (),
            }
        }

        // Braces never balanced out: fall back to anything that looks like a
        // named definition header.
        ((start_pos + 1)..eof_idx)
            .find(|&idx| self.looks_like_named_definition(idx))
            .unwrap_or(eof_idx)
    }

    /// A bare `{` only opens a shorthand query when it directly follows the
    /// end of an earlier definition; otherwise it is the body of the header
    /// that just failed.
    fn starts_definition(&self, idx: usize) -> bool {
        let token = &self.tokens[idx];
        if token.kind == TokenKind::CurlyBraceOpen {
            return idx == 0 || self.tokens[idx - 1].kind == TokenKind::CurlyBraceClose;
        }
        token.name().is_some_and(|name| {
            DEFINITION_KEYWORDS.contains(&name) || TYPE_SYSTEM_KEYWORDS.contains(&name)
        })
    }

    fn looks_like_named_definition(&self, idx: usize) -> bool {
        let Some(keyword) = self.tokens[idx].name() else {
            return false;
        };
        if !DEFINITION_KEYWORDS.contains(&keyword) {
            return false;
        }
        let Some(name_token) = self.tokens.get(idx + 1) else {
            return false;
        };
        if name_token.name().is_none() {
            return false;
        }
        match self.tokens.get(idx + 2).map(|token| &token.kind) {
            Some(TokenKind::CurlyBraceOpen | TokenKind::ParenOpen | TokenKind::At) => true,
            Some(TokenKind::Name("on")) => keyword == "fragment",
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // Definitions
    // -------------------------------------------------------------------------

    fn parse_definition(&mut self) -> ParseResult<ParsedDefinition> {
        let start = self.peek().span.start;
        let kind = match self.peek().kind.clone() {
            TokenKind::CurlyBraceOpen => {
                let selection_set = self.parse_selection_set()?;
                ParsedDefinitionKind::Operation(OperationAst::new(
                    None,
                    OperationKind::Query,
                    vec![],
                    vec![],
                    selection_set,
                ))
            },

            TokenKind::Name("fragment") =>
                ParsedDefinitionKind::Fragment(self.parse_fragment_definition()?),

            TokenKind::Name(keyword) => match OperationKind::from_keyword(keyword) {
                Some(kind) => {
                    self.advance();
                    ParsedDefinitionKind::Operation(self.parse_operation(kind)?)
                },
                None => return Err(self.unexpected("an operation or fragment definition")),
            },

            _ => return Err(self.unexpected("an operation or fragment definition")),
        };

        Ok(ParsedDefinition {
            kind,
            span: ByteSpan::new(start, self.prev_end()),
        })
    }

    fn parse_operation(&mut self, kind: OperationKind) -> ParseResult<OperationAst> {
        let name = self.peek().name().map(str::to_string);
        if name.is_some() {
            self.advance();
        }

        let variables =
            if self.peek().kind == TokenKind::ParenOpen {
                self.parse_variable_definitions()?
            } else {
                vec![]
            };
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;

        Ok(OperationAst::new(name, kind, variables, directives, selection_set))
    }

    fn parse_fragment_definition(&mut self) -> ParseResult<FragmentDefinition> {
        self.advance();
        let name = self.expect_name()?.to_string();
        if !self.peek().is_name("on") {
            return Err(self.unexpected("`on`"));
        }
        self.advance();
        let type_condition = self.expect_name()?.to_string();
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;

        Ok(FragmentDefinition::new(name, type_condition, directives, selection_set))
    }

    fn parse_variable_definitions(&mut self) -> ParseResult<Vec<String>> {
        self.expect(TokenKind::ParenOpen)?;
        let mut variables = vec![];
        while self.eat(&TokenKind::ParenClose).is_none() {
            self.expect(TokenKind::Dollar)?;
            variables.push(self.expect_name()?.to_string());
            self.expect(TokenKind::Colon)?;
            self.parse_type_annotation()?;
            if self.eat(&TokenKind::Equals).is_some() {
                self.parse_value()?;
            }
            self.parse_directives()?;
        }
        Ok(variables)
    }

    fn parse_type_annotation(&mut self) -> ParseResult<()> {
        self.enter_recursion()?;
        let result = self.parse_type_annotation_impl();
        self.exit_recursion();
        result
    }

    fn parse_type_annotation_impl(&mut self) -> ParseResult<()> {
        if self.eat(&TokenKind::SquareBracketOpen).is_some() {
            self.parse_type_annotation()?;
            self.expect(TokenKind::SquareBracketClose)?;
        } else {
            self.expect_name()?;
        }
        self.eat(&TokenKind::Bang);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Selections
    // -------------------------------------------------------------------------

    fn parse_selection_set(&mut self) -> ParseResult<Vec<Selection>> {
        self.enter_recursion()?;
        let result = self.parse_selection_set_impl();
        self.exit_recursion();
        result
    }

    fn parse_selection_set_impl(&mut self) -> ParseResult<Vec<Selection>> {
        let open = self.expect(TokenKind::CurlyBraceOpen)?;
        let mut selections = vec![];
        loop {
            match self.peek().kind.clone() {
                TokenKind::CurlyBraceClose => {
                    self.advance();
                    return Ok(selections);
                },
                TokenKind::Eof => return Err(ParseError {
                    message: "Unclosed `{`: selection set never ends".to_string(),
                    span: open.span,
                }),
                _ => selections.push(self.parse_selection()?),
            }
        }
    }

    fn parse_selection(&mut self) -> ParseResult<Selection> {
        if self.eat(&TokenKind::Ellipsis).is_some() {
            return self.parse_fragment_selection();
        }

        let first_name = self.expect_name()?.to_string();
        let (alias, name) =
            if self.eat(&TokenKind::Colon).is_some() {
                (Some(first_name), self.expect_name()?.to_string())
            } else {
                (None, first_name)
            };
        let arguments =
            if self.peek().kind == TokenKind::ParenOpen {
                self.parse_arguments()?
            } else {
                vec![]
            };
        let directives = self.parse_directives()?;
        let selection_set =
            if self.peek().kind == TokenKind::CurlyBraceOpen {
                Some(self.parse_selection_set()?)
            } else {
                None
            };

        Ok(Selection::Field(FieldSelection {
            alias,
            name,
            arguments,
            directives,
            selection_set,
        }))
    }

    fn parse_fragment_selection(&mut self) -> ParseResult<Selection> {
        let is_typed_inline =
            self.peek().is_name("on") && self.peek_nth(1).name().is_some();
        if is_typed_inline {
            self.advance();
            let type_condition = self.expect_name()?.to_string();
            let directives = self.parse_directives()?;
            let selection_set = self.parse_selection_set()?;
            return Ok(Selection::InlineFragment(InlineFragment {
                type_condition: Some(type_condition),
                directives,
                selection_set,
            }));
        }

        if let Some(name) = self.peek().name() {
            self.advance();
            let directives = self.parse_directives()?;
            return Ok(Selection::FragmentSpread(FragmentSpread {
                name: name.to_string(),
                directives,
            }));
        }

        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;
        Ok(Selection::InlineFragment(InlineFragment {
            type_condition: None,
            directives,
            selection_set,
        }))
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<Argument>> {
        self.expect(TokenKind::ParenOpen)?;
        let mut arguments = vec![];
        while self.eat(&TokenKind::ParenClose).is_none() {
            let name = self.expect_name()?.to_string();
            self.expect(TokenKind::Colon)?;
            let value = self.parse_value()?;
            arguments.push(Argument { name, value });
        }
        Ok(arguments)
    }

    fn parse_directives(&mut self) -> ParseResult<Vec<String>> {
        let mut directives = vec![];
        while self.eat(&TokenKind::At).is_some() {
            directives.push(self.expect_name()?.to_string());
            if self.peek().kind == TokenKind::ParenOpen {
                self.parse_arguments()?;
            }
        }
        Ok(directives)
    }

    /// Parses a value and returns its source text.
    fn parse_value(&mut self) -> ParseResult<String> {
        let start = self.peek().span.start;
        self.skip_value()?;
        Ok(self.source[start..self.prev_end()].to_string())
    }

    fn skip_value(&mut self) -> ParseResult<()> {
        self.enter_recursion()?;
        let result = self.skip_value_impl();
        self.exit_recursion();
        result
    }

    fn skip_value_impl(&mut self) -> ParseResult<()> {
        match self.peek().kind.clone() {
            TokenKind::Dollar => {
                self.advance();
                self.expect_name()?;
            },
            TokenKind::Name(_) | TokenKind::Number(_) | TokenKind::StringValue(_) => {
                self.advance();
            },
            TokenKind::SquareBracketOpen => {
                self.advance();
                while self.eat(&TokenKind::SquareBracketClose).is_none() {
                    if self.at_eof() {
                        return Err(self.unexpected("`]`"));
                    }
                    self.skip_value()?;
                }
            },
            TokenKind::CurlyBraceOpen => {
                self.advance();
                while self.eat(&TokenKind::CurlyBraceClose).is_none() {
                    self.expect_name()?;
                    self.expect(TokenKind::Colon)?;
                    self.skip_value()?;
                }
            },
            _ => return Err(self.unexpected("a value")),
        }
        Ok(())
    }
}
