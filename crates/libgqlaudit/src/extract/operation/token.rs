use crate::extract::ByteSpan;

/// The kind of a token in an embedded GraphQL document.
///
/// Literal values keep only their raw source text; the auditor never needs
/// their decoded values.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind<'src> {
    /// `@`
    At,
    /// `!`
    Bang,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `|`
    Pipe,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    Name(&'src str),
    Number(&'src str),
    StringValue(&'src str),

    Eof,

    /// A lexer error. The parser reports it and resynchronizes.
    Error(String),
}
impl TokenKind<'_> {
    pub fn describe(&self) -> String {
        match self {
            Self::At => "`@`".to_string(),
            Self::Bang => "`!`".to_string(),
            Self::Colon => "`:`".to_string(),
            Self::CurlyBraceClose => "`}`".to_string(),
            Self::CurlyBraceOpen => "`{`".to_string(),
            Self::Dollar => "`$`".to_string(),
            Self::Ellipsis => "`...`".to_string(),
            Self::Equals => "`=`".to_string(),
            Self::ParenClose => "`)`".to_string(),
            Self::ParenOpen => "`(`".to_string(),
            Self::Pipe => "`|`".to_string(),
            Self::SquareBracketClose => "`]`".to_string(),
            Self::SquareBracketOpen => "`[`".to_string(),
            Self::Name(name) => format!("name `{name}`"),
            Self::Number(num) => format!("number `{num}`"),
            Self::StringValue(_) => "string".to_string(),
            Self::Eof => "end of document".to_string(),
            Self::Error(message) => message.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: ByteSpan,
}
impl<'src> Token<'src> {
    pub fn is_name(&self, expected: &str) -> bool {
        matches!(self.kind, TokenKind::Name(name) if name == expected)
    }

    pub fn name(&self) -> Option<&'src str> {
        match self.kind {
            TokenKind::Name(name) => Some(name),
            _ => None,
        }
    }
}
