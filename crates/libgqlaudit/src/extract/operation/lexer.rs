use crate::extract::ByteSpan;
use crate::extract::operation::Token;
use crate::extract::operation::TokenKind;

/// Splits an embedded GraphQL document into [`Token`]s.
///
/// Whitespace, commas and `#` comments are insignificant and skipped. Spans
/// are byte offsets into the text handed to [`Lexer::new`].
pub(crate) struct Lexer<'src> {
    bytes: &'src [u8],
    offset: usize,
    source: &'src str,
}
impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            bytes: source.as_bytes(),
            offset: 0,
            source,
        }
    }

    pub fn tokenize(mut self) -> Vec<Token<'src>> {
        let mut tokens = vec![];
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break tokens;
            }
        }
    }

    fn peek_byte(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.offset + ahead).copied()
    }

    fn skip_ignored(&mut self) {
        while let Some(byte) = self.peek_byte(0) {
            match byte {
                b' ' | b'\t' | b'\n' | b'\r' | b',' => self.offset += 1,
                b'#' => {
                    let rest = &self.bytes[self.offset..];
                    self.offset += memchr::memchr(b'\n', rest).unwrap_or(rest.len());
                },
                // UTF-8 BOM
                0xEF if self.bytes[self.offset..].starts_with(&[0xEF, 0xBB, 0xBF]) =>
                    self.offset += 3,
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Token<'src> {
        self.skip_ignored();
        let start = self.offset;
        let Some(byte) = self.peek_byte(0) else {
            return Token {
                kind: TokenKind::Eof,
                span: ByteSpan::new(start, start),
            };
        };

        let kind = match byte {
            b'@' => self.punct(TokenKind::At),
            b'!' => self.punct(TokenKind::Bang),
            b':' => self.punct(TokenKind::Colon),
            b'}' => self.punct(TokenKind::CurlyBraceClose),
            b'{' => self.punct(TokenKind::CurlyBraceOpen),
            b'$' => self.punct(TokenKind::Dollar),
            b'=' => self.punct(TokenKind::Equals),
            b')' => self.punct(TokenKind::ParenClose),
            b'(' => self.punct(TokenKind::ParenOpen),
            b'|' => self.punct(TokenKind::Pipe),
            b']' => self.punct(TokenKind::SquareBracketClose),
            b'[' => self.punct(TokenKind::SquareBracketOpen),
            b'.' => self.lex_ellipsis(),
            b'"' => self.lex_string(),
            b'-' | b'0'..=b'9' => self.lex_number(),
            b'_' | b'a'..=b'z' | b'A'..=b'Z' => self.lex_name(),
            _ => {
                let ch_len = self.source[start..]
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(1);
                self.offset += ch_len;
                TokenKind::Error(format!(
                    "Unexpected character `{}`",
                    &self.source[start..start + ch_len],
                ))
            },
        };

        Token {
            kind,
            span: ByteSpan::new(start, self.offset),
        }
    }

    fn punct(&mut self, kind: TokenKind<'src>) -> TokenKind<'src> {
        self.offset += 1;
        kind
    }

    fn lex_ellipsis(&mut self) -> TokenKind<'src> {
        if self.peek_byte(1) == Some(b'.') && self.peek_byte(2) == Some(b'.') {
            self.offset += 3;
            TokenKind::Ellipsis
        } else {
            self.offset += 1;
            TokenKind::Error("Unexpected `.`; did you mean `...`?".to_string())
        }
    }

    fn lex_name(&mut self) -> TokenKind<'src> {
        let start = self.offset;
        while let Some(b'_' | b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9') = self.peek_byte(0) {
            self.offset += 1;
        }
        TokenKind::Name(&self.source[start..self.offset])
    }

    fn lex_number(&mut self) -> TokenKind<'src> {
        let start = self.offset;
        if self.peek_byte(0) == Some(b'-') {
            self.offset += 1;
        }
        while let Some(b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') = self.peek_byte(0) {
            if self.peek_byte(0) == Some(b'.') && self.peek_byte(1) == Some(b'.') {
                break;
            }
            self.offset += 1;
        }
        let text = &self.source[start..self.offset];
        if text == "-" {
            TokenKind::Error("Expected digits after `-`".to_string())
        } else {
            TokenKind::Number(text)
        }
    }

    fn lex_string(&mut self) -> TokenKind<'src> {
        let start = self.offset;
        if self.bytes[start..].starts_with(b"\"\"\"") {
            self.offset += 3;
            while self.offset < self.bytes.len() {
                if self.bytes[self.offset..].starts_with(b"\\\"\"\"") {
                    self.offset += 4;
                } else if self.bytes[self.offset..].starts_with(b"\"\"\"") {
                    self.offset += 3;
                    return TokenKind::StringValue(&self.source[start..self.offset]);
                } else {
                    self.offset += 1;
                }
            }
            return TokenKind::Error("Unterminated block string".to_string());
        }

        self.offset += 1;
        while let Some(byte) = self.peek_byte(0) {
            match byte {
                b'\\' => self.offset += 2,
                b'"' => {
                    self.offset += 1;
                    return TokenKind::StringValue(&self.source[start..self.offset]);
                },
                b'\n' | b'\r' => break,
                _ => self.offset += 1,
            }
        }
        self.offset = self.offset.min(self.bytes.len());
        TokenKind::Error("Unterminated string".to_string())
    }
}
