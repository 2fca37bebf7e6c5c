use crate::extract::ByteSpan;

/// A terminated host-language string literal.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StringLiteral {
    /// The whole literal, including prefix letters and quotes.
    pub span: ByteSpan,
    /// The text between the quotes.
    pub body: ByteSpan,
    pub is_fstring: bool,
    pub is_raw: bool,
    pub is_triple_quoted: bool,
}
impl StringLiteral {
    /// The literal's body rewritten so it can be lexed as GraphQL. The result
    /// has exactly the same byte length as the body, so offsets into it map
    /// straight back onto the file.
    pub fn neutralized_body(&self, source: &str) -> String {
        neutralize(
            &source[self.body.start..self.body.end],
            self.is_raw,
            self.is_fstring,
        )
    }
}

/// A string literal whose closing quote was never found.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct UnterminatedLiteral {
    pub quote_offset: usize,
    /// From just after the opening quote to where scanning gave up.
    pub body: ByteSpan,
    pub is_triple_quoted: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct LiteralScan {
    pub literals: Vec<StringLiteral>,
    pub unterminated: Vec<UnterminatedLiteral>,
}
impl LiteralScan {
    /// Whether `offset` falls inside any scanned literal.
    pub fn in_literal(&self, offset: usize) -> bool {
        let idx = self.literals.partition_point(|lit| lit.span.end <= offset);
        self.literals.get(idx).is_some_and(|lit| lit.span.contains(offset))
    }
}

/// Finds every string literal in Python-like source text, skipping `#`
/// comments. Literals are returned in source order.
pub(crate) fn scan_python_literals(source: &str) -> LiteralScan {
    let bytes = source.as_bytes();
    let mut scan = LiteralScan::default();
    let mut idx = 0;

    while idx < bytes.len() {
        match bytes[idx] {
            b'#' => {
                idx += memchr::memchr(b'\n', &bytes[idx..]).unwrap_or(bytes.len() - idx);
            },

            quote @ (b'\'' | b'"') => {
                let prefix_start = string_prefix_start(bytes, idx);
                let prefix = &source[prefix_start..idx];
                let is_raw = prefix.contains(['r', 'R']);
                let is_fstring = prefix.contains(['f', 'F']);
                let is_triple_quoted =
                    bytes.get(idx + 1) == Some(&quote) && bytes.get(idx + 2) == Some(&quote);
                let quote_len = if is_triple_quoted { 3 } else { 1 };
                let body_start = idx + quote_len;

                match find_closing_quote(bytes, body_start, quote, is_triple_quoted) {
                    Ok(body_end) => {
                        let end = body_end + quote_len;
                        scan.literals.push(StringLiteral {
                            span: ByteSpan::new(prefix_start, end),
                            body: ByteSpan::new(body_start, body_end),
                            is_fstring,
                            is_raw,
                            is_triple_quoted,
                        });
                        idx = end;
                    },
                    Err(stopped_at) => {
                        scan.unterminated.push(UnterminatedLiteral {
                            quote_offset: idx,
                            body: ByteSpan::new(body_start, stopped_at),
                            is_triple_quoted,
                        });
                        idx = stopped_at;
                    },
                }
            },

            _ => idx += 1,
        }
    }

    scan
}

fn is_ident_byte(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphanumeric()
}

/// Returns the offset where a literal's prefix letters (`r`, `b`, `u`, `f`)
/// begin, or `quote_idx` when there are none.
fn string_prefix_start(bytes: &[u8], quote_idx: usize) -> usize {
    let mut start = quote_idx;
    while start > 0 && quote_idx - start < 2 && bytes[start - 1].is_ascii_alphabetic() {
        start -= 1;
    }
    let prefix_ok = bytes[start..quote_idx].iter()
        .all(|b| matches!(b.to_ascii_lowercase(), b'r' | b'b' | b'u' | b'f'));
    let preceded_by_ident = start > 0 && is_ident_byte(bytes[start - 1]);
    if prefix_ok && !preceded_by_ident {
        start
    } else {
        quote_idx
    }
}

/// Returns the offset of the closing quote, or `Err` with the offset where
/// scanning stopped (the end of the line for single-quoted literals, the end
/// of input for triple-quoted ones).
fn find_closing_quote(
    bytes: &[u8],
    body_start: usize,
    quote: u8,
    is_triple_quoted: bool,
) -> Result<usize, usize> {
    let mut idx = body_start;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b'\n' if !is_triple_quoted => return Err(idx),
            byte if byte == quote => {
                if !is_triple_quoted {
                    return Ok(idx);
                }
                if bytes.get(idx + 1) == Some(&quote) && bytes.get(idx + 2) == Some(&quote) {
                    return Ok(idx);
                }
                idx += 1;
            },
            _ => idx += 1,
        }
    }
    Err(bytes.len())
}

/// Length-preserving rewrite of a literal body into lexable GraphQL.
///
/// * `\n`, `\t`, `\r` become two spaces; any other escape keeps the escaped
///   character behind a space.
/// * In f-strings `{{` and `}}` become ` {` and ` }`, and each `{expr}`
///   interpolation becomes a run of `_`.
pub(crate) fn neutralize(body: &str, is_raw: bool, is_fstring: bool) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' if !is_raw => match chars.next() {
                Some((_, 'n' | 't' | 'r')) => out.push_str("  "),
                Some((_, escaped)) => {
                    out.push(' ');
                    out.push(escaped);
                },
                None => out.push(' '),
            },

            '{' if is_fstring => {
                if chars.peek().is_some_and(|&(_, next)| next == '{') {
                    chars.next();
                    out.push_str(" {");
                    continue;
                }
                let mut depth = 1;
                let mut end = body.len();
                for (expr_idx, expr_ch) in chars.by_ref() {
                    match expr_ch {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                end = expr_idx + 1;
                                break;
                            }
                        },
                        _ => (),
                    }
                }
                out.extend(std::iter::repeat_n('_', end - idx));
            },

            '}' if is_fstring && chars.peek().is_some_and(|&(_, next)| next == '}') => {
                chars.next();
                out.push_str(" }");
            },

            other => out.push(other),
        }
    }

    out
}
