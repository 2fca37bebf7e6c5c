/// Arguments of a call expression such as `Field(..., max_length=10)`, kept
/// as trimmed source text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct CallArgs {
    pub positional: Vec<String>,
    pub keywords: Vec<(String, String)>,
}
impl CallArgs {
    /// Parses the text between a call's parentheses.
    pub fn parse(args_text: &str) -> Self {
        let mut args = Self::default();
        for piece in split_top_level(args_text, b',') {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            match find_assignment_eq(piece) {
                Some(eq_idx) if is_identifier(piece[..eq_idx].trim()) => {
                    args.keywords.push((
                        piece[..eq_idx].trim().to_string(),
                        piece[eq_idx + 1..].trim().to_string(),
                    ));
                },
                _ => args.positional.push(piece.to_string()),
            }
        }
        args
    }

    pub fn keyword(&self, name: &str) -> Option<&str> {
        self.keywords.iter()
            .find(|(keyword, _)| keyword == name)
            .map(|(_, value)| value.as_str())
    }
}

/// If `expr` is a call `callee(args)`, returns the callee and the argument
/// text.
pub(crate) fn split_call(expr: &str) -> Option<(&str, &str)> {
    let expr = expr.trim();
    let open = expr.find('(')?;
    let callee = expr[..open].trim();
    if callee.is_empty() || !callee.split('.').all(is_identifier) {
        return None;
    }
    let close = matching_close(expr, open)?;
    if !expr[close + 1..].trim().is_empty() {
        return None;
    }
    Some((callee, &expr[open + 1..close]))
}

pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Splits `text` on `sep` wherever it appears outside brackets and string
/// literals.
pub(crate) fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let mut pieces = vec![];
    let mut piece_start = 0;
    for_each_top_level_byte(text, |idx, byte| {
        if byte == sep {
            pieces.push(&text[piece_start..idx]);
            piece_start = idx + 1;
        }
        true
    });
    pieces.push(&text[piece_start..]);
    pieces
}

/// Finds the first top-level byte satisfying `pred`.
pub(crate) fn find_top_level(text: &str, mut pred: impl FnMut(usize, u8) -> bool) -> Option<usize> {
    let mut found = None;
    for_each_top_level_byte(text, |idx, byte| {
        if pred(idx, byte) {
            found = Some(idx);
            false
        } else {
            true
        }
    });
    found
}

/// Finds a top-level `=` that is an assignment rather than part of `==`,
/// `<=`, `>=` or `!=`.
pub(crate) fn find_assignment_eq(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    find_top_level(text, |idx, byte| {
        byte == b'='
            && bytes.get(idx + 1) != Some(&b'=')
            && !matches!(idx.checked_sub(1).map(|prev| bytes[prev]), Some(b'=' | b'<' | b'>' | b'!'))
    })
}

/// Strips a trailing `# comment` that is not inside a string literal.
pub(crate) fn strip_comment(line: &str) -> &str {
    match find_top_level_unbracketed(line, b'#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Net change in bracket depth over `text`, ignoring brackets in strings.
pub(crate) fn bracket_delta(text: &str) -> i32 {
    let mut delta = 0;
    walk_bytes(text, |_, byte, _| {
        match byte {
            b'(' | b'[' | b'{' => delta += 1,
            b')' | b']' | b'}' => delta -= 1,
            _ => (),
        }
        true
    });
    delta
}

/// Index of the bracket that closes the one opened at `open_idx`.
pub(crate) fn matching_close(text: &str, open_idx: usize) -> Option<usize> {
    let mut found = None;
    walk_bytes(&text[open_idx..], |idx, _, depth| {
        if depth == 0 && idx > 0 {
            found = Some(open_idx + idx);
            return false;
        }
        true
    });
    found
}

fn for_each_top_level_byte(text: &str, mut visit: impl FnMut(usize, u8) -> bool) {
    walk_bytes(text, |idx, byte, depth_before| {
        let is_bracket = matches!(byte, b'(' | b'[' | b'{' | b')' | b']' | b'}');
        if depth_before == 0 && !is_bracket {
            return visit(idx, byte);
        }
        true
    });
}

fn find_top_level_unbracketed(text: &str, target: u8) -> Option<usize> {
    let mut found = None;
    walk_bytes(text, |idx, byte, _| {
        if byte == target {
            found = Some(idx);
            return false;
        }
        true
    });
    found
}

/// Walks the bytes of `text` that lie outside string literals. The visitor
/// receives each byte's index, the byte, and the bracket depth after any
/// closing bracket at that byte (before an opening one). Returning `false`
/// stops the walk.
fn walk_bytes(text: &str, mut visit: impl FnMut(usize, u8, i32) -> bool) {
    let bytes = text.as_bytes();
    let mut depth = 0;
    let mut idx = 0;
    while idx < bytes.len() {
        let byte = bytes[idx];
        match byte {
            b'\'' | b'"' => {
                let triple = bytes.get(idx + 1) == Some(&byte) && bytes.get(idx + 2) == Some(&byte);
                let quote_len = if triple { 3 } else { 1 };
                idx += quote_len;
                while idx < bytes.len() {
                    if bytes[idx] == b'\\' {
                        idx += 2;
                        continue;
                    }
                    if bytes[idx] == byte
                        && (!triple || (bytes.get(idx + 1) == Some(&byte) && bytes.get(idx + 2) == Some(&byte))) {
                        idx += quote_len;
                        break;
                    }
                    idx += 1;
                }
                continue;
            },
            b')' | b']' | b'}' => {
                depth -= 1;
                if !visit(idx, byte, depth) {
                    return;
                }
            },
            b'(' | b'[' | b'{' => {
                if !visit(idx, byte, depth) {
                    return;
                }
                depth += 1;
            },
            _ => {
                if !visit(idx, byte, depth) {
                    return;
                }
            },
        }
        idx += 1;
    }
}
