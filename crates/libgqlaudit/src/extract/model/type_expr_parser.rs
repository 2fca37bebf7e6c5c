use crate::extract::model::call_args::CallArgs;
use crate::extract::model::call_args::matching_close;
use crate::extract::model::call_args::split_call;
use crate::extract::model::call_args::split_top_level;
use crate::extract::model::Constraint;
use crate::extract::model::ConstraintKind;
use crate::extract::model::DeclaredType;
use thiserror::Error;

type Result<T> = std::result::Result<T, TypeExprError>;

const MAX_NESTING: usize = 32;

const LIST_LIKE: &[&str] = &[
    "AbstractSet", "Collection", "Deque", "FrozenSet", "Iterable", "List",
    "MutableSequence", "MutableSet", "Sequence", "Set", "Tuple", "conlist",
    "confrozenset", "conset", "deque", "frozenset", "list", "set", "tuple",
];
const MAPPING_LIKE: &[&str] = &[
    "Counter", "DefaultDict", "Dict", "Mapping", "MutableMapping",
    "OrderedDict", "defaultdict", "dict",
];
const TRANSPARENT_WRAPPERS: &[&str] = &[
    "Final", "NotRequired", "ReadOnly", "Required",
];
const CONSTRAINT_CALLEES: &[&str] = &["Field", "StringConstraints"];

#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeExprError {
    #[error("Empty type annotation")]
    Empty,

    #[error("Unexpected `{found}` at offset {offset} of type annotation `{text}`")]
    Unexpected {
        found: String,
        offset: usize,
        text: String,
    },

    #[error("Unclosed bracket in type annotation `{text}`")]
    Unclosed {
        text: String,
    },

    #[error("Type annotation `{text}` is nested too deeply")]
    TooDeep {
        text: String,
    },
}

/// The result of parsing one annotation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ParsedAnnotation {
    pub declared_type: DeclaredType,

    /// Constraints carried by the annotation itself, e.g. by
    /// `Annotated[str, Field(max_length=5)]` or `constr(min_length=1)`.
    pub constraints: Vec<Constraint>,

    pub is_class_var: bool,
}

/// Recursive-descent parser for Python-style type expressions such as
/// `Optional[List[Union[Order, "LineItem"]]]` or `int | None`.
pub(crate) struct TypeExprParser<'a> {
    constraints: Vec<Constraint>,
    depth: usize,
    is_class_var: bool,
    pos: usize,
    text: &'a str,
}
impl<'a> TypeExprParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_depth(text, 0)
    }

    /// A parser for text nested inside another annotation, which counts
    /// towards the same nesting limit.
    fn with_depth(text: &'a str, depth: usize) -> Self {
        Self {
            constraints: vec![],
            depth,
            is_class_var: false,
            pos: 0,
            text,
        }
    }

    pub fn parse(mut self) -> Result<ParsedAnnotation> {
        self.skip_ws();
        if self.pos >= self.text.len() {
            return Err(TypeExprError::Empty);
        }
        let declared_type = self.parse_union()?;
        self.skip_ws();
        if self.pos < self.text.len() {
            return Err(self.unexpected());
        }
        Ok(ParsedAnnotation {
            declared_type,
            constraints: self.constraints,
            is_class_var: self.is_class_var,
        })
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, ch: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> TypeExprError {
        TypeExprError::Unexpected {
            found: self.peek().map(String::from).unwrap_or_default(),
            offset: self.pos,
            text: self.text.to_string(),
        }
    }

    fn parse_union(&mut self) -> Result<DeclaredType> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(TypeExprError::TooDeep {
                text: self.text.to_string(),
            });
        }
        let first = self.parse_primary()?;
        let mut members = vec![first];
        while self.eat('|') {
            members.push(self.parse_primary()?);
        }
        self.depth -= 1;

        if members.len() == 1 {
            Ok(members.remove(0))
        } else {
            Ok(normalize_union(members))
        }
    }

    fn parse_primary(&mut self) -> Result<DeclaredType> {
        self.skip_ws();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_forward_ref(quote),
            Some('.') if self.rest().starts_with("...") => {
                self.pos += 3;
                Ok(DeclaredType::Scalar("...".to_string()))
            },
            Some('[') => {
                // A bare list of types, as in `Callable[[int], str]`.
                self.pos += 1;
                let args = self.parse_args_until(']')?;
                Ok(DeclaredType::List(Box::new(
                    args.into_iter().next().unwrap_or_else(any_type),
                )))
            },
            Some(c) if c.is_ascii_digit() || c == '-' => {
                let len = self.rest()
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'))
                    .unwrap_or(self.rest().len());
                let literal = self.rest()[..len].to_string();
                self.pos += len;
                Ok(DeclaredType::Scalar(literal))
            },
            Some(c) if c == '_' || c.is_alphabetic() => self.parse_named(),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_forward_ref(&mut self, quote: char) -> Result<DeclaredType> {
        let start = self.pos + 1;
        let Some(len) = self.text[start..].find(quote) else {
            return Err(TypeExprError::Unclosed {
                text: self.text.to_string(),
            });
        };
        let inner = &self.text[start..start + len];
        self.pos = start + len + 1;

        let parsed = TypeExprParser::with_depth(inner, self.depth + 1).parse()?;
        self.constraints.extend(parsed.constraints);
        self.is_class_var |= parsed.is_class_var;
        Ok(parsed.declared_type)
    }

    fn parse_dotted_name(&mut self) -> &'a str {
        let start = self.pos;
        let len = self.rest()
            .find(|c: char| !(c == '_' || c == '.' || c.is_alphanumeric()))
            .unwrap_or(self.rest().len());
        self.pos += len;
        &self.text[start..start + len]
    }

    fn parse_named(&mut self) -> Result<DeclaredType> {
        let name = self.parse_dotted_name();
        let short = name.rsplit('.').next().unwrap_or(name);
        self.skip_ws();

        match self.peek() {
            Some('[') => match short {
                "Literal" => {
                    let inner = self.take_bracketed()?;
                    Ok(DeclaredType::Literal(
                        split_top_level(inner, b',')
                            .into_iter()
                            .map(|value| value.trim().to_string())
                            .filter(|value| !value.is_empty())
                            .collect(),
                    ))
                },
                "Annotated" => self.parse_annotated(),
                _ => {
                    self.pos += 1;
                    let args = self.parse_args_until(']')?;
                    Ok(self.build_generic(name, short, args))
                },
            },
            Some('(') => self.parse_call_type(name, short),
            _ => Ok(bare_type(name, short)),
        }
    }

    /// Returns the text between the bracket at the cursor and its match,
    /// leaving the cursor after the closing bracket.
    fn take_bracketed(&mut self) -> Result<&'a str> {
        let open = self.pos;
        let close = matching_close(self.text, open).ok_or_else(|| TypeExprError::Unclosed {
            text: self.text.to_string(),
        })?;
        self.pos = close + 1;
        Ok(&self.text[open + 1..close])
    }

    fn parse_args_until(&mut self, close: char) -> Result<Vec<DeclaredType>> {
        let mut args = vec![];
        loop {
            if self.eat(close) {
                return Ok(args);
            }
            if self.pos >= self.text.len() {
                return Err(TypeExprError::Unclosed {
                    text: self.text.to_string(),
                });
            }
            args.push(self.parse_union()?);
            if !self.eat(',') {
                self.skip_ws();
                if self.peek() != Some(close) {
                    return Err(self.unexpected());
                }
            }
        }
    }

    fn parse_annotated(&mut self) -> Result<DeclaredType> {
        let inner = self.take_bracketed()?;
        let mut pieces = split_top_level(inner, b',').into_iter();
        let base = pieces.next().unwrap_or_default();
        let parsed = TypeExprParser::with_depth(base, self.depth + 1).parse()?;
        self.constraints.extend(parsed.constraints);
        self.is_class_var |= parsed.is_class_var;

        for metadata in pieces {
            if let Some((callee, args_text)) = split_call(metadata) {
                let callee = callee.rsplit('.').next().unwrap_or(callee);
                if CONSTRAINT_CALLEES.contains(&callee) {
                    self.constraints.extend(constraints_from_args(&CallArgs::parse(args_text)));
                }
            }
        }
        Ok(parsed.declared_type)
    }

    /// Handles `constr(...)`-style constrained type factories.
    fn parse_call_type(&mut self, name: &str, short: &str) -> Result<DeclaredType> {
        let inner = self.take_bracketed()?;
        let args = CallArgs::parse(inner);
        self.constraints.extend(constraints_from_args(&args));

        Ok(match short {
            "constr" => DeclaredType::Scalar("str".to_string()),
            "conint" => DeclaredType::Scalar("int".to_string()),
            "confloat" => DeclaredType::Scalar("float".to_string()),
            "condecimal" => DeclaredType::Scalar("Decimal".to_string()),
            "conbytes" => DeclaredType::Scalar("bytes".to_string()),
            "condate" => DeclaredType::Scalar("date".to_string()),
            "conlist" | "conset" | "confrozenset" => {
                let item_text = args.positional.first()
                    .map(String::as_str)
                    .or_else(|| args.keyword("item_type"));
                let item_type = match item_text {
                    Some(text) => {
                        let parsed = TypeExprParser::with_depth(text, self.depth + 1).parse()?;
                        self.constraints.extend(parsed.constraints);
                        parsed.declared_type
                    },
                    None => any_type(),
                };
                DeclaredType::List(Box::new(item_type))
            },
            _ => DeclaredType::from_name(name),
        })
    }

    fn build_generic(
        &mut self,
        name: &str,
        short: &str,
        mut args: Vec<DeclaredType>,
    ) -> DeclaredType {
        args.retain(|arg| !matches!(arg, DeclaredType::Scalar(s) if s == "..."));
        let mut args = args.into_iter();

        match short {
            "Optional" => DeclaredType::Optional(Box::new(args.next().unwrap_or_else(any_type))),
            "Union" => normalize_union(args.collect()),
            "ClassVar" => {
                self.is_class_var = true;
                args.next().unwrap_or_else(any_type)
            },
            "Type" | "type" => DeclaredType::Scalar("type".to_string()),
            _ if TRANSPARENT_WRAPPERS.contains(&short) => args.next().unwrap_or_else(any_type),
            _ if LIST_LIKE.contains(&short) =>
                DeclaredType::List(Box::new(args.next().unwrap_or_else(any_type))),
            _ if MAPPING_LIKE.contains(&short) => {
                let key = args.next().unwrap_or_else(any_type);
                let value = args.next().unwrap_or_else(any_type);
                DeclaredType::Mapping(Box::new(key), Box::new(value))
            },
            // Generic models like `Page[Item]` are still models.
            _ => DeclaredType::from_name(name),
        }
    }
}

fn any_type() -> DeclaredType {
    DeclaredType::Scalar("Any".to_string())
}

fn bare_type(name: &str, short: &str) -> DeclaredType {
    if LIST_LIKE.contains(&short) {
        DeclaredType::List(Box::new(any_type()))
    } else if MAPPING_LIKE.contains(&short) {
        DeclaredType::Mapping(Box::new(any_type()), Box::new(any_type()))
    } else if short == "NoneType" {
        DeclaredType::Scalar("None".to_string())
    } else {
        DeclaredType::from_name(name)
    }
}

fn is_none_type(declared_type: &DeclaredType) -> bool {
    matches!(declared_type, DeclaredType::Scalar(name) if name == "None")
}

/// `None` members turn a union into an `Optional`. A union left with a
/// single member stays a union so that it can be flagged.
fn normalize_union(members: Vec<DeclaredType>) -> DeclaredType {
    let has_none = members.iter().any(is_none_type);
    let mut rest: Vec<DeclaredType> =
        members.into_iter().filter(|member| !is_none_type(member)).collect();

    if !has_none {
        return DeclaredType::Union(rest);
    }
    match rest.len() {
        0 => DeclaredType::Scalar("None".to_string()),
        1 => DeclaredType::Optional(Box::new(rest.remove(0))),
        _ => DeclaredType::Optional(Box::new(DeclaredType::Union(rest))),
    }
}

pub(crate) fn constraints_from_args(args: &CallArgs) -> Vec<Constraint> {
    args.keywords.iter()
        .filter_map(|(keyword, value)| {
            ConstraintKind::from_keyword(keyword)
                .map(|kind| Constraint::new(kind, value.as_str()))
        })
        .collect()
}
