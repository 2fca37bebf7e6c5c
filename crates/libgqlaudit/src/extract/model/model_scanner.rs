use crate::extract::ByteSpan;
use crate::extract::LiteralScan;
use crate::extract::model::call_args::bracket_delta;
use crate::extract::model::call_args::find_assignment_eq;
use crate::extract::model::call_args::is_identifier;
use crate::extract::model::call_args::matching_close;
use crate::extract::model::call_args::split_call;
use crate::extract::model::call_args::split_top_level;
use crate::extract::model::call_args::strip_comment;
use crate::extract::model::call_args::CallArgs;
use crate::extract::model::type_expr_parser::constraints_from_args;
use crate::extract::model::FieldSpec;
use crate::extract::model::ModelDefinition;
use crate::extract::model::ModelKind;
use crate::extract::model::TypeExprParser;
use crate::loc::LineIndex;
use regex::Regex;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::OnceLock;

const MODEL_BASE_NAMES: [&str; 2] = ["BaseModel", "RootModel"];
const IGNORED_FIELD_NAMES: [&str; 1] = ["model_config"];

fn class_header_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?m)^([ \t]*)class[ \t]+([A-Za-z_][A-Za-z0-9_]*)[ \t]*([(:])")
            .expect("class header regex is valid")
    })
}

fn from_import_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*from[ \t]+([A-Za-z0-9_.]+)[ \t]+import[ \t]+(\([^)]*\)|[^\n#]+)")
            .expect("from-import regex is valid")
    })
}

fn annotated_name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)[ \t]*:")
            .expect("annotated name regex is valid")
    })
}

/// A model field whose annotation could not be parsed.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ModelScanError {
    pub message: String,
    pub offset: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ScannedModel {
    pub definition: ModelDefinition,
    pub span: ByteSpan,
}

#[derive(Debug, Default)]
pub(crate) struct ModelScan {
    pub models: Vec<ScannedModel>,
    pub errors: Vec<ModelScanError>,
}

#[derive(Clone, Copy, Debug)]
struct Line<'src> {
    start: usize,
    text: &'src str,
}
impl Line<'_> {
    fn indent(&self) -> usize {
        self.text.len() - self.text.trim_start().len()
    }

    fn is_blank_or_comment(&self) -> bool {
        let trimmed = self.text.trim_start();
        trimmed.is_empty() || trimmed.starts_with('#')
    }
}

#[derive(Debug)]
struct ClassHeader {
    name: String,
    bases: Vec<String>,
    decorators: Vec<String>,
    indent: usize,
    span_start: usize,
    /// Index of the first line after the header's closing `:`.
    body_line: usize,
    /// Text after the header's `:` on the same line, e.g. `pass`.
    inline_body: bool,
}

/// Finds data-model class definitions in Python-like source text: classes
/// deriving from `BaseModel`/`RootModel` (directly, via an import alias or
/// through another model in the same file) and `dataclass`-decorated
/// classes.
pub(crate) struct ModelScanner<'src, 'idx> {
    dataclass_decorators: HashSet<String>,
    errors: Vec<ModelScanError>,
    line_index: &'idx LineIndex<'src>,
    lines: Vec<Line<'src>>,
    literals: &'idx LiteralScan,
    model_bases: HashSet<String>,
    source: &'src str,
}
impl<'src, 'idx> ModelScanner<'src, 'idx> {
    pub fn new(line_index: &'idx LineIndex<'src>, literals: &'idx LiteralScan) -> Self {
        let source = line_index.source();
        let mut lines = vec![];
        let mut start = 0;
        for raw_line in source.split('\n') {
            lines.push(Line {
                start,
                text: raw_line.strip_suffix('\r').unwrap_or(raw_line),
            });
            start += raw_line.len() + 1;
        }

        Self {
            dataclass_decorators: HashSet::from(["dataclass".to_string()]),
            errors: vec![],
            line_index,
            lines,
            literals,
            model_bases: MODEL_BASE_NAMES.iter().map(|name| name.to_string()).collect(),
            source,
        }
    }

    pub fn scan(mut self) -> ModelScan {
        self.collect_import_aliases();
        let headers = self.find_class_headers();
        let model_kinds = self.classify(&headers);

        let mut models = vec![];
        for header in &headers {
            let Some(model_kind) = model_kinds.get(header.name.as_str()) else {
                continue;
            };
            let (fields, body_end) = self.scan_body(header);
            log::trace!(
                "Found model `{}` with {} fields.",
                header.name,
                fields.len(),
            );
            models.push(ScannedModel {
                definition: ModelDefinition {
                    name: header.name.to_string(),
                    model_kind: *model_kind,
                    bases: header.bases.clone(),
                    fields,
                },
                span: ByteSpan::new(header.span_start, body_end),
            });
        }

        ModelScan {
            models,
            errors: self.errors,
        }
    }

    fn collect_import_aliases(&mut self) {
        for captures in from_import_regex().captures_iter(self.source) {
            let module = &captures[1];
            let names = captures[2].trim().trim_start_matches('(').trim_end_matches(')');
            let from_pydantic = module == "pydantic" || module.starts_with("pydantic.");
            let from_dataclasses = module == "dataclasses" || module == "pydantic.dataclasses";
            if !from_pydantic && !from_dataclasses {
                continue;
            }

            for imported in names.split(',') {
                let imported = strip_comment(imported).trim();
                let (name, alias) = match imported.split_once(" as ") {
                    Some((name, alias)) => (name.trim(), alias.trim()),
                    None => (imported, imported),
                };
                if from_pydantic && MODEL_BASE_NAMES.contains(&name) {
                    self.model_bases.insert(alias.to_string());
                } else if from_dataclasses && name == "dataclass" {
                    self.dataclass_decorators.insert(alias.to_string());
                }
            }
        }
    }

    fn line_of_offset(&self, offset: usize) -> usize {
        self.lines.partition_point(|line| line.start <= offset) - 1
    }

    fn find_class_headers(&self) -> Vec<ClassHeader> {
        let mut headers = vec![];
        for captures in class_header_regex().captures_iter(self.source) {
            let (Some(whole), Some(indent), Some(name), Some(opener)) =
                (captures.get(0), captures.get(1), captures.get(2), captures.get(3)) else {
                continue;
            };
            let class_kw_offset = indent.end();
            if self.literals.in_literal(class_kw_offset) {
                continue;
            }

            let (bases, colon_offset) =
                if opener.as_str() == "(" {
                    let Some(close) = matching_close(self.source, opener.start()) else {
                        continue;
                    };
                    let bases_text = &self.source[opener.start() + 1..close];
                    let Some(colon_rel) = self.source[close..].find(':') else {
                        continue;
                    };
                    (parse_bases(bases_text), close + colon_rel)
                } else {
                    (vec![], opener.start())
                };

            let header_line = self.line_of_offset(whole.start());
            let colon_line = self.line_of_offset(colon_offset);
            let after_colon = self.lines[colon_line].text
                .get(colon_offset + 1 - self.lines[colon_line].start..)
                .unwrap_or("");
            let inline_body = !strip_comment(after_colon).trim().is_empty();

            headers.push(ClassHeader {
                name: name.as_str().to_string(),
                bases,
                decorators: self.decorators_above(header_line, indent.as_str().len()),
                indent: indent.as_str().len(),
                span_start: class_kw_offset,
                body_line: colon_line + 1,
                inline_body,
            });
        }
        headers
    }

    fn decorators_above(&self, header_line: usize, indent: usize) -> Vec<String> {
        let mut decorators = vec![];
        let mut line_idx = header_line;
        while line_idx > 0 {
            line_idx -= 1;
            let line = self.lines[line_idx];
            let trimmed = line.text.trim();
            if line.indent() != indent || !trimmed.starts_with('@') {
                break;
            }
            let decorator = trimmed[1..]
                .split('(')
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            decorators.push(decorator);
        }
        decorators.reverse();
        decorators
    }

    /// Resolves which classes are models. Inheritance is followed within the
    /// file until nothing changes.
    fn classify(&self, headers: &[ClassHeader]) -> HashMap<String, ModelKind> {
        let mut kinds: HashMap<String, ModelKind> = HashMap::new();
        loop {
            let mut changed = false;
            for header in headers {
                if kinds.contains_key(&header.name) {
                    continue;
                }
                let kind = self.direct_model_kind(header).or_else(|| {
                    header.bases.iter()
                        .find_map(|base| kinds.get(short_name(base)).copied())
                });
                if let Some(kind) = kind {
                    kinds.insert(header.name.to_string(), kind);
                    changed = true;
                }
            }
            if !changed {
                break kinds;
            }
        }
    }

    fn direct_model_kind(&self, header: &ClassHeader) -> Option<ModelKind> {
        let is_dataclass = header.decorators.iter().any(|decorator| {
            self.dataclass_decorators.contains(decorator)
                || short_name(decorator) == "dataclass"
        });
        if is_dataclass {
            return Some(ModelKind::Dataclass);
        }

        let has_model_base = header.bases.iter().any(|base| {
            self.model_bases.contains(base)
                || (base.contains('.') && MODEL_BASE_NAMES.contains(&short_name(base)))
        });
        has_model_base.then_some(ModelKind::BaseModel)
    }

    /// Collects the annotated fields declared directly in a class body.
    /// Returns the fields and the byte offset where the body ends.
    fn scan_body(&mut self, header: &ClassHeader) -> (Vec<FieldSpec>, usize) {
        let header_end = self.lines
            .get(header.body_line.saturating_sub(1))
            .map(|line| line.start + line.text.len())
            .unwrap_or(self.source.len());
        if header.inline_body {
            return (vec![], header_end);
        }

        let mut fields = vec![];
        let mut body_indent = None;
        let mut body_end = header_end;
        let mut line_idx = header.body_line;

        while line_idx < self.lines.len() {
            let line = self.lines[line_idx];
            if line.is_blank_or_comment() {
                line_idx += 1;
                continue;
            }
            let first_char_offset = line.start + line.indent();
            if self.literals.in_literal(first_char_offset) {
                // Docstrings and multi-line string values.
                body_end = line.start + line.text.len();
                line_idx += 1;
                continue;
            }
            if line.indent() <= header.indent {
                break;
            }
            let body_indent = *body_indent.get_or_insert(line.indent());

            // Gather one logical statement.
            let mut statement = strip_comment(line.text.trim()).to_string();
            let mut depth = bracket_delta(&statement);
            let mut last_idx = line_idx;
            while (depth > 0 || statement.ends_with('\\')) && last_idx + 1 < self.lines.len() {
                last_idx += 1;
                let next = strip_comment(self.lines[last_idx].text.trim());
                if statement.ends_with('\\') {
                    statement.pop();
                }
                statement.push(' ');
                statement.push_str(next);
                depth += bracket_delta(next);
            }
            let last_line = self.lines[last_idx];
            body_end = last_line.start + last_line.text.len();

            if line.indent() == body_indent {
                if let Some(field) = self.parse_field_statement(&statement, first_char_offset) {
                    fields.push(field);
                }
            }
            line_idx = last_idx + 1;
        }

        (fields, body_end)
    }

    fn parse_field_statement(&mut self, statement: &str, offset: usize) -> Option<FieldSpec> {
        let captures = annotated_name_regex().captures(statement)?;
        let name = captures.get(1)?.as_str();
        let rest = &statement[captures.get(0)?.end()..];
        if rest.trim().is_empty() || name.starts_with('_') || IGNORED_FIELD_NAMES.contains(&name) {
            return None;
        }

        let (annotation, default) = match find_assignment_eq(rest) {
            Some(eq_idx) => (&rest[..eq_idx], Some(rest[eq_idx + 1..].trim())),
            None => (rest, None),
        };

        let parsed = match TypeExprParser::new(annotation.trim()).parse() {
            Ok(parsed) => parsed,
            Err(err) => {
                self.errors.push(ModelScanError {
                    message: format!("Could not parse the type of field `{name}`: {err}"),
                    offset,
                });
                return None;
            },
        };
        if parsed.is_class_var {
            return None;
        }

        let mut constraints = parsed.constraints;
        let mut default_is_none = false;
        let has_default = match default {
            None => false,
            Some(default) => match split_call(default) {
                Some((callee, args_text)) if matches!(short_name(callee), "Field" | "field") => {
                    let args = CallArgs::parse(args_text);
                    constraints.extend(constraints_from_args(&args));
                    let default_value = args.keyword("default")
                        .or_else(|| args.positional.first().map(String::as_str));
                    default_is_none = default_value == Some("None");
                    default_value.is_some_and(|value| value != "...")
                        || args.keyword("default_factory").is_some()
                },
                _ => {
                    default_is_none = default == "None";
                    default != "..."
                },
            },
        };

        Some(FieldSpec {
            name: name.to_string(),
            required: !has_default && !parsed.declared_type.is_optional(),
            declared_type: parsed.declared_type,
            constraints,
            has_default,
            default_is_none,
            location: self.line_index.location(offset),
        })
    }
}

fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Splits a class's base list, dropping keyword arguments such as
/// `metaclass=...` and generic parameters such as `[T]`.
fn parse_bases(bases_text: &str) -> Vec<String> {
    let cleaned = bases_text.lines()
        .map(strip_comment)
        .collect::<Vec<_>>()
        .join(" ");
    split_top_level(&cleaned, b',')
        .into_iter()
        .map(|base| strip_comment(base).trim())
        .filter(|base| !base.is_empty() && find_assignment_eq(base).is_none())
        .map(|base| base.split('[').next().unwrap_or(base).trim())
        .filter(|base| base.split('.').all(is_identifier))
        .map(str::to_string)
        .collect()
}
