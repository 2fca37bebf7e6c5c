use crate::schema::Result;
use crate::schema::SchemaArgument;
use crate::schema::SchemaField;
use crate::schema::SchemaMalformedError;
use crate::schema::SchemaSnapshotBuilder;
use crate::schema::SchemaType;
use crate::schema::SchemaTypeKind;
use serde_json::Value;

/// Wrapper chains deeper than this are treated as malformed and rendered
/// up to the cut-off.
const MAX_TYPE_REF_DEPTH: usize = 16;

pub(super) fn load(
    builder: &mut SchemaSnapshotBuilder,
    document: &Value,
) -> Result<()> {
    let schema = locate_schema_object(document)
        .ok_or(SchemaMalformedError::MissingTypeContainer)?;

    let types = match schema.get("types") {
        Some(Value::Array(types)) => types,
        Some(other) => return Err(SchemaMalformedError::TypeContainerNotAList {
            found: json_kind_name(other).to_string(),
        }),
        None => return Err(SchemaMalformedError::MissingTypeContainer),
    };

    if let Some(name) = root_type_name(schema, "queryType") {
        builder.query_type = Some(name);
    }
    if let Some(name) = root_type_name(schema, "mutationType") {
        builder.mutation_type = Some(name);
    }
    if let Some(name) = root_type_name(schema, "subscriptionType") {
        builder.subscription_type = Some(name);
    }

    let mut num_skipped = 0;
    for raw_type in types {
        match build_type(raw_type) {
            Some(type_) => {
                builder.add_type(type_);
            },
            None => {
                num_skipped += 1;
            },
        }
    }
    if num_skipped > 0 {
        log::warn!(
            "Skipped {num_skipped} introspection type records without a usable \
            `name` or `kind`."
        );
    }

    Ok(())
}

fn locate_schema_object(document: &Value) -> Option<&Value> {
    if let Some(schema) = document.get("data").and_then(|data| data.get("__schema")) {
        return Some(schema);
    }
    if let Some(schema) = document.get("__schema") {
        return Some(schema);
    }
    if document.get("types").is_some() {
        return Some(document);
    }
    None
}

fn root_type_name(schema: &Value, key: &str) -> Option<String> {
    schema.get(key)?
        .get("name")?
        .as_str()
        .map(str::to_string)
}

fn build_type(raw_type: &Value) -> Option<SchemaType> {
    let name = raw_type.get("name").and_then(Value::as_str)?;
    let kind = raw_type.get("kind")
        .and_then(Value::as_str)
        .and_then(SchemaTypeKind::from_introspection);
    let Some(kind) = kind else {
        log::warn!("Type `{name}` has a missing or unknown `kind`; skipping it.");
        return None;
    };

    let mut type_ = SchemaType::new(name, kind);
    for container in ["fields", "inputFields"] {
        let Some(Value::Array(raw_fields)) = raw_type.get(container) else {
            continue;
        };
        for raw_field in raw_fields {
            if let Some(field) = build_field(raw_field) {
                type_.add_field(field);
            } else {
                log::warn!("Skipping a nameless field on type `{name}`.");
            }
        }
    }
    Some(type_)
}

fn build_field(raw_field: &Value) -> Option<SchemaField> {
    let name = raw_field.get("name").and_then(Value::as_str)?;
    let type_value = raw_field.get("type").unwrap_or(&Value::Null);

    let deprecation_reason = raw_field.get("deprecationReason")
        .and_then(Value::as_str)
        .map(str::to_string);
    let is_deprecated = raw_field.get("isDeprecated")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let arguments = match raw_field.get("args") {
        Some(Value::Array(raw_args)) => raw_args.iter().filter_map(build_argument).collect(),
        _ => vec![],
    };

    Some(SchemaField {
        name: name.to_string(),
        type_ref: render_type_ref(type_value, 0),
        nullable: type_value.get("kind").and_then(Value::as_str) != Some("NON_NULL"),
        // A reason without the flag still marks the field deprecated.
        deprecated: is_deprecated || deprecation_reason.is_some(),
        deprecation_reason,
        arguments,
    })
}

fn build_argument(raw_arg: &Value) -> Option<SchemaArgument> {
    let name = raw_arg.get("name").and_then(Value::as_str)?;
    let type_value = raw_arg.get("type").unwrap_or(&Value::Null);
    Some(SchemaArgument::new(name, render_type_ref(type_value, 0)))
}

/// Renders an introspection `__Type` reference chain in SDL notation.
fn render_type_ref(type_value: &Value, depth: usize) -> String {
    let of_type = type_value.get("ofType").unwrap_or(&Value::Null);
    let kind = type_value.get("kind").and_then(Value::as_str);
    if depth >= MAX_TYPE_REF_DEPTH {
        return type_value.get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();
    }
    match kind {
        Some("NON_NULL") => format!("{}!", render_type_ref(of_type, depth + 1)),
        Some("LIST") => format!("[{}]", render_type_ref(of_type, depth + 1)),
        _ => type_value.get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string(),
    }
}

fn json_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
