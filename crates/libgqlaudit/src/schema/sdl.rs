use crate::schema::Result;
use crate::schema::SchemaArgument;
use crate::schema::SchemaField;
use crate::schema::SchemaMalformedError;
use crate::schema::SchemaSnapshotBuilder;
use crate::schema::SchemaType;
use crate::schema::SchemaTypeKind;
use graphql_parser::schema as ast;

const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

type Directive = ast::Directive<'static, String>;
type InputValue = ast::InputValue<'static, String>;
type Type = ast::Type<'static, String>;

pub(super) fn load(builder: &mut SchemaSnapshotBuilder, sdl_source: &str) -> Result<()> {
    let document =
        ast::parse_schema::<String>(sdl_source)
            .map_err(|err| SchemaMalformedError::SdlParseError {
                err: err.to_string(),
            })?
            .into_static();

    for def in document.definitions {
        match def {
            ast::Definition::SchemaDefinition(schema_def) => {
                if schema_def.query.is_some() {
                    builder.query_type = schema_def.query;
                }
                if schema_def.mutation.is_some() {
                    builder.mutation_type = schema_def.mutation;
                }
                if schema_def.subscription.is_some() {
                    builder.subscription_type = schema_def.subscription;
                }
            },
            ast::Definition::TypeDefinition(type_def) => {
                builder.add_type(visit_type_def(type_def));
            },
            ast::Definition::TypeExtension(type_ext) =>
                visit_type_extension(builder, type_ext),
            ast::Definition::DirectiveDefinition(_) => (),
        }
    }

    Ok(())
}

fn visit_type_def(type_def: ast::TypeDefinition<'static, String>) -> SchemaType {
    use ast::TypeDefinition;
    match type_def {
        TypeDefinition::Enum(enum_def) =>
            SchemaType::new(enum_def.name, SchemaTypeKind::Enum),

        TypeDefinition::InputObject(input_def) => {
            let mut type_ = SchemaType::new(input_def.name, SchemaTypeKind::Input);
            for input_value in input_def.fields {
                type_.add_field(build_field(
                    input_value.name,
                    &input_value.value_type,
                    &input_value.directives,
                    vec![],
                ));
            }
            type_
        },

        TypeDefinition::Interface(iface_def) => {
            let mut type_ = SchemaType::new(iface_def.name, SchemaTypeKind::Interface);
            for field in iface_def.fields {
                type_.add_field(build_output_field(field));
            }
            type_
        },

        TypeDefinition::Object(obj_def) => {
            let mut type_ = SchemaType::new(obj_def.name, SchemaTypeKind::Object);
            for field in obj_def.fields {
                type_.add_field(build_output_field(field));
            }
            type_
        },

        TypeDefinition::Scalar(scalar_def) =>
            SchemaType::new(scalar_def.name, SchemaTypeKind::Scalar),

        TypeDefinition::Union(union_def) =>
            SchemaType::new(union_def.name, SchemaTypeKind::Union),
    }
}

/// Extensions merge their fields into an already-loaded type. Extensions of
/// unknown types are ignored.
fn visit_type_extension(
    builder: &mut SchemaSnapshotBuilder,
    ext: ast::TypeExtension<'static, String>,
) {
    use ast::TypeExtension;
    let (type_name, fields) = match ext {
        TypeExtension::Object(obj_ext) => (
            obj_ext.name,
            obj_ext.fields.into_iter()
                .map(build_output_field)
                .collect::<Vec<_>>(),
        ),
        TypeExtension::Interface(iface_ext) => (
            iface_ext.name,
            iface_ext.fields.into_iter()
                .map(build_output_field)
                .collect(),
        ),
        TypeExtension::InputObject(input_ext) => (
            input_ext.name,
            input_ext.fields.into_iter()
                .map(|f| build_field(f.name, &f.value_type, &f.directives, vec![]))
                .collect(),
        ),
        TypeExtension::Enum(_)
            | TypeExtension::Scalar(_)
            | TypeExtension::Union(_) => return,
    };

    match builder.types.get_mut(&type_name) {
        Some(type_) => {
            for field in fields {
                type_.add_field(field);
            }
        },
        None => log::warn!(
            "Ignoring extension of type `{type_name}`, which is not defined."
        ),
    }
}

fn build_output_field(field: ast::Field<'static, String>) -> SchemaField {
    let arguments = field.arguments.iter().map(build_argument).collect();
    build_field(field.name, &field.field_type, &field.directives, arguments)
}

fn build_argument(input_value: &InputValue) -> SchemaArgument {
    SchemaArgument::new(input_value.name.as_str(), render_type(&input_value.value_type))
}

fn build_field(
    name: String,
    field_type: &Type,
    directives: &[Directive],
    arguments: Vec<SchemaArgument>,
) -> SchemaField {
    let deprecated_directive =
        directives.iter().find(|directive| directive.name == "deprecated");
    let deprecation_reason = deprecated_directive.map(|directive| {
        directive.arguments.iter()
            .find(|(arg_name, _)| arg_name == "reason")
            .and_then(|(_, value)| match value {
                ast::Value::String(reason) => Some(reason.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| DEFAULT_DEPRECATION_REASON.to_string())
    });

    SchemaField {
        name,
        type_ref: render_type(field_type),
        nullable: !matches!(field_type, ast::Type::NonNullType(_)),
        deprecated: deprecated_directive.is_some(),
        deprecation_reason,
        arguments,
    }
}

fn render_type(type_: &Type) -> String {
    match type_ {
        ast::Type::NamedType(name) => name.to_string(),
        ast::Type::ListType(inner) => format!("[{}]", render_type(inner)),
        ast::Type::NonNullType(inner) => format!("{}!", render_type(inner)),
    }
}
