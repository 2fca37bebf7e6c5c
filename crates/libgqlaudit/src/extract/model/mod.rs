mod call_args;
mod constraint;
mod declared_type;
mod field_spec;
mod model_definition;
mod model_scanner;
mod type_expr_parser;

pub use constraint::Constraint;
pub use constraint::ConstraintCategory;
pub use constraint::ConstraintKind;
pub use declared_type::DeclaredType;
pub use declared_type::ScalarClass;
pub use declared_type::scalar_class;
pub use field_spec::FieldSpec;
pub use model_definition::ModelDefinition;
pub use model_definition::ModelKind;
pub(crate) use model_scanner::ModelScanner;
pub(crate) use type_expr_parser::TypeExprParser;
pub use type_expr_parser::TypeExprError;
