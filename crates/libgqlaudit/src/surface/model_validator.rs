use crate::extract::model::Constraint;
use crate::extract::model::ConstraintKind;
use crate::extract::model::DeclaredType;
use crate::extract::model::FieldSpec;
use crate::extract::model::ModelDefinition;
use crate::issue::Issue;
use crate::issue::IssueCode;
use crate::surface::constraint_fits_type;

/// Checks every field of one model definition. Issues are attached at the
/// offending field's location.
pub(super) struct ModelValidator<'a> {
    issues: Vec<Issue>,
    model: &'a ModelDefinition,
}
impl<'a> ModelValidator<'a> {
    pub fn new(model: &'a ModelDefinition) -> Self {
        Self {
            issues: vec![],
            model,
        }
    }

    pub fn validate(mut self) -> Vec<Issue> {
        let model = self.model;
        for field in &model.fields {
            self.check_type_shape(field);
            self.check_constraint_types(field);
            self.check_constraint_ranges(field);
            self.check_required_without_default(field);
            self.check_none_default(field);
        }
        self.issues
    }

    fn push(&mut self, code: IssueCode, field: &FieldSpec, message: String) {
        self.issues.push(Issue::new(code, message, field.location.clone()));
    }

    fn check_type_shape(&mut self, field: &FieldSpec) {
        let mut short_unions = vec![];
        let mut has_double_optional = false;
        field.declared_type.walk(&mut |node| match node {
            DeclaredType::Union(members) if members.len() < 2 => short_unions.push(node),
            DeclaredType::Optional(inner) if inner.is_optional() => has_double_optional = true,
            _ => (),
        });

        for short_union in short_unions {
            self.push(
                IssueCode::UnionTooFewMembers,
                field,
                format!(
                    "Field `{}.{}` declares `{short_union}`, a union with fewer than two members",
                    self.model.name,
                    field.name,
                ),
            );
        }
        if has_double_optional {
            self.push(
                IssueCode::DoubleOptional,
                field,
                format!(
                    "Field `{}.{}` wraps an optional type in another optional: `{}`",
                    self.model.name,
                    field.name,
                    field.declared_type,
                ),
            );
        }
    }

    fn check_constraint_types(&mut self, field: &FieldSpec) {
        for constraint in &field.constraints {
            if constraint_fits_type(&field.declared_type, constraint.kind.category()) != Some(false) {
                continue;
            }
            self.push(
                IssueCode::TypeConstraintMismatch,
                field,
                format!(
                    "Constraint `{constraint}` does not apply to field `{}.{}` of type `{}`",
                    self.model.name,
                    field.name,
                    field.declared_type,
                ),
            );
        }
    }

    fn check_constraint_ranges(&mut self, field: &FieldSpec) {
        if let (Some((min, min_value)), Some((max, max_value))) = (
            find_bound(field, &[ConstraintKind::MinLength]),
            find_bound(field, &[ConstraintKind::MaxLength]),
        )
            && min_value > max_value {
            self.push_inverted(field, min, max);
        }

        if let (Some((lower, lower_value)), Some((upper, upper_value))) = (
            find_bound(field, &[ConstraintKind::Ge, ConstraintKind::Gt]),
            find_bound(field, &[ConstraintKind::Le, ConstraintKind::Lt]),
        ) {
            let strict =
                lower.kind == ConstraintKind::Gt || upper.kind == ConstraintKind::Lt;
            let inverted =
                lower_value > upper_value || (strict && lower_value == upper_value);
            if inverted {
                self.push_inverted(field, lower, upper);
            }
        }
    }

    fn push_inverted(&mut self, field: &FieldSpec, lower: &Constraint, upper: &Constraint) {
        self.push(
            IssueCode::ConstraintRangeInverted,
            field,
            format!(
                "Field `{}.{}` can never be valid: `{lower}` contradicts `{upper}`",
                self.model.name,
                field.name,
            ),
        );
    }

    fn check_required_without_default(&mut self, field: &FieldSpec) {
        if field.required && field.constraints.is_empty() && !field.has_default {
            self.push(
                IssueCode::RequiredFieldNoDefault,
                field,
                format!(
                    "Field `{}.{}` is required but has neither a default nor any constraint",
                    self.model.name,
                    field.name,
                ),
            );
        }
    }

    fn check_none_default(&mut self, field: &FieldSpec) {
        if !field.default_is_none || accepts_none(&field.declared_type) {
            return;
        }
        self.push(
            IssueCode::NoneDefaultNotOptional,
            field,
            format!(
                "Field `{}.{}` defaults to None but its type `{}` is not Optional; \
                consider `Optional[{}]`",
                self.model.name,
                field.name,
                field.declared_type,
                field.declared_type,
            ),
        );
    }
}

fn accepts_none(declared_type: &DeclaredType) -> bool {
    match declared_type {
        DeclaredType::Optional(_) => true,
        DeclaredType::Scalar(name) => matches!(name.as_str(), "Any" | "None" | "object"),
        DeclaredType::Literal(values) => values.iter().any(|value| value == "None"),
        DeclaredType::Union(members) => members.iter().any(accepts_none),
        DeclaredType::List(_) | DeclaredType::Mapping(..) | DeclaredType::Model(_) => false,
    }
}

/// The first constraint of one of `kinds` that has a numeric value.
fn find_bound<'f>(
    field: &'f FieldSpec,
    kinds: &[ConstraintKind],
) -> Option<(&'f Constraint, f64)> {
    field.constraints.iter()
        .filter(|constraint| kinds.contains(&constraint.kind))
        .find_map(|constraint| constraint.numeric_value().map(|value| (constraint, value)))
}
