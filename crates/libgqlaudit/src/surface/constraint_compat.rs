use crate::extract::model::ConstraintCategory;
use crate::extract::model::DeclaredType;
use crate::extract::model::ScalarClass;
use crate::extract::model::scalar_class;

/// Decides whether a constraint of `category` makes sense on a field of
/// `declared_type`.
///
/// Returns `None` when the type cannot be judged: nested models, literals,
/// `Any` and unknown scalar names. `Optional` is looked through and a union
/// fits when any of its members does.
pub fn constraint_fits_type(
    declared_type: &DeclaredType,
    category: ConstraintCategory,
) -> Option<bool> {
    match declared_type {
        DeclaredType::Optional(inner) => constraint_fits_type(inner, category),

        DeclaredType::Union(members) => {
            let mut verdict = Some(false);
            for member in members {
                match constraint_fits_type(member, category) {
                    Some(true) => return Some(true),
                    Some(false) => (),
                    None => verdict = None,
                }
            }
            verdict
        },

        DeclaredType::List(_) | DeclaredType::Mapping(_, _) =>
            Some(category == ConstraintCategory::Length),

        DeclaredType::Literal(_) | DeclaredType::Model(_) => None,

        DeclaredType::Scalar(name) => {
            let class = scalar_class(name);
            if class == ScalarClass::Unknown {
                return None;
            }
            Some(scalar_fits(class, category))
        },
    }
}

fn scalar_fits(class: ScalarClass, category: ConstraintCategory) -> bool {
    match category {
        ConstraintCategory::Length =>
            matches!(class, ScalarClass::String | ScalarClass::Bytes),
        ConstraintCategory::NumericBound =>
            matches!(class, ScalarClass::Number | ScalarClass::Decimal | ScalarClass::Temporal),
        ConstraintCategory::Pattern =>
            matches!(class, ScalarClass::String | ScalarClass::Bytes),
        ConstraintCategory::Decimal => class == ScalarClass::Decimal,
    }
}
