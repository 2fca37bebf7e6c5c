use crate::extract::model::ConstraintCategory;
use crate::extract::model::DeclaredType;
use crate::surface::constraint_fits_type;

fn scalar(name: &str) -> DeclaredType {
    DeclaredType::Scalar(name.to_string())
}

#[test]
fn scalars_are_judged_by_class() {
    assert_eq!(constraint_fits_type(&scalar("str"), ConstraintCategory::Length), Some(true));
    assert_eq!(constraint_fits_type(&scalar("int"), ConstraintCategory::Length), Some(false));
    assert_eq!(constraint_fits_type(&scalar("int"), ConstraintCategory::NumericBound), Some(true));
    assert_eq!(constraint_fits_type(&scalar("date"), ConstraintCategory::NumericBound), Some(true));
    assert_eq!(constraint_fits_type(&scalar("str"), ConstraintCategory::NumericBound), Some(false));
    assert_eq!(constraint_fits_type(&scalar("bool"), ConstraintCategory::NumericBound), Some(false));
    assert_eq!(constraint_fits_type(&scalar("Decimal"), ConstraintCategory::Decimal), Some(true));
    assert_eq!(constraint_fits_type(&scalar("float"), ConstraintCategory::Decimal), Some(false));
    assert_eq!(constraint_fits_type(&scalar("Any"), ConstraintCategory::Length), None);
}

#[test]
fn containers_accept_only_length() {
    let list = DeclaredType::List(Box::new(scalar("int")));

    assert_eq!(constraint_fits_type(&list, ConstraintCategory::Length), Some(true));
    assert_eq!(constraint_fits_type(&list, ConstraintCategory::NumericBound), Some(false));
}

#[test]
fn optionals_unwrap_and_unions_need_one_fitting_member() {
    let optional = DeclaredType::Optional(Box::new(scalar("int")));
    assert_eq!(constraint_fits_type(&optional, ConstraintCategory::Length), Some(false));

    let union = DeclaredType::Union(vec![scalar("int"), scalar("str")]);
    assert_eq!(constraint_fits_type(&union, ConstraintCategory::Length), Some(true));

    let union = DeclaredType::Union(vec![scalar("int"), DeclaredType::Model("Order".to_string())]);
    assert_eq!(constraint_fits_type(&union, ConstraintCategory::Length), None);
}
