use crate::extract::model::ConstraintKind;
use crate::extract::model::DeclaredType;
use crate::extract::model::TypeExprError;
use crate::extract::model::TypeExprParser;

fn scalar(name: &str) -> DeclaredType {
    DeclaredType::Scalar(name.to_string())
}

fn optional(inner: DeclaredType) -> DeclaredType {
    DeclaredType::Optional(Box::new(inner))
}

fn list(inner: DeclaredType) -> DeclaredType {
    DeclaredType::List(Box::new(inner))
}

fn parse_type(text: &str) -> DeclaredType {
    TypeExprParser::new(text).parse().unwrap().declared_type
}

#[test]
fn pipe_unions_with_none_are_optional() {
    assert_eq!(parse_type("int | None"), optional(scalar("int")));
    assert_eq!(
        parse_type("Union[int, str, None]"),
        optional(DeclaredType::Union(vec![scalar("int"), scalar("str")])),
    );
}

#[test]
fn single_member_unions_are_kept() {
    assert_eq!(parse_type("Union[str]"), DeclaredType::Union(vec![scalar("str")]));
}

#[test]
fn nested_optionals_are_kept() {
    assert_eq!(
        parse_type("Optional[Optional[str]]"),
        optional(optional(scalar("str"))),
    );
}

#[test]
fn containers_and_forward_refs() {
    assert_eq!(
        parse_type("Dict[str, List[Order]]"),
        DeclaredType::Mapping(
            Box::new(scalar("str")),
            Box::new(list(DeclaredType::Model("Order".to_string()))),
        ),
    );
    assert_eq!(
        parse_type("List[Optional[\"LineItem\"]]"),
        list(optional(DeclaredType::Model("LineItem".to_string()))),
    );
    assert_eq!(parse_type("Tuple[int, ...]"), list(scalar("int")));
    assert_eq!(
        parse_type("typing.Optional[datetime.datetime]"),
        optional(scalar("datetime")),
    );
}

#[test]
fn literals_keep_source_values() {
    assert_eq!(
        parse_type("Literal['a', 'b']"),
        DeclaredType::Literal(vec!["'a'".to_string(), "'b'".to_string()]),
    );
}

#[test]
fn annotated_and_constrained_types_carry_constraints() {
    let parsed = TypeExprParser::new("Annotated[str, Field(min_length=1)]").parse().unwrap();
    assert_eq!(parsed.declared_type, scalar("str"));
    assert_eq!(parsed.constraints.len(), 1);
    assert_eq!(parsed.constraints[0].kind, ConstraintKind::MinLength);
    assert_eq!(parsed.constraints[0].value, "1");

    let parsed = TypeExprParser::new("constr(max_length=10, pattern=r'^a')").parse().unwrap();
    assert_eq!(parsed.declared_type, scalar("str"));
    let kinds: Vec<_> = parsed.constraints.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ConstraintKind::MaxLength, ConstraintKind::Pattern]);

    let parsed = TypeExprParser::new("conlist(int, min_length=1)").parse().unwrap();
    assert_eq!(parsed.declared_type, list(scalar("int")));
    assert_eq!(parsed.constraints[0].kind, ConstraintKind::MinLength);
}

#[test]
fn class_vars_are_marked() {
    let parsed = TypeExprParser::new("ClassVar[int]").parse().unwrap();
    assert!(parsed.is_class_var);
    assert_eq!(parsed.declared_type, scalar("int"));
}

#[test]
fn malformed_annotations_are_errors() {
    assert_eq!(TypeExprParser::new("   ").parse(), Err(TypeExprError::Empty));
    assert!(matches!(
        TypeExprParser::new("Optional[").parse(),
        Err(TypeExprError::Unclosed { .. }),
    ));
    assert!(matches!(
        TypeExprParser::new("int]").parse(),
        Err(TypeExprError::Unexpected { offset: 3, .. }),
    ));
}

#[test]
fn nesting_limit_spans_annotated_and_forward_refs() {
    let shallow = format!("{}int{}", "Annotated[".repeat(3), ", Field(ge=1)]".repeat(3));
    let parsed = TypeExprParser::new(&shallow).parse().unwrap();
    assert_eq!(parsed.declared_type, scalar("int"));
    assert_eq!(parsed.constraints.len(), 3);

    let deep_annotated = format!("{}int{}", "Annotated[".repeat(40), ", 1]".repeat(40));
    assert!(matches!(
        TypeExprParser::new(&deep_annotated).parse(),
        Err(TypeExprError::TooDeep { .. }),
    ));

    let deep_conlist = format!("{}int{}", "conlist(".repeat(40), ")".repeat(40));
    assert!(matches!(
        TypeExprParser::new(&deep_conlist).parse(),
        Err(TypeExprError::TooDeep { .. }),
    ));
}
