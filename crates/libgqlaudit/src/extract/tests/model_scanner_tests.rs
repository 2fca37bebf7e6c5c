use crate::extract::BlockKind;
use crate::extract::extract_source;
use crate::extract::model::ConstraintKind;
use crate::extract::model::DeclaredType;
use crate::extract::model::ModelDefinition;
use crate::extract::model::ModelKind;
use crate::issue::IssueCode;
use std::path::Path;

const MODELS: &str = r#"from decimal import Decimal
from typing import ClassVar, List, Optional, Union
from pydantic import BaseModel as PydanticBase, Field
from dataclasses import dataclass


class Customer(PydanticBase):
    """A customer."""

    email: str
    nickname: Optional[str] = None
    age: int = Field(..., ge=0, le=150)


class Order(Customer):
    quantity: int = Field(max_length=5)
    items: List[Optional["LineItem"]] = Field(default_factory=list)
    total: Decimal = Field(default=0, max_digits=10, decimal_places=2)
    status: Union[str] = "open"
    note: Optional[Optional[str]] = None
    MAX: ClassVar[int] = 3
    _cache: dict = {}

    def total_with_tax(self) -> Decimal:
        rate: float = 0.2
        return self.total * rate


@dataclass(frozen=True)
class LineItem:
    sku: str
    price: float = 0.0


class NotAModel:
    name: str
"#;

fn scan_models(source: &str) -> Vec<ModelDefinition> {
    let extraction = extract_source(Path::new("models.py"), source);
    assert!(extraction.issues.is_empty(), "{:?}", extraction.issues);
    extraction.blocks.iter()
        .filter_map(|block| block.as_model().cloned())
        .collect()
}

#[test]
fn finds_models_by_base_alias_inheritance_and_decorator() {
    let models = scan_models(MODELS);

    let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Customer", "Order", "LineItem"]);
    assert_eq!(models[0].model_kind, ModelKind::BaseModel);
    assert_eq!(models[1].model_kind, ModelKind::BaseModel);
    assert_eq!(models[1].bases, vec!["Customer".to_string()]);
    assert_eq!(models[2].model_kind, ModelKind::Dataclass);
}

#[test]
fn model_blocks_start_at_the_class_keyword() {
    let extraction = extract_source(Path::new("models.py"), MODELS);

    assert_eq!(extraction.count_of(BlockKind::Model), 3);
    let customer = &extraction.blocks[0];
    assert_eq!((customer.location.line, customer.location.col), (7, 1));
    assert!(customer.raw.starts_with("class Customer(PydanticBase):"));
    assert!(customer.raw.ends_with("le=150)"));
}

#[test]
fn reads_field_types_defaults_and_requiredness() {
    let models = scan_models(MODELS);
    let customer = &models[0];

    let field_names: Vec<_> = customer.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(field_names, vec!["email", "nickname", "age"]);

    let email = customer.field("email").unwrap();
    assert_eq!(email.declared_type, DeclaredType::Scalar("str".to_string()));
    assert!(email.required);
    assert!(!email.has_default);
    assert_eq!((email.location.line, email.location.col), (10, 5));

    let nickname = customer.field("nickname").unwrap();
    assert!(nickname.declared_type.is_optional());
    assert!(nickname.has_default);
    assert!(!nickname.required);

    let age = customer.field("age").unwrap();
    assert!(age.required);
    assert!(!age.has_default);
    let kinds: Vec<_> = age.constraints.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ConstraintKind::Ge, ConstraintKind::Le]);
    assert_eq!(age.constraints[1].numeric_value(), Some(150.0));
}

#[test]
fn skips_class_vars_private_names_and_method_locals() {
    let models = scan_models(MODELS);
    let order = &models[1];

    let field_names: Vec<_> = order.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(field_names, vec!["quantity", "items", "total", "status", "note"]);
}

#[test]
fn field_calls_contribute_constraints_and_defaults() {
    let models = scan_models(MODELS);
    let order = &models[1];

    let quantity = order.field("quantity").unwrap();
    assert!(quantity.required);
    assert_eq!(quantity.constraints[0].kind, ConstraintKind::MaxLength);
    assert_eq!(quantity.constraints[0].value, "5");

    let items = order.field("items").unwrap();
    assert!(items.has_default);
    assert_eq!(
        items.declared_type,
        DeclaredType::List(Box::new(DeclaredType::Optional(Box::new(
            DeclaredType::Model("LineItem".to_string()),
        )))),
    );

    let total = order.field("total").unwrap();
    assert!(total.has_default);
    let kinds: Vec<_> = total.constraints.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![ConstraintKind::MaxDigits, ConstraintKind::DecimalPlaces]);

    let note = order.field("note").unwrap();
    assert_eq!(
        note.declared_type,
        DeclaredType::Optional(Box::new(DeclaredType::Optional(Box::new(
            DeclaredType::Scalar("str".to_string()),
        )))),
    );
}

#[test]
fn class_headers_inside_strings_are_ignored() {
    let source = r#"from pydantic import BaseModel

DOC = """
class Fake(BaseModel):
    name: str
"""
"#;
    assert!(scan_models(source).is_empty());
}

#[test]
fn unparseable_annotations_are_reported() {
    let source = "from pydantic import BaseModel\n\nclass Bad(BaseModel):\n    name: List[str\n    ok: int\n";
    let extraction = extract_source(Path::new("bad.py"), source);

    assert_eq!(extraction.issues.len(), 1);
    assert_eq!(extraction.issues[0].code, IssueCode::UnparseableTypeExpression);
    assert_eq!(extraction.issues[0].location.line, 4);
}

#[test]
fn runaway_annotated_nesting_is_reported_and_scanning_continues() {
    let annotation = format!("{}int{}", "Annotated[".repeat(1500), ", 1]".repeat(1500));
    let source = format!(
        "from pydantic import BaseModel\n\nclass Deep(BaseModel):\n    x: {annotation}\n    ok: int\n",
    );
    let extraction = extract_source(Path::new("deep.py"), &source);

    assert_eq!(extraction.issues.len(), 1, "{:?}", extraction.issues);
    let issue = &extraction.issues[0];
    assert_eq!(issue.code, IssueCode::UnparseableTypeExpression);
    assert!(issue.message.contains("nested too deeply"), "{}", issue.message);
    assert_eq!(issue.location.line, 4);

    assert_eq!(extraction.blocks.len(), 1);
    let model = extraction.blocks[0].as_model().unwrap();
    let names: Vec<_> = model.fields.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(names, vec!["ok"]);
}
