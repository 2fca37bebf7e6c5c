use crate::schema::FieldKey;
use crate::schema::SchemaMalformedError;
use crate::schema::SchemaSnapshot;
use crate::schema::SchemaTypeKind;

type Result<T> = std::result::Result<T, SchemaMalformedError>;

const ORDER_INTROSPECTION: &str = r#"{
  "data": {
    "__schema": {
      "queryType": { "name": "QueryRoot" },
      "mutationType": null,
      "types": [
        {
          "kind": "OBJECT",
          "name": "QueryRoot",
          "fields": [
            {
              "name": "order",
              "args": [
                {
                  "name": "id",
                  "type": {
                    "kind": "NON_NULL", "name": null,
                    "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null }
                  }
                },
                { "type": { "kind": "SCALAR", "name": "String" } }
              ],
              "type": { "kind": "OBJECT", "name": "Order", "ofType": null },
              "isDeprecated": false,
              "deprecationReason": null
            }
          ]
        },
        {
          "kind": "OBJECT",
          "name": "Order",
          "fields": [
            {
              "name": "id",
              "type": {
                "kind": "NON_NULL", "name": null,
                "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null }
              },
              "isDeprecated": false
            },
            {
              "name": "lineItems",
              "type": {
                "kind": "NON_NULL", "name": null,
                "ofType": {
                  "kind": "LIST", "name": null,
                  "ofType": {
                    "kind": "NON_NULL", "name": null,
                    "ofType": { "kind": "OBJECT", "name": "LineItem", "ofType": null }
                  }
                }
              }
            },
            {
              "name": "total",
              "type": { "kind": "SCALAR", "name": "Money", "ofType": null },
              "isDeprecated": true,
              "deprecationReason": "use totalV2"
            }
          ]
        },
        {
          "kind": "INPUT_OBJECT",
          "name": "OrderInput",
          "inputFields": [
            { "name": "note", "type": { "kind": "SCALAR", "name": "String" } }
          ]
        },
        { "kind": "ENUM", "name": "OrderStatus", "enumValues": [{ "name": "OPEN" }] }
      ]
    }
  }
}"#;

#[test]
fn builds_types_and_fields_from_envelope() -> Result<()> {
    let snapshot = SchemaSnapshot::from_introspection_str("v1", ORDER_INTROSPECTION)?;

    assert_eq!(snapshot.version(), "v1");
    assert_eq!(snapshot.types().len(), 4);
    assert_eq!(snapshot.query_type_name(), "QueryRoot");
    assert_eq!(snapshot.mutation_type_name(), "Mutation");

    let order = snapshot.get_type("Order").unwrap();
    assert_eq!(order.kind, SchemaTypeKind::Object);
    let field_names: Vec<&String> = order.fields().keys().collect();
    assert_eq!(field_names, vec!["id", "lineItems", "total"]);

    let id = snapshot.get_field("Order", "id").unwrap();
    assert_eq!(id.type_ref, "ID!");
    assert!(!id.nullable);
    assert!(!id.deprecated);

    let line_items = snapshot.get_field("Order", "lineItems").unwrap();
    assert_eq!(line_items.type_ref, "[LineItem!]!");
    assert_eq!(line_items.named_type(), "LineItem");
    assert!(line_items.is_list());

    Ok(())
}

#[test]
fn tolerates_missing_deprecation_metadata() -> Result<()> {
    let snapshot = SchemaSnapshot::from_introspection_str("v1", ORDER_INTROSPECTION)?;

    let line_items = snapshot.get_field("Order", "lineItems").unwrap();
    assert!(!line_items.deprecated);
    assert_eq!(line_items.deprecation_reason, None);

    let total = snapshot.get_field("Order", "total").unwrap();
    assert!(total.deprecated);
    assert_eq!(total.deprecation_reason.as_deref(), Some("use totalV2"));
    assert!(total.nullable);

    Ok(())
}

#[test]
fn input_fields_are_indexed_and_enum_values_are_not() -> Result<()> {
    let snapshot = SchemaSnapshot::from_introspection_str("v1", ORDER_INTROSPECTION)?;

    assert!(snapshot.has_field(&FieldKey::new("OrderInput", "note")));
    assert_eq!(snapshot.get_type("OrderInput").unwrap().kind, SchemaTypeKind::Input);
    assert!(snapshot.get_type("OrderStatus").unwrap().fields().is_empty());
    assert!(!snapshot.has_field(&FieldKey::new("OrderStatus", "OPEN")));
    assert_eq!(snapshot.field_count(), 5);

    Ok(())
}

#[test]
fn accepts_bare_schema_objects() -> Result<()> {
    let bare = r#"{ "types": [ { "kind": "OBJECT", "name": "Query", "fields": [] } ] }"#;
    let snapshot = SchemaSnapshot::from_introspection_str("bare", bare)?;
    assert!(snapshot.has_type("Query"));
    assert_eq!(snapshot.query_type_name(), "Query");

    let wrapped = r#"{ "__schema": { "types": [ { "kind": "SCALAR", "name": "Money" } ] } }"#;
    let snapshot = SchemaSnapshot::from_introspection_str("wrapped", wrapped)?;
    assert!(snapshot.has_type("Money"));

    Ok(())
}

#[test]
fn reason_without_flag_marks_field_deprecated() -> Result<()> {
    let json = r#"{ "__schema": { "types": [ {
        "kind": "OBJECT", "name": "Customer",
        "fields": [ { "name": "email", "type": { "kind": "SCALAR", "name": "String" },
                      "deprecationReason": "Use `defaultEmailAddress.emailAddress`." } ]
    } ] } }"#;
    let snapshot = SchemaSnapshot::from_introspection_str("v", json)?;
    assert!(snapshot.get_field("Customer", "email").unwrap().deprecated);
    Ok(())
}

#[test]
fn skips_nameless_types_and_keeps_first_duplicate() -> Result<()> {
    let json = r#"{ "__schema": { "types": [
        { "kind": "OBJECT", "fields": [] },
        { "kind": "OBJECT", "name": "Shop", "fields": [
            { "name": "name", "type": { "kind": "SCALAR", "name": "String" } },
            { "name": "name", "type": { "kind": "SCALAR", "name": "Int" } }
        ] },
        { "kind": "SCALAR", "name": "Shop" }
    ] } }"#;
    let snapshot = SchemaSnapshot::from_introspection_str("v", json)?;

    assert_eq!(snapshot.types().len(), 1);
    let shop = snapshot.get_type("Shop").unwrap();
    assert_eq!(shop.kind, SchemaTypeKind::Object);
    assert_eq!(shop.fields().len(), 1);
    assert_eq!(shop.field("name").unwrap().type_ref, "String");
    Ok(())
}

#[test]
fn missing_type_container_is_malformed() {
    let result = SchemaSnapshot::from_introspection_str(
        "v",
        r#"{ "data": { "shop": { "name": "x" } } }"#,
    );
    assert!(matches!(result, Err(SchemaMalformedError::MissingTypeContainer)));

    let result = SchemaSnapshot::from_introspection_str(
        "v",
        r#"{ "__schema": { "queryType": { "name": "Query" } } }"#,
    );
    assert!(matches!(result, Err(SchemaMalformedError::MissingTypeContainer)));
}

#[test]
fn non_list_type_container_is_malformed() {
    let result = SchemaSnapshot::from_introspection_str(
        "v",
        r#"{ "__schema": { "types": { "Order": {} } } }"#,
    );
    match result {
        Err(SchemaMalformedError::TypeContainerNotAList { found }) =>
            assert_eq!(found, "an object"),
        other => panic!("Expected TypeContainerNotAList, got {other:?}"),
    }
}

#[test]
fn invalid_json_is_malformed() {
    let result = SchemaSnapshot::from_introspection_str("v", "{ not json");
    assert!(matches!(result, Err(SchemaMalformedError::InvalidJson(_))));
}

#[test]
fn field_arguments_are_recorded() -> Result<()> {
    let snapshot = SchemaSnapshot::from_introspection_str("v1", ORDER_INTROSPECTION)?;

    let order = snapshot.get_field("QueryRoot", "order").unwrap();
    // The nameless argument record is dropped.
    assert_eq!(order.arguments.len(), 1);
    let id = order.argument("id").unwrap();
    assert_eq!(id.type_ref, "ID!");
    assert_eq!(id.named_type(), "ID");
    assert!(snapshot.get_field("Order", "id").unwrap().arguments.is_empty());

    Ok(())
}
