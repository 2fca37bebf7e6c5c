use crate::schema::FieldKey;
use crate::schema::SchemaMalformedError;
use crate::schema::SchemaSnapshot;

type Result<T> = std::result::Result<T, SchemaMalformedError>;

#[test]
fn decoding_rebuilds_the_field_index() -> Result<()> {
    let snapshot = SchemaSnapshot::from_sdl_str("cached", r#"
        type Query { order: Order }
        type Order { id: ID! total: Money @deprecated(reason: "use totalV2") }
        scalar Money
    "#)?;

    let bytes = snapshot.encode()?;
    let decoded = SchemaSnapshot::decode(&bytes)?;

    assert_eq!(decoded, snapshot);
    assert!(decoded.has_field(&FieldKey::new("Order", "total")));
    assert_eq!(decoded.field_count(), 3);
    Ok(())
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let result = SchemaSnapshot::decode(&[0xff, 0x00, 0x13]);
    assert!(matches!(result, Err(SchemaMalformedError::SnapshotDecodeError { .. })));
}
