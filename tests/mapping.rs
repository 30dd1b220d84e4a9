use framecast::{map_columns, ColumnMeta, ConvertError, FrameKey, FrameSchema, SemanticType};

fn schema(names: &[&str]) -> FrameSchema {
    FrameSchema::new(
        FrameKey::new("f"),
        names
            .iter()
            .map(|n| ColumnMeta::new(*n, SemanticType::Int))
            .collect(),
    )
}

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn subset_maps_to_named_columns() {
    let schema = schema(&["year", "month", "origin", "distance"]);
    let mapping = map_columns(&fields(&["origin", "year"]), &schema).unwrap();
    assert_eq!(mapping, vec![2, 0]);
}

#[test]
fn mapping_length_equals_field_count() {
    let schema = schema(&["a", "b", "c"]);
    let out = fields(&["c", "a", "b"]);
    let mapping = map_columns(&out, &schema).unwrap();
    assert_eq!(mapping.len(), out.len());
    for (field, &col) in out.iter().zip(&mapping) {
        assert_eq!(schema.columns()[col].name, *field);
    }
}

#[test]
fn single_field_always_maps_to_column_zero() {
    // The frame's sole column keeps whatever name the engine gave it;
    // a one-field request never consults names.
    let schema = schema(&["C1"]);
    let mapping = map_columns(&fields(&["value"]), &schema).unwrap();
    assert_eq!(mapping, vec![0]);
}

#[test]
fn missing_fields_are_all_named() {
    let schema = schema(&["a", "b"]);
    let err = map_columns(&fields(&["a", "b", "z"]), &schema).unwrap_err();
    assert_eq!(
        err,
        ConvertError::SchemaMismatch {
            missing: vec!["z".to_string()]
        }
    );

    let err = map_columns(&fields(&["x", "b", "z"]), &schema).unwrap_err();
    assert_eq!(
        err,
        ConvertError::SchemaMismatch {
            missing: vec!["x".to_string(), "z".to_string()]
        }
    );
}

#[test]
fn mismatch_message_lists_every_field() {
    let schema = schema(&["a"]);
    let err = map_columns(&fields(&["p", "q"]), &schema).unwrap_err();
    let message = err.to_string();
    assert!(message.contains('p') && message.contains('q'), "{message}");
}
