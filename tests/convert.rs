use framecast::testing::*;
use framecast::*;
use std::sync::Arc;

fn flights_store() -> Arc<MemFrameStore> {
    let store = Arc::new(MemFrameStore::new());
    store.insert(flights_frame());
    store
}

fn flight_spec() -> RowSpec<(i64, String, f64)> {
    RowSpec::new()
        .field("year", SemanticType::Int)
        .field("origin", SemanticType::Enum)
        .field("distance", SemanticType::Real)
        .builder(TupleBuilder::default())
}

#[test]
fn collect_seq_concatenates_partitions_in_order() -> anyhow::Result<()> {
    let converter = FrameConverter::new(
        flights_store(),
        FrameKey::new("flights"),
        &flight_spec(),
        &ReaderRegistry::new(),
    )?;

    let rows = converter.collect_seq()?;
    assert_rows_equal(
        &rows,
        &[
            (1987, "ORD".to_string(), 733.0),
            (1987, "SFO".to_string(), 1_846.0),
            (1988, "DEN".to_string(), 967.0),
            (1989, "ORD".to_string(), 733.0),
            (1990, "SFO".to_string(), 1_846.0),
            (1990, "ORD".to_string(), 802.0),
        ],
    );
    Ok(())
}

#[test]
fn collect_par_matches_collect_seq() -> anyhow::Result<()> {
    let store = flights_store();
    let spec = flight_spec();
    let registry = ReaderRegistry::new();

    let seq = FrameConverter::new(
        Arc::clone(&store) as Arc<dyn FrameStore>,
        FrameKey::new("flights"),
        &spec,
        &registry,
    )?
    .collect_seq()?;

    let par = FrameConverter::new(
        store,
        FrameKey::new("flights"),
        &spec,
        &registry,
    )?
    .collect_par(Some(4))?;

    assert_rows_equal(&par, &seq);
    Ok(())
}

#[test]
fn default_field_list_is_all_spec_fields() -> anyhow::Result<()> {
    let converter = FrameConverter::new(
        flights_store(),
        FrameKey::new("flights"),
        &flight_spec(),
        &ReaderRegistry::new(),
    )?;
    assert_eq!(converter.fields(), &["year", "origin", "distance"]);
    assert_eq!(converter.mapping(), &[0, 1, 2]);
    Ok(())
}

#[test]
fn explicit_field_list_projects_and_reorders() -> anyhow::Result<()> {
    let spec: RowSpec<(f64, i64)> = RowSpec::new()
        .field("year", SemanticType::Int)
        .field("distance", SemanticType::Real)
        .builder(TupleBuilder::default());

    let converter = FrameConverter::with_fields(
        flights_store(),
        FrameKey::new("flights"),
        &spec,
        &ReaderRegistry::new(),
        vec!["distance".to_string(), "year".to_string()],
    )?;
    assert_eq!(converter.mapping(), &[2, 0]);

    let rows = converter.collect_seq()?;
    assert_row_count(&rows, 6);
    assert_rows_equal(&rows[..2], &[(733.0, 1987), (1_846.0, 1987)]);
    Ok(())
}

#[test]
fn explicit_field_unknown_to_spec_is_a_schema_mismatch() {
    let err = FrameConverter::with_fields(
        flights_store(),
        FrameKey::new("flights"),
        &flight_spec(),
        &ReaderRegistry::new(),
        vec!["year".to_string(), "tail_number".to_string()],
    )
    .err()
    .expect("unknown field must be rejected");
    assert_eq!(
        err,
        ConvertError::SchemaMismatch {
            missing: vec!["tail_number".to_string()]
        }
    );
}

#[test]
fn emptied_registry_fails_at_construction() {
    let err = FrameConverter::new(
        flights_store(),
        FrameKey::new("flights"),
        &flight_spec(),
        &ReaderRegistry::empty(),
    )
    .err()
    .expect("no readers registered");
    assert!(matches!(err, ConvertError::UnregisteredType { .. }));
}

#[test]
fn metrics_reconcile_across_partitions() -> anyhow::Result<()> {
    let store = Arc::new(MemFrameStore::new());
    store.insert(
        FrameBuilder::new("scores")
            .int_column("id", vec![Some(1), None, Some(3), Some(4), None, Some(6)])
            .real_column(
                "score",
                (1..=6).map(|i| Some(f64::from(i))).collect(),
            )
            .partitions(3)
            .build(),
    );

    let spec: RowSpec<(i64, f64)> = RowSpec::new()
        .field("id", SemanticType::Int)
        .field("score", SemanticType::Real)
        .builder(TupleBuilder::default());

    let converter =
        FrameConverter::new(store, FrameKey::new("scores"), &spec, &ReaderRegistry::new())?;
    let rows = converter.collect_seq()?;
    assert_row_count(&rows, 4);

    let metrics = converter.metrics();
    assert_eq!(metrics.partitions_opened(), 3);
    assert_eq!(metrics.rows_scanned(), 6);
    assert_eq!(metrics.rows_skipped(), 2);
    assert_eq!(metrics.rows_yielded(), 4);
    assert_eq!(
        metrics.rows_scanned(),
        metrics.rows_yielded() + metrics.rows_skipped()
    );
    Ok(())
}
