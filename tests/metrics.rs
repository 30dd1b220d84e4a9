use framecast::testing::*;
use framecast::*;
use std::sync::Arc;

fn converted_metrics() -> anyhow::Result<ConvertMetrics> {
    let store = Arc::new(MemFrameStore::new());
    store.insert(
        FrameBuilder::new("scores")
            .int_column("id", vec![Some(1), None, Some(3)])
            .real_column("score", vec![Some(0.1), Some(0.2), Some(0.3)])
            .build(),
    );

    let spec: RowSpec<(i64, f64)> = RowSpec::new()
        .field("id", SemanticType::Int)
        .field("score", SemanticType::Real)
        .builder(TupleBuilder::default());

    let converter =
        FrameConverter::new(store, FrameKey::new("scores"), &spec, &ReaderRegistry::new())?;
    converter.collect_seq()?;
    Ok(converter.metrics().clone())
}

#[test]
fn snapshot_carries_all_counters() -> anyhow::Result<()> {
    let metrics = converted_metrics()?;
    let snapshot = metrics.snapshot();

    assert_eq!(snapshot["partitions_opened"], 1);
    assert_eq!(snapshot["rows_scanned"], 3);
    assert_eq!(snapshot["rows_skipped"], 1);
    assert_eq!(snapshot["rows_yielded"], 2);
    Ok(())
}

#[test]
fn snapshot_round_trips_through_a_file() -> anyhow::Result<()> {
    let metrics = converted_metrics()?;

    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("metrics.json");
    metrics.save_to_file(&path)?;

    let loaded: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(loaded, metrics.snapshot());
    Ok(())
}

#[test]
fn fresh_handles_start_at_zero() {
    let metrics = ConvertMetrics::new();
    assert_eq!(metrics.partitions_opened(), 0);
    assert_eq!(metrics.rows_scanned(), 0);
    assert_eq!(metrics.rows_skipped(), 0);
    assert_eq!(metrics.rows_yielded(), 0);
}

#[test]
fn print_smoke() -> anyhow::Result<()> {
    converted_metrics()?.print();
    Ok(())
}
