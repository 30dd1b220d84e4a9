//! Fan a many-partition conversion out over a Rayon pool and compare the
//! result with the sequential driver.
//!
//! Run with: `cargo run --example parallel_partitions`

use framecast::testing::{FrameBuilder, MemFrameStore};
use framecast::{
    FrameConverter, FrameKey, ReaderRegistry, RowSpec, SemanticType, TupleBuilder,
};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let rows = 10_000usize;
    let store = Arc::new(MemFrameStore::new());
    store.insert(
        FrameBuilder::new("readings")
            .int_column("sensor", (0..rows).map(|i| Some(i as i64 % 16)).collect())
            .real_column(
                "value",
                // every 97th reading is absent and will be skipped
                (0..rows)
                    .map(|i| (i % 97 != 0).then(|| f64::from(i as u32) * 0.25))
                    .collect(),
            )
            .partitions(32)
            .build(),
    );

    let spec: RowSpec<(i64, f64)> = RowSpec::new()
        .field("sensor", SemanticType::Int)
        .field("value", SemanticType::Real)
        .builder(TupleBuilder::default());

    let converter = FrameConverter::new(
        store,
        FrameKey::new("readings"),
        &spec,
        &ReaderRegistry::new(),
    )?;

    let seq = converter.collect_seq()?;
    let par = converter.collect_par(None)?;
    assert_eq!(seq, par);

    println!(
        "{} partitions, {} rows in, {} rows out",
        converter.partition_count()?,
        rows,
        par.len()
    );
    converter.metrics().print();
    Ok(())
}
