//! Convert a small in-memory frame into typed rows, partition by partition.
//!
//! Run with: `cargo run --example typed_rows`

use framecast::testing::{flights_frame, MemFrameStore};
use framecast::{
    FnBuilder, FrameConverter, FrameKey, FromRaw, RawValue, ReaderRegistry, RowSpec, SemanticType,
};
use std::sync::Arc;

#[derive(Debug)]
struct Flight {
    year: i64,
    origin: String,
    distance: f64,
}

fn main() -> anyhow::Result<()> {
    let store = Arc::new(MemFrameStore::new());
    store.insert(flights_frame());

    let spec: RowSpec<Flight> = RowSpec::new()
        .field("year", SemanticType::Int)
        .field("origin", SemanticType::Enum)
        .field("distance", SemanticType::Real)
        .builder(FnBuilder::new(3, |values: &[RawValue]| {
            Ok(Flight {
                year: i64::from_raw(&values[0]).map_err(|e| e.at(0))?,
                origin: String::from_raw(&values[1]).map_err(|e| e.at(1))?,
                distance: f64::from_raw(&values[2]).map_err(|e| e.at(2))?,
            })
        }));

    let converter = FrameConverter::new(
        store,
        FrameKey::new("flights"),
        &spec,
        &ReaderRegistry::new(),
    )?;

    for partition in 0..converter.partition_count()? {
        println!("--- partition {partition} ---");
        for row in converter.compute_partition(partition)? {
            let flight = row?;
            println!(
                "{} from {} ({} miles)",
                flight.year, flight.origin, flight.distance
            );
        }
    }

    converter.metrics().print();
    Ok(())
}
