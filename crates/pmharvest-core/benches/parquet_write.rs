use std::sync::Arc;

use arrow::array::{RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use pmharvest_core::ParquetSink;

fn synthetic_batch(n: usize) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("PMID", DataType::Utf8, false),
        Field::new("Title", DataType::Utf8, false),
        Field::new("Abstract", DataType::Utf8, false),
    ]));
    let pmids = StringArray::from((0..n).map(|i| (30_000_000 + i).to_string()).collect::<Vec<_>>());
    let titles = StringArray::from(
        (0..n)
            .map(|i| format!("Title for record {i}"))
            .collect::<Vec<_>>(),
    );
    let abstracts = StringArray::from(
        (0..n)
            .map(|i| format!("Background: abstract text number {i}. ").repeat(8))
            .collect::<Vec<_>>(),
    );
    RecordBatch::try_new(
        schema,
        vec![Arc::new(pmids), Arc::new(titles), Arc::new(abstracts)],
    )
    .unwrap()
}

#[divan::bench(args = [1, 3, 6])]
fn parquet_write_zstd(bencher: divan::Bencher, zstd_level: i32) {
    let batch = synthetic_batch(8192);
    let schema = batch.schema();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.parquet");
    bencher.bench(|| {
        let mut sink = ParquetSink::create(&path, schema.as_ref(), zstd_level).unwrap();
        sink.write_batch(&batch).unwrap();
        sink.finalize().unwrap();
    });
}

fn main() {
    divan::main();
}
