//! Transform Records to an Arrow RecordBatch

use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, StringArray};
use arrow::datatypes::Schema;

use crate::record::Record;
use crate::schema;

/// Column-wise accumulator for building RecordBatches from Records
pub struct RecordAccumulator {
    schema: &'static Arc<Schema>,
    pmid: Vec<String>,
    title: Vec<String>,
    abstract_text: Vec<String>,
}

impl RecordAccumulator {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            schema: schema::records(),
            pmid: Vec::with_capacity(capacity),
            title: Vec::with_capacity(capacity),
            abstract_text: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: &Record) {
        self.pmid.push(record.pmid.clone());
        self.title.push(record.title.clone());
        self.abstract_text.push(record.abstract_text.clone());
    }

    pub fn take_batch(&mut self) -> RecordBatch {
        let arrays: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(std::mem::take(&mut self.pmid))),
            Arc::new(StringArray::from(std::mem::take(&mut self.title))),
            Arc::new(StringArray::from(std::mem::take(&mut self.abstract_text))),
        ];

        RecordBatch::try_new(self.schema.clone(), arrays).expect("schema mismatch")
    }
}

impl<'a> FromIterator<&'a Record> for RecordAccumulator {
    fn from_iter<I: IntoIterator<Item = &'a Record>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut acc = Self::with_capacity(iter.size_hint().0);
        for record in iter {
            acc.push(record);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    fn record(pmid: &str) -> Record {
        Record {
            pmid: pmid.to_string(),
            title: format!("Title {pmid}"),
            abstract_text: format!("Abstract {pmid}"),
        }
    }

    #[test]
    fn batch_has_pushed_rows() {
        let records = [record("1"), record("2")];
        let mut acc: RecordAccumulator = records.iter().collect();
        let batch = acc.take_batch();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 3);

        let titles = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(titles.value(1), "Title 2");
        assert_eq!(titles.null_count(), 0);
    }

    #[test]
    fn take_batch_resets() {
        let mut acc = RecordAccumulator::with_capacity(1);
        acc.push(&record("1"));
        assert_eq!(acc.take_batch().num_rows(), 1);
        assert_eq!(acc.take_batch().num_rows(), 0);
    }
}
