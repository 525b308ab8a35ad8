use crate::errors::SinkError;
use crate::records::Row;

/// Destination for the rows of each micro-batch.
///
/// Append only: a row handed to the sink is never revised or retracted.
pub trait RowSink: Send {
    fn write_batch(&mut self, batch_id: u64, columns: &[&str], rows: &[Row]) -> Result<(), SinkError>;
}
