use crate::records::Row;
use crate::sources::SourceMessage;

/// A stateless, per-message pipeline from raw payload to output row.
///
/// `transform` is a 1:1 or 1:0 mapping: returning `None` filters the message
/// out. Implementations hold no mutable state, so the same message always
/// yields the same result.
pub trait StreamingJob: Send + Sync {
    fn name(&self) -> &'static str;

    /// Output column names, in the order `transform` fills a [`Row`].
    fn columns(&self) -> &'static [&'static str];

    fn transform(&self, message: &SourceMessage) -> Option<Row>;
}
