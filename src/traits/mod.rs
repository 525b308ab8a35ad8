pub mod job;
pub mod sink;
pub mod source;

pub use job::StreamingJob;
pub use sink::RowSink;
pub use source::MessageSource;
