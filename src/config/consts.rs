/// Topic carrying customer risk score events
pub const STEDI_EVENTS_TOPIC: &str = "stedi-events";
/// Topic carrying every change made to the redis cache
pub const REDIS_SERVER_TOPIC: &str = "redis-server";
/// Bootstrap address used when none is configured
pub const DEFAULT_BOOTSTRAP_SERVERS: &str = "localhost:9092";
/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Poll timeout used while draining a micro-batch
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 100;
pub const DEFAULT_METADATA_TIMEOUT_MS: u64 = 10_000;
/// Upper bound on messages pulled into one micro-batch
pub const DEFAULT_MAX_RECORDS_PER_BATCH: usize = 1_000;
/// How long a micro-batch waits for its first message
pub const DEFAULT_MAX_WAIT_MS: u64 = 1_000;

/// Rows shown per batch by the console sink
pub const DEFAULT_NUM_ROWS: usize = 20;
/// Cell width at which the console sink truncates
pub const TRUNCATE_WIDTH: usize = 20;
/// Narrowest column the console sink renders
pub const MIN_COLUMN_WIDTH: usize = 3;
