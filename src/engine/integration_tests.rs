use async_trait::async_trait;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio_util::sync::CancellationToken;

use crate::engine::{QueryProgress, StreamingQuery, StreamingSession, Trigger};
use crate::errors::{SinkError, SourceError, StreamError};
use crate::jobs::{CustomerBirthYearJob, CustomerRiskJob};
use crate::sinks::{ConsoleOptions, ConsoleSink};
use crate::sources::{MemorySource, SourceMessage};
use crate::traits::MessageSource;

/// End-to-end tests of the micro-batch loop over in-memory sources
#[cfg(test)]
mod tests {
    use super::*;

    fn fast_trigger() -> Trigger {
        Trigger::default().with_max_wait(Duration::from_millis(1))
    }

    fn risk_event(offset: i64, customer: &str, score: &str) -> SourceMessage {
        SourceMessage::new(
            "stedi-events",
            0,
            offset,
            format!(
                r#"{{"customer":"{}","score":"{}","riskDate":"2020-09-14T07:54:06.417Z"}}"#,
                customer, score
            ),
        )
    }

    fn redis_event(offset: i64, customer_json: Option<&str>) -> SourceMessage {
        let entries = match customer_json {
            Some(json) => format!(r#"[{{"element":"{}","Score":0.0}}]"#, STANDARD.encode(json)),
            None => "[]".to_string(),
        };
        SourceMessage::new(
            "redis-server",
            0,
            offset,
            format!(
                r#"{{"key":"Q3VzdG9tZXI=","existType":"NONE","Ch":false,"Incr":false,"zSetEntries":{}}}"#,
                entries
            ),
        )
    }

    fn console() -> ConsoleSink<Vec<u8>> {
        ConsoleSink::new(Vec::new(), ConsoleOptions::default())
    }

    fn risk_query(source: MemorySource) -> StreamingQuery<MemorySource, ConsoleSink<Vec<u8>>> {
        StreamingQuery::new(Arc::new(CustomerRiskJob::new()), source, console(), fast_trigger())
    }

    fn birth_year_query(source: MemorySource) -> StreamingQuery<MemorySource, ConsoleSink<Vec<u8>>> {
        StreamingQuery::new(Arc::new(CustomerBirthYearJob::new()), source, console(), fast_trigger())
    }

    fn output(query: StreamingQuery<MemorySource, ConsoleSink<Vec<u8>>>) -> String {
        String::from_utf8(query.into_sink().into_inner()).unwrap()
    }

    #[tokio::test]
    async fn test_customer_risk_batch_is_printed() {
        let source = MemorySource::new("stedi-events").with_batch(vec![
            risk_event(0, "Spencer.Davis@test.com", "8.0"),
            risk_event(1, "Gail.Spencer@test.com", "-2.5"),
        ]);
        let mut query = risk_query(source);

        assert_eq!(query.run_batch().await.unwrap(), Some(0));

        let expected = "\
-------------------------------------------
Batch: 0
-------------------------------------------
+--------------------+-----+
|            customer|score|
+--------------------+-----+
|Spencer.Davis@tes...|  8.0|
|Gail.Spencer@test...| -2.5|
+--------------------+-----+

";
        assert_eq!(output(query), expected);
    }

    #[tokio::test]
    async fn test_customer_birth_year_filters_and_projects() {
        let source = MemorySource::new("redis-server").with_batch(vec![
            redis_event(
                0,
                Some(r#"{"customerName":"Sam Test","email":"sam.test@test.com","phone":"8015551212","birthDay":"2001-01-03"}"#),
            ),
            redis_event(1, None),
            redis_event(2, Some(r#"{"customerName":"No Birthday","email":"nb@test.com"}"#)),
        ]);
        let mut query = birth_year_query(source);

        query.run_batch().await.unwrap();
        assert_eq!(
            query.progress(),
            QueryProgress {
                batches: 1,
                input_rows: 3,
                output_rows: 1,
            }
        );

        let text = output(query);
        assert!(text.contains("|            email|birthYear|\n"));
        assert!(text.contains("|sam.test@test.com|     2001|\n"));
        assert!(!text.contains("nb@test.com"));
    }

    #[tokio::test]
    async fn test_duplicate_messages_are_not_deduplicated() {
        let event = risk_event(7, "a@test.com", "1.0");
        let source = MemorySource::new("stedi-events").with_batch(vec![event.clone(), event]);
        let mut query = risk_query(source);

        query.run_batch().await.unwrap();
        assert_eq!(query.progress().output_rows, 2);
        assert_eq!(output(query).matches("|a@test.com|  1.0|").count(), 2);
    }

    #[tokio::test]
    async fn test_empty_input_does_not_advance_batch_id() {
        let source = MemorySource::new("stedi-events")
            .with_batch(vec![risk_event(0, "a@test.com", "1.0")])
            .with_batch(Vec::new())
            .with_batch(vec![risk_event(1, "b@test.com", "2.0")]);
        let mut query = risk_query(source);

        assert_eq!(query.run_batch().await.unwrap(), Some(0));
        assert_eq!(query.run_batch().await.unwrap(), None);
        assert_eq!(query.next_batch_id(), 1);
        assert_eq!(query.run_batch().await.unwrap(), Some(1));

        let text = output(query);
        assert!(text.contains("Batch: 0\n"));
        assert!(text.contains("Batch: 1\n"));
        assert!(!text.contains("Batch: 2\n"));
    }

    #[tokio::test]
    async fn test_fully_filtered_batch_prints_empty_table() {
        let source = MemorySource::new("redis-server")
            .with_batch(vec![redis_event(0, None), redis_event(1, None)]);
        let mut query = birth_year_query(source);

        assert_eq!(query.run_batch().await.unwrap(), Some(0));

        let expected = "\
-------------------------------------------
Batch: 0
-------------------------------------------
+-----+---------+
|email|birthYear|
+-----+---------+
+-----+---------+

";
        assert_eq!(output(query), expected);
    }

    #[tokio::test]
    async fn test_oversized_input_is_split_into_batches() {
        let events = (0..5)
            .map(|i| risk_event(i, &format!("c{}@test.com", i), "1.0"))
            .collect();
        let source = MemorySource::new("stedi-events").with_batch(events);
        let trigger = Trigger {
            max_records_per_batch: 2,
            ..fast_trigger()
        };
        let mut query =
            StreamingQuery::new(Arc::new(CustomerRiskJob::new()), source, console(), trigger);

        for expected in 0..3 {
            assert_eq!(query.run_batch().await.unwrap(), Some(expected));
        }
        assert_eq!(query.progress().input_rows, 5);
    }

    #[tokio::test]
    async fn test_shutdown_stops_the_loop() {
        let session = StreamingSession::new("kafka-stedi-events");
        let source = MemorySource::new("stedi-events")
            .with_batch(vec![risk_event(0, "a@test.com", "1.0")])
            .with_batch(vec![risk_event(1, "b@test.com", "2.0")]);
        let mut query = session.start(
            source,
            Arc::new(CustomerRiskJob::new()),
            console(),
            fast_trigger(),
        );

        let token = session.shutdown_token();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });

        let progress = tokio::time::timeout(
            Duration::from_secs(5),
            query.await_termination(session.shutdown_token()),
        )
        .await
        .expect("query did not stop after shutdown")
        .unwrap();

        assert_eq!(progress.batches, 2);
        assert_eq!(progress.output_rows, 2);
        session.stop();
    }

    #[tokio::test]
    async fn test_already_cancelled_token_runs_nothing() {
        let source =
            MemorySource::new("stedi-events").with_batch(vec![risk_event(0, "a@test.com", "1.0")]);
        let mut query = risk_query(source);

        let token = CancellationToken::new();
        token.cancel();

        let progress = query.await_termination(token).await.unwrap();
        assert_eq!(progress.batches, 0);
        assert!(output(query).is_empty());
    }

    /// Source that has started a batch but never finishes draining it
    struct StalledSource;

    #[async_trait]
    impl MessageSource for StalledSource {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn next_batch(
            &mut self,
            _max_records: usize,
            _max_wait: Duration,
        ) -> Result<Vec<SourceMessage>, SourceError> {
            let received = vec![risk_event(0, "a@test.com", "1.0")];
            std::future::pending::<()>().await;
            Ok(received)
        }
    }

    #[tokio::test]
    async fn test_shutdown_mid_pull_discards_partial_batch() {
        let mut query = StreamingQuery::new(
            Arc::new(CustomerRiskJob::new()),
            StalledSource,
            console(),
            fast_trigger(),
        );

        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let progress = tokio::time::timeout(Duration::from_secs(5), query.await_termination(token))
            .await
            .expect("query did not stop while the source was pulling")
            .unwrap();

        assert_eq!(progress, QueryProgress::default());
        assert_eq!(query.next_batch_id(), 0);
        assert!(query.into_sink().into_inner().is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sink_failure_terminates_query() {
        let source =
            MemorySource::new("stedi-events").with_batch(vec![risk_event(0, "a@test.com", "1.0")]);
        let mut query = StreamingQuery::new(
            Arc::new(CustomerRiskJob::new()),
            source,
            ConsoleSink::new(BrokenPipe, ConsoleOptions::default()),
            fast_trigger(),
        );

        let result = query.await_termination(CancellationToken::new()).await;
        assert!(matches!(
            result,
            Err(StreamError::Sink(SinkError::Io { batch_id: 0, .. }))
        ));
        assert_eq!(query.next_batch_id(), 0);
    }
}
