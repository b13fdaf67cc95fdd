//! # Integration Tests
//!
//! End-to-end and concurrency tests for the logging engine.
//!
//! Covers:
//! - Mutual exclusion of the write guard under concurrent load
//! - Intake backpressure at capacity
//! - Error outtake delivery for failing sinks
//! - Full session against a file sink

#[cfg(test)]
mod write_guard_tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use contracts::EngineConfig;
    use engine::{Engine, MemorySink};
    use tokio::time::{sleep, timeout, Duration};

    const PRODUCERS: usize = 4;
    const MESSAGES_PER_PRODUCER: usize = 16;

    /// N >= 50 concurrent asynchronous writes: every record captured by
    /// the sink is one whole formatted message, never an interleaved
    /// fragment of another.
    #[tokio::test]
    async fn test_no_interleaved_writes_under_concurrency() {
        let total = PRODUCERS * MESSAGES_PER_PRODUCER;
        let shared = MemorySink::shared("stress");
        let mut engine = Engine::from_shared(
            Arc::clone(&shared),
            EngineConfig {
                message_capacity: total,
                error_capacity: 8,
                max_concurrent_writes: 8,
            },
        );
        let counters = engine.counters();
        let handle = engine.start().unwrap();

        let mut producers = Vec::new();
        for p in 0..PRODUCERS {
            let intake = engine.intake();
            producers.push(tokio::spawn(async move {
                for i in 0..MESSAGES_PER_PRODUCER {
                    intake.send(format!("p{p}-m{i}")).await.unwrap();
                }
            }));
        }
        for producer in producers {
            producer.await.unwrap();
        }

        timeout(Duration::from_secs(10), async {
            while counters.completed_writes() < total as u64 {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("writes did not complete in time");

        engine.stop();
        handle.await.unwrap();

        let sink = shared.lock().await;
        let records = sink.records();
        assert_eq!(records.len(), total);

        let mut payloads = HashSet::new();
        for record in records {
            // One whole record per write call: timestamp prefix, one
            // payload, exactly one trailing newline.
            assert!(record.starts_with('['), "fragmented record: {record:?}");
            assert_eq!(record.matches('\n').count(), 1);
            assert!(record.ends_with('\n'));
            let payload = record
                .split_once("] - ")
                .expect("missing separator")
                .1
                .trim_end();
            assert!(payloads.insert(payload.to_string()), "duplicate {payload}");
        }
        assert_eq!(payloads.len(), total);
        for p in 0..PRODUCERS {
            for i in 0..MESSAGES_PER_PRODUCER {
                assert!(payloads.contains(&format!("p{p}-m{i}")));
            }
        }
    }
}

#[cfg(test)]
mod backpressure_tests {
    use contracts::EngineConfig;
    use engine::{Engine, MemorySink};
    use tokio::time::{timeout, Duration};

    /// With intake capacity 1 and no running dispatcher, the second
    /// enqueue blocks; once the dispatcher drains the queue it goes
    /// through.
    #[tokio::test]
    async fn test_second_enqueue_blocks_until_dequeue() {
        let mut engine = Engine::new(MemorySink::new("buffer"), EngineConfig::new(1, 1));
        let intake = engine.intake();

        intake.send("first".to_string()).await.unwrap();

        let blocked = timeout(Duration::from_millis(100), intake.send("second".to_string())).await;
        assert!(blocked.is_err(), "send should block on a full intake");

        let handle = engine.start().unwrap();

        timeout(Duration::from_secs(1), intake.send("second".to_string()))
            .await
            .expect("send should succeed once the dispatcher drains")
            .unwrap();

        engine.stop();
        handle.await.unwrap();
    }
}

#[cfg(test)]
mod error_path_tests {
    use contracts::EngineConfig;
    use engine::{Engine, MemorySink};
    use tokio::time::{timeout, Duration};

    /// A sink failing every write yields exactly one error queue entry
    /// per dispatched message - no duplicates, no silent drops - as long
    /// as the queue has room.
    #[tokio::test]
    async fn test_one_error_per_failed_write() {
        let messages = 8;
        let mut engine = Engine::new(
            MemorySink::failing("broken"),
            EngineConfig::new(messages, messages),
        );
        let counters = engine.counters();
        let intake = engine.intake();
        let mut errors = engine.take_errors().unwrap();
        let handle = engine.start().unwrap();

        for i in 0..messages {
            intake.send(format!("msg-{i}")).await.unwrap();
        }

        let mut reported = Vec::new();
        for _ in 0..messages {
            let failure = timeout(Duration::from_secs(5), errors.recv())
                .await
                .expect("missing error report")
                .expect("error queue closed early");
            reported.push(failure.message);
        }
        reported.sort();
        let expected: Vec<String> = (0..messages).map(|i| format!("msg-{i}")).collect();
        assert_eq!(reported, expected);

        // No extra reports.
        let extra = timeout(Duration::from_millis(100), errors.recv()).await;
        assert!(extra.is_err(), "unexpected extra error report");
        assert_eq!(counters.dropped_errors(), 0);

        engine.stop();
        handle.await.unwrap();
    }

    /// The producer that enqueued a failing message is never notified;
    /// only the error consumer learns about the failure.
    #[tokio::test]
    async fn test_producer_send_succeeds_despite_failing_sink() {
        let mut engine = Engine::new(MemorySink::failing("broken"), EngineConfig::new(4, 4));
        let intake = engine.intake();
        let mut errors = engine.take_errors().unwrap();
        let handle = engine.start().unwrap();

        intake.send("doomed".to_string()).await.unwrap();

        let failure = timeout(Duration::from_secs(5), errors.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(failure.message, "doomed");

        engine.stop();
        handle.await.unwrap();
    }
}

#[cfg(test)]
mod file_session_tests {
    use chrono::NaiveDateTime;
    use contracts::{EngineConfig, LogSink};
    use engine::{Engine, FileSink};
    use tempfile::tempdir;
    use tokio::time::{sleep, timeout, Duration};

    fn assert_record_shape(line: &str, payload: &str) {
        let (prefix, rest) = line.split_once("] - ").expect("missing separator");
        let ts = prefix.strip_prefix('[').expect("missing '['");
        assert!(NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").is_ok());
        assert_eq!(rest, payload);
    }

    /// Full session against a file sink: synchronous write, asynchronous
    /// writes, shutdown, then verify the on-disk records.
    #[tokio::test]
    async fn test_file_backed_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.log");

        let sink = FileSink::create(&path).unwrap();
        let mut engine = Engine::new(sink, EngineConfig::new(4, 1));
        let counters = engine.counters();
        let intake = engine.intake();
        let handle = engine.start().unwrap();

        engine.write("hello").await.unwrap();

        intake.send("one".to_string()).await.unwrap();
        intake.send("two".to_string()).await.unwrap();

        timeout(Duration::from_secs(5), async {
            while counters.completed_writes() < 2 {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        engine.stop();
        handle.await.unwrap();
        engine.sink().lock().await.close().await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_record_shape(lines[0], "hello");

        // Async completion order is unordered; check the payload set.
        let mut async_payloads: Vec<&str> = lines[1..]
            .iter()
            .map(|l| l.split_once("] - ").unwrap().1)
            .collect();
        async_payloads.sort_unstable();
        assert_eq!(async_payloads, ["one", "two"]);
        for line in &lines[1..] {
            let payload = line.split_once("] - ").unwrap().1;
            assert_record_shape(line, payload);
        }
    }
}
