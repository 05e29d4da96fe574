//! # Integration Tests
//!
//! End-to-end tests across the workspace crates.
//!
//! Covers:
//! - Multi-producer fan-in through the intake channel
//! - Failure reporting under a deterministically failing sink
//! - File sink round trip via the factory
//! - Shutdown racing with active producers

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::SinkKind::Stdout;
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use contracts::{ContractError, LineSink, SinkSpec};
    use logger::{create_logger, Logger, LoggerConfig, MemorySink};

    /// End-to-end: four producers -> dispatch loop -> memory sink
    #[tokio::test]
    async fn test_e2e_multi_producer_fanout() {
        let sink = MemorySink::new("mem");
        let contents = sink.clone();
        let (logger, handle) = Logger::new(
            sink,
            LoggerConfig {
                queue_capacity: 256,
                failure_capacity: 16,
            },
        );
        let metrics = handle.metrics();
        logger.spawn();

        let mut producers = Vec::new();
        for p in 0..4 {
            let sender = handle.sender();
            producers.push(tokio::spawn(async move {
                for i in 0..25 {
                    sender
                        .send(format!("producer-{p} line-{i}"))
                        .await
                        .unwrap();
                }
            }));
        }
        for producer in producers {
            producer.await.unwrap();
        }
        handle.stop().await.unwrap();

        let written = contents.contents_string();
        assert_eq!(written.lines().count(), 100);
        for p in 0..4 {
            for i in 0..25 {
                assert!(
                    written.contains(&format!("producer-{p} line-{i}\n")),
                    "missing producer-{p} line-{i}"
                );
            }
        }
        assert_eq!(metrics.write_count(), 100);
        assert_eq!(metrics.dispatched_count(), 100);
        assert_eq!(metrics.in_flight(), 0);
    }

    /// A failing sink reports once per write and never stalls shutdown
    #[tokio::test]
    async fn test_e2e_failing_sink_reports() {
        struct BrokenPipeSink {
            writes: Arc<AtomicU64>,
        }

        impl LineSink for BrokenPipeSink {
            fn name(&self) -> &str {
                "broken"
            }

            async fn write(&mut self, _line: &[u8]) -> Result<usize, ContractError> {
                self.writes.fetch_add(1, Ordering::SeqCst);
                Err(ContractError::sink_write("broken", "pipe closed"))
            }

            async fn flush(&mut self) -> Result<(), ContractError> {
                Ok(())
            }

            async fn close(&mut self) -> Result<(), ContractError> {
                Ok(())
            }
        }

        let writes = Arc::new(AtomicU64::new(0));
        let (logger, mut handle) = Logger::new(
            BrokenPipeSink {
                writes: Arc::clone(&writes),
            },
            LoggerConfig::default(),
        );
        let mut failures = handle.take_failures().unwrap();
        let sender = handle.sender();
        logger.spawn();

        // Continuous consumer, as the failure channel contract asks for.
        let consumer = tokio::spawn(async move {
            let mut seen = 0u64;
            while failures.recv().await.is_some() {
                seen += 1;
            }
            seen
        });

        for i in 0..8 {
            sender.send(format!("m{i}")).await.unwrap();
        }
        handle.stop().await.unwrap();

        assert_eq!(consumer.await.unwrap(), 8);
        assert_eq!(writes.load(Ordering::SeqCst), 8);
    }

    /// File sink end to end via the factory
    #[tokio::test]
    async fn test_e2e_file_sink_via_factory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e2e.log");
        let spec = SinkSpec::file("e2e_file", path.to_string_lossy());

        let (logger, handle) = create_logger(&spec, LoggerConfig::default()).unwrap();
        let sender = handle.sender();
        logger.spawn();

        sender.send("hello file").await.unwrap();
        sender.send("goodbye file").await.unwrap();
        handle.stop().await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("] - hello file\n"));
        assert!(contents.contains("] - goodbye file\n"));
    }

    /// Producers racing a shutdown get clean channel-closed errors and every
    /// accepted message is still written
    #[tokio::test]
    async fn test_e2e_shutdown_race() {
        let sink = MemorySink::new("mem");
        let contents = sink.clone();
        let (logger, handle) = Logger::new(sink, LoggerConfig::default());
        let metrics = handle.metrics();
        let sender = handle.sender();
        logger.spawn();

        let racer = tokio::spawn(async move {
            let mut accepted = 0u64;
            for i in 0..1000 {
                if sender.send(format!("racing-{i}")).await.is_err() {
                    break;
                }
                accepted += 1;
                tokio::task::yield_now().await;
            }
            accepted
        });

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        handle.stop().await.unwrap();
        let accepted = racer.await.unwrap();

        assert_eq!(metrics.write_count(), accepted);
        assert_eq!(
            contents.contents_string().lines().count(),
            accepted as usize
        );
    }
}
