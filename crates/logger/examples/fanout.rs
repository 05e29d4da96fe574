//! Fan-out demo: several producers, one capturable sink, metrics at the end.

use logger::{Logger, LoggerConfig, MemorySink};

#[tokio::main]
async fn main() {
    let sink = MemorySink::new("demo");
    let contents = sink.clone();
    let (logger, handle) = Logger::new(sink, LoggerConfig::default());
    let metrics = handle.metrics();
    let join = logger.spawn();

    let mut producers = Vec::new();
    for p in 0..4 {
        let sender = handle.sender();
        producers.push(tokio::spawn(async move {
            for i in 0..25 {
                sender
                    .send(format!("worker-{p} event-{i}"))
                    .await
                    .expect("intake open");
            }
        }));
    }
    for producer in producers {
        producer.await.expect("producer finished");
    }

    handle.stop().await.expect("clean shutdown");
    join.await.expect("loop exited");

    let snapshot = metrics.snapshot();
    println!(
        "captured {} lines ({} bytes)",
        contents.contents_string().lines().count(),
        contents.contents().len()
    );
    println!(
        "written={} failed={}",
        snapshot.write_count, snapshot.failure_count
    );
}
