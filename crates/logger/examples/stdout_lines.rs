//! Minimal demo: a stdout logger fed from one task.

use logger::{Logger, LoggerConfig};

#[tokio::main]
async fn main() {
    let (logger, handle) = Logger::stdout(LoggerConfig::default());
    let sender = handle.sender();
    logger.spawn();

    for i in 0..5 {
        sender
            .send(format!("line {i}"))
            .await
            .expect("intake open");
    }

    handle.stop().await.expect("clean shutdown");
}
