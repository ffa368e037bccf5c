use ConcurrentQueueMini::core::buildcore::{QueueBuilder, QueueConfig};
use ConcurrentQueueMini::core::log::append_logs;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Producer/consumer demo over a shared blocking queue
#[derive(Debug, Parser)]
#[command(name = "concurrent-queue-mini", version)]
struct Cli {
    /// Number of producer threads
    #[arg(long, default_value_t = 4)]
    producers: usize,

    /// Items pushed by each producer
    #[arg(long, default_value_t = 5)]
    iterations: usize,

    /// Pause between two pushes of the same producer
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Bound the queue; overrides the config file
    #[arg(long)]
    capacity: Option<usize>,

    /// JSON queue config
    #[arg(long)]
    config: Option<PathBuf>,

    /// NDJSON file the operation journal is appended to
    #[arg(long, default_value = "output.ndjson")]
    output: PathBuf,

    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut config = match &cli.config {
        Some(path) => QueueConfig::load(path)
            .with_context(|| format!("Failed to load queue config: {}", path.display()))?,
        None => QueueConfig { journal: true, ..QueueConfig::default() },
    };
    if cli.capacity.is_some() {
        config.capacity = cli.capacity;
    }
    let queue = QueueBuilder::from_config(&config)
        .context("Invalid queue configuration")?
        .build_shared::<String>();

    // Spawn the producers; each tags its items with its own thread id
    let mut handles = Vec::with_capacity(cli.producers);
    for _ in 0..cli.producers {
        let producer = queue.clone();
        let iterations = cli.iterations;
        let delay = Duration::from_millis(cli.delay_ms);
        handles.push(thread::spawn(move || {
            let tag = format!("thread {:?}", thread::current().id());
            for _ in 0..iterations {
                if producer.push(tag.clone()).is_err() {
                    break;
                }
                thread::sleep(delay);
            }
        }));
    }

    for _ in 0..cli.producers * cli.iterations {
        let item = queue.pop().context("Queue closed before every item arrived")?;
        println!("{}", item);
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;
    }
    queue.close();

    let events = queue.events();
    for event in &events {
        debug!("{}", event);
    }
    if !events.is_empty() {
        append_logs(&events, &cli.output)
            .with_context(|| format!("Failed to append logs to {}", cli.output.display()))?;
    }
    Ok(())
}
