use ConcurrentQueueMini::ConfigError;
use ConcurrentQueueMini::core::buildcore::{EventOp, Journal, QueueBuilder, QueueConfig, QueueEvent};
use ConcurrentQueueMini::core::log::{append_logs, read_logs};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_journal_records_operations_in_order() {
    let queue = QueueBuilder::new().name("orders").journal(true).build::<u32>();
    queue.push(1).unwrap();
    queue.push(2).unwrap();
    queue.pop().unwrap();
    queue.pop().unwrap();
    let _ = queue.pop_timeout(Duration::from_millis(5));
    queue.close();
    let _ = queue.push(3);

    let events = queue.events();
    let ops: Vec<EventOp> = events.iter().map(|e| e.op).collect();
    assert_eq!(
        ops,
        vec![
            EventOp::Push,
            EventOp::Push,
            EventOp::Pop,
            EventOp::Pop,
            EventOp::PopTimedOut,
            EventOp::Close,
            EventOp::PushRejected,
        ]
    );
    let lens: Vec<usize> = events.iter().map(|e| e.len_after).collect();
    assert_eq!(lens, vec![1, 2, 1, 0, 0, 0, 0]);
    assert!(events.iter().all(|e| e.queue == "orders"));
    assert!(events.windows(2).all(|w| w[0].seq < w[1].seq));
    assert!(events.windows(2).all(|w| w[0].at_micros <= w[1].at_micros));
}

#[test]
fn test_journal_limit_keeps_newest_entries() {
    let queue = QueueBuilder::new().journal_limit(3).build::<u8>();
    for i in 0..5 {
        queue.push(i).unwrap();
    }
    let journal = queue.journal().unwrap();
    assert_eq!(journal.limit(), Some(3));
    assert_eq!(journal.len(), 3);
    let lens: Vec<usize> = queue.events().iter().map(|e| e.len_after).collect();
    assert_eq!(lens, vec![3, 4, 5]);

    journal.clear();
    assert!(journal.is_empty());
}

#[test]
fn test_append_and_read_ndjson() {
    let queue = QueueBuilder::new().name("ndjson").journal(true).build::<&str>();
    queue.push("a").unwrap();
    queue.pop().unwrap();
    queue.drain();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.ndjson");
    append_logs(&queue.events(), &path).unwrap();
    append_logs(&queue.events(), &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 6);
    assert!(content.lines().next().unwrap().contains("\"op\":\"push\""));

    let read_back = read_logs(&path).unwrap();
    assert_eq!(read_back.len(), 6);
    assert_eq!(&read_back[..3], &queue.events()[..]);
    assert_eq!(read_back[2].op, EventOp::Drain);
}

#[test]
fn test_config_defaults_and_overrides() {
    let config = QueueConfig::from_json_str("{}").unwrap();
    assert_eq!(config, QueueConfig::default());

    let config =
        QueueConfig::from_json_str(r#"{"name":"jobs","capacity":8,"journal":true}"#).unwrap();
    let queue = QueueBuilder::from_config(&config).unwrap().build::<u64>();
    assert_eq!(queue.name(), "jobs");
    assert_eq!(queue.capacity(), Some(8));
    assert!(queue.journal().is_some());
}

#[test]
fn test_config_rejects_zero_capacity() {
    let err = QueueConfig::from_json_str(r#"{"capacity":0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCapacity { field: "capacity" }));

    let config = QueueConfig { journal_limit: Some(0), ..QueueConfig::default() };
    assert!(matches!(
        QueueBuilder::from_config(&config),
        Err(ConfigError::InvalidCapacity { field: "journal_limit" })
    ));
}

#[test]
fn test_config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"name":"file-queue","journal_limit":16}}"#).unwrap();

    let config = QueueConfig::load(file.path()).unwrap();
    assert_eq!(config.name, "file-queue");
    assert_eq!(config.journal_limit, Some(16));
    assert_eq!(config.capacity, None);

    let missing = QueueConfig::load(file.path().with_extension("missing")).unwrap_err();
    assert!(matches!(missing, ConfigError::Io(_)));
    let bad = QueueConfig::from_json_str("not json").unwrap_err();
    assert!(matches!(bad, ConfigError::Json(_)));
}

#[test]
#[should_panic(expected = "journal limit must be greater than zero")]
fn test_zero_journal_limit_is_rejected() {
    let _ = Journal::new(Some(0));
}

#[test]
fn test_single_entry_journal_keeps_latest() {
    let journal = Journal::new(Some(1));
    journal.record(QueueEvent::new("q", EventOp::Push, 1, 0));
    journal.record(QueueEvent::new("q", EventOp::Pop, 0, 5));

    let entries = journal.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].op, EventOp::Pop);
}

#[test]
fn test_event_display_names_operation() {
    let event = QueueEvent::new("jobs", EventOp::PopTimedOut, 0, 42);
    let shown = event.to_string();
    assert!(shown.contains("queue: jobs"));
    assert!(shown.contains("op: PopTimedOut"));
    assert!(shown.contains("at_micros: 42"));
}
