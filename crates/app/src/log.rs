use std::{
    cell::Cell,
    collections::VecDeque,
    ops::DerefMut,
    sync::{Arc, Mutex},
};

use chrono::Utc;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

/// Number of entries a repository keeps. Older entries are dropped first.
pub const MAX_ENTRIES: usize = 100;

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

#[allow(clippy::missing_errors_doc)]
pub trait Service {
    fn get_log_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn add_log_entry(&self, entry: Entry) -> Result<(), Error>;
}

/// Storage of log entries, newest entry first.
#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

impl Entry {
    fn from_record(record: &Record) -> Self {
        Self {
            time: Utc::now().format("%b %d %H:%M:%S").to_string(),
            level: record.level(),
            message: record.args().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

static LOGGER: Logger = Logger;

thread_local! {
    /// Set while the current thread writes an entry. Records emitted by the
    /// repository during that write are dropped.
    static WRITING: Cell<bool> = const { Cell::new(false) };
}

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(storage: Arc<Mutex<dyn Repository>>) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Trace))
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) || WRITING.replace(true) {
            return;
        }
        if let Ok(log) = LOG.lock() {
            if let Some(ref repository) = *log {
                if let Ok(mut repository) = repository.lock() {
                    let _ = repository.deref_mut().write_entry(Entry::from_record(record));
                }
            }
        }
        WRITING.set(false);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc, thread, time::Duration};

    use pretty_assertions::assert_eq;

    use super::*;

    struct ChattyRepository {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl Repository for ChattyRepository {
        fn read_entries(&self) -> Result<VecDeque<Entry>, Error> {
            Ok(VecDeque::new())
        }

        fn write_entry(&self, entry: Entry) -> Result<(), Error> {
            log::debug!("writing {}", entry.message);
            self.messages
                .lock()
                .map_err(|err| Error::Unknown(err.to_string()))?
                .push(entry.message);
            Ok(())
        }
    }

    #[test]
    fn test_logger_ignores_records_of_repository() {
        let messages = Arc::new(Mutex::new(vec![]));
        init(Arc::new(Mutex::new(ChattyRepository {
            messages: messages.clone(),
        })))
        .unwrap();

        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            log::info!("first entry");
            log::warn!("second entry");
            sender.send(()).unwrap();
        });
        receiver.recv_timeout(Duration::from_secs(5)).unwrap();

        let messages = messages.lock().unwrap();
        assert!(!messages.iter().any(|m| m.starts_with("writing")));
        assert_eq!(
            messages
                .iter()
                .filter(|m| m.ends_with(" entry"))
                .map(String::as_str)
                .collect::<Vec<_>>(),
            vec!["first entry", "second entry"]
        );
    }

    #[test]
    fn test_entry_from_record() {
        let entry = Entry::from_record(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("failed to {} {}", "save", "workout"))
                .build(),
        );
        assert_eq!(entry.level, Level::Warn);
        assert_eq!(entry.message, "failed to save workout");
        assert!(!entry.time.is_empty());
    }

    #[test]
    fn test_entry_serialization() {
        let entry = Entry {
            time: "Jun 10 06:13:20".to_string(),
            level: Level::Debug,
            message: "no connection".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"time":"Jun 10 06:13:20","level":"Debug","message":"no connection"}"#
        );
        assert_eq!(serde_json::from_str::<Entry>(&json).unwrap(), entry);
    }
}
