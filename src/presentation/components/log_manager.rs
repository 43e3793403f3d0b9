use chrono::{DateTime, Local};
use std::collections::VecDeque;
use tracing::Level;

const MAX_LOG_SIZE: usize = 200;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn new(level: Level, message: String) -> Self {
        Self {
            level,
            message,
            timestamp: Local::now(),
        }
    }

    pub fn format_timestamp(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

pub struct LogManager {
    logs: VecDeque<LogEntry>,
    show_debug: bool,
}

impl LogManager {
    pub fn new() -> Self {
        Self {
            logs: VecDeque::with_capacity(MAX_LOG_SIZE),
            show_debug: false,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.logs.len() >= MAX_LOG_SIZE {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    pub fn set_show_debug(&mut self, value: bool) {
        self.show_debug = value;
    }

    /// Newest last. Debug and trace entries are hidden unless enabled.
    pub fn filtered_logs(&self) -> impl Iterator<Item = &LogEntry> {
        let show_debug = self.show_debug;
        self.logs
            .iter()
            .filter(move |entry| show_debug || entry.level <= Level::INFO)
    }

    pub fn clear(&mut self) {
        self.logs.clear();
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_entries_are_dropped_at_capacity() {
        let mut manager = LogManager::new();
        for i in 0..MAX_LOG_SIZE + 5 {
            manager.push(LogEntry::new(Level::INFO, format!("entry {i}")));
        }

        let logs: Vec<_> = manager.filtered_logs().collect();
        assert_eq!(logs.len(), MAX_LOG_SIZE);
        assert_eq!(logs[0].message, "entry 5");
    }

    #[test]
    fn debug_entries_hidden_by_default() {
        let mut manager = LogManager::new();
        manager.push(LogEntry::new(Level::DEBUG, "reconciled".to_string()));
        manager.push(LogEntry::new(Level::WARN, "range ignored".to_string()));
        assert_eq!(manager.filtered_logs().count(), 1);

        manager.set_show_debug(true);
        assert_eq!(manager.filtered_logs().count(), 2);
    }
}
