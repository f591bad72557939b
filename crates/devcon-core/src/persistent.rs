//! Session-lifetime log used for export.

/// Unbounded FIFO of every line surfaced during the session.
///
/// Never evicted and never cleared by the `clear` command.
#[derive(Debug, Clone, Default)]
pub struct PersistentLog {
    lines: Vec<String>,
}

impl PersistentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// The full ordered sequence, for export.
    pub fn snapshot(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut log = PersistentLog::new();
        log.append("a");
        log.append(String::from("b"));
        assert_eq!(log.snapshot(), ["a", "b"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn grows_without_bound() {
        let mut log = PersistentLog::new();
        for i in 0..10_000 {
            log.append(i.to_string());
        }
        assert_eq!(log.len(), 10_000);
        assert_eq!(log.snapshot().first().map(String::as_str), Some("0"));
    }

    #[test]
    fn starts_empty() {
        assert!(PersistentLog::new().is_empty());
    }
}
