//! Bounded scrollback buffer.
//!
//! Appends never evict. Eviction happens in `maintain()`, which the console
//! runs once per host tick, so the buffer can sit above capacity between
//! ticks. Under `EvictionPolicy::Frame` a tick removes at most one line.

use std::collections::VecDeque;
use std::collections::vec_deque;

use crate::config::{ConsoleConfig, EvictionPolicy};

/// Capped FIFO of display lines with lazy eviction.
#[derive(Debug, Clone)]
pub struct BoundedHistoryBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    default_line: String,
    policy: EvictionPolicy,
}

impl BoundedHistoryBuffer {
    /// Create an empty buffer.
    pub fn new(capacity: usize, default_line: impl Into<String>, policy: EvictionPolicy) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
            default_line: default_line.into(),
            policy,
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(
            config.history_capacity,
            config.default_line.clone(),
            config.eviction,
        )
    }

    /// Add a line at the tail.
    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    /// Periodic maintenance. Returns the number of evicted lines.
    ///
    /// Evicts from the head according to the policy, then reinserts the
    /// default line if the buffer is empty.
    pub fn maintain(&mut self) -> usize {
        let surplus = self.lines.len().saturating_sub(self.capacity);
        let evict = match self.policy {
            EvictionPolicy::Frame => surplus.min(1),
            EvictionPolicy::Drain => surplus,
        };
        self.lines.drain(..evict);
        if self.lines.is_empty() {
            self.lines.push_back(self.default_line.clone());
        }
        evict
    }

    /// Remove every line immediately.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The oldest line, styled separately by renderers.
    pub fn oldest(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    /// Lines in FIFO order. The iterator is `Clone`, so it can be restarted.
    pub fn iter(&self) -> vec_deque::Iter<'_, String> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn default_line(&self) -> &str {
        &self.default_line
    }
}

impl<'a> IntoIterator for &'a BoundedHistoryBuffer {
    type Item = &'a String;
    type IntoIter = vec_deque::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "Type 'help' to see all commands.";

    fn frame(capacity: usize) -> BoundedHistoryBuffer {
        BoundedHistoryBuffer::new(capacity, DEFAULT, EvictionPolicy::Frame)
    }

    fn fill(buf: &mut BoundedHistoryBuffer, n: usize) {
        for i in 0..n {
            buf.append(format!("line {i}"));
        }
    }

    #[test]
    fn append_does_not_evict() {
        let mut buf = frame(3);
        fill(&mut buf, 10);
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn frame_policy_evicts_one_per_tick() {
        let mut buf = frame(100);
        fill(&mut buf, 500);
        assert_eq!(buf.maintain(), 1);
        assert_eq!(buf.len(), 499);
        assert_eq!(buf.oldest(), Some("line 1"));
        for _ in 0..398 {
            buf.maintain();
        }
        assert_eq!(buf.len(), 101);
        buf.maintain();
        assert_eq!(buf.len(), 100);
        assert_eq!(buf.maintain(), 0);
        assert_eq!(buf.len(), 100);
        assert_eq!(buf.oldest(), Some("line 400"));
    }

    #[test]
    fn drain_policy_evicts_to_capacity() {
        let mut buf = BoundedHistoryBuffer::new(100, DEFAULT, EvictionPolicy::Drain);
        fill(&mut buf, 500);
        assert_eq!(buf.maintain(), 400);
        assert_eq!(buf.len(), 100);
        assert_eq!(buf.oldest(), Some("line 400"));
    }

    #[test]
    fn maintain_reseeds_empty_buffer() {
        let mut buf = frame(100);
        buf.maintain();
        assert_eq!(buf.iter().collect::<Vec<_>>(), [DEFAULT]);
    }

    #[test]
    fn clear_then_maintain_reseeds() {
        let mut buf = frame(100);
        fill(&mut buf, 5);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.oldest(), None);
        buf.maintain();
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.oldest(), Some(DEFAULT));
    }

    #[test]
    fn maintain_does_not_add_default_to_non_empty_buffer() {
        let mut buf = frame(100);
        buf.append("hello");
        buf.maintain();
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.oldest(), Some("hello"));
    }

    #[test]
    fn iteration_is_fifo_and_restartable() {
        let mut buf = frame(10);
        fill(&mut buf, 3);
        let iter = buf.iter();
        let a: Vec<&String> = iter.clone().collect();
        let b: Vec<&String> = (&buf).into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a, ["line 0", "line 1", "line 2"]);
    }

    #[test]
    fn from_config_uses_settings() {
        let config = ConsoleConfig {
            history_capacity: 7,
            default_line: "ready".into(),
            eviction: EvictionPolicy::Drain,
            ..ConsoleConfig::default()
        };
        let buf = BoundedHistoryBuffer::from_config(&config);
        assert_eq!(buf.capacity(), 7);
        assert_eq!(buf.default_line(), "ready");
        assert_eq!(buf.policy(), EvictionPolicy::Drain);
        assert!(buf.is_empty());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn frame_length_after_ticks(n in 0usize..400, ticks in 1usize..400) {
                let mut buf = frame(100);
                fill(&mut buf, n);
                for _ in 0..ticks {
                    buf.maintain();
                }
                let expected = if n == 0 {
                    1
                } else if n > 100 {
                    n.saturating_sub(ticks).max(100)
                } else {
                    n
                };
                prop_assert_eq!(buf.len(), expected);
                prop_assert!(!buf.is_empty());
            }

            #[test]
            fn drain_never_exceeds_capacity_after_tick(n in 0usize..400, cap in 1usize..150) {
                let mut buf = BoundedHistoryBuffer::new(cap, DEFAULT, EvictionPolicy::Drain);
                fill(&mut buf, n);
                buf.maintain();
                prop_assert!(buf.len() <= cap);
                prop_assert!(!buf.is_empty());
            }

            #[test]
            fn eviction_keeps_newest_lines(n in 101usize..300) {
                let mut buf = frame(100);
                fill(&mut buf, n);
                for _ in 0..n {
                    buf.maintain();
                }
                let expected_last = format!("line {}", n - 1);
                let expected_first = format!("line {}", n - 100);
                prop_assert_eq!(buf.iter().last(), Some(&expected_last));
                prop_assert_eq!(buf.oldest(), Some(expected_first.as_str()));
            }
        }
    }
}
