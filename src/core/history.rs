//! Bounded transition history.
//!
//! Keeps the most recent transitions of a running chain in a fixed-capacity
//! ring buffer. Once full, recording a transition evicts the oldest one.

use super::error::ChainError;
use super::event::TransitionEvent;
use super::state::ChainState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions kept by a [`TransitionLog`].
pub const DEFAULT_LOG_CAPACITY: usize = 10;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use aloha_dtmc::core::{ChainState, TransitionEvent, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: ChainState::Zero,
///     to: ChainState::One,
///     event: TransitionEvent::Collision,
///     step: 1,
///     at: Utc::now(),
/// };
/// assert_eq!(record.to_string(), "Step 1: 0 → 1 (collision)");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being left
    pub from: ChainState,
    /// The state being entered
    pub to: ChainState,
    /// The slot outcome that caused the move
    pub event: TransitionEvent,
    /// Step count after this transition (first transition is step 1)
    pub step: u64,
    /// When the transition was applied
    pub at: DateTime<Utc>,
}

impl std::fmt::Display for TransitionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Step {}: {} → {} ({})",
            self.step, self.from, self.to, self.event
        )
    }
}

/// Fixed-capacity, oldest-evicted-first log of transitions.
///
/// Transitions are kept in chronological order. The capacity is set at
/// construction and never changes. Deserializing a log that holds more
/// entries than its capacity fails.
///
/// # Example
///
/// ```rust
/// use aloha_dtmc::core::{ChainState, TransitionEvent, TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let mut log = TransitionLog::with_capacity(2);
/// for step in 1..=3 {
///     log.record(TransitionRecord {
///         from: ChainState::Zero,
///         to: ChainState::Zero,
///         event: TransitionEvent::Idle,
///         step,
///         at: Utc::now(),
///     });
/// }
///
/// let steps: Vec<u64> = log.iter().map(|r| r.step).collect();
/// assert_eq!(steps, vec![2, 3]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "StoredLog")]
pub struct TransitionLog {
    capacity: usize,
    entries: VecDeque<TransitionRecord>,
}

#[derive(Deserialize)]
struct StoredLog {
    capacity: usize,
    entries: VecDeque<TransitionRecord>,
}

impl TryFrom<StoredLog> for TransitionLog {
    type Error = ChainError;

    fn try_from(stored: StoredLog) -> Result<Self, Self::Error> {
        if stored.entries.len() > stored.capacity {
            return Err(ChainError::LogOverCapacity {
                len: stored.entries.len(),
                capacity: stored.capacity,
            });
        }
        Ok(Self {
            capacity: stored.capacity,
            entries: stored.entries,
        })
    }
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl TransitionLog {
    /// Create an empty log holding at most `capacity` transitions.
    ///
    /// A zero capacity yields a log that records nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a transition, returning the evicted oldest entry if the log
    /// was already full.
    pub fn record(&mut self, record: TransitionRecord) -> Option<TransitionRecord> {
        if self.capacity == 0 {
            return Some(record);
        }
        let mut evicted = None;
        while self.entries.len() >= self.capacity {
            evicted = self.entries.pop_front();
        }
        self.entries.push_back(record);
        evicted
    }

    /// Drop every recorded transition. Capacity is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over transitions, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TransitionRecord> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Most recent transition, if any.
    pub fn latest(&self) -> Option<&TransitionRecord> {
        self.entries.back()
    }

    /// The last `n` transitions in chronological order.
    ///
    /// Returns everything when fewer than `n` are recorded.
    pub fn recent(&self, n: usize) -> Vec<&TransitionRecord> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).collect()
    }

    /// Path of states covered by the log: the `from` state of the oldest
    /// kept transition, then the `to` state of each transition.
    pub fn path(&self) -> Vec<ChainState> {
        let mut path = Vec::with_capacity(self.entries.len() + 1);
        if let Some(first) = self.entries.front() {
            path.push(first.from);
        }
        path.extend(self.entries.iter().map(|r| r.to));
        path
    }

    /// Wall-clock time between the oldest and newest kept transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.front()?, self.entries.back()?);
        last.at.signed_duration_since(first.at).to_std().ok()
    }

    /// Owned copy of the entries, oldest first.
    pub fn to_vec(&self) -> Vec<TransitionRecord> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(step: u64, from: ChainState, to: ChainState, event: TransitionEvent) -> TransitionRecord {
        TransitionRecord {
            from,
            to,
            event,
            step,
            at: Utc::now(),
        }
    }

    fn idle(step: u64) -> TransitionRecord {
        record(step, ChainState::Zero, ChainState::Zero, TransitionEvent::Idle)
    }

    #[test]
    fn new_log_is_empty() {
        let log = TransitionLog::default();
        assert!(log.is_empty());
        assert_eq!(log.capacity(), DEFAULT_LOG_CAPACITY);
        assert!(log.path().is_empty());
        assert!(log.duration().is_none());
        assert!(log.latest().is_none());
    }

    #[test]
    fn record_appends_until_full() {
        let mut log = TransitionLog::with_capacity(3);
        assert!(log.record(idle(1)).is_none());
        assert!(log.record(idle(2)).is_none());
        assert!(log.record(idle(3)).is_none());
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn record_evicts_oldest_when_full() {
        let mut log = TransitionLog::with_capacity(3);
        for step in 1..=3 {
            log.record(idle(step));
        }

        let evicted = log.record(idle(4));
        assert_eq!(evicted.map(|r| r.step), Some(1));
        assert_eq!(log.len(), 3);

        let steps: Vec<u64> = log.iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![2, 3, 4]);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut log = TransitionLog::with_capacity(0);
        let bounced = log.record(idle(1));
        assert_eq!(bounced.map(|r| r.step), Some(1));
        assert!(log.is_empty());
    }

    #[test]
    fn recent_returns_tail_in_order() {
        let mut log = TransitionLog::default();
        for step in 1..=8 {
            log.record(idle(step));
        }

        let steps: Vec<u64> = log.recent(5).iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![4, 5, 6, 7, 8]);
        assert_eq!(log.recent(20).len(), 8);
        assert!(log.recent(0).is_empty());
    }

    #[test]
    fn path_follows_kept_transitions() {
        let mut log = TransitionLog::default();
        log.record(record(1, ChainState::Zero, ChainState::One, TransitionEvent::Collision));
        log.record(record(2, ChainState::One, ChainState::TwoOrMore, TransitionEvent::Collision));
        log.record(record(3, ChainState::TwoOrMore, ChainState::Zero, TransitionEvent::Success));

        assert_eq!(
            log.path(),
            vec![
                ChainState::Zero,
                ChainState::One,
                ChainState::TwoOrMore,
                ChainState::Zero
            ]
        );
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut log = TransitionLog::with_capacity(4);
        log.record(idle(1));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.capacity(), 4);
    }

    #[test]
    fn duration_spans_oldest_to_newest() {
        let start = Utc::now();
        let mut log = TransitionLog::default();
        let mut first = idle(1);
        first.at = start;
        let mut second = idle(2);
        second.at = start + chrono::Duration::milliseconds(250);
        log.record(first);
        log.record(second);

        assert_eq!(log.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn record_display_matches_panel_format() {
        let r = record(7, ChainState::One, ChainState::Zero, TransitionEvent::Success);
        assert_eq!(r.to_string(), "Step 7: 1 → 0 (success)");
    }

    #[test]
    fn log_serializes_correctly() {
        let mut log = TransitionLog::with_capacity(2);
        log.record(record(1, ChainState::Zero, ChainState::One, TransitionEvent::Collision));

        let json = serde_json::to_string(&log).unwrap();
        let restored: TransitionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.capacity(), 2);
        assert_eq!(restored.to_vec(), log.to_vec());
    }

    #[test]
    fn overfull_log_is_rejected_on_deserialize() {
        let entries: Vec<TransitionRecord> = (1..=3).map(idle).collect();
        let json = serde_json::json!({ "capacity": 2, "entries": entries });

        let err = serde_json::from_value::<TransitionLog>(json).unwrap_err();
        assert!(err.to_string().contains("more than its capacity of 2"));
    }

    #[test]
    fn restored_log_stays_within_capacity() {
        let entries: Vec<TransitionRecord> = (1..=2).map(idle).collect();
        let json = serde_json::json!({ "capacity": 2, "entries": entries });
        let mut log: TransitionLog = serde_json::from_value(json).unwrap();

        for step in 3..=7 {
            log.record(idle(step));
            assert!(log.len() <= log.capacity());
        }
        let steps: Vec<u64> = log.iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![6, 7]);
    }
}
