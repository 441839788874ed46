//! Deferred settle checks
//!
//! A drag move writes the new position immediately, but the collision check
//! has to wait until the surface has rendered that position. Each move
//! enqueues a [`SettleTask`] tagged with a monotonic sequence number; the
//! controller drains the queue on its next tick and only acts on the task
//! carrying the latest number.

use ledmap_core::{PanelId, Position};
use std::collections::VecDeque;

/// One pending collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTask {
    /// Sequence number of the move that scheduled the check
    pub sequence: u64,
    /// The dragged panel
    pub panel_id: PanelId,
    /// Position written by that move
    pub position: Position,
}

/// FIFO of settle checks waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct SettleQueue {
    tasks: VecDeque<SettleTask>,
    next_sequence: u64,
}

impl SettleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a check and return its sequence number
    pub fn schedule(&mut self, panel_id: PanelId, position: Position) -> u64 {
        self.next_sequence += 1;
        let sequence = self.next_sequence;
        self.tasks.push_back(SettleTask {
            sequence,
            panel_id,
            position,
        });
        sequence
    }

    /// Sequence number of the most recently scheduled check
    pub fn latest(&self) -> u64 {
        self.next_sequence
    }

    /// Whether `task` is the most recently scheduled check
    pub fn is_current(&self, task: &SettleTask) -> bool {
        task.sequence == self.next_sequence
    }

    /// Take every pending task in scheduling order
    pub fn drain(&mut self) -> Vec<SettleTask> {
        self.tasks.drain(..).collect()
    }

    /// Drop pending tasks; sequence numbers keep increasing
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_increase() {
        let mut queue = SettleQueue::new();
        assert_eq!(queue.schedule(1, Position::new(50, 0)), 1);
        assert_eq!(queue.schedule(1, Position::new(100, 0)), 2);
        assert_eq!(queue.latest(), 2);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_only_last_task_is_current() {
        let mut queue = SettleQueue::new();
        queue.schedule(1, Position::new(50, 0));
        queue.schedule(1, Position::new(100, 0));

        let tasks = queue.drain();
        assert!(queue.is_empty());
        assert!(!queue.is_current(&tasks[0]));
        assert!(queue.is_current(&tasks[1]));
        assert_eq!(tasks[1].position, Position::new(100, 0));
    }

    #[test]
    fn test_clear_keeps_counting() {
        let mut queue = SettleQueue::new();
        queue.schedule(2, Position::zero());
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.schedule(2, Position::zero()), 2);
    }
}
