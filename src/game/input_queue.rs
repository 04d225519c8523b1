use std::collections::VecDeque;

use super::action::Direction;

/// What happened to a direction offered to the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Queued,
    /// Same as the newest pending entry
    Duplicate,
    /// Would turn the snake back onto its own body
    Reversal,
    /// Queue is at capacity
    Full,
}

/// Pending direction changes, consumed one per tick in FIFO order.
///
/// Intents are only ever coalesced by the filters in [`InputQueue::enqueue`],
/// never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
    capacity: usize,
}

impl InputQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Queue sized for a grid: no more turns than the longer grid side
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self::new(width.max(height))
    }

    /// Offer a direction.
    ///
    /// `current` is the snake's direction of travel. The reversal check runs
    /// against the newest pending entry if there is one, otherwise against
    /// `current`, and only applies to snakes longer than one segment.
    pub fn enqueue(
        &mut self,
        dir: Direction,
        current: Direction,
        snake_len: usize,
    ) -> EnqueueOutcome {
        let last = self.pending.back().copied();
        if last == Some(dir) {
            return EnqueueOutcome::Duplicate;
        }

        let effective = last.unwrap_or(current);
        if snake_len > 1 && effective.is_opposite(dir) {
            return EnqueueOutcome::Reversal;
        }

        if self.pending.len() >= self.capacity {
            return EnqueueOutcome::Full;
        }

        self.pending.push_back(dir);
        EnqueueOutcome::Queued
    }

    /// Remove and return the oldest pending direction
    pub fn dequeue(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = InputQueue::new(8);
        assert_eq!(
            queue.enqueue(Direction::Up, Direction::Right, 3),
            EnqueueOutcome::Queued
        );
        assert_eq!(
            queue.enqueue(Direction::Left, Direction::Right, 3),
            EnqueueOutcome::Queued
        );
        assert_eq!(
            queue.enqueue(Direction::Down, Direction::Right, 3),
            EnqueueOutcome::Queued
        );

        assert_eq!(queue.dequeue(), Some(Direction::Up));
        assert_eq!(queue.dequeue(), Some(Direction::Left));
        assert_eq!(queue.dequeue(), Some(Direction::Down));
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_collapses_immediate_duplicates() {
        let mut queue = InputQueue::new(8);
        queue.enqueue(Direction::Up, Direction::Right, 3);
        assert_eq!(
            queue.enqueue(Direction::Up, Direction::Right, 3),
            EnqueueOutcome::Duplicate
        );
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_rejects_reversal_of_current_direction() {
        let mut queue = InputQueue::new(8);
        assert_eq!(
            queue.enqueue(Direction::Left, Direction::Right, 2),
            EnqueueOutcome::Reversal
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_rejects_reversal_of_newest_pending_entry() {
        let mut queue = InputQueue::new(8);
        queue.enqueue(Direction::Up, Direction::Right, 4);

        assert_eq!(
            queue.enqueue(Direction::Down, Direction::Right, 4),
            EnqueueOutcome::Reversal
        );
        // Left is a reversal of the current direction but not of the pending Up
        assert_eq!(
            queue.enqueue(Direction::Left, Direction::Right, 4),
            EnqueueOutcome::Queued
        );
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_single_segment_may_reverse() {
        let mut queue = InputQueue::new(8);
        assert_eq!(
            queue.enqueue(Direction::Left, Direction::Right, 1),
            EnqueueOutcome::Queued
        );
    }

    #[test]
    fn test_capacity_bound() {
        let mut queue = InputQueue::new(2);
        queue.enqueue(Direction::Up, Direction::Right, 1);
        queue.enqueue(Direction::Left, Direction::Right, 1);
        assert_eq!(
            queue.enqueue(Direction::Down, Direction::Right, 1),
            EnqueueOutcome::Full
        );
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue(), Some(Direction::Up));
        assert_eq!(queue.dequeue(), Some(Direction::Left));
    }

    #[test]
    fn test_for_grid_capacity() {
        assert_eq!(InputQueue::for_grid(20, 12).capacity(), 20);
        assert_eq!(InputQueue::new(0).capacity(), 1);
    }
}
