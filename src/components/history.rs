// ============================================================================
// HISTORY — bounded undo/redo stacks of full buffer snapshots
// ============================================================================

use std::collections::VecDeque;

use crate::canvas::PixelBuffer;

/// Default snapshot capacity. Full-buffer snapshots are heavy, so history is
/// kept shallow to bound memory.
pub const MAX_HISTORY_STATES: usize = 10;

/// Undo/redo storage over whole-buffer snapshots.
///
/// The top of the undo stack is the *live* buffer being edited, not a past
/// state: every editing entry point reads and writes through
/// [`SnapshotHistory::current_mut`]. A [`checkpoint`](SnapshotHistory::checkpoint)
/// duplicates the top so the previous state stays reachable underneath it.
///
/// Both stacks are `VecDeque` ring buffers with an explicit capacity; when
/// the undo stack is full the oldest snapshot is evicted from the front.
pub struct SnapshotHistory {
    undo_stack: VecDeque<PixelBuffer>,
    redo_stack: VecDeque<PixelBuffer>,
    capacity: usize,
}

impl SnapshotHistory {
    pub fn new(initial: PixelBuffer) -> Self {
        Self::with_capacity(MAX_HISTORY_STATES, initial)
    }

    /// `capacity` counts the live buffer, so it must be at least 1.
    pub fn with_capacity(capacity: usize, initial: PixelBuffer) -> Self {
        debug_assert!(capacity >= 1);
        let mut undo_stack = VecDeque::with_capacity(capacity);
        undo_stack.push_back(initial);
        SnapshotHistory {
            undo_stack,
            redo_stack: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// The live buffer.
    pub fn current(&self) -> &PixelBuffer {
        self.undo_stack.back().expect("undo stack never empty")
    }

    pub fn current_mut(&mut self) -> &mut PixelBuffer {
        self.undo_stack.back_mut().expect("undo stack never empty")
    }

    /// Record the start of a discrete edit: drop the entire redo future,
    /// evict the oldest snapshot if the stack is full, then push a deep copy
    /// of the live buffer as the new top.
    ///
    /// Called once per edit (stroke start, filter application) — never
    /// mid-stroke.
    pub fn checkpoint(&mut self) {
        self.redo_stack.clear();
        if self.undo_stack.len() == self.capacity {
            self.undo_stack.pop_front();
        }
        let copy = self.current().clone();
        self.undo_stack.push_back(copy);
    }

    /// Step back one state. Returns `false` (and does nothing) when only the
    /// initial state remains.
    pub fn undo(&mut self) -> bool {
        if self.undo_stack.len() <= 1 {
            return false;
        }
        let top = self.undo_stack.pop_back().expect("len checked above");
        self.redo_stack.push_back(top);
        true
    }

    /// Step forward one state. Returns `false` when there is no redo future.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop_back() {
            Some(state) => {
                self.undo_stack.push_back(state);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn buffer(color: Color) -> PixelBuffer {
        let mut buf = PixelBuffer::new(2, 2);
        buf.fill(color);
        buf
    }

    #[test]
    fn undo_redo_round_trip_restores_bit_equal_states() {
        let mut history = SnapshotHistory::new(buffer(Color::WHITE));
        let initial = history.current().clone();

        history.checkpoint();
        history.current_mut().set(0, 0, Color::BLACK);
        history.current_mut().set(1, 1, Color::new(0.3, 0.6, 0.9, 0.5));
        let edited = history.current().clone();

        assert!(history.undo());
        assert_eq!(history.current().pixels(), initial.pixels());

        assert!(history.redo());
        assert_eq!(history.current().pixels(), edited.pixels());
    }

    #[test]
    fn undo_stops_at_initial_state() {
        let mut history = SnapshotHistory::new(buffer(Color::WHITE));
        assert!(!history.undo());
        history.checkpoint();
        assert!(history.undo());
        assert!(!history.undo());
    }

    #[test]
    fn redo_on_empty_future_is_a_no_op() {
        let mut history = SnapshotHistory::new(buffer(Color::WHITE));
        assert!(!history.redo());
    }

    #[test]
    fn checkpoint_clears_redo_future() {
        let mut history = SnapshotHistory::new(buffer(Color::WHITE));
        history.checkpoint();
        history.current_mut().fill(Color::BLACK);
        history.undo();
        assert!(history.can_redo());

        history.checkpoint();
        assert!(!history.can_redo());
    }

    #[test]
    fn capacity_evicts_oldest_snapshot() {
        let capacity = 10;
        let mut history = SnapshotHistory::with_capacity(capacity, buffer(Color::WHITE));
        for i in 0..capacity + 5 {
            history.checkpoint();
            let shade = i as f64 / 20.0;
            history.current_mut().fill(Color::new(shade, shade, shade, 1.0));
        }
        assert_eq!(history.undo_count(), capacity);

        // most recent state is intact
        let newest = (capacity + 4) as f64 / 20.0;
        assert_eq!(history.current().get(0, 0).r, newest);

        // can step back capacity-1 times, no further
        let mut steps = 0;
        while history.undo() {
            steps += 1;
        }
        assert_eq!(steps, capacity - 1);
    }
}
