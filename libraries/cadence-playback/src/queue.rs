//! Playback queue
//!
//! Ordered track list in fetch order, a pointer to the current track, and a
//! shuffle permutation consulted only while shuffle is enabled.
//!
//! ```text
//! tracks:        [A, B, C, D]      current_index = 1 (B)
//! shuffle_order: [2, 1, 3, 0]      shuffled walk: C -> B -> D -> A -> C ...
//! ```

use crate::shuffle::{shuffle_order, RandomSource};
use crate::types::{Direction, Track};

/// Outcome of selecting a track by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Already the current track; caller toggles play/pause
    SameTrack,

    /// Current index moved to this position
    Changed(usize),

    /// No track with that id (or queue empty); nothing changed
    NotFound,
}

/// Track queue with shuffle permutation
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Tracks in fetch order
    tracks: Vec<Track>,

    /// Index of the selected track (meaningful only when non-empty)
    current_index: usize,

    /// Permutation of `0..tracks.len()`
    shuffle_order: Vec<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the track list
    ///
    /// Selects the first track and regenerates the shuffle order.
    pub fn load(&mut self, tracks: Vec<Track>, rng: &mut dyn RandomSource) {
        self.tracks = tracks;
        self.current_index = 0;
        self.regenerate_shuffle(rng);
    }

    /// Draw a fresh shuffle permutation over the full track list
    pub fn regenerate_shuffle(&mut self, rng: &mut dyn RandomSource) {
        self.shuffle_order = shuffle_order(self.tracks.len(), rng);
    }

    /// Select the track with the given id
    pub fn select_by_id(&mut self, track_id: &str) -> Selection {
        if self.current().is_some_and(|t| t.id == track_id) {
            return Selection::SameTrack;
        }

        match self.position_of(track_id) {
            Some(index) => {
                self.current_index = index;
                Selection::Changed(index)
            }
            None => Selection::NotFound,
        }
    }

    /// Index that `advance` would move to, without moving
    pub fn peek(&self, direction: Direction, shuffle: bool) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        if shuffle {
            // Fall back to linear order if the permutation is stale
            let Some(pos) = self
                .shuffle_order
                .iter()
                .position(|&i| i == self.current_index)
            else {
                return Some(step(self.current_index, len, direction));
            };

            let next_pos = step(pos, self.shuffle_order.len(), direction);
            Some(self.shuffle_order[next_pos])
        } else {
            Some(step(self.current_index, len, direction))
        }
    }

    /// Move to the next/previous track
    ///
    /// Wraps at both ends, in linear and shuffled order alike.
    /// Returns the new current index, or `None` on an empty queue.
    pub fn advance(&mut self, direction: Direction, shuffle: bool) -> Option<usize> {
        let next = self.peek(direction, shuffle)?;
        self.current_index = next;
        Some(next)
    }

    /// Currently selected track
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    /// Current index (`None` when empty)
    pub fn current_index(&self) -> Option<usize> {
        (!self.tracks.is_empty()).then_some(self.current_index)
    }

    /// Track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Position of the track with the given id
    pub fn position_of(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    /// All tracks in fetch order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Current shuffle permutation
    pub fn shuffle_order(&self) -> &[usize] {
        &self.shuffle_order
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

fn step(index: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => (index + 1) % len,
        Direction::Backward => (index + len - 1) % len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::SeededRandom;

    /// Returns 0 for every draw, so Fisher-Yates rotates the list left
    struct AlwaysZero;

    impl RandomSource for AlwaysZero {
        fn index_up_to(&mut self, _max: usize) -> usize {
            0
        }
    }

    fn queue_of(ids: &[&str]) -> Queue {
        let mut queue = Queue::new();
        let tracks = ids
            .iter()
            .map(|id| Track::new(*id, format!("Track {}", id), "Test Artist"))
            .collect();
        queue.load(tracks, &mut AlwaysZero);
        queue
    }

    #[test]
    fn create_empty_queue() {
        let queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
        assert!(queue.current().is_none());
    }

    #[test]
    fn load_selects_first_track() {
        let queue = queue_of(&["a", "b", "c"]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.current_index(), Some(0));
        assert_eq!(queue.current().unwrap().id, "a");
    }

    #[test]
    fn load_builds_permutation() {
        let queue = queue_of(&["a", "b", "c", "d"]);
        // i=3 swap 0, i=2 swap 0, i=1 swap 0: [0,1,2,3] -> [3,1,2,0] -> [2,1,3,0] -> [1,2,3,0]
        assert_eq!(queue.shuffle_order(), &[1, 2, 3, 0]);
    }

    #[test]
    fn linear_advance_wraps() {
        let mut queue = queue_of(&["a", "b", "c"]);

        assert_eq!(queue.advance(Direction::Forward, false), Some(1));
        assert_eq!(queue.advance(Direction::Forward, false), Some(2));
        assert_eq!(queue.advance(Direction::Forward, false), Some(0));
        assert_eq!(queue.advance(Direction::Backward, false), Some(2));
    }

    #[test]
    fn shuffled_advance_walks_permutation() {
        let mut queue = queue_of(&["a", "b", "c", "d"]);
        // order [1,2,3,0], current 0 sits at the end of the permutation
        assert_eq!(queue.advance(Direction::Forward, true), Some(1));
        assert_eq!(queue.advance(Direction::Forward, true), Some(2));
        assert_eq!(queue.advance(Direction::Backward, true), Some(1));
        assert_eq!(queue.advance(Direction::Backward, true), Some(0));
    }

    #[test]
    fn shuffled_advance_wraps_at_both_ends() {
        let mut queue = queue_of(&["a", "b", "c", "d"]);
        queue.select_by_id("a");
        // 0 is last in [1,2,3,0]: forward wraps to the first entry
        assert_eq!(queue.peek(Direction::Forward, true), Some(1));
        queue.select_by_id("b");
        // 1 is first: backward wraps to the last entry
        assert_eq!(queue.peek(Direction::Backward, true), Some(0));
    }

    #[test]
    fn advance_on_empty_queue_is_noop() {
        let mut queue = Queue::new();
        assert_eq!(queue.advance(Direction::Forward, false), None);
        assert_eq!(queue.advance(Direction::Backward, true), None);
    }

    #[test]
    fn select_same_track() {
        let mut queue = queue_of(&["a", "b"]);
        assert_eq!(queue.select_by_id("a"), Selection::SameTrack);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn select_other_track() {
        let mut queue = queue_of(&["a", "b", "c"]);
        assert_eq!(queue.select_by_id("c"), Selection::Changed(2));
        assert_eq!(queue.current().unwrap().id, "c");
    }

    #[test]
    fn select_unknown_track_is_noop() {
        let mut queue = queue_of(&["a", "b"]);
        queue.select_by_id("b");
        assert_eq!(queue.select_by_id("zzz"), Selection::NotFound);
        assert_eq!(queue.current_index(), Some(1));

        let mut empty = Queue::new();
        assert_eq!(empty.select_by_id("a"), Selection::NotFound);
    }

    #[test]
    fn reload_resets_index_and_order() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.select_by_id("c");

        let mut rng = SeededRandom::new(3);
        queue.load(
            vec![Track::new("x", "X", "Artist"), Track::new("y", "Y", "Artist")],
            &mut rng,
        );

        assert_eq!(queue.current_index(), Some(0));
        assert_eq!(queue.shuffle_order().len(), 2);
    }

    #[test]
    fn peek_does_not_move() {
        let queue = queue_of(&["a", "b", "c"]);
        assert_eq!(queue.peek(Direction::Forward, false), Some(1));
        assert_eq!(queue.current_index(), Some(0));
    }
}
