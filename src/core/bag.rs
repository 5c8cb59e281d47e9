//! Piece randomization: a seeded LCG and the two-pool bag generator.
//!
//! The bag holds its own generator state, so two bags with the same seed
//! produce identical piece sequences regardless of anything else in the
//! process. Every window of 7 draws aligned to a pool boundary contains
//! each kind exactly once, and no kind waits more than 12 draws.

use std::mem;

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Bag piece generator with one pool in play and one on deck.
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Pool currently being drawn from, consumed from the end.
    current: ArrayVec<PieceKind, 7>,
    /// Pre-shuffled follow-up pool, promoted when `current` empties.
    next: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create a bag with both pools shuffled from the given seed.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = Self::shuffled_pool(&mut rng);
        let next = Self::shuffled_pool(&mut rng);
        Self { current, next, rng }
    }

    /// Draw the next piece. The on-deck pool is promoted and a fresh one
    /// shuffled the moment the active pool runs out, never on the draw
    /// after.
    pub fn draw(&mut self) -> PieceKind {
        // Both pools start full and the promotion below keeps the active
        // pool non-empty between calls.
        let kind = self.current.pop().unwrap_or(PieceKind::S);
        if self.current.is_empty() {
            self.current = mem::take(&mut self.next);
            self.next = Self::shuffled_pool(&mut self.rng);
        }
        kind
    }

    fn shuffled_pool(rng: &mut SimpleRng) -> ArrayVec<PieceKind, 7> {
        let mut pool = ArrayVec::from(PieceKind::ALL);
        rng.shuffle(&mut pool);
        pool
    }

    /// Get the active pool for testing
    #[cfg(test)]
    fn current_pool(&self) -> &[PieceKind] {
        &self.current
    }

    /// Get the on-deck pool for testing
    #[cfg(test)]
    fn next_pool(&self) -> &[PieceKind] {
        &self.next
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers_all_kinds(window: &[PieceKind]) {
        assert_eq!(window.len(), 7);
        for kind in PieceKind::ALL {
            assert!(window.contains(&kind), "missing piece: {:?}", kind);
        }
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_seeds_diverge() {
        let mut rng1 = SimpleRng::new(1);
        let mut rng2 = SimpleRng::new(2);

        // One LCG step on adjacent seeds differs by the multiplier
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);

        for _ in 0..10 {
            assert_eq!(zero.next_u32(), one.next_u32());
        }
    }

    #[test]
    fn test_shuffle_preserves_contents() {
        let mut rng = SimpleRng::new(777);
        let mut values = [0, 1, 2, 3, 4, 5, 6];
        rng.shuffle(&mut values);

        let mut sorted = values;
        sorted.sort_unstable();
        assert_eq!(sorted, [0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_bag_first_seven_draws_cover_all_kinds() {
        let mut bag = PieceBag::new(1);

        let drawn: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
        assert_covers_all_kinds(&drawn);
    }

    #[test]
    fn test_bag_next_seven_draws_cover_all_kinds_again() {
        let mut bag = PieceBag::new(42);

        for _ in 0..7 {
            bag.draw();
        }
        let second: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
        assert_covers_all_kinds(&second);
    }

    #[test]
    fn test_bag_promotes_eagerly_on_seventh_draw() {
        let mut bag = PieceBag::new(9);
        assert_eq!(bag.current_pool().len(), 7);
        assert_eq!(bag.next_pool().len(), 7);

        for _ in 0..6 {
            bag.draw();
        }
        assert_eq!(bag.current_pool().len(), 1);

        // The seventh draw empties the pool; promotion happens inside the
        // same call, so the bag is never caught with an empty active pool.
        bag.draw();
        assert_eq!(bag.current_pool().len(), 7);
        assert_eq!(bag.next_pool().len(), 7);
    }

    #[test]
    fn test_bag_deterministic_for_same_seed() {
        let mut bag1 = PieceBag::new(314159);
        let mut bag2 = PieceBag::new(314159);

        for _ in 0..21 {
            assert_eq!(bag1.draw(), bag2.draw());
        }
    }

    #[test]
    fn test_bag_seeds_produce_distinct_sequences() {
        let mut bag1 = PieceBag::new(1);
        let mut bag2 = PieceBag::new(2);

        let run1: Vec<PieceKind> = (0..21).map(|_| bag1.draw()).collect();
        let run2: Vec<PieceKind> = (0..21).map(|_| bag2.draw()).collect();
        assert_ne!(run1, run2);
    }

    #[test]
    fn test_zero_seed_bag_matches_seed_one() {
        let mut zero = PieceBag::new(0);
        let mut one = PieceBag::new(1);

        for _ in 0..14 {
            assert_eq!(zero.draw(), one.draw());
        }
    }
}
