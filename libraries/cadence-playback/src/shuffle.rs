//! Shuffle order generation
//!
//! The shuffle order is a permutation of queue indices produced by an
//! unbiased Fisher-Yates pass. Randomness comes from a [`RandomSource`]
//! so tests can drive it deterministically.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of uniform random indices
pub trait RandomSource {
    /// Uniform integer in `0..=max` (inclusive)
    fn index_up_to(&mut self, max: usize) -> usize;
}

/// Thread-local OS-seeded generator
#[derive(Debug, Default)]
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl RandomSource for ThreadRandom {
    fn index_up_to(&mut self, max: usize) -> usize {
        self.rng.gen_range(0..=max)
    }
}

/// Reproducible generator seeded from a `u64`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index_up_to(&mut self, max: usize) -> usize {
        self.rng.gen_range(0..=max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn index_up_to(&mut self, max: usize) -> usize {
        (**self).index_up_to(max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn index_up_to(&mut self, max: usize) -> usize {
        (**self).index_up_to(max)
    }
}

/// Build a random permutation of `0..len`
///
/// Fisher-Yates: for `i` from the last index down to 1, swap element `i`
/// with a uniformly chosen element in `0..=i`.
pub fn shuffle_order(len: usize, rng: &mut dyn RandomSource) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();

    for i in (1..len).rev() {
        // Out-of-range answers from a misbehaving source are folded back in
        let j = rng.index_up_to(i) % (i + 1);
        order.swap(i, j);
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Replays a fixed list of answers, cycling when exhausted
    struct Scripted {
        answers: Vec<usize>,
        next: usize,
    }

    impl RandomSource for Scripted {
        fn index_up_to(&mut self, _max: usize) -> usize {
            let answer = self.answers[self.next % self.answers.len()];
            self.next += 1;
            answer
        }
    }

    fn is_permutation(order: &[usize], len: usize) -> bool {
        let seen: HashSet<usize> = order.iter().copied().collect();
        order.len() == len && seen.len() == len && order.iter().all(|&i| i < len)
    }

    #[test]
    fn empty_and_single_orders() {
        let mut rng = SeededRandom::new(1);
        assert!(shuffle_order(0, &mut rng).is_empty());
        assert_eq!(shuffle_order(1, &mut rng), vec![0]);
    }

    #[test]
    fn always_a_full_permutation() {
        let mut rng = ThreadRandom::new();
        for len in 0..40 {
            let order = shuffle_order(len, &mut rng);
            assert!(is_permutation(&order, len), "not a permutation: {:?}", order);
        }
    }

    #[test]
    fn scripted_swaps_follow_fisher_yates() {
        // len 3: i=2 swaps with 0 -> [2,1,0]; i=1 swaps with 1 -> unchanged
        let mut rng = Scripted {
            answers: vec![0, 1],
            next: 0,
        };
        assert_eq!(shuffle_order(3, &mut rng), vec![2, 1, 0]);
    }

    #[test]
    fn out_of_range_answers_still_permute() {
        let mut rng = Scripted {
            answers: vec![usize::MAX],
            next: 0,
        };
        let order = shuffle_order(6, &mut rng);
        assert!(is_permutation(&order, 6));
    }

    #[test]
    fn seeded_orders_are_reproducible() {
        let a = shuffle_order(25, &mut SeededRandom::new(7));
        let b = shuffle_order(25, &mut SeededRandom::new(7));
        assert_eq!(a, b);
    }

    #[test]
    fn first_element_is_roughly_uniform() {
        const LEN: usize = 5;
        const TRIALS: usize = 20_000;

        let mut rng = SeededRandom::new(0xC0FFEE);
        let mut counts = [0usize; LEN];
        for _ in 0..TRIALS {
            counts[shuffle_order(LEN, &mut rng)[0]] += 1;
        }

        // Chi-square with 4 degrees of freedom; 18.47 is the p=0.001 cutoff
        let expected = TRIALS as f64 / LEN as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum();

        assert!(chi_square < 18.47, "skewed distribution {:?}", counts);
    }
}
