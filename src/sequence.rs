//! Shuffled label sequences for a round.

use log::debug;
use rand::Rng;

/// Return the numbers `1..=count` in a uniformly random order.
///
/// Fisher–Yates, walking from the last index down to 1 and swapping each
/// element with one drawn from `0..=i`, so every one of the `count!` orders is
/// equally likely.
pub fn generate<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<u32> {
    let mut numbers: Vec<u32> = (1..=count).collect();
    for i in (1..numbers.len()).rev() {
        let j = rng.random_range(0..=i);
        numbers.swap(i, j);
    }
    debug!("Generated sequence of {} numbers", numbers.len());
    numbers
}

/// Same as [`generate`], drawing from the thread-local RNG.
pub fn shuffled_numbers(count: u32) -> Vec<u32> {
    generate(count, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn empty_and_single() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(0, &mut rng).is_empty());
        assert_eq!(generate(1, &mut rng), vec![1]);
    }

    #[test]
    fn thread_rng_variant_covers_every_number() {
        let mut out = shuffled_numbers(50);
        out.sort_unstable();
        assert_eq!(out, (1..=50).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_order() {
        let a = generate(20, &mut StdRng::seed_from_u64(7));
        let b = generate(20, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn all_orders_of_three_show_up_evenly() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut seen: HashMap<Vec<u32>, usize> = HashMap::new();
        let draws = 6_000;
        for _ in 0..draws {
            *seen.entry(generate(3, &mut rng)).or_default() += 1;
        }
        assert_eq!(seen.len(), 6);
        for (order, hits) in seen {
            // Expected 1000 each; allow a wide band so the test is not flaky.
            assert!((800..1200).contains(&hits), "{:?} drawn {} times", order, hits);
        }
    }

    proptest! {
        #[test]
        fn output_is_a_permutation(count in 0u32..200, seed in any::<u64>()) {
            let mut out = generate(count, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(out.len(), count as usize);
            out.sort_unstable();
            prop_assert_eq!(out, (1..=count).collect::<Vec<_>>());
        }
    }
}
