use std::collections::BTreeSet;

use rand::Rng;

use crate::error::{Error, Result};

/// Collects `draws` uniform values from `[min, max]` into a new set.
///
/// Duplicate draws collapse, so the result may be smaller than `draws`.
pub fn random_set<R: Rng>(rng: &mut R, draws: usize, min: i32, max: i32) -> Result<BTreeSet<i32>> {
    if min > max {
        return Err(Error::EmptyRange { min, max });
    }
    Ok((0..draws).map(|_| rng.random_range(min..=max)).collect())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use test_log::test;

    use super::*;

    #[test]
    fn test_values_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let set = random_set(&mut rng, 50, 0, 100).unwrap();
        assert!(!set.is_empty());
        assert!(set.len() <= 50);
        assert!(set.iter().all(|&v| (0..=100).contains(&v)));
    }

    #[test]
    fn test_zero_draws() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(random_set(&mut rng, 0, 0, 100).unwrap().is_empty());
    }

    #[test]
    fn test_single_point_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let set = random_set(&mut rng, 10, 0, 0).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_empty_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            random_set(&mut rng, 3, 0, -1),
            Err(Error::EmptyRange { min: 0, max: -1 })
        ));
    }

    #[test]
    fn test_same_seed_same_set() {
        let a = random_set(&mut ChaCha8Rng::seed_from_u64(5), 30, -500, 500).unwrap();
        let b = random_set(&mut ChaCha8Rng::seed_from_u64(5), 30, -500, 500).unwrap();
        assert_eq!(a, b);
    }
}
