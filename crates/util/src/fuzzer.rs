use rand::{rngs::OsRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// One step of a randomized tree workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceOp {
    Insert(i64),
    Delete(i64),
}

impl TraceOp {
    pub fn key(self) -> i64 {
        match self {
            TraceOp::Insert(k) | TraceOp::Delete(k) => k,
        }
    }
}

/// Reproducible source of insert/delete workloads.
///
/// Backed by xoshiro256**; print [`Fuzzer::seed`] on failure and pass it
/// back to [`Fuzzer::new`] to replay the exact same trace.
///
/// ```
/// use forest_util::{Fuzzer, TraceOp};
///
/// let mut fuzzer = Fuzzer::new(Some([7u8; 32]));
/// let trace = fuzzer.trace(50, (0, 20), 0.7);
/// assert_eq!(trace.len(), 50);
/// assert!(trace.iter().all(|op| (0..=20).contains(&op.key())));
/// ```
pub struct Fuzzer {
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// `None` draws a fresh seed from the OS.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut fresh = [0u8; 32];
            OsRng.fill_bytes(&mut fresh);
            fresh
        });
        let rng = Xoshiro256StarStar::from_seed(seed);
        Self { seed, rng }
    }

    /// Uniform key in `min..=max`.
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Shuffles `values` in place with this fuzzer's generator.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }

    /// `len` operations over keys in `range` (inclusive); each one is an
    /// insert with probability `insert_probability`, a delete otherwise.
    pub fn trace(&mut self, len: usize, range: (i64, i64), insert_probability: f64) -> Vec<TraceOp> {
        let mut ops = Vec::with_capacity(len);
        for _ in 0..len {
            let key = self.random_int(range.0, range.1);
            ops.push(if self.random_bool(insert_probability) {
                TraceOp::Insert(key)
            } else {
                TraceOp::Delete(key)
            });
        }
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_stay_in_range() {
        let mut fuzzer = Fuzzer::new(None);
        for _ in 0..200 {
            assert!((-3..=3).contains(&fuzzer.random_int(-3, 3)));
        }
    }

    #[test]
    fn same_seed_same_trace() {
        let mut a = Fuzzer::new(Some([1u8; 32]));
        let mut b = Fuzzer::new(Some([1u8; 32]));
        assert_eq!(a.trace(200, (-50, 50), 0.6), b.trace(200, (-50, 50), 0.6));
    }

    #[test]
    fn seed_is_kept() {
        let fuzzer = Fuzzer::new(Some([4u8; 32]));
        assert_eq!(fuzzer.seed, [4u8; 32]);
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut fuzzer = Fuzzer::new(Some([3u8; 32]));
        let mut values: Vec<i64> = (0..100).collect();
        fuzzer.shuffle(&mut values);

        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_shuffle() {
        let mut a = Fuzzer::new(Some([6u8; 32]));
        let mut b = Fuzzer::new(Some([6u8; 32]));
        let mut left: Vec<i64> = (0..64).collect();
        let mut right = left.clone();
        a.shuffle(&mut left);
        b.shuffle(&mut right);
        assert_eq!(left, right);
        assert_ne!(left, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn insert_only_trace() {
        let mut fuzzer = Fuzzer::new(Some([9u8; 32]));
        let trace = fuzzer.trace(500, (10, 20), 1.0);
        assert!(trace
            .iter()
            .all(|op| matches!(op, TraceOp::Insert(k) if (10..=20).contains(k))));
    }

    #[test]
    fn delete_only_trace() {
        let mut fuzzer = Fuzzer::new(Some([2u8; 32]));
        let trace = fuzzer.trace(100, (0, 5), 0.0);
        assert!(trace.iter().all(|op| matches!(op, TraceOp::Delete(_))));
    }
}
