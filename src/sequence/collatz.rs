use crate::foundation::error::{WeaveError, WeaveResult};

/// Lazy generator for the shortcut Collatz recurrence.
///
/// ```text
/// a_0 = n
/// a_i = a_(i-1) / 2            if a_(i-1) is even
/// a_i = (3 * a_(i-1) + 1) / 2  if a_(i-1) is odd
/// ```
///
/// `3n + 1` is always even for odd `n`, so the halving that must follow it is folded into the odd
/// step. The sequence starts with the seed and ends (inclusive) at the first `1`.
///
/// Termination for every seed `>= 1` relies on the Collatz conjecture. It is unproven, but has been
/// checked far beyond the `u64` range this generator can reach before overflowing.
///
/// The generator is single pass: build a new one from the same seed to replay a sequence.
#[derive(Clone, Debug)]
pub struct CollatzSequence {
    seed: u64,
    state: State,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Pending(u64),
    Done,
    Overflowed { at: u64 },
}

impl CollatzSequence {
    /// Create a generator for `seed`. Zero is rejected: the recurrence never reaches 1 from it.
    pub fn new(seed: u64) -> WeaveResult<Self> {
        if seed == 0 {
            return Err(WeaveError::sequence("collatz seed must be >= 1, got 0"));
        }
        Ok(Self {
            seed,
            state: State::Pending(seed),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// True once the iterator has emitted its final element (or stopped on overflow).
    pub fn is_exhausted(&self) -> bool {
        !matches!(self.state, State::Pending(_))
    }

    /// Value whose odd step overflowed `u64`, if the walk stopped early.
    pub fn overflowed_at(&self) -> Option<u64> {
        match self.state {
            State::Overflowed { at } => Some(at),
            _ => None,
        }
    }

    /// Drain the generator into a vector.
    ///
    /// Fails if an odd step overflows `u64`, or if `max_len` is set and the sequence is longer.
    pub fn collect_checked(mut self, max_len: Option<usize>) -> WeaveResult<Vec<u64>> {
        let seed = self.seed;
        let mut out = Vec::new();
        for v in self.by_ref() {
            if max_len.is_some_and(|max| out.len() >= max) {
                return Err(WeaveError::sequence(format!(
                    "collatz sequence for seed {seed} exceeds {} elements",
                    out.len()
                )));
            }
            out.push(v);
        }
        if let Some(at) = self.overflowed_at() {
            return Err(WeaveError::sequence(format!(
                "collatz sequence for seed {seed} overflowed u64 after {at}"
            )));
        }
        Ok(out)
    }
}

impl TryFrom<i64> for CollatzSequence {
    type Error = WeaveError;

    fn try_from(seed: i64) -> WeaveResult<Self> {
        if seed <= 0 {
            return Err(WeaveError::sequence(format!(
                "collatz seed must be >= 1, got {seed}"
            )));
        }
        Self::new(seed.unsigned_abs())
    }
}

/// One application of the shortcut recurrence, `None` on overflow.
pub fn step(n: u64) -> Option<u64> {
    if n.is_multiple_of(2) {
        Some(n / 2)
    } else {
        // (3n + 1) / 2 == n + (n + 1) / 2 for odd n.
        n.checked_add(n / 2 + 1)
    }
}

impl Iterator for CollatzSequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let State::Pending(current) = self.state else {
            return None;
        };
        self.state = if current == 1 {
            State::Done
        } else {
            match step(current) {
                Some(next) => State::Pending(next),
                None => State::Overflowed { at: current },
            }
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Pending(_) => (1, None),
            _ => (0, Some(0)),
        }
    }
}

impl std::iter::FusedIterator for CollatzSequence {}

#[cfg(test)]
#[path = "../../tests/unit/sequence/collatz.rs"]
mod tests;
