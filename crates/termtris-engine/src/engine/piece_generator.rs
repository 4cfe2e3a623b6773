use std::fmt;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::piece::PieceKind;

/// Supplies the kind of each new piece.
pub trait PieceSource: fmt::Debug {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniformly random piece kinds, each draw independent of the last.
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: Pcg32,
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieces {
    /// Seeds the generator from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    /// Creates a reproducible generator.
    ///
    /// ```
    /// use termtris_engine::{PieceSource as _, RandomPieces};
    ///
    /// let mut a = RandomPieces::with_seed(7);
    /// let mut b = RandomPieces::with_seed(7);
    /// for _ in 0..20 {
    ///     assert_eq!(a.next_kind(), b.next_kind());
    /// }
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Replays a fixed list of kinds, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct SequencePieces {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequencePieces {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds: Vec<_> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "piece sequence must not be empty");
        Self { kinds, index: 0 }
    }
}

impl PieceSource for SequencePieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_sequence_cycles() {
        let mut source = SequencePieces::new([PieceKind::I, PieceKind::O]);
        let kinds: Vec<_> = (0..5).map(|_| source.next_kind()).collect();
        assert_eq!(
            kinds,
            [PieceKind::I, PieceKind::O, PieceKind::I, PieceKind::O, PieceKind::I]
        );
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_empty_sequence_panics() {
        let _ = SequencePieces::new([]);
    }

    #[test]
    fn test_random_pieces_cover_all_kinds() {
        let mut source = RandomPieces::with_seed(42);
        let seen: HashSet<_> = (0..500).map(|_| source.next_kind()).collect();
        assert_eq!(seen.len(), PieceKind::LEN);
    }

    #[test]
    fn test_seeds_differ() {
        let mut a = RandomPieces::with_seed(1);
        let mut b = RandomPieces::with_seed(2);
        let a: Vec<_> = (0..32).map(|_| a.next_kind()).collect();
        let b: Vec<_> = (0..32).map(|_| b.next_kind()).collect();
        assert_ne!(a, b);
    }
}
