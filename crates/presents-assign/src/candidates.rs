use presents_core::AdultId;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// A possible giver/receiver pair with its random score.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<R> {
    pub giver: AdultId,
    pub receiver: R,
    pub score: f64,
}

impl<R> Candidate<R> {
    /// Pair the giver and receiver with a fresh score in `[0, 1)`.
    pub fn draw(giver: AdultId, receiver: R, rng: &mut ChaCha8Rng) -> Self {
        Self {
            giver,
            receiver,
            score: rng.random::<f64>(),
        }
    }
}

/// Highest score first.
pub fn sort_by_score<R>(candidates: &mut [Candidate<R>]) {
    candidates.sort_by(|left, right| right.score.total_cmp(&left.score));
}
