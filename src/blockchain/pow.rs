use log::debug;
use std::time::Instant;

use super::DEFAULT_DIFFICULTY;
use super::hasher::sha256_hex;

/// Brute-force puzzle: find `proof` such that
/// `sha256("{last_proof}{proof}")` starts with `difficulty` zero hex chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl ProofOfWork {
    pub fn new(difficulty: usize) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Smallest non-negative proof satisfying `verify` against `last_proof`.
    /// Blocks until found; the search is strictly sequential from 0.
    pub fn mine(&self, last_proof: u64) -> u64 {
        let t0 = Instant::now();
        let mut proof = 0u64;
        while !self.verify(last_proof, proof) {
            proof += 1;
        }
        debug!(
            "POW - last_proof={} -> proof={} ({} ms)",
            last_proof,
            proof,
            t0.elapsed().as_millis()
        );
        proof
    }

    pub fn verify(&self, last_proof: u64, proof: u64) -> bool {
        let guess = format!("{last_proof}{proof}");
        sha256_hex(guess.as_bytes())
            .bytes()
            .take(self.difficulty)
            .all(|c| c == b'0')
    }
}
