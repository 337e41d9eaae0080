pub mod block;
pub mod hasher;
pub mod model;
pub mod pow;

pub use block::Block;
pub use model::Blockchain;
pub use pow::ProofOfWork;

/// Default Proof-of-Work difficulty (number of leading zero hex chars).
pub const DEFAULT_DIFFICULTY: usize = 4;

/// Proof carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";
