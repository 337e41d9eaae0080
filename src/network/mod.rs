pub mod client;
pub mod consensus;
pub mod peers;

pub use consensus::{ConsensusResolver, PeerChain};
pub use peers::PeerRegistry;
