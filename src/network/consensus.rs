use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::blockchain::{Block, Blockchain};
use crate::error::LedgerError;

/// A peer's answer to `GET /chain`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerChain {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Longest-valid-chain rule.
pub struct ConsensusResolver;

impl ConsensusResolver {
    /// Replace the local chain with the longest valid peer chain that is
    /// strictly longer than it. Returns whether a replacement happened.
    ///
    /// Peers are visited in the order given; a candidate must beat the best
    /// length seen so far, so among equally long chains the first visited
    /// wins. Fetch failures skip that peer only. The local chain is not
    /// re-validated.
    pub fn resolve<'a, I, F>(chain: &mut Blockchain, peers: I, mut fetch: F) -> bool
    where
        I: IntoIterator<Item = &'a str>,
        F: FnMut(&str) -> Result<PeerChain, LedgerError>,
    {
        let mut max_length = chain.len();
        let mut winner: Option<(String, Vec<Block>)> = None;

        for peer in peers {
            let candidate = match fetch(peer)
                .and_then(|c| check_reported_length(peer, c))
                .and_then(|c| check_indices(peer, c))
            {
                Ok(c) => c,
                Err(e) => {
                    warn!("CONSENSUS - skipping peer: {}", e);
                    continue;
                }
            };

            if candidate.length <= max_length {
                debug!(
                    "CONSENSUS - {} length {} <= {}, ignored",
                    peer, candidate.length, max_length
                );
                continue;
            }
            if !chain.validate(&candidate.chain) {
                warn!(
                    "CONSENSUS - {} offered an invalid chain (length {})",
                    peer, candidate.length
                );
                continue;
            }

            max_length = candidate.length;
            winner = Some((peer.to_string(), candidate.chain));
        }

        match winner {
            Some((peer, blocks)) => {
                info!("CONSENSUS - adopting chain from {} (length {})", peer, max_length);
                chain.replace(blocks);
                true
            }
            None => {
                debug!("CONSENSUS - local chain is authoritative");
                false
            }
        }
    }
}

fn check_reported_length(peer: &str, candidate: PeerChain) -> Result<PeerChain, LedgerError> {
    if candidate.length != candidate.chain.len() {
        return Err(LedgerError::PeerError {
            peer: peer.to_string(),
            reason: format!(
                "reported length {} but sent {} blocks",
                candidate.length,
                candidate.chain.len()
            ),
        });
    }
    Ok(candidate)
}

/// Blocks must be numbered 1, 2, .. in order.
fn check_indices(peer: &str, candidate: PeerChain) -> Result<PeerChain, LedgerError> {
    let misnumbered = candidate
        .chain
        .iter()
        .zip(1u64..)
        .find(|(block, expected)| block.index != *expected);
    if let Some((block, expected)) = misnumbered {
        return Err(LedgerError::PeerError {
            peer: peer.to_string(),
            reason: format!("block index {} where {} expected", block.index, expected),
        });
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::{ConsensusResolver, PeerChain};
    use crate::blockchain::Blockchain;
    use crate::error::LedgerError;
    use std::collections::HashMap;

    const DIFFICULTY: usize = 2;

    fn chain_of(len: usize) -> Blockchain {
        chain_paying(len, 1)
    }

    fn chain_paying(len: usize, amount: u64) -> Blockchain {
        let mut bc = Blockchain::with_difficulty(DIFFICULTY);
        while bc.len() < len {
            bc.new_transaction("A", "B", amount).unwrap();
            bc.new_block().unwrap();
        }
        bc
    }

    fn answer(bc: &Blockchain) -> PeerChain {
        PeerChain {
            length: bc.len(),
            chain: bc.blocks().to_vec(),
        }
    }

    fn refused(peer: &str) -> LedgerError {
        LedgerError::PeerUnreachable {
            peer: peer.to_string(),
            reason: "connection refused".into(),
        }
    }

    #[test]
    fn keeps_local_when_no_peer_is_longer() {
        let mut local = chain_of(3);
        let before = local.blocks().to_vec();
        let shorter = answer(&chain_of(2));
        let equal = answer(&chain_of(3));

        let replaced = ConsensusResolver::resolve(&mut local, ["a", "b", "c"], |peer| match peer {
            "a" => Ok(shorter.clone()),
            "b" => Err(refused(peer)),
            _ => Ok(equal.clone()),
        });

        assert!(!replaced);
        assert_eq!(local.blocks(), &before[..]);
    }

    #[test]
    fn adopts_single_longer_valid_chain() {
        let mut local = chain_of(1);
        let longer = chain_of(3);

        let replaced = ConsensusResolver::resolve(&mut local, ["a", "b"], |peer| match peer {
            "a" => Err(refused(peer)),
            _ => Ok(answer(&longer)),
        });

        assert!(replaced);
        assert_eq!(local.blocks(), longer.blocks());
        assert!(local.is_valid());
    }

    #[test]
    fn skips_longer_invalid_chain() {
        let mut local = chain_of(2);
        let mut forged = answer(&chain_of(4));
        forged.chain[3].previous_hash = "0".repeat(64);

        let replaced = ConsensusResolver::resolve(&mut local, ["a"], |_| Ok(forged.clone()));

        assert!(!replaced);
        assert_eq!(local.len(), 2);
    }

    #[test]
    fn longest_of_several_wins() {
        let mut local = chain_of(1);
        let mid = chain_of(3);
        let long = chain_of(4);
        let answers: HashMap<&str, PeerChain> =
            HashMap::from([("a", answer(&mid)), ("b", answer(&long)), ("c", answer(&mid))]);

        let replaced = ConsensusResolver::resolve(&mut local, ["a", "b", "c"], |peer| {
            Ok(answers[peer].clone())
        });

        assert!(replaced);
        assert_eq!(local.blocks(), long.blocks());
    }

    #[test]
    fn equal_lengths_first_visited_wins() {
        let mut local = chain_of(1);
        let first = chain_paying(3, 1);
        let second = chain_paying(3, 2);
        assert_ne!(first.blocks(), second.blocks());

        ConsensusResolver::resolve(&mut local, ["a", "b"], |peer| match peer {
            "a" => Ok(answer(&first)),
            _ => Ok(answer(&second)),
        });

        assert_eq!(local.blocks(), first.blocks());
    }

    #[test]
    fn skips_misreported_length() {
        let mut local = chain_of(2);
        let mut lying = answer(&chain_of(2));
        lying.length = 10;

        let replaced = ConsensusResolver::resolve(&mut local, ["a"], |_| Ok(lying.clone()));

        assert!(!replaced);
    }

    #[test]
    fn skips_misnumbered_chain() {
        let mut local = chain_of(1);
        let mut renumbered = answer(&chain_of(2));
        renumbered.chain[1].index = u64::MAX;
        assert!(local.validate(&renumbered.chain));

        let replaced = ConsensusResolver::resolve(&mut local, ["a"], |_| Ok(renumbered.clone()));

        assert!(!replaced);
        assert_eq!(local.last_block().unwrap().index, 1);
        assert_eq!(local.new_transaction("A", "B", 1).unwrap(), 2);
    }

    #[test]
    fn no_peers_means_no_change() {
        let mut local = chain_of(2);
        let replaced =
            ConsensusResolver::resolve(&mut local, Vec::<&str>::new(), |peer| Err(refused(peer)));
        assert!(!replaced);
        assert_eq!(local.len(), 2);
    }
}
