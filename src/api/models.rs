use crate::blockchain::{Block, Blockchain};
use crate::network::PeerRegistry;
use crate::transaction::Transaction;
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared node state: one chain, one peer set, one HTTP client.
///
/// The whole chain (blocks and staging area) sits behind a single lock so
/// that staging, mining and consensus replacement never interleave.
pub struct AppState {
    pub blockchain: RwLock<Blockchain>,
    pub peers: RwLock<PeerRegistry>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(blockchain: Blockchain, peers: PeerRegistry, client: reqwest::Client) -> Self {
        Self {
            blockchain: RwLock::new(blockchain),
            peers: RwLock::new(peers),
            client,
        }
    }
}

// Every mutation of the chain or peer set is a single push/assign made after
// all fallible work, so a panic elsewhere never leaves them half-updated and a
// poisoned lock is safe to keep using.
impl AppState {
    pub fn chain(&self) -> RwLockReadGuard<'_, Blockchain> {
        self.blockchain.read().unwrap_or_else(|e| {
            warn!("STATE - recovering poisoned chain lock");
            PoisonError::into_inner(e)
        })
    }

    pub fn chain_mut(&self) -> RwLockWriteGuard<'_, Blockchain> {
        self.blockchain.write().unwrap_or_else(|e| {
            warn!("STATE - recovering poisoned chain lock");
            PoisonError::into_inner(e)
        })
    }

    pub fn peers(&self) -> RwLockReadGuard<'_, PeerRegistry> {
        self.peers.read().unwrap_or_else(|e| {
            warn!("STATE - recovering poisoned peers lock");
            PoisonError::into_inner(e)
        })
    }

    pub fn peers_mut(&self) -> RwLockWriteGuard<'_, PeerRegistry> {
        self.peers.write().unwrap_or_else(|e| {
            warn!("STATE - recovering poisoned peers lock");
            PoisonError::into_inner(e)
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Blockchain::new(), PeerRegistry::new(), reqwest::Client::new())
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub timestamp: f64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- TX API Models ---------- */

/// Fields are optional so a missing one can be reported by name.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<serde_json::Number>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Nodes API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<String>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct ResolveResponse<'a> {
    pub message: &'static str,
    pub replaced: bool,
    pub chain: &'a [Block],
    pub length: usize,
}
