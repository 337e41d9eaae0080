use log::{debug, info};
use serde_json::Number;
use std::mem;

use super::{Block, ProofOfWork, hasher};
use crate::error::LedgerError;
use crate::transaction::Transaction;

/// In-memory chain plus the staging area for the next block.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    current_transactions: Vec<Transaction>,
    pow: ProofOfWork,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    pub fn new() -> Self {
        Self::with_pow(ProofOfWork::default())
    }

    pub fn with_difficulty(difficulty: usize) -> Self {
        Self::with_pow(ProofOfWork::new(difficulty))
    }

    fn with_pow(pow: ProofOfWork) -> Self {
        Self {
            chain: vec![Block::genesis()],
            current_transactions: Vec::new(),
            pow,
        }
    }

    /// Stage a transaction. Returns the index of the block it will land in
    /// if the next block is mined.
    pub fn new_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Result<u64, LedgerError> {
        let next_index = self.next_index()?;
        let tx = Transaction::new(sender, recipient, amount);
        debug!(
            "TX staged: {} -> {} ({}); pending={}",
            tx.sender,
            tx.recipient,
            tx.amount,
            self.current_transactions.len() + 1
        );
        self.current_transactions.push(tx);
        Ok(next_index)
    }

    /// Mine and append a block sealing the staged transactions.
    ///
    /// Staged transactions are taken when the block is constructed, after the
    /// proof is found. Callers serialize this with `new_transaction` through
    /// one lock around the whole chain, so what gets sealed is exactly what
    /// gets cleared.
    pub fn new_block(&mut self) -> Result<Block, LedgerError> {
        let index = self.next_index()?;
        let last = self.last_block()?;
        let last_proof = last.proof;
        let previous_hash = hasher::digest(last);

        let proof = self.pow.mine(last_proof);

        let transactions = mem::take(&mut self.current_transactions);
        let block = Block::new(index, transactions, proof, previous_hash);
        info!(
            "MINER - forged block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        self.chain.push(block.clone());
        Ok(block)
    }

    /// Check hash linkage and proof-of-work of every consecutive pair.
    /// Empty and single-block chains are trivially valid.
    pub fn validate(&self, candidate: &[Block]) -> bool {
        candidate.windows(2).all(|pair| {
            let (prev, cur) = (&pair[0], &pair[1]);
            cur.previous_hash == hasher::digest(prev) && self.pow.verify(prev.proof, cur.proof)
        })
    }

    pub fn is_valid(&self) -> bool {
        self.validate(&self.chain)
    }

    fn next_index(&self) -> Result<u64, LedgerError> {
        let last = self.last_block()?.index;
        last.checked_add(1).ok_or(LedgerError::IndexOverflow(last))
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Swap in a whole new block sequence. Only consensus does this.
    pub fn replace(&mut self, blocks: Vec<Block>) {
        info!(
            "CHAIN - replaced: length {} -> {}",
            self.chain.len(),
            blocks.len()
        );
        self.chain = blocks;
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.current_transactions
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn pow(&self) -> ProofOfWork {
        self.pow
    }
}
