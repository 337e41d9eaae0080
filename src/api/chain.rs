use actix_web::{HttpResponse, get, web};
use log::error;

use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};
use crate::error::LedgerError;

/// Get the full blockchain.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> HttpResponse {
    let bc = state.chain();
    HttpResponse::Ok().json(ChainResponse {
        chain: bc.blocks(),
        length: bc.len(),
    })
}

/// Validate the local chain.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> HttpResponse {
    let bc = state.chain();
    HttpResponse::Ok().json(ValidateResponse {
        valid: bc.is_valid(),
        length: bc.len(),
        difficulty: bc.pow().difficulty(),
    })
}

/// Mine a block sealing every staged transaction.
///
/// PoW runs on the blocking pool with the chain write lock held for the
/// whole call, so staging waits until the block is appended.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> Result<HttpResponse, LedgerError> {
    let mined = web::block(move || {
        let mut bc = state.chain_mut();
        bc.new_block()
    })
    .await;

    let block = match mined {
        Ok(res) => res?,
        Err(e) => {
            error!("MINER - blocking task failed: {}", e);
            return Ok(HttpResponse::InternalServerError().body("mining task failed"));
        }
    };

    Ok(HttpResponse::Ok().json(MineResponse {
        message: "New Block Forged",
        index: block.index,
        timestamp: block.timestamp,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}
