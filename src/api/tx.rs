use actix_web::{HttpResponse, get, post, web};
use log::{info, warn};

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};
use crate::error::LedgerError;

/// Stage a transaction for the next block.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> Result<HttpResponse, LedgerError> {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();

    let (sender, recipient, amount) = match (sender, recipient, amount) {
        (Some(s), Some(r), Some(a)) => (s, r, a),
        (s, r, _) => {
            let missing = if s.is_none() {
                "sender"
            } else if r.is_none() {
                "recipient"
            } else {
                "amount"
            };
            warn!("POST /transactions/new - rejected: missing {}", missing);
            return Err(LedgerError::MissingField(missing));
        }
    };

    let index = {
        let mut bc = state.chain_mut();
        bc.new_transaction(sender, recipient, amount)?
    };
    info!("POST /transactions/new - staged for block {}", index);

    Ok(HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    }))
}

/// Transactions staged but not yet sealed.
#[get("/transactions/pending")]
pub async fn get_pending(state: web::Data<AppState>) -> HttpResponse {
    let bc = state.chain();
    HttpResponse::Ok().json(PendingResponse {
        size: bc.pending().len(),
        transactions: bc.pending(),
    })
}
