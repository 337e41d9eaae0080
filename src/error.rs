use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid peer address: {0:?}")]
    InvalidAddress(String),

    #[error("chain has no blocks")]
    EmptyChain,

    #[error("block index {0} has no successor")]
    IndexOverflow(u64),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("peer {peer} unreachable: {reason}")]
    PeerUnreachable { peer: String, reason: String },

    #[error("peer {peer} returned a bad response: {reason}")]
    PeerError { peer: String, reason: String },
}

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::InvalidAddress(_) | LedgerError::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }
            LedgerError::EmptyChain | LedgerError::IndexOverflow(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            LedgerError::PeerUnreachable { .. } | LedgerError::PeerError { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
