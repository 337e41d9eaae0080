use actix_web::{HttpResponse, get, post, web};
use futures::future::join_all;
use log::{info, warn};
use std::collections::HashMap;

use super::models::{
    AppState, NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse,
};
use crate::error::LedgerError;
use crate::network::ConsensusResolver;
use crate::network::client::fetch_chain;

/// Register peer addresses.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, LedgerError> {
    let Some(nodes) = body.into_inner().nodes else {
        warn!("POST /nodes/register - rejected: missing nodes");
        return Err(LedgerError::MissingField("nodes"));
    };

    let mut peers = state.peers_mut();
    for node in &nodes {
        peers.register(node)?;
    }

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added",
        total_nodes: peers.list(),
    }))
}

#[get("/nodes")]
pub async fn list_nodes(state: web::Data<AppState>) -> HttpResponse {
    let peers = state.peers();
    HttpResponse::Ok().json(NodesResponse {
        nodes: peers.list(),
        total: peers.len(),
    })
}

/// Run the longest-valid-chain rule against every known peer.
///
/// Peer chains are fetched concurrently without holding any lock; the
/// comparison and replacement then run under the chain write lock.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> HttpResponse {
    let peers = state.peers().list();

    let client = &state.client;
    let fetched = join_all(peers.iter().map(|peer| async move {
        (peer.as_str(), fetch_chain(client, peer).await)
    }))
    .await;
    let mut fetched: HashMap<&str, _> = fetched.into_iter().collect();

    let mut bc = state.chain_mut();
    let replaced = ConsensusResolver::resolve(&mut bc, peers.iter().map(String::as_str), |peer| {
        fetched.remove(peer).unwrap_or_else(|| {
            Err(LedgerError::PeerError {
                peer: peer.to_string(),
                reason: "not fetched".into(),
            })
        })
    });
    info!(
        "GET /nodes/resolve - peers={} replaced={} length={}",
        peers.len(),
        replaced,
        bc.len()
    );

    HttpResponse::Ok().json(ResolveResponse {
        message: if replaced {
            "Our chain was replaced"
        } else {
            "Our chain is authoritative"
        },
        replaced,
        chain: bc.blocks(),
        length: bc.len(),
    })
}
