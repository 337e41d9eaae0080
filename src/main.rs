mod api;
mod blockchain;
mod config;
mod error;
mod network;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};

use api::AppState;
use blockchain::Blockchain;
use config::Config;
use network::PeerRegistry;
use network::client::build_client;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();

    let mut peers = PeerRegistry::new();
    for address in &config.peers {
        if let Err(e) = peers.register(address) {
            warn!("skipping configured peer: {}", e);
        }
    }
    if !peers.is_empty() {
        info!("seeded peers: {:?}", peers.list());
    }

    info!(
        "⛓️ Starting ledger node at http://{}:{} (difficulty={}, peers={})",
        config.host,
        config.port,
        config.difficulty,
        peers.len()
    );

    let state = web::Data::new(AppState::new(
        Blockchain::with_difficulty(config.difficulty),
        peers,
        build_client(config.peer_timeout),
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
