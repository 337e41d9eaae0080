use log::{info, warn};
use std::collections::BTreeSet;
use url::Url;

use crate::error::LedgerError;

/// Known peer addresses, stored as normalized `host[:port]`.
///
/// Kept sorted so that iteration order (and therefore consensus tie-breaks)
/// is deterministic.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    nodes: BTreeSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `address` and store its network location. Returns the stored form.
    pub fn register(&mut self, address: &str) -> Result<String, LedgerError> {
        let netloc = network_location(address)?;
        if self.nodes.insert(netloc.clone()) {
            info!("PEERS - registered {} (total {})", netloc, self.nodes.len());
        }
        Ok(netloc)
    }

    pub fn list(&self) -> Vec<String> {
        self.iter().map(String::from).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// `host:port` of a URL; scheme, userinfo, path and query are dropped.
/// The scheme's default port is written out so the stored address still
/// reaches the same endpoint once the scheme is gone.
fn network_location(address: &str) -> Result<String, LedgerError> {
    let invalid = || LedgerError::InvalidAddress(address.to_string());

    let url = Url::parse(address.trim()).map_err(|e| {
        warn!("PEERS - rejected {:?}: {}", address, e);
        invalid()
    })?;
    let host = match url.host_str() {
        Some(h) if !h.is_empty() => h,
        _ => {
            warn!("PEERS - rejected {:?}: no network location", address);
            return Err(invalid());
        }
    };

    Ok(match url.port_or_known_default() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::PeerRegistry;
    use crate::error::LedgerError;

    #[test]
    fn keeps_only_network_location() {
        let mut peers = PeerRegistry::new();
        let stored = peers.register("http://192.168.1.5:5000").unwrap();
        assert_eq!(stored, "192.168.1.5:5000");
        assert_eq!(peers.list(), vec!["192.168.1.5:5000".to_string()]);
    }

    #[test]
    fn strips_path_query_and_userinfo() {
        let mut peers = PeerRegistry::new();
        let stored = peers
            .register("https://user:pw@Node.Example.com:8443/chain?x=1")
            .unwrap();
        assert_eq!(stored, "node.example.com:8443");
    }

    #[test]
    fn keeps_scheme_default_port() {
        let mut peers = PeerRegistry::new();
        assert_eq!(
            peers.register("https://node.example:443").unwrap(),
            "node.example:443"
        );
        assert_eq!(
            peers.register("https://other.example/").unwrap(),
            "other.example:443"
        );
        assert_eq!(
            peers.register("http://plain.example").unwrap(),
            "plain.example:80"
        );
    }

    #[test]
    fn deduplicates_equivalent_addresses() {
        let mut peers = PeerRegistry::new();
        peers.register("http://10.0.0.1:5000").unwrap();
        peers.register("http://10.0.0.1:5000/").unwrap();
        peers.register("https://10.0.0.1:5000/chain").unwrap();
        peers.register("http://10.0.0.2").unwrap();
        peers.register("http://10.0.0.2:80/").unwrap();
        assert_eq!(peers.len(), 2);
    }

    #[test]
    fn rejects_addresses_without_network_location() {
        let mut peers = PeerRegistry::new();
        for bad in ["", "not a url", "192.168.1.5:5000", "mailto:a@b.c", "http://"] {
            assert!(
                matches!(peers.register(bad), Err(LedgerError::InvalidAddress(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(peers.is_empty());
    }

    #[test]
    fn iterates_in_sorted_order() {
        let mut peers = PeerRegistry::new();
        peers.register("http://10.0.0.3:5000").unwrap();
        peers.register("http://10.0.0.1:5000").unwrap();
        peers.register("http://10.0.0.2:5000").unwrap();
        let order: Vec<_> = peers.iter().collect();
        assert_eq!(order, ["10.0.0.1:5000", "10.0.0.2:5000", "10.0.0.3:5000"]);
    }
}
