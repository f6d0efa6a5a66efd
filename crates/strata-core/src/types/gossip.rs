use std::fmt;

use serde::{Deserialize, Serialize};

/// A network endpoint a cluster node listens on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndPoint {
    pub host: String,
    pub port: u16,
}

impl EndPoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for EndPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A source of cluster gossip: an endpoint plus the host header to present
/// when the seed sits behind a name-based proxy.
///
/// Pure data, consumed by cluster node discovery outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GossipSeed {
    pub end_point: EndPoint,
    pub host_header: Option<String>,
}

impl GossipSeed {
    pub fn new(end_point: EndPoint) -> Self {
        Self {
            end_point,
            host_header: None,
        }
    }

    pub fn with_host_header(mut self, header: impl Into<String>) -> Self {
        self.host_header = Some(header.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_display() {
        let endpoint = EndPoint::new("node-1.cluster.local", 2113);
        assert_eq!(endpoint.to_string(), "node-1.cluster.local:2113");
    }

    #[test]
    fn test_gossip_seed_serde_round_trip() {
        let seed = GossipSeed::new(EndPoint::new("10.0.0.5", 2113)).with_host_header("es.internal");

        let json = serde_json::to_string(&seed).unwrap();
        let restored: GossipSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, seed);

        let bare = GossipSeed::new(EndPoint::new("10.0.0.6", 2113));
        assert_eq!(bare.host_header, None);
    }
}
