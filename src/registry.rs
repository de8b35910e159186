//! Static list of peers a node forwards its mutations to.

/// Peer addresses known at startup, minus the local node.
///
/// The registry is built once and never changes: there is no join, leave or
/// failure detection. Addresses are `host:port` authorities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerRegistry {
    peers: Vec<String>,
}

impl PeerRegistry {
    /// Builds the registry from every known node address.
    ///
    /// The local address and duplicates are dropped; the first occurrence of
    /// each remaining address keeps its position.
    pub fn new<I, S>(addresses: I, self_address: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut peers: Vec<String> = Vec::new();
        for address in addresses {
            let address = address.into();
            if address == self_address || peers.contains(&address) {
                continue;
            }
            peers.push(address);
        }
        Self { peers }
    }

    pub fn peers(&self) -> &[String] {
        &self.peers
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.peers.iter().any(|peer| peer == address)
    }
}
