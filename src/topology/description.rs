use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TwinError};

/// Top-level network-description document.
///
/// Every level is optional so that a partial document still parses; the
/// builder decides what an absent section means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkDescription {
    #[serde(rename = "ietf-network:networks", default)]
    pub networks: Option<Networks>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Networks {
    #[serde(default)]
    pub network: Vec<Network>,
}

/// One network entry: its node records and link records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Network {
    #[serde(default)]
    pub node: Vec<NodeRecord>,
    #[serde(rename = "ietf-network-topology:link", default)]
    pub links: Vec<LinkRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "node-id", default)]
    pub node_id: String,
    /// Free-form type hint; classification uses the id prefix.
    #[serde(rename = "o-ran-sc-network:type", default)]
    pub type_hint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkRecord {
    #[serde(default)]
    pub source: LinkSource,
    #[serde(default)]
    pub destination: LinkDestination,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkSource {
    #[serde(rename = "source-node", default)]
    pub source_node: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkDestination {
    #[serde(rename = "dest-node", default)]
    pub dest_node: String,
}

impl LinkRecord {
    /// Convenience constructor used by tests and programmatic callers.
    pub fn new(source: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            source: LinkSource {
                source_node: source.into(),
            },
            destination: LinkDestination {
                dest_node: dest.into(),
            },
        }
    }
}

impl NodeRecord {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            type_hint: None,
        }
    }
}

impl NetworkDescription {
    /// Wraps a single network entry into a description.
    pub fn single(node: Vec<NodeRecord>, links: Vec<LinkRecord>) -> Self {
        Self {
            networks: Some(Networks {
                network: vec![Network { node, links }],
            }),
        }
    }

    /// Parses a description from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`TwinError::Json`] if the document is not valid JSON or has
    /// the wrong shape.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads and parses a description file.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the path if the file cannot be read, or
    /// [`TwinError::Json`] if it does not parse.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TwinError::config("topology", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }

    /// Network entries, empty when the networks section is absent.
    pub fn network_entries(&self) -> &[Network] {
        self.networks
            .as_ref()
            .map(|n| n.network.as_slice())
            .unwrap_or_default()
    }
}
