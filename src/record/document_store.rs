use crate::record::{record_type, required, Rejection, Schema};
use crate::txt::{RecordPrefix, TokenMap};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    // Not anchored: any value containing `0x` followed by 40 hex digits matches.
    static ref ETHEREUM_ADDRESS: Regex = Regex::new("0x[a-fA-F0-9]{40}").unwrap();
}

/// Blockchain networks a document store can live on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockchainNetwork {
    #[serde(rename = "ethereum")]
    Ethereum,
}

impl BlockchainNetwork {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BlockchainNetwork::Ethereum => "ethereum",
        }
    }
}

impl FromStr for BlockchainNetwork {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ethereum" => Ok(BlockchainNetwork::Ethereum),
            _ => Err(Rejection::UnsupportedNetwork(s.to_string())),
        }
    }
}

/// Ethereum network ids, published as their decimal chain id.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EthereumNetworkId {
    #[serde(rename = "1")]
    Homestead,
    #[serde(rename = "3")]
    Ropsten,
    #[serde(rename = "4")]
    Rinkeby,
}

impl EthereumNetworkId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EthereumNetworkId::Homestead => "1",
            EthereumNetworkId::Ropsten => "3",
            EthereumNetworkId::Rinkeby => "4",
        }
    }
}

impl FromStr for EthereumNetworkId {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(EthereumNetworkId::Homestead),
            "3" => Ok(EthereumNetworkId::Ropsten),
            "4" => Ok(EthereumNetworkId::Rinkeby),
            _ => Err(Rejection::UnsupportedNetworkId(s.to_string())),
        }
    }
}

impl fmt::Display for EthereumNetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The network, network id and address of the contract that issues documents for a domain.
/// Key names are abbreviated to fit the 255 byte TXT string limit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DocumentStoreRecord {
    #[serde(rename = "type")]
    pub record_type: RecordPrefix,
    pub net: BlockchainNetwork,
    #[serde(rename = "netId")]
    pub net_id: EthereumNetworkId,
    pub addr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnssec: Option<bool>,
}

/// Returns true if `addr` contains an ethereum address anywhere within it.
#[must_use]
pub fn is_ethereum_address(addr: &str) -> bool {
    ETHEREUM_ADDRESS.is_match(addr)
}

impl Schema for DocumentStoreRecord {
    fn validate(tokens: &TokenMap, prefix: RecordPrefix) -> Result<Self, Rejection> {
        let record_type = record_type(tokens, prefix)?;
        let net = required(tokens, &["net"], "net")?.parse()?;
        let net_id = required(tokens, &["netId"], "netId")?.parse()?;
        let addr = required(tokens, &["addr"], "addr")?;
        if !is_ethereum_address(addr) {
            return Err(Rejection::InvalidAddress(addr.to_string()));
        }
        Ok(Self {
            record_type,
            net,
            net_id,
            addr: addr.to_string(),
            dnssec: None,
        })
    }

    fn with_dnssec(self, dnssec: bool) -> Self {
        Self {
            dnssec: Some(dnssec),
            ..self
        }
    }
}

impl DocumentStoreRecord {
    /// The canonical TXT data for this record, under its own record type.
    #[must_use]
    pub fn to_txt(&self) -> String {
        format!(
            "{} net={} netId={} addr={}",
            self.record_type,
            self.net.as_str(),
            self.net_id,
            self.addr
        )
    }
}
