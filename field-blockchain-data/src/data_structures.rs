use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// explorer proxy payloads (eth_getTransactionByHash / eth_getTransactionReceipt)

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    #[serde(default)]
    pub from: String,
    pub to: Option<String>,
    /// subunits, hex encoded
    pub value: String,
    pub block_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub gas_used: String,
    pub effective_gas_price: String,
    pub status: Option<String>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Log {
    pub address: String,
    pub data: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

// marketplace payloads

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContractType {
    NonFungible,
    SemiFungible,
    Fungible,
    Unknown,
    #[serde(other)]
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CollectionRef {
    pub slug: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CollectionMetadata {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    /// creator royalty
    #[serde(default)]
    pub dev_seller_fee_basis_points: Option<u32>,
    /// marketplace fee
    #[serde(default)]
    pub opensea_seller_fee_basis_points: Option<u32>,
    pub asset_contract_type: ContractType,
    pub collection: Option<CollectionRef>,
    #[serde(default = "Utc::now", skip_deserializing)]
    pub fetched_at: DateTime<Utc>,
}

impl CollectionMetadata {
    pub fn is_unknown_contract(&self) -> bool {
        self.asset_contract_type == ContractType::Unknown
    }

    pub fn royalty_bps(&self) -> u32 {
        self.dev_seller_fee_basis_points.unwrap_or(0)
    }

    pub fn platform_fee_bps(&self) -> u32 {
        self.opensea_seller_fee_basis_points.unwrap_or(0)
    }

    pub fn slug(&self) -> Option<&str> {
        self.collection.as_ref().map(|collection| collection.slug.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct StatsEnvelope {
    pub stats: CollectionStats,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CollectionStats {
    #[serde(default)]
    pub count: f64,
    pub floor_price: Option<f64>,
    #[serde(default)]
    pub total_volume: f64,
    #[serde(default = "Utc::now", skip_deserializing)]
    pub fetched_at: DateTime<Utc>,
}
