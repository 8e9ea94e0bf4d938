pub mod apis;
pub mod config;
pub mod error;

use field_blockchain_data::{
    CollectionMetadata, CollectionStats, Transaction, TransactionReceipt, TxHash,
};
use reqwest::Client;

use apis::{explorer::ExplorerClient, marketplace::MarketplaceClient};
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError};

/// Both upstream apis behind one shared connection pool.
#[derive(Debug, Clone)]
pub struct ChainClient {
    pub explorer: ExplorerClient,
    pub marketplace: MarketplaceClient,
}

impl ChainClient {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ClientError::from_reqwest("http client", e))?;

        Ok(ChainClient {
            explorer: ExplorerClient::new(
                http.clone(),
                config.explorer_url.clone(),
                config.explorer_api_key.clone(),
            ),
            marketplace: MarketplaceClient::new(
                http,
                config.marketplace_url.clone(),
                config.marketplace_api_key.clone(),
            ),
        })
    }

    pub async fn transaction(&self, hash: &TxHash) -> Result<Transaction, ClientError> {
        self.explorer.get_transaction_by_hash(hash).await
    }

    pub async fn receipt(&self, hash: &TxHash) -> Result<TransactionReceipt, ClientError> {
        self.explorer.get_transaction_receipt(hash).await
    }

    pub async fn collection(&self, address: &str) -> Result<CollectionMetadata, ClientError> {
        self.marketplace.get_asset_contract(address).await
    }

    pub async fn collection_stats(&self, slug: &str) -> Result<CollectionStats, ClientError> {
        self.marketplace.get_collection_stats(slug).await
    }
}
