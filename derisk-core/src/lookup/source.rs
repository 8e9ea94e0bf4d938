use async_trait::async_trait;
use eth_client::{ChainClient, ClientError};
use field_blockchain_data::{
    CollectionMetadata, CollectionStats, Transaction, TransactionReceipt, TxHash,
};

/// Upstream data the lookup pipeline depends on.
#[async_trait]
pub trait ChainDataSource: Send + Sync {
    async fn transaction(&self, hash: &TxHash) -> Result<Transaction, ClientError>;

    async fn receipt(&self, hash: &TxHash) -> Result<TransactionReceipt, ClientError>;

    async fn collection(&self, address: &str) -> Result<CollectionMetadata, ClientError>;

    async fn collection_stats(&self, slug: &str) -> Result<CollectionStats, ClientError>;
}

#[async_trait]
impl ChainDataSource for ChainClient {
    async fn transaction(&self, hash: &TxHash) -> Result<Transaction, ClientError> {
        ChainClient::transaction(self, hash).await
    }

    async fn receipt(&self, hash: &TxHash) -> Result<TransactionReceipt, ClientError> {
        ChainClient::receipt(self, hash).await
    }

    async fn collection(&self, address: &str) -> Result<CollectionMetadata, ClientError> {
        ChainClient::collection(self, address).await
    }

    async fn collection_stats(&self, slug: &str) -> Result<CollectionStats, ClientError> {
        ChainClient::collection_stats(self, slug).await
    }
}
