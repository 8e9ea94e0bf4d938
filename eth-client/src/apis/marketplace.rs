use field_blockchain_data::{CollectionMetadata, CollectionStats, StatsEnvelope};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::ClientError;

pub const PROVIDER: &str = "marketplace";

#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl MarketplaceClient {
    pub fn new(http: Client, base_url: Url, api_key: Option<String>) -> Self {
        MarketplaceClient {
            http,
            base_url,
            api_key,
        }
    }

    pub fn asset_contract_url(&self, address: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(&format!("asset_contract/{}", address))?)
    }

    pub fn collection_stats_url(&self, slug: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(&format!("collection/{}/stats", slug))?)
    }

    pub async fn get_asset_contract(
        &self,
        address: &str,
    ) -> Result<CollectionMetadata, ClientError> {
        let url = self.asset_contract_url(address)?;
        self.get_json(url, format!("contract {}", address)).await
    }

    pub async fn get_collection_stats(&self, slug: &str) -> Result<CollectionStats, ClientError> {
        let url = self.collection_stats_url(slug)?;
        let envelope: StatsEnvelope = self.get_json(url, format!("collection {}", slug)).await?;
        Ok(envelope.stats)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        what: String,
    ) -> Result<T, ClientError> {
        debug!(%url, "marketplace request");

        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("X-API-KEY", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(PROVIDER, e))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(ClientError::NotFound {
                    provider: PROVIDER,
                    what,
                })
            }
            status => {
                return Err(ClientError::Status {
                    provider: PROVIDER,
                    status: status.as_u16(),
                })
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::from_reqwest(PROVIDER, e))?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
            provider: PROVIDER,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_joined_under_the_base_path() {
        let client = MarketplaceClient::new(
            Client::new(),
            Url::parse("https://api.opensea.io/api/v1/").unwrap(),
            None,
        );

        assert_eq!(
            client
                .asset_contract_url("0xfe8c6d19365453d26af321d0e8c910428c23873f")
                .unwrap()
                .as_str(),
            "https://api.opensea.io/api/v1/asset_contract/0xfe8c6d19365453d26af321d0e8c910428c23873f"
        );
        assert_eq!(
            client.collection_stats_url("creepz-by-overlord").unwrap().as_str(),
            "https://api.opensea.io/api/v1/collection/creepz-by-overlord/stats"
        );
    }
}
