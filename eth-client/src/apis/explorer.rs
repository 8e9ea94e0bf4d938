use field_blockchain_data::{Transaction, TransactionReceipt, TxHash};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::ClientError;

pub const PROVIDER: &str = "explorer";

const GET_TRANSACTION_BY_HASH: &str = "eth_getTransactionByHash";
const GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";

/// Block-explorer proxy module, keyed by transaction hash and api key.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl ExplorerClient {
    pub fn new(http: Client, base_url: Url, api_key: String) -> Self {
        ExplorerClient {
            http,
            base_url,
            api_key,
        }
    }

    pub async fn get_transaction_by_hash(&self, hash: &TxHash) -> Result<Transaction, ClientError> {
        self.proxy_call(GET_TRANSACTION_BY_HASH, hash).await
    }

    pub async fn get_transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<TransactionReceipt, ClientError> {
        self.proxy_call(GET_TRANSACTION_RECEIPT, hash).await
    }

    pub fn proxy_url(&self, action: &str, hash: &TxHash) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("module", "proxy")
            .append_pair("action", action)
            .append_pair("txhash", hash.as_str())
            .append_pair("apikey", &self.api_key);
        url
    }

    async fn proxy_call<T: DeserializeOwned>(
        &self,
        action: &str,
        hash: &TxHash,
    ) -> Result<T, ClientError> {
        let url = self.proxy_url(action, hash);
        debug!(action, %hash, "explorer request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(PROVIDER, e))?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::from_reqwest(PROVIDER, e))?;

        decode_envelope(body, hash)
    }
}

/// Unwraps `{result}` / `{error: {message}}`.
///
/// A `null` result means the hash is unknown to the node. A bare string result is how the
/// explorer reports its own failures (bad api key, rate limit).
pub fn decode_envelope<T: DeserializeOwned>(body: Value, hash: &TxHash) -> Result<T, ClientError> {
    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(ClientError::Api {
            provider: PROVIDER,
            message,
        });
    }

    match body.get("result") {
        None | Some(Value::Null) => Err(ClientError::NotFound {
            provider: PROVIDER,
            what: format!("transaction {}", hash),
        }),
        Some(Value::String(message)) => Err(ClientError::Api {
            provider: PROVIDER,
            message: message.clone(),
        }),
        Some(result) => serde_json::from_value(result.clone()).map_err(|source| {
            ClientError::Decode {
                provider: PROVIDER,
                source,
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hash() -> TxHash {
        "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060"
            .parse()
            .unwrap()
    }

    #[test]
    fn proxy_url_carries_module_action_hash_and_key() {
        let client = ExplorerClient::new(
            Client::new(),
            Url::parse("https://api.etherscan.io/api").unwrap(),
            "KEY".to_string(),
        );
        let url = client.proxy_url(GET_TRANSACTION_RECEIPT, &hash());

        assert_eq!(
            url.as_str(),
            format!(
                "https://api.etherscan.io/api?module=proxy&action=eth_getTransactionReceipt&txhash={}&apikey=KEY",
                hash()
            )
        );
    }

    #[test]
    fn result_is_decoded() {
        let tx: Transaction = decode_envelope(
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "hash": hash().as_str(),
                    "from": "0x01",
                    "to": "0x7be8076f4ea4a4ad08075c2508e481d6c946d12b",
                    "value": "0x1bc16d674ec80000",
                    "blockNumber": "0xcf0c47"
                }
            }),
            &hash(),
        )
        .unwrap();

        assert_eq!(tx.value, "0x1bc16d674ec80000");
        assert_eq!(tx.block_number.as_deref(), Some("0xcf0c47"));
    }

    #[test]
    fn error_payload_surfaces_its_message() {
        let err = decode_envelope::<Transaction>(
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {
                    "code": -32602,
                    "message": "invalid argument 0: hex string has length 4, want 64 for common.Hash"
                }
            }),
            &hash(),
        )
        .unwrap_err();

        match err {
            ClientError::Api { message, .. } => assert!(message.contains("want 64")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn null_result_is_not_found_and_string_result_is_api_error() {
        let err = decode_envelope::<Transaction>(json!({ "result": null }), &hash()).unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));

        let err = decode_envelope::<Transaction>(
            json!({ "status": "0", "message": "NOTOK", "result": "Invalid API Key" }),
            &hash(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Api { message, .. } if message == "Invalid API Key"));
    }
}
