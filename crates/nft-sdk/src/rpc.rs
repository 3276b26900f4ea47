//! Lightweight blocking RPC helper
//! Uses ureq instead of heavy solana-client

use base64::Engine;
use serde_json::{json, Value};
use solana_sdk::{hash::Hash, signature::Signature, transaction::Transaction};
use tracing::debug;

use crate::core::{SdkError, SdkResult};

/// The chain operations the mint flow needs
pub trait ChainRpc {
    /// Lamports an account of `data_len` bytes must hold to be rent exempt
    fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64>;

    fn latest_blockhash(&self) -> SdkResult<Hash>;

    /// Submit a fully signed transaction
    fn send_transaction(&self, transaction: &Transaction) -> SdkResult<Signature>;
}

pub struct RpcHelper {
    url: String,
    agent: ureq::Agent,
}

impl RpcHelper {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            agent: ureq::Agent::new(),
        }
    }

    /// Get the RPC endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue a JSON-RPC call and return its `result` member
    fn call(&self, method: &str, params: Value) -> SdkResult<Value> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        debug!(method, url = %self.url, "rpc call");

        let response = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .send_json(payload)?;

        let json: Value = response.into_json()?;
        parse_rpc_response(json)
    }
}

/// Split a JSON-RPC envelope into its result or error
pub(crate) fn parse_rpc_response(json: Value) -> SdkResult<Value> {
    if let Some(error) = json.get("error") {
        return Err(SdkError::RpcError(error.to_string()));
    }

    match json.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err(SdkError::RpcError(format!("Invalid response from RPC: {}", json))),
    }
}

impl ChainRpc for RpcHelper {
    fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64> {
        let result = self.call("getMinimumBalanceForRentExemption", json!([data_len]))?;
        result
            .as_u64()
            .ok_or_else(|| SdkError::RpcError(format!("Invalid rent exemption response: {}", result)))
    }

    fn latest_blockhash(&self) -> SdkResult<Hash> {
        let result = self.call(
            "getLatestBlockhash",
            json!([{ "commitment": "confirmed" }]),
        )?;

        let blockhash = result["value"]["blockhash"]
            .as_str()
            .ok_or_else(|| SdkError::RpcError("Invalid blockhash response".to_string()))?;

        blockhash
            .parse()
            .map_err(|e| SdkError::RpcError(format!("Failed to parse blockhash: {}", e)))
    }

    fn send_transaction(&self, transaction: &Transaction) -> SdkResult<Signature> {
        let serialized_tx = bincode::serialize(transaction)?;
        let encoded_tx = base64::engine::general_purpose::STANDARD.encode(&serialized_tx);

        let result = self
            .call(
                "sendTransaction",
                json!([
                    encoded_tx,
                    {
                        "encoding": "base64",
                        "preflightCommitment": "confirmed"
                    }
                ]),
            )
            .map_err(|e| SdkError::TransactionFailed(e.to_string()))?;

        let sig_str = result
            .as_str()
            .ok_or_else(|| SdkError::RpcError("Invalid response from RPC".to_string()))?;

        sig_str
            .parse()
            .map_err(|e| SdkError::RpcError(format!("Failed to parse signature: {}", e)))
    }
}
