//! Wallet adaptor: the caller-facing surface
//!
//! [`WalletAdaptor`] orchestrates decoder dispatch by contract kind, merges
//! decoder output with receipt metadata, enforces the single-transfer
//! response contract, resolves balances, and broadcasts signed envelopes.
//!
//! Every operation returns a structured response with an explicit error
//! envelope; callers never infer failure from an absent value. All state is
//! request local, so concurrent calls need no coordination beyond the
//! counting permit bounding outbound RPC.

use std::sync::Arc;

use prost::Message;
use sha2::{Digest, Sha256};
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{error, info, warn};

use crate::balance::resolve_balance;
use crate::client::{balance_cache_key, BalanceCache, NoopCache, TronClient};
use crate::decode::{
    decode_transfer_asset_contract, decode_transfer_contract, decode_trigger_smart_contract,
};
use crate::errors::{ClientError, DecodeError, WalletError};
use crate::proto::{transaction::contract::ContractType, transaction_info, Transaction};
use crate::types::{
    BalanceRequest, BalanceResponse, ErrorInfo, NonceResponse, SendTxRequest, SendTxResponse,
    TransferKind, TransferRecord, TxHashRequest, TxHashResponse, TxMessage,
};

/// Default bound on concurrent outbound chain calls
const DEFAULT_MAX_INFLIGHT: usize = 32;

/// Wallet adaptor over an opaque Tron RPC client
///
/// Stateless across calls apart from the write-through balance cache, which
/// is an external collaborator with its own concurrency guarantees.
pub struct WalletAdaptor<C> {
    client: C,
    cache: Arc<dyn BalanceCache>,
    rpc_permits: Semaphore,
}

impl<C: TronClient> WalletAdaptor<C> {
    /// Creates an adaptor with no cache and the default RPC permit bound
    pub fn new(client: C) -> Self {
        WalletAdaptor {
            client,
            cache: Arc::new(NoopCache),
            rpc_permits: Semaphore::new(DEFAULT_MAX_INFLIGHT),
        }
    }

    /// Attaches a write-through balance cache
    pub fn with_cache(mut self, cache: Arc<dyn BalanceCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Overrides the bound on concurrent outbound chain calls
    pub fn with_max_inflight(mut self, permits: usize) -> Self {
        self.rpc_permits = Semaphore::new(permits);
        self
    }

    /// Resolves a native, TRC10 or TRC20 balance as a base-10 string
    ///
    /// Successful resolutions are written through to the cache under the
    /// `chain:coin:address` key before returning.
    pub async fn get_balance(&self, req: &BalanceRequest) -> BalanceResponse {
        info!(address = %req.address, coin = %req.coin, "get_balance");
        let Some(_permit) = self.rpc_permit().await else {
            return BalanceResponse { error: permit_error(), balance: String::new() };
        };
        match resolve_balance(&self.client, req).await {
            Ok(balance) => {
                let key = balance_cache_key(&req.chain, &req.coin, &req.address);
                self.cache.put(&key, &balance);
                BalanceResponse { error: ErrorInfo::ok(), balance }
            }
            Err(err) => {
                warn!(address = %req.address, %err, "balance resolution failed");
                BalanceResponse { error: ErrorInfo::from_error(&err), balance: String::new() }
            }
        }
    }

    /// Looks up a transaction by id and normalizes it into a [`TxMessage`]
    ///
    /// The transaction must carry exactly one contract instruction and
    /// resolve to at most one transfer. A transaction with no recognized
    /// transfer is valid, just uninteresting: the response succeeds with
    /// empty from/to fields.
    pub async fn get_tx_by_hash(&self, req: &TxHashRequest) -> TxHashResponse {
        info!(hash = %req.hash, "get_tx_by_hash");
        let Some(_permit) = self.rpc_permit().await else {
            return TxHashResponse { error: permit_error(), tx: None };
        };
        match self.assemble_tx(&req.hash).await {
            Ok(tx) => TxHashResponse { error: ErrorInfo::ok(), tx: Some(tx) },
            Err(err) => {
                warn!(hash = %req.hash, %err, "transaction assembly failed");
                TxHashResponse { error: ErrorInfo::from_error(&err), tx: None }
            }
        }
    }

    async fn assemble_tx(&self, hash: &str) -> Result<TxMessage, WalletError> {
        let tx = self.client.get_transaction_by_id(hash).await?;
        let raw = tx.raw_data.ok_or(DecodeError::MissingRawData)?;
        if raw.contract.len() != 1 {
            return Err(DecodeError::ContractCount(raw.contract.len()).into());
        }
        let info = self.client.get_transaction_info_by_id(hash).await?;

        let contract = &raw.contract[0];
        let (records, kind) = match ContractType::try_from(contract.r#type) {
            Ok(ContractType::TransferContract) => {
                (decode_transfer_contract(contract, hash)?, TransferKind::Native)
            }
            Ok(ContractType::TransferAssetContract) => {
                (decode_transfer_asset_contract(contract, hash)?, TransferKind::Asset)
            }
            Ok(ContractType::TriggerSmartContract) => {
                (decode_trigger_smart_contract(contract, &info, hash)?, TransferKind::Trc20)
            }
            _ => return Err(DecodeError::UnsupportedContractType(contract.r#type).into()),
        };
        let record = ensure_single_transfer(records)?;

        let status = matches!(
            transaction_info::Code::try_from(info.result),
            Ok(transaction_info::Code::Success)
        );

        let mut tx = TxMessage {
            hash: hash.to_string(),
            from: String::new(),
            to: String::new(),
            fee: info.fee.to_string(),
            status,
            value: String::new(),
            kind,
            height: info.block_number.to_string(),
            contract_address: None,
            asset_name: None,
        };
        if let Some(record) = record {
            tx.from = record.from;
            tx.to = record.to;
            tx.value = record.amount;
            tx.contract_address = record.contract_address;
            tx.asset_name = record.asset_name;
        }
        Ok(tx)
    }

    /// Deserializes and broadcasts a caller-supplied signed transaction
    ///
    /// The returned transaction id is recomputed locally by hashing the
    /// re-serialized header-data section; any hash the caller supplied is
    /// ignored. Malformed bytes fail immediately with no broadcast attempt,
    /// and submission failure is returned without retry.
    pub async fn send_tx(&self, req: &SendTxRequest) -> SendTxResponse {
        let Some(_permit) = self.rpc_permit().await else {
            return SendTxResponse { error: permit_error(), tx_hash: String::new() };
        };
        let tx = match Transaction::decode(req.raw_tx.as_slice()) {
            Ok(tx) => tx,
            Err(e) => {
                warn!(%e, "rejecting malformed raw transaction");
                let err = WalletError::from(DecodeError::Envelope(e.to_string()));
                return SendTxResponse {
                    error: ErrorInfo::from_error(&err),
                    tx_hash: String::new(),
                };
            }
        };
        let raw = match &tx.raw_data {
            Some(raw) => raw,
            None => {
                let err = WalletError::from(DecodeError::MissingRawData);
                return SendTxResponse {
                    error: ErrorInfo::from_error(&err),
                    tx_hash: String::new(),
                };
            }
        };
        let tx_hash = hex::encode(Sha256::digest(raw.encode_to_vec()));

        if let Err(e) = self.client.broadcast(&tx).await {
            error!(tx_hash, %e, "broadcast failed");
            return SendTxResponse {
                error: ErrorInfo::from_error(&WalletError::from(e)),
                tx_hash: String::new(),
            };
        }
        info!(tx_hash, "broadcast succeeded");
        SendTxResponse { error: ErrorInfo::ok(), tx_hash }
    }

    /// Tron is account based with no nonce concept; always `"0"`
    pub async fn get_nonce(&self, address: &str) -> NonceResponse {
        info!(%address, "get_nonce");
        NonceResponse { error: ErrorInfo::ok(), nonce: "0".to_string() }
    }

    async fn rpc_permit(&self) -> Option<SemaphorePermit<'_>> {
        self.rpc_permits.acquire().await.ok()
    }
}

/// Enforces the single-transfer-per-transaction output contract
///
/// The decoders stay general and may return several records; this layer's
/// response shape assumes one economically relevant transfer. Zero records
/// is a valid, empty outcome.
fn ensure_single_transfer(
    records: Vec<TransferRecord>,
) -> Result<Option<TransferRecord>, DecodeError> {
    if records.len() > 1 {
        return Err(DecodeError::TooManyTransfers(records.len()));
    }
    Ok(records.into_iter().next())
}

fn permit_error() -> ErrorInfo {
    ErrorInfo::from_error(&WalletError::Client(ClientError::Transport(
        "rpc permits unavailable".to_string(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize) -> TransferRecord {
        TransferRecord {
            token_id: String::new(),
            from: format!("Tfrom{n}"),
            to: format!("Tto{n}"),
            amount: n.to_string(),
            log_index: n,
            asset_name: None,
            contract_address: None,
        }
    }

    #[test]
    fn zero_records_is_valid_and_empty() {
        assert_eq!(ensure_single_transfer(Vec::new()).unwrap(), None);
    }

    #[test]
    fn one_record_passes_through() {
        let got = ensure_single_transfer(vec![record(1)]).unwrap();
        assert_eq!(got, Some(record(1)));
    }

    #[test]
    fn two_records_are_rejected() {
        let err = ensure_single_transfer(vec![record(1), record(2)]).unwrap_err();
        assert!(matches!(err, DecodeError::TooManyTransfers(2)));
    }
}
