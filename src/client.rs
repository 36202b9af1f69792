//! Collaborator contracts: the Tron node RPC client and the balance cache
//!
//! The adaptor treats the node as an opaque, synchronous-per-call capability
//! behind [`TronClient`]; endpoint selection, failover and timeouts live in
//! the implementation, never here. The balance cache is write-only from the
//! adaptor's perspective and best-effort by contract.

use async_trait::async_trait;
use num_bigint::BigUint;

use crate::errors::ClientError;
use crate::proto::{Account, Transaction, TransactionInfo};

/// RPC capability the adaptor depends on
///
/// Every method may fail with a transport/chain error; the adaptor treats
/// all of them uniformly as retryable. Implementations own their retry and
/// failover policy; the adaptor imposes none.
#[async_trait]
pub trait TronClient: Send + Sync {
    /// Fetches the account record for a base58check address
    async fn get_account(&self, address: &str) -> Result<Account, ClientError>;

    /// Fetches a transaction envelope by hex transaction id
    async fn get_transaction_by_id(&self, hash: &str) -> Result<Transaction, ClientError>;

    /// Fetches the execution receipt by hex transaction id
    async fn get_transaction_info_by_id(
        &self,
        hash: &str,
    ) -> Result<TransactionInfo, ClientError>;

    /// Submits a signed transaction envelope unchanged
    async fn broadcast(&self, tx: &Transaction) -> Result<(), ClientError>;

    /// Queries a TRC20 token balance for an address
    async fn trc20_contract_balance(
        &self,
        address: &str,
        contract: &str,
    ) -> Result<BigUint, ClientError>;

    /// Queries the symbol a TRC20 contract declares
    async fn trc20_get_symbol(&self, contract: &str) -> Result<String, ClientError>;
}

/// Write-through balance cache collaborator
///
/// Keys are `chain:coin:address`. Writes are best-effort; the adaptor never
/// reads back and tolerates last-writer-wins staleness.
pub trait BalanceCache: Send + Sync {
    fn put(&self, key: &str, value: &str);
}

/// Cache that drops every write; the default collaborator
pub struct NoopCache;

impl BalanceCache for NoopCache {
    fn put(&self, _key: &str, _value: &str) {}
}

/// Builds the composite cache key for a resolved balance
pub fn balance_cache_key(chain: &str, coin: &str, address: &str) -> String {
    [chain, coin, address].join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_colon_joined() {
        assert_eq!(balance_cache_key("trx", "trx", "Taddr"), "trx:trx:Taddr");
    }
}
