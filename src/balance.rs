//! Balance resolution
//!
//! Given an address and an optional token contract, decides whether to
//! query the native TRX balance, the legacy TRC10 asset balance map, or a
//! TRC20 token balance, and renders the result as a base-10 string.

use tracing::debug;

use crate::client::TronClient;
use crate::errors::WalletError;
use crate::types::{BalanceRequest, TRON_SYMBOL};

/// Resolves a balance per the request's token selection
///
/// With a contract address, the contract's declared symbol must match the
/// requested chain symbol before any balance lookup happens; a mismatch
/// means the caller is asking about the wrong token and fails retryable.
///
/// Without one, the account record decides: the native symbol reads the TRX
/// balance field, anything else looks up the TRC10 asset map. An address
/// holding none of a requested asset resolves to zero; absence is a valid,
/// common state, not an error.
pub(crate) async fn resolve_balance<C: TronClient>(
    client: &C,
    req: &BalanceRequest,
) -> Result<String, WalletError> {
    if let Some(contract) = req.contract_address.as_deref().filter(|c| !c.is_empty()) {
        let symbol = client.trc20_get_symbol(contract).await?;
        if symbol != req.chain {
            return Err(WalletError::SymbolMismatch {
                expected: req.chain.clone(),
                actual: symbol,
            });
        }
        let balance = client.trc20_contract_balance(&req.address, contract).await?;
        return Ok(balance.to_string());
    }

    let account = client.get_account(&req.address).await?;
    if req.coin == TRON_SYMBOL {
        Ok(account.balance.to_string())
    } else {
        let balance = account.asset_v2.get(&req.coin).copied().unwrap_or_else(|| {
            debug!(address = %req.address, coin = %req.coin, "no asset entry, resolving to zero");
            0
        });
        Ok(balance.to_string())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use num_bigint::BigUint;

    use super::*;
    use crate::errors::ClientError;
    use crate::proto::{Account, Transaction, TransactionInfo};

    struct StubClient {
        account: Account,
        symbol: String,
    }

    #[async_trait]
    impl TronClient for StubClient {
        async fn get_account(&self, _address: &str) -> Result<Account, ClientError> {
            Ok(self.account.clone())
        }

        async fn get_transaction_by_id(&self, _hash: &str) -> Result<Transaction, ClientError> {
            Err(ClientError::Transport("stub".into()))
        }

        async fn get_transaction_info_by_id(
            &self,
            _hash: &str,
        ) -> Result<TransactionInfo, ClientError> {
            Err(ClientError::Transport("stub".into()))
        }

        async fn broadcast(&self, _tx: &Transaction) -> Result<(), ClientError> {
            Err(ClientError::Transport("stub".into()))
        }

        async fn trc20_contract_balance(
            &self,
            _address: &str,
            _contract: &str,
        ) -> Result<BigUint, ClientError> {
            Ok(BigUint::from(900u32))
        }

        async fn trc20_get_symbol(&self, _contract: &str) -> Result<String, ClientError> {
            Ok(self.symbol.clone())
        }
    }

    fn stub(symbol: &str) -> StubClient {
        StubClient {
            account: Account {
                address: vec![0x41; 21],
                balance: 12,
                asset_v2: [("1002000".to_string(), 34i64)].into_iter().collect(),
            },
            symbol: symbol.to_string(),
        }
    }

    fn request(coin: &str, contract: Option<&str>) -> BalanceRequest {
        BalanceRequest {
            chain: "trx".into(),
            coin: coin.into(),
            address: "Taddr".into(),
            contract_address: contract.map(Into::into),
        }
    }

    #[test]
    fn native_symbol_reads_the_balance_field() {
        let got = tokio_test::block_on(resolve_balance(&stub("trx"), &request("trx", None)));
        assert_eq!(got.unwrap(), "12");
    }

    #[test]
    fn asset_symbol_reads_the_asset_map() {
        let got = tokio_test::block_on(resolve_balance(&stub("trx"), &request("1002000", None)));
        assert_eq!(got.unwrap(), "34");
    }

    #[test]
    fn absent_asset_resolves_to_zero() {
        let got = tokio_test::block_on(resolve_balance(&stub("trx"), &request("other", None)));
        assert_eq!(got.unwrap(), "0");
    }

    #[test]
    fn matching_symbol_resolves_contract_balance() {
        let got =
            tokio_test::block_on(resolve_balance(&stub("trx"), &request("trx", Some("Tc"))));
        assert_eq!(got.unwrap(), "900");
    }

    #[test]
    fn mismatched_symbol_is_rejected() {
        let err = tokio_test::block_on(resolve_balance(&stub("usdt"), &request("trx", Some("Tc"))))
            .unwrap_err();
        assert!(matches!(err, WalletError::SymbolMismatch { .. }));
        assert!(err.is_retryable());
    }
}
