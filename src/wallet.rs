//! Wallet/contract collaborator used for campaigns funded on chain.
//!
//! The ledger only needs one capability: submit a value transfer to an
//! on-chain target and get back a transaction reference. Every failure
//! (user rejection, insufficient funds, network error) is reported the same
//! way, as [`Error::ExternalTransferFailed`].

use crate::core::reference::generate_tx_hash;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use tracing::{info, warn};

/// A value transfer the ledger asks the wallet to perform
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    /// On-chain campaign reference receiving the funds
    pub target: String,
    /// Amount to send
    pub amount: f64,
    /// Wallet address of the sender
    pub donor: String,
}

/// Capability to move real value to an on-chain campaign.
///
/// Implementations may wait indefinitely for the user to confirm in their
/// wallet; the ledger applies no timeout.
#[async_trait]
pub trait TransferGateway: Send + Sync {
    /// Submits the transfer and returns its transaction reference.
    async fn transfer(&self, request: &TransferRequest) -> Result<String>;
}

/// Gateway that accepts every transfer and answers with a generated hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedGateway;

#[async_trait]
impl TransferGateway for SimulatedGateway {
    async fn transfer(&self, request: &TransferRequest) -> Result<String> {
        let tx_hash = generate_tx_hash();
        info!(
            "Simulated transfer of {} from {} to {}: {}",
            request.amount, request.donor, request.target, tx_hash
        );
        Ok(tx_hash)
    }
}

/// Gateway used when no wallet is connected; every transfer fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisconnectedWallet;

#[async_trait]
impl TransferGateway for DisconnectedWallet {
    async fn transfer(&self, request: &TransferRequest) -> Result<String> {
        warn!(
            "Transfer to {} refused: no wallet connected",
            request.target
        );
        Err(Error::ExternalTransferFailed {
            reason: "no wallet connected".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::is_tx_hash;

    fn request() -> TransferRequest {
        TransferRequest {
            target: "0xCampaign".to_string(),
            amount: 25.0,
            donor: "0xAAA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_simulated_gateway_returns_hash() -> Result<()> {
        let tx = SimulatedGateway.transfer(&request()).await?;
        assert!(is_tx_hash(&tx));
        Ok(())
    }

    #[tokio::test]
    async fn test_disconnected_wallet_fails() {
        let result = DisconnectedWallet.transfer(&request()).await;
        assert!(matches!(
            result,
            Err(Error::ExternalTransferFailed { .. })
        ));
    }
}
