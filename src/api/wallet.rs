//! Wallet endpoints

use crate::client::envelope::Paginated;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{ListQuery, WalletSnapshot, WalletTransaction};

impl ApiClient {
    /// Current per-currency balances for the selected market
    pub async fn wallet_balance(&self) -> ApiResult<WalletSnapshot> {
        self.get("/wallet").await
    }

    pub async fn wallet_history(
        &self,
        query: &ListQuery,
    ) -> ApiResult<Paginated<WalletTransaction>> {
        self.get_list("/wallet/history", &query.to_pairs(), query.requested_page())
            .await
    }
}
