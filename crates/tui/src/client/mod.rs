use std::sync::Arc;

use api_types::{
    refresh::RefreshRequest,
    transaction::TransactionList,
    wallet::WalletList,
};
use async_trait::async_trait;
use deck_engine::{
    EngineError, Sats, Transaction, Wallet,
    collab::{ResultCollab, WalletStore},
};
use reqwest::{Response, Url};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::Result,
    snapshot::{SharedSnapshot, Snapshot},
};

/// Transactions fetched per refresh; the feed shows a prefix of these.
const TRANSACTION_PAGE: usize = 50;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("node unavailable: {0}")]
    Unavailable(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<ClientError> for EngineError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(err) => EngineError::StoreUnavailable(err.to_string()),
            other => EngineError::Refresh(other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    pub async fn wallets(&self) -> std::result::Result<WalletList, ClientError> {
        let res = self.http.get(self.endpoint("wallets")?).send().await?;
        decode(res).await
    }

    pub async fn transactions(&self, limit: usize) -> std::result::Result<TransactionList, ClientError> {
        let res = self
            .http
            .get(self.endpoint("transactions")?)
            .query(&[("limit", limit)])
            .send()
            .await?;
        decode(res).await
    }

    pub async fn refresh(
        &self,
        payload: RefreshRequest,
    ) -> std::result::Result<WalletList, ClientError> {
        let res = self
            .http
            .post(self.endpoint("wallets/refresh")?)
            .json(&payload)
            .send()
            .await?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> std::result::Result<T, ClientError> {
    if res.status().is_success() {
        return Ok(res.json::<T>().await?);
    }

    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    let err = match status.as_u16() {
        404 => ClientError::NotFound,
        409 => ClientError::Conflict(body),
        502..=504 => ClientError::Unavailable(body),
        _ => ClientError::Server(body),
    };
    Err(err)
}

/// Wallet store backed by the wallet server.
///
/// Reads are served from the last fetched snapshot; a refresh asks the server
/// to sync and replaces the snapshot with what it returns.
pub struct HttpStore {
    client: Client,
    cache: SharedSnapshot,
    offline: bool,
    selected: std::sync::Mutex<Option<Uuid>>,
}

impl HttpStore {
    pub async fn connect(client: Client, offline: bool) -> std::result::Result<Self, ClientError> {
        let snapshot = fetch_snapshot(&client, client.wallets().await?).await?;
        Ok(Self {
            client,
            cache: SharedSnapshot::new(snapshot),
            offline,
            selected: std::sync::Mutex::new(None),
        })
    }
}

async fn fetch_snapshot(
    client: &Client,
    list: WalletList,
) -> std::result::Result<Snapshot, ClientError> {
    let transactions = client.transactions(TRANSACTION_PAGE).await?;
    let mut snapshot = Snapshot::from_list(list);
    snapshot.replace_transactions(transactions.transactions);
    Ok(snapshot)
}

#[async_trait]
impl WalletStore for HttpStore {
    fn wallets(&self) -> Vec<Arc<Wallet>> {
        self.cache.read(|snapshot| snapshot.wallets.clone())
    }

    fn balance(&self) -> Sats {
        self.cache.read(Snapshot::balance)
    }

    fn transactions(&self, wallet: Option<Uuid>, limit: usize) -> Vec<Transaction> {
        self.cache.read(|snapshot| snapshot.transactions(wallet, limit))
    }

    async fn refresh_all_wallet_transactions(
        &self,
        focus: Option<usize>,
        show_update_status: bool,
    ) -> ResultCollab<()> {
        tracing::info!(?focus, "refreshing wallets from server");
        let list = self
            .client
            .refresh(RefreshRequest {
                wallet_index: focus,
                show_update_status,
            })
            .await?;
        let snapshot = fetch_snapshot(&self.client, list).await?;
        self.cache.replace(snapshot);
        Ok(())
    }

    fn set_selected_wallet(&self, wallet: Option<Uuid>) {
        *self
            .selected
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = wallet;
    }

    fn is_electrum_disabled(&self) -> bool {
        self.offline || self.cache.read(|snapshot| snapshot.electrum_disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn client_errors_map_to_engine_errors() {
        assert_eq!(
            EngineError::from(ClientError::Unavailable("electrum down".to_string())),
            EngineError::Refresh("node unavailable: electrum down".to_string())
        );
        assert_eq!(
            EngineError::from(ClientError::NotFound),
            EngineError::Refresh("not found".to_string())
        );
    }

    #[test]
    fn endpoints_are_relative_to_base_url() {
        let client = Client::new("http://127.0.0.1:3000/api/").unwrap();
        assert_eq!(
            client.endpoint("wallets/refresh").unwrap().as_str(),
            "http://127.0.0.1:3000/api/wallets/refresh"
        );
        assert!(matches!(Client::new("not a url"), Err(AppError::InvalidUrl(_))));
    }
}
