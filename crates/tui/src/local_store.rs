use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use api_types::wallet::WalletList;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deck_engine::{
    EngineError, Sats, Transaction, Wallet,
    collab::{ResultCollab, WalletStore},
};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    snapshot::{SharedSnapshot, Snapshot},
};

/// Wallet store backed by a JSON file on disk.
///
/// A refresh re-reads the file, so edits made while the screen is open show
/// up, and stamps the refreshed wallets as checked.
pub struct FileStore {
    path: PathBuf,
    cache: SharedSnapshot,
    offline: bool,
    selected: Mutex<Option<Uuid>>,
}

impl FileStore {
    /// Opens the store. A missing file is an empty wallet collection.
    pub fn open(path: impl Into<PathBuf>, offline: bool) -> Result<Self> {
        let path = path.into();
        let list = match std::fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| AppError::WalletsFile {
                    path: path.display().to_string(),
                    source,
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => WalletList::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            cache: SharedSnapshot::new(Snapshot::from_list(list)),
            offline,
            selected: Mutex::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn reload(&self) -> ResultCollab<Snapshot> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| EngineError::StoreUnavailable(format!("{}: {err}", self.path.display())))?;
        let list: WalletList = serde_json::from_str(&content)
            .map_err(|err| EngineError::Refresh(format!("malformed wallets file: {err}")))?;
        Ok(Snapshot::from_list(list))
    }

    async fn persist(&self, snapshot: &Snapshot) -> ResultCollab<()> {
        let payload = serde_json::to_string_pretty(&snapshot.to_list())
            .map_err(|err| EngineError::Refresh(err.to_string()))?;
        tokio::fs::write(&self.path, payload)
            .await
            .map_err(|err| EngineError::StoreUnavailable(format!("{}: {err}", self.path.display())))
    }
}

/// Marks the wallet at `focus` (or every wallet) as just checked.
fn stamp(snapshot: &mut Snapshot, focus: Option<usize>, now: DateTime<Utc>) -> ResultCollab<()> {
    let indices = match focus {
        Some(index) if index < snapshot.wallets.len() => index..index + 1,
        Some(index) => return Err(EngineError::KeyNotFound(format!("wallet #{index}"))),
        None => 0..snapshot.wallets.len(),
    };
    for index in indices {
        let wallet = Arc::make_mut(&mut snapshot.wallets[index]);
        wallet.mark_checked(now);
    }
    Ok(())
}

#[async_trait]
impl WalletStore for FileStore {
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
        _show_update_status: bool,
    ) -> ResultCollab<()> {
        tracing::info!(?focus, path = %self.path.display(), "refreshing wallets from file");
        let mut snapshot = self.reload().await?;
        stamp(&mut snapshot, focus, Utc::now())?;
        self.persist(&snapshot).await?;
        self.cache.replace(snapshot);
        Ok(())
    }

    fn set_selected_wallet(&self, wallet: Option<Uuid>) {
        *self.selected.lock().unwrap_or_else(PoisonError::into_inner) = wallet;
    }

    fn is_electrum_disabled(&self) -> bool {
        self.offline || self.cache.read(|snapshot| snapshot.electrum_disabled)
    }
}
