//! Persisted session slot and the in-memory session context.
//!
//! The slot is a single JSON file named after [`SESSION_KEY`] inside the
//! configured session directory. It holds the [`UserSession`] verbatim.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use fraudshield_core::session::UserSession;
use fraudshield_core::transaction::TransactionResult;
use fraudshield_core::types::Money;

/// Fixed key of the session slot.
pub const SESSION_KEY: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed key-value slot for the signed-in user.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Location of the slot on disk.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{SESSION_KEY}.json"))
    }

    /// Read the slot. `None` when nobody is signed in.
    pub async fn load(&self) -> Result<Option<UserSession>, SessionError> {
        match tokio::fs::read(self.path()).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the slot. Written to a sibling file first and renamed so
    /// a crash never leaves a half-written session behind.
    pub async fn save(&self, session: &UserSession) -> Result<(), SessionError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_vec(session)?;
        let path = self.path();
        let tmp = tmp_path(&path);
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Remove the slot. Returns whether there was anything to remove.
    pub async fn clear(&self) -> Result<bool, SessionError> {
        match tokio::fs::remove_file(self.path()).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// The signed-in user, shared by every flow of one dashboard.
///
/// Readers take snapshots. The only write path is
/// [`apply_result`](Self::apply_result), which the payment flow owns.
/// At most one submission holds the session at a time, whichever
/// controller started it.
#[derive(Debug)]
pub struct SessionContext {
    store: SessionStore,
    user: RwLock<UserSession>,
    submitting: AtomicBool,
}

impl SessionContext {
    /// Persist a freshly authenticated user and wrap it in a context.
    pub async fn establish(store: SessionStore, user: UserSession) -> Result<Self, SessionError> {
        store.save(&user).await?;
        tracing::info!(username = %user.username, "Session established");
        Ok(Self {
            store,
            user: RwLock::new(user),
            submitting: AtomicBool::new(false),
        })
    }

    /// Restore the persisted session, if any.
    pub async fn restore(store: SessionStore) -> Result<Option<Self>, SessionError> {
        Ok(store.load().await?.map(|user| Self {
            store,
            user: RwLock::new(user),
            submitting: AtomicBool::new(false),
        }))
    }

    pub async fn snapshot(&self) -> UserSession {
        self.user.read().await.clone()
    }

    pub async fn balance(&self) -> Money {
        self.user.read().await.balance
    }

    /// Claim the session for one submission. `None` while another
    /// submission holds it.
    pub(crate) fn try_claim_submission(&self) -> Option<SubmissionClaim<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionClaim {
                flag: &self.submitting,
            })
    }

    /// Settle a payment result into the session.
    ///
    /// Fraud-flagged results never touch the balance. Returns whether the
    /// balance changed.
    pub(crate) async fn apply_result(&self, result: &TransactionResult) -> Result<bool, SessionError> {
        if result.is_fraud {
            return Ok(false);
        }

        let mut user = self.user.write().await;
        let mut updated = user.clone();
        updated.balance = result.new_balance;
        self.store.save(&updated).await?;
        *user = updated;

        tracing::info!(
            username = %user.username,
            balance = user.balance,
            "Balance updated",
        );
        Ok(true)
    }

    /// Sign out: drop the context and clear the slot.
    pub async fn end(self) -> Result<(), SessionError> {
        let username = self.user.into_inner().username;
        self.store.clear().await?;
        tracing::info!(%username, "Session ended");
        Ok(())
    }
}

/// Exclusive hold on a session's submission slot, released on drop.
#[derive(Debug)]
pub(crate) struct SubmissionClaim<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmissionClaim<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
