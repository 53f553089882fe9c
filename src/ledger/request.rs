//! Account requests and the approval workflow

use chrono::NaiveDateTime;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tracing::{debug, info};

use crate::ledger::{Account, IdGenerator, Ledger};
use crate::traits::AccountStore;
use crate::types::*;

/// Status plus the time it stopped being pending
#[derive(Debug)]
struct Resolution {
    status: RequestStatus,
    resolved_at: Option<NaiveDateTime>,
}

/// An ask, raised by an existing account holder, to open an account for
/// someone else
///
/// The target identifier is reserved when the request is submitted and is
/// used verbatim if the request is approved.
pub struct AccountRequest {
    target_id: String,
    requester_id: String,
    holder_name: String,
    phone: String,
    secret: String,
    submitted_at: NaiveDateTime,
    resolution: Mutex<Resolution>,
}

impl AccountRequest {
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn requester_id(&self) -> &str {
        &self.requester_id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn submitted_at(&self) -> NaiveDateTime {
        self.submitted_at
    }

    pub fn status(&self) -> LedgerResult<RequestStatus> {
        Ok(self.resolution()?.status)
    }

    pub fn resolved_at(&self) -> LedgerResult<Option<NaiveDateTime>> {
        Ok(self.resolution()?.resolved_at)
    }

    pub fn is_pending(&self) -> LedgerResult<bool> {
        Ok(self.status()? == RequestStatus::Pending)
    }

    /// Lock the resolution, failing unless the request is still pending
    fn lock_pending(&self) -> LedgerResult<MutexGuard<'_, Resolution>> {
        let resolution = self.resolution()?;
        if resolution.status.is_terminal() {
            return Err(LedgerError::AlreadyResolved {
                id: self.target_id.clone(),
                status: resolution.status,
            });
        }
        Ok(resolution)
    }

    fn resolution(&self) -> LedgerResult<MutexGuard<'_, Resolution>> {
        self.resolution.lock().map_err(|_| {
            LedgerError::Storage(format!("request {} lock poisoned", self.target_id))
        })
    }
}

impl std::fmt::Debug for AccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRequest")
            .field("target_id", &self.target_id)
            .field("requester_id", &self.requester_id)
            .field("holder_name", &self.holder_name)
            .field("phone", &self.phone)
            .field("submitted_at", &self.submitted_at)
            .field("resolution", &self.resolution)
            .finish_non_exhaustive()
    }
}

/// Ordered store of account requests
///
/// Requests are never removed; resolved ones stay as an audit trail.
pub struct RequestQueue {
    ids: Arc<IdGenerator>,
    requests: RwLock<Vec<Arc<AccountRequest>>>,
}

impl RequestQueue {
    /// Create a queue that reserves identifiers from the identifier space of
    /// `ledger`
    pub fn for_ledger<S: AccountStore>(ledger: &Ledger<S>) -> Self {
        Self {
            ids: ledger.id_generator(),
            requests: RwLock::new(Vec::new()),
        }
    }

    /// Record a new pending request and reserve its target identifier
    ///
    /// The requester is taken as already verified by the caller.
    pub fn submit(
        &self,
        requester_id: &str,
        holder_name: &str,
        phone: &str,
        secret: &str,
    ) -> LedgerResult<Arc<AccountRequest>> {
        let mut requests = self.write()?;

        let request = Arc::new(AccountRequest {
            target_id: self.ids.next_id(),
            requester_id: requester_id.to_string(),
            holder_name: holder_name.to_string(),
            phone: phone.to_string(),
            secret: secret.to_string(),
            submitted_at: chrono::Utc::now().naive_utc(),
            resolution: Mutex::new(Resolution {
                status: RequestStatus::Pending,
                resolved_at: None,
            }),
        });
        requests.push(Arc::clone(&request));

        info!(
            target_id = %request.target_id,
            requester_id,
            "account request submitted"
        );
        Ok(request)
    }

    /// Pending requests in submission order
    pub fn list_pending(&self) -> LedgerResult<impl Iterator<Item = Arc<AccountRequest>>> {
        let mut pending = Vec::new();
        for request in self.read()?.iter() {
            if request.is_pending()? {
                pending.push(Arc::clone(request));
            }
        }
        Ok(pending.into_iter())
    }

    /// Every request ever submitted, in submission order
    pub fn list_all(&self) -> LedgerResult<impl Iterator<Item = Arc<AccountRequest>>> {
        Ok(self.read()?.clone().into_iter())
    }

    /// Requests raised by one account holder, in submission order
    pub fn requests_by(
        &self,
        requester_id: &str,
    ) -> LedgerResult<impl Iterator<Item = Arc<AccountRequest>>> {
        let matching: Vec<_> = self
            .read()?
            .iter()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();
        Ok(matching.into_iter())
    }

    /// Find a request by its reserved target identifier
    pub fn find(&self, target_id: &str) -> LedgerResult<Option<Arc<AccountRequest>>> {
        Ok(self
            .read()?
            .iter()
            .find(|r| r.target_id == target_id)
            .cloned())
    }

    /// Find a request by its reserved target identifier, returning an error if not found
    pub fn find_required(&self, target_id: &str) -> LedgerResult<Arc<AccountRequest>> {
        self.find(target_id)?
            .ok_or_else(|| LedgerError::RequestNotFound(target_id.to_string()))
    }

    /// Provision the requested account and mark the request approved
    ///
    /// The status stays locked while the ledger materializes the account, so
    /// a concurrent approve or deny cannot slip in between. If the ledger
    /// rejects the account (e.g. a bad phone) the request stays pending.
    pub fn approve<S: AccountStore>(
        &self,
        request: &AccountRequest,
        ledger: &Ledger<S>,
    ) -> LedgerResult<Arc<Account>> {
        let mut resolution = request.lock_pending()?;

        let account = match ledger.materialize(
            &request.target_id,
            &request.holder_name,
            &request.phone,
            &request.secret,
        ) {
            Ok(account) => account,
            Err(e) => {
                debug!(
                    target_id = %request.target_id,
                    "approval failed, request stays pending: {e}"
                );
                return Err(e);
            }
        };

        resolution.status = RequestStatus::Approved;
        resolution.resolved_at = Some(chrono::Utc::now().naive_utc());

        info!(target_id = %request.target_id, "account request approved");
        Ok(account)
    }

    /// Mark a pending request denied; the ledger is not touched
    pub fn deny(&self, request: &AccountRequest) -> LedgerResult<()> {
        let mut resolution = request.lock_pending()?;
        resolution.status = RequestStatus::Denied;
        resolution.resolved_at = Some(chrono::Utc::now().naive_utc());

        info!(target_id = %request.target_id, "account request denied");
        Ok(())
    }

    pub fn len(&self) -> LedgerResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, Vec<Arc<AccountRequest>>>> {
        self.requests
            .read()
            .map_err(|_| LedgerError::Storage("request queue lock poisoned".to_string()))
    }

    fn write(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, Vec<Arc<AccountRequest>>>> {
        self.requests
            .write()
            .map_err(|_| LedgerError::Storage("request queue lock poisoned".to_string()))
    }
}
