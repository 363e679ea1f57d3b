use sf_core::{ExternalIdentity, IdentityId};
use sf_idp::{IdentityProvider, IdpError, IdpResult};

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

/// Identity provider double serving a fixed user list.
///
/// Can be told to fail every call, or only the first few, with a given HTTP
/// status, or to serve fewer users per page than requested.
pub struct FakeProvider {
    users: Vec<ExternalIdentity>,
    page_cap: Option<u32>,
    failure_status: Option<u16>,
    failures_left: AtomicU32,
    pub calls: AtomicU32,
}

impl FakeProvider {
    pub fn empty() -> Self {
        Self::with_users(&[])
    }

    pub fn with_users(users: &[(&str, &str)]) -> Self {
        Self {
            users: users
                .iter()
                .map(|(id, email)| ExternalIdentity {
                    id: IdentityId::from(*id),
                    email: Some(email.to_string()),
                })
                .collect(),
            page_cap: None,
            failure_status: None,
            failures_left: AtomicU32::new(0),
            calls: AtomicU32::new(0),
        }
    }

    /// Fails every call with `status`
    pub fn failing(status: u16) -> Self {
        Self {
            failure_status: Some(status),
            failures_left: AtomicU32::new(u32::MAX),
            ..Self::empty()
        }
    }

    /// Fails the first `times` calls with `status`, then serves normally
    pub fn flaky(self, status: u16, times: u32) -> Self {
        Self {
            failure_status: Some(status),
            failures_left: AtomicU32::new(times),
            ..self
        }
    }

    /// Serves at most `cap` users per page, ignoring larger `per_page` values
    pub fn capped(self, cap: u32) -> Self {
        Self {
            page_cap: Some(cap),
            ..self
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn list_users(&self, page: u32, per_page: u32) -> IdpResult<Vec<ExternalIdentity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.failure_status {
            let should_fail = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
                .is_ok();
            if should_fail {
                return Err(IdpError::from_status(status, "simulated failure".to_string()));
            }
        }

        let per_page = self.page_cap.map_or(per_page, |cap| per_page.min(cap));
        let start = ((page - 1) * per_page) as usize;
        Ok(self
            .users
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect())
    }
}
