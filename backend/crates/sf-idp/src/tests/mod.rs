
use crate::{IdentityProvider, IdpError, IdpResult};

use sf_core::{ExternalIdentity, IdentityId};

use std::sync::Mutex;

use async_trait::async_trait;

/// In-memory provider serving `users` in pages, counting requests
pub(crate) struct PagedProvider {
    users: Vec<ExternalIdentity>,
    pub(crate) requested_pages: Mutex<Vec<u32>>,
    fail_with_status: Option<u16>,
    page_cap: Option<u32>,
}

impl PagedProvider {
    pub(crate) fn new(users: Vec<(&str, Option<&str>)>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|(id, email)| ExternalIdentity {
                    id: IdentityId::from(id),
                    email: email.map(String::from),
                })
                .collect(),
            requested_pages: Mutex::new(Vec::new()),
            fail_with_status: None,
            page_cap: None,
        }
    }

    /// Serves at most `cap` users per page whatever `per_page` asks for.
    pub(crate) fn capped(mut self, cap: u32) -> Self {
        self.page_cap = Some(cap);
        self
    }

    pub(crate) fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::new(Vec::new())
        }
    }
}

#[async_trait]
impl IdentityProvider for PagedProvider {
    async fn list_users(&self, page: u32, per_page: u32) -> IdpResult<Vec<ExternalIdentity>> {
        self.requested_pages.lock().unwrap().push(page);

        if let Some(status) = self.fail_with_status {
            return Err(IdpError::from_status(status, "boom".to_string()));
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
