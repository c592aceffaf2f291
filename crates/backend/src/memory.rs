//! In-process stand-in for the hosted backend.
//!
//! Behaves like the real service where the panel can observe it: listings
//! come back ordered by `active`, unknown e-mails are accepted for password
//! reset, and a second reset request for the same address is rate limited.

use std::sync::Mutex;

use async_trait::async_trait;
use panel_core::profile::{order_by_active, Profile, ProfileUpdate};

use crate::error::BackendError;
use crate::{AuthSession, Backend};

#[derive(Debug, Clone)]
struct Account {
    email: String,
    password: String,
    user_id: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    accounts: Vec<Account>,
    profiles: Vec<Profile>,
    reset_requests: Vec<String>,
    fail_writes: bool,
    unavailable: bool,
    unordered_listing: bool,
}

/// Fake backend holding accounts and profile rows in memory.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<MemoryState>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register sign-in credentials for a subject.
    pub fn with_account(self, email: &str, password: &str, user_id: &str) -> Self {
        self.lock().accounts.push(Account {
            email: email.to_string(),
            password: password.to_string(),
            user_id: user_id.to_string(),
        });
        self
    }

    /// Seed a profile row.
    pub fn with_profile(self, profile: Profile) -> Self {
        self.lock().profiles.push(profile);
        self
    }

    /// Make every profile update fail with a 500 from the query layer.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Return listings in insertion order, ignoring the requested ordering.
    pub fn set_unordered_listing(&self, unordered: bool) {
        self.lock().unordered_listing = unordered;
    }

    /// Make every call fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Change a stored role directly, as provisioning outside the panel would.
    pub fn set_role(&self, user_id: &str, role: &str) {
        let mut state = self.lock();
        if let Some(p) = state.profiles.iter_mut().find(|p| p.user_id == user_id) {
            p.role = role.to_string();
        }
    }

    /// Snapshot of a stored row.
    pub fn profile(&self, user_id: &str) -> Option<Profile> {
        self.lock()
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
    }

    /// Addresses a reset link was sent to, in request order.
    pub fn reset_requests(&self) -> Vec<String> {
        self.lock().reset_requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().expect("in-memory backend lock poisoned")
    }

    fn check_available(state: &MemoryState) -> Result<(), BackendError> {
        if state.unavailable {
            return Err(BackendError::Api {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let state = self.lock();
        Self::check_available(&state)?;
        state
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| AuthSession {
                user_id: a.user_id.clone(),
                email: a.email.clone(),
            })
            .ok_or(BackendError::InvalidCredentials)
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        _redirect_to: &str,
    ) -> Result<(), BackendError> {
        let mut state = self.lock();
        Self::check_available(&state)?;
        if state.reset_requests.iter().any(|e| e == email) {
            return Err(BackendError::RateLimited);
        }
        state.reset_requests.push(email.to_string());
        Ok(())
    }

    async fn fetch_role(&self, user_id: &str) -> Result<Option<String>, BackendError> {
        let state = self.lock();
        Self::check_available(&state)?;
        Ok(state
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .map(|p| p.role.clone()))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, BackendError> {
        let state = self.lock();
        Self::check_available(&state)?;
        let mut rows = state.profiles.clone();
        if !state.unordered_listing {
            order_by_active(&mut rows);
        }
        Ok(rows)
    }

    async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, BackendError> {
        let state = self.lock();
        Self::check_available(&state)?;
        Ok(state
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Option<Profile>, BackendError> {
        let mut state = self.lock();
        Self::check_available(&state)?;
        if state.fail_writes {
            return Err(BackendError::Api {
                status: 500,
                body: "write rejected".to_string(),
            });
        }
        Ok(state
            .profiles
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .map(|p| {
                p.apply(update);
                p.clone()
            }))
    }
}
