//! In-memory [`RecordStore`] used by unit and handler tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use hazreg_postgres::model::{Location, SiteRegister, User, UserAccess};
use hazreg_postgres::query::Pagination;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::RecordStore;
use crate::extract::auth::LocationFilter;
use crate::service::{Error, Result};

#[derive(Debug, Default)]
struct Records {
    users: Vec<UserAccess>,
    locations: Vec<Location>,
    site_registers: Vec<SiteRegister>,
}

/// Store backed by vectors, with switches to simulate outages and latency.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Records>>,
    failing: Arc<AtomicBool>,
    lookup_delay: Arc<RwLock<Option<Duration>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_location(&self, name: &str) -> Uuid {
        let location = Location {
            id: Uuid::now_v7(),
            parent_id: None,
            name: name.to_owned(),
        };
        let id = location.id;
        self.records.write().await.locations.push(location);
        id
    }

    pub async fn add_user(
        &self,
        email: &str,
        password_hash: Option<String>,
        location_id: Option<Uuid>,
        role_names: &[&str],
    ) -> Uuid {
        self.add_user_with_status(email, password_hash, location_id, role_names, true)
            .await
    }

    pub async fn add_user_with_status(
        &self,
        email: &str,
        password_hash: Option<String>,
        location_id: Option<Uuid>,
        role_names: &[&str],
        is_active: bool,
    ) -> Uuid {
        let user = User {
            id: Uuid::now_v7(),
            email: email.to_owned(),
            display_name: email.to_owned(),
            password_hash,
            location_id,
            manager_id: None,
            is_active,
        };
        let id = user.id;
        let mut role_names: Vec<String> = role_names.iter().map(|&name| name.to_owned()).collect();
        role_names.sort();

        self.records
            .write()
            .await
            .users
            .push(UserAccess { user, role_names });
        id
    }

    pub async fn add_site_register(&self, location_id: Uuid, product_name: &str) -> Uuid {
        let row = SiteRegister {
            id: Uuid::now_v7(),
            location_id,
            product_name: product_name.to_owned(),
            storage_area: None,
            quantity: None,
            unit: None,
        };
        let id = row.id;
        self.records.write().await.site_registers.push(row);
        id
    }

    /// Makes every subsequent call fail as if the backend were down.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delays every user lookup, to hold a resolution cycle open.
    pub async fn set_lookup_delay(&self, delay: Option<Duration>) {
        *self.lookup_delay.write().await = delay;
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::external("memory", "store unavailable"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn find_user_access(&self, email: &str) -> Result<Option<UserAccess>> {
        let delay = *self.lookup_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_available()?;

        let records = self.records.read().await;
        let access = records
            .users
            .iter()
            .find(|access| access.user.is_active && access.user.email.eq_ignore_ascii_case(email))
            .cloned();
        Ok(access)
    }

    async fn list_locations(&self, pagination: Pagination) -> Result<Vec<Location>> {
        self.check_available()?;

        let mut locations = self.records.read().await.locations.clone();
        locations.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(pagination.slice(&locations))
    }

    async fn list_site_registers(
        &self,
        filter: &LocationFilter,
        pagination: Pagination,
    ) -> Result<Vec<SiteRegister>> {
        self.check_available()?;
        if filter.matches_nothing() {
            return Ok(Vec::new());
        }

        let mut rows: Vec<SiteRegister> = self
            .records
            .read()
            .await
            .site_registers
            .iter()
            .filter(|row| filter.matches(row.location_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.product_name.cmp(&b.product_name).then(a.id.cmp(&b.id)));
        Ok(pagination.slice(&rows))
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}
