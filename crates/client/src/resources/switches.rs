//! Switch and fronter endpoints
//!
//! Member lists are sent and returned in fronting order.

use chrono::{DateTime, SecondsFormat, Utc};
use pluralkit_domain::{Fronters, Result, Switch, SwitchCreate, SwitchPatch, SystemRef};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{invalid_argument, system_path};
use crate::api::{ApiRequest, PkClient};

/// Largest page the switch list endpoint returns.
pub const MAX_SWITCH_PAGE: u32 = 100;

impl PkClient {
    /// Switch history, newest first. `before` pages backwards; `limit`
    /// defaults to the server's page size.
    #[instrument(skip(self))]
    pub async fn get_system_switches(
        &self,
        system: &SystemRef,
        before: Option<DateTime<Utc>>,
        limit: Option<u32>,
    ) -> Result<Vec<Switch>> {
        if let Some(limit) = limit {
            if limit == 0 || limit > MAX_SWITCH_PAGE {
                return Err(invalid_argument("limit", "must be between 1 and 100"));
            }
        }

        let request = ApiRequest::get(format!("{}/switches", system_path(system)))
            .query_opt("before", before.map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .query_opt("limit", limit);
        let switches: Vec<Switch> = self.execute(request).await?;
        debug!(count = switches.len(), "switches listed");
        Ok(switches)
    }

    /// Current fronters; `None` when the system has no switches yet.
    #[instrument(skip(self))]
    pub async fn get_system_fronters(&self, system: &SystemRef) -> Result<Option<Fronters>> {
        self.execute(ApiRequest::get(format!("{}/fronters", system_path(system)))).await
    }

    /// Record a switch for the authenticated system.
    #[instrument(skip(self, switch), fields(members = switch.members.len()))]
    pub async fn create_switch(&self, switch: &SwitchCreate) -> Result<Fronters> {
        self.require_token()?;
        let created: Fronters =
            self.execute(ApiRequest::post(own_switches_path()).json(switch)?).await?;
        debug!(switch_id = %created.id, "switch created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_switch(&self, system: &SystemRef, switch_id: Uuid) -> Result<Fronters> {
        self.execute(ApiRequest::get(format!("{}/switches/{switch_id}", system_path(system))))
            .await
    }

    /// Move a switch to another point in time.
    #[instrument(skip(self, patch))]
    pub async fn update_switch(&self, switch_id: Uuid, patch: &SwitchPatch) -> Result<Fronters> {
        self.require_token()?;
        self.execute(ApiRequest::patch(own_switch_path(switch_id)).json(patch)?).await
    }

    /// Replace the members of a switch, keeping the given order.
    #[instrument(skip(self, member_ids), fields(members = member_ids.len()))]
    pub async fn update_switch_members<S: AsRef<str>>(
        &self,
        switch_id: Uuid,
        member_ids: &[S],
    ) -> Result<Fronters> {
        self.require_token()?;
        let ids: Vec<&str> = member_ids.iter().map(|id| id.as_ref()).collect();
        let request =
            ApiRequest::patch(format!("{}/members", own_switch_path(switch_id))).json(&ids)?;
        self.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_switch(&self, switch_id: Uuid) -> Result<()> {
        self.require_token()?;
        self.execute(ApiRequest::delete(own_switch_path(switch_id))).await
    }
}

fn own_switches_path() -> String {
    format!("{}/switches", system_path(&SystemRef::Me))
}

fn own_switch_path(switch_id: Uuid) -> String {
    format!("{}/{switch_id}", own_switches_path())
}
