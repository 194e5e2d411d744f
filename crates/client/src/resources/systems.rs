//! System, settings and autoproxy endpoints

use pluralkit_domain::{
    AutoproxyPatch, AutoproxySettings, Result, System, SystemGuildSettings,
    SystemGuildSettingsPatch, SystemPatch, SystemRef, SystemSettings, SystemSettingsPatch,
};
use tracing::instrument;

use super::system_path;
use crate::api::{ApiRequest, PkClient};

impl PkClient {
    /// Fetch a system by short id, UUID, Discord account or `@me`.
    #[instrument(skip(self))]
    pub async fn get_system(&self, system: &SystemRef) -> Result<System> {
        self.execute(ApiRequest::get(system_path(system))).await
    }

    /// Update fields of a system; unchanged fields are not sent.
    #[instrument(skip(self, patch))]
    pub async fn update_system(&self, system: &SystemRef, patch: &SystemPatch) -> Result<System> {
        self.require_token()?;
        self.execute(ApiRequest::patch(system_path(system)).json(patch)?).await
    }

    #[instrument(skip(self))]
    pub async fn get_system_settings(&self, system: &SystemRef) -> Result<SystemSettings> {
        self.execute(ApiRequest::get(format!("{}/settings", system_path(system)))).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_system_settings(
        &self,
        system: &SystemRef,
        patch: &SystemSettingsPatch,
    ) -> Result<SystemSettings> {
        self.require_token()?;
        self.execute(ApiRequest::patch(format!("{}/settings", system_path(system))).json(patch)?)
            .await
    }

    /// Per-guild settings of the authenticated system.
    #[instrument(skip(self))]
    pub async fn get_system_guild_settings(&self, guild_id: u64) -> Result<SystemGuildSettings> {
        self.require_token()?;
        self.execute(ApiRequest::get(guild_path(guild_id))).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_system_guild_settings(
        &self,
        guild_id: u64,
        patch: &SystemGuildSettingsPatch,
    ) -> Result<SystemGuildSettings> {
        self.require_token()?;
        self.execute(ApiRequest::patch(guild_path(guild_id)).json(patch)?).await
    }

    /// Autoproxy state in a guild, or in one channel of it.
    #[instrument(skip(self))]
    pub async fn get_autoproxy_settings(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
    ) -> Result<AutoproxySettings> {
        self.require_token()?;
        self.execute(autoproxy_request(ApiRequest::get(AUTOPROXY_PATH), guild_id, channel_id))
            .await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_autoproxy_settings(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
        patch: &AutoproxyPatch,
    ) -> Result<AutoproxySettings> {
        self.require_token()?;
        let request = ApiRequest::patch(AUTOPROXY_PATH).json(patch)?;
        self.execute(autoproxy_request(request, guild_id, channel_id)).await
    }
}

const AUTOPROXY_PATH: &str = "systems/@me/autoproxy";

fn guild_path(guild_id: u64) -> String {
    format!("{}/guilds/{guild_id}", system_path(&SystemRef::Me))
}

fn autoproxy_request(request: ApiRequest, guild_id: u64, channel_id: Option<u64>) -> ApiRequest {
    request.query("guild_id", guild_id).query_opt("channel_id", channel_id)
}
