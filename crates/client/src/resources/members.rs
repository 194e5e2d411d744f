//! Member endpoints

use pluralkit_domain::{
    Group, Member, MemberGuildSettings, MemberGuildSettingsPatch, MemberPatch, Result, SystemRef,
};
use tracing::{debug, instrument};

use super::{invalid_argument, segment, system_path};
use crate::api::{ApiRequest, PkClient};

impl PkClient {
    /// Members of a system, in the order the API returns them.
    #[instrument(skip(self))]
    pub async fn get_system_members(&self, system: &SystemRef) -> Result<Vec<Member>> {
        let members: Vec<Member> =
            self.execute(ApiRequest::get(format!("{}/members", system_path(system)))).await?;
        debug!(count = members.len(), "members listed");
        Ok(members)
    }

    /// Create a member in the authenticated system. `patch.name` is required.
    #[instrument(skip(self, patch))]
    pub async fn create_member(&self, patch: &MemberPatch) -> Result<Member> {
        self.require_token()?;
        if !patch.name.is_set() {
            return Err(invalid_argument("name", "required when creating a member"));
        }
        let member: Member = self.execute(ApiRequest::post("members").json(patch)?).await?;
        debug!(member_id = %member.id, "member created");
        Ok(member)
    }

    /// Fetch a member by short id or UUID.
    #[instrument(skip(self))]
    pub async fn get_member(&self, member: &str) -> Result<Member> {
        self.execute(ApiRequest::get(member_path(member))).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_member(&self, member: &str, patch: &MemberPatch) -> Result<Member> {
        self.require_token()?;
        self.execute(ApiRequest::patch(member_path(member)).json(patch)?).await
    }

    #[instrument(skip(self))]
    pub async fn delete_member(&self, member: &str) -> Result<()> {
        self.require_token()?;
        self.execute(ApiRequest::delete(member_path(member))).await
    }

    /// Groups the member belongs to.
    #[instrument(skip(self))]
    pub async fn get_member_groups(&self, member: &str) -> Result<Vec<Group>> {
        self.execute(ApiRequest::get(format!("{}/groups", member_path(member)))).await
    }

    /// Add the member to the given groups.
    #[instrument(skip(self, group_ids), fields(groups = group_ids.len()))]
    pub async fn add_member_groups<S: AsRef<str>>(
        &self,
        member: &str,
        group_ids: &[S],
    ) -> Result<()> {
        self.member_groups_action(member, "add", group_ids).await
    }

    /// Remove the member from the given groups.
    #[instrument(skip(self, group_ids), fields(groups = group_ids.len()))]
    pub async fn remove_member_groups<S: AsRef<str>>(
        &self,
        member: &str,
        group_ids: &[S],
    ) -> Result<()> {
        self.member_groups_action(member, "remove", group_ids).await
    }

    /// Replace the member's groups with exactly the given ones.
    #[instrument(skip(self, group_ids), fields(groups = group_ids.len()))]
    pub async fn overwrite_member_groups<S: AsRef<str>>(
        &self,
        member: &str,
        group_ids: &[S],
    ) -> Result<()> {
        self.member_groups_action(member, "overwrite", group_ids).await
    }

    #[instrument(skip(self))]
    pub async fn get_member_guild_settings(
        &self,
        member: &str,
        guild_id: u64,
    ) -> Result<MemberGuildSettings> {
        self.require_token()?;
        self.execute(ApiRequest::get(member_guild_path(member, guild_id))).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_member_guild_settings(
        &self,
        member: &str,
        guild_id: u64,
        patch: &MemberGuildSettingsPatch,
    ) -> Result<MemberGuildSettings> {
        self.require_token()?;
        self.execute(ApiRequest::patch(member_guild_path(member, guild_id)).json(patch)?).await
    }

    async fn member_groups_action<S: AsRef<str>>(
        &self,
        member: &str,
        action: &str,
        group_ids: &[S],
    ) -> Result<()> {
        self.require_token()?;
        let ids: Vec<&str> = group_ids.iter().map(|id| id.as_ref()).collect();
        let request =
            ApiRequest::post(format!("{}/groups/{action}", member_path(member))).json(&ids)?;
        self.execute(request).await
    }
}

fn member_path(member: &str) -> String {
    format!("members/{}", segment(member))
}

fn member_guild_path(member: &str, guild_id: u64) -> String {
    format!("{}/guilds/{guild_id}", member_path(member))
}
