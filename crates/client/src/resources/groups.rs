//! Group endpoints

use pluralkit_domain::{Group, GroupPatch, Member, Result, SystemRef};
use tracing::{debug, instrument};

use super::{invalid_argument, segment, system_path};
use crate::api::{ApiRequest, PkClient};

impl PkClient {
    /// Groups of a system. With `with_members`, each group carries its
    /// member UUIDs.
    #[instrument(skip(self))]
    pub async fn get_system_groups(
        &self,
        system: &SystemRef,
        with_members: bool,
    ) -> Result<Vec<Group>> {
        let mut request = ApiRequest::get(format!("{}/groups", system_path(system)));
        if with_members {
            request = request.query("with_members", true);
        }
        let groups: Vec<Group> = self.execute(request).await?;
        debug!(count = groups.len(), "groups listed");
        Ok(groups)
    }

    /// Create a group in the authenticated system. `patch.name` is required.
    #[instrument(skip(self, patch))]
    pub async fn create_group(&self, patch: &GroupPatch) -> Result<Group> {
        self.require_token()?;
        if !patch.name.is_set() {
            return Err(invalid_argument("name", "required when creating a group"));
        }
        let group: Group = self.execute(ApiRequest::post("groups").json(patch)?).await?;
        debug!(group_id = %group.id, "group created");
        Ok(group)
    }

    #[instrument(skip(self))]
    pub async fn get_group(&self, group: &str) -> Result<Group> {
        self.execute(ApiRequest::get(group_path(group))).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_group(&self, group: &str, patch: &GroupPatch) -> Result<Group> {
        self.require_token()?;
        self.execute(ApiRequest::patch(group_path(group)).json(patch)?).await
    }

    #[instrument(skip(self))]
    pub async fn delete_group(&self, group: &str) -> Result<()> {
        self.require_token()?;
        self.execute(ApiRequest::delete(group_path(group))).await
    }

    #[instrument(skip(self))]
    pub async fn get_group_members(&self, group: &str) -> Result<Vec<Member>> {
        self.execute(ApiRequest::get(format!("{}/members", group_path(group)))).await
    }

    #[instrument(skip(self, member_ids), fields(members = member_ids.len()))]
    pub async fn add_group_members<S: AsRef<str>>(
        &self,
        group: &str,
        member_ids: &[S],
    ) -> Result<()> {
        self.group_members_action(group, "add", member_ids).await
    }

    #[instrument(skip(self, member_ids), fields(members = member_ids.len()))]
    pub async fn remove_group_members<S: AsRef<str>>(
        &self,
        group: &str,
        member_ids: &[S],
    ) -> Result<()> {
        self.group_members_action(group, "remove", member_ids).await
    }

    /// Replace the group's members with exactly the given ones.
    #[instrument(skip(self, member_ids), fields(members = member_ids.len()))]
    pub async fn overwrite_group_members<S: AsRef<str>>(
        &self,
        group: &str,
        member_ids: &[S],
    ) -> Result<()> {
        self.group_members_action(group, "overwrite", member_ids).await
    }

    async fn group_members_action<S: AsRef<str>>(
        &self,
        group: &str,
        action: &str,
        member_ids: &[S],
    ) -> Result<()> {
        self.require_token()?;
        let ids: Vec<&str> = member_ids.iter().map(|id| id.as_ref()).collect();
        let request =
            ApiRequest::post(format!("{}/members/{action}", group_path(group))).json(&ids)?;
        self.execute(request).await
    }
}

fn group_path(group: &str) -> String {
    format!("groups/{}", segment(group))
}
