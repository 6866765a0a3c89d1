//! SCIM group resource

use super::{set_if_present, DataSource, Resource, ResourceData};
use crate::api::{Session, UaaGroup};
use crate::error::Result;
use async_trait::async_trait;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupModel {
    pub display_name: String,
    pub description: String,
    /// Reported by the server when left empty
    pub zone_id: String,
}

impl GroupModel {
    pub fn apply(&mut self, group: &UaaGroup) {
        self.display_name = group.display_name.clone();
        self.description = group.description.clone();
        set_if_present(&mut self.zone_id, &group.zone_id);
    }
}

pub struct GroupResource;

#[async_trait]
impl Resource for GroupResource {
    type Model = GroupModel;

    async fn create(&self, session: &Session, data: &mut ResourceData<GroupModel>) -> Result<()> {
        let desired = &data.desired;
        let group = session
            .group_manager()
            .create_group(&desired.display_name, &desired.description, &desired.zone_id)
            .await?;

        data.id = group.id.clone();
        data.desired.apply(&group);
        Ok(())
    }

    async fn read(&self, session: &Session, data: &mut ResourceData<GroupModel>) -> Result<()> {
        let group = session
            .group_manager()
            .get_group(&data.id, &data.desired.zone_id)
            .await?;

        debug!(group_id = %data.id, display_name = %group.display_name, "Group retrieved");
        data.desired.apply(&group);
        Ok(())
    }

    async fn update(&self, session: &Session, data: &mut ResourceData<GroupModel>) -> Result<()> {
        let mut modified = false;
        let display_name = data.changed_value(|m| &m.display_name, &mut modified);
        let description = data.changed_value(|m| &m.description, &mut modified);

        if !modified {
            return Ok(());
        }

        let group = session
            .group_manager()
            .update_group(&data.id, &display_name, &description, &data.desired.zone_id)
            .await?;

        debug!(group_id = %data.id, "Group updated");
        data.desired.apply(&group);
        Ok(())
    }

    async fn delete(&self, session: &Session, data: &ResourceData<GroupModel>) -> Result<()> {
        session
            .group_manager()
            .delete_group(&data.id, &data.desired.zone_id)
            .await
    }
}

/// Looks a group up by display name
pub struct GroupDataSource;

#[async_trait]
impl DataSource for GroupDataSource {
    type Model = GroupModel;

    async fn read(&self, session: &Session, data: &mut ResourceData<GroupModel>) -> Result<()> {
        let group = session
            .group_manager()
            .find_by_display_name(&data.desired.display_name, &data.desired.zone_id)
            .await?;

        data.id = group.id.clone();
        data.desired.apply(&group);
        Ok(())
    }
}
