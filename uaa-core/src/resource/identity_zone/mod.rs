//! Identity zone resource

pub mod mapper;
pub mod model;

pub use model::*;

use super::{DataSource, Resource, ResourceData};
use crate::api::Session;
use crate::error::Result;
use async_trait::async_trait;
use tracing::debug;

pub struct IdentityZoneResource;

#[async_trait]
impl Resource for IdentityZoneResource {
    type Model = IdentityZoneModel;

    async fn create(
        &self,
        session: &Session,
        data: &mut ResourceData<IdentityZoneModel>,
    ) -> Result<()> {
        let zone = mapper::to_api(&data.id, &data.desired);
        let created = session.identity_zone_manager().create(&zone).await?;

        data.id = created.id.clone();
        data.desired = mapper::from_api(&created);
        Ok(())
    }

    async fn read(
        &self,
        session: &Session,
        data: &mut ResourceData<IdentityZoneModel>,
    ) -> Result<()> {
        let zone = session.identity_zone_manager().find_by_id(&data.id).await?;
        debug!(zone_id = %zone.id, name = %zone.name, "Identity zone retrieved");

        data.desired = mapper::from_api(&zone);
        Ok(())
    }

    async fn update(
        &self,
        session: &Session,
        data: &mut ResourceData<IdentityZoneModel>,
    ) -> Result<()> {
        let zone = mapper::to_api(&data.id, &data.desired);
        let updated = session
            .identity_zone_manager()
            .update(&data.id, &zone)
            .await?;

        debug!(zone_id = %data.id, "Identity zone updated");
        data.desired = mapper::from_api(&updated);
        Ok(())
    }

    async fn delete(&self, session: &Session, data: &ResourceData<IdentityZoneModel>) -> Result<()> {
        session.identity_zone_manager().delete(&data.id).await
    }
}

/// Looks a zone up by name
pub struct IdentityZoneDataSource;

#[async_trait]
impl DataSource for IdentityZoneDataSource {
    type Model = IdentityZoneModel;

    async fn read(
        &self,
        session: &Session,
        data: &mut ResourceData<IdentityZoneModel>,
    ) -> Result<()> {
        let zone = session
            .identity_zone_manager()
            .find_by_name(&data.desired.name)
            .await?;

        data.id = zone.id.clone();
        data.desired = mapper::from_api(&zone);
        Ok(())
    }
}
