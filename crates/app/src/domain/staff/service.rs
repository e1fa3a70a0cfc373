//! Staff service.

use async_trait::async_trait;
use jiff::tz::TimeZone;
use mockall::automock;
use tracing::info;

use crate::{
    calendar,
    database::Db,
    domain::staff::{
        errors::StaffServiceError,
        models::{StaffMember, StaffUuid},
        repository::PgStaffRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgStaffService {
    db: Db,
    time_zone: TimeZone,
    repository: PgStaffRepository,
}

impl PgStaffService {
    #[must_use]
    pub fn new(db: Db, time_zone: TimeZone) -> Self {
        Self {
            db,
            time_zone,
            repository: PgStaffRepository::new(),
        }
    }
}

#[async_trait]
impl StaffService for PgStaffService {
    #[tracing::instrument(name = "staff.service.list_staff", skip(self), err)]
    async fn list_staff(&self) -> Result<Vec<StaffMember>, StaffServiceError> {
        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let staff = self.repository.list_staff(&mut tx).await?;

                tx.commit().await?;

                Ok::<_, StaffServiceError>(staff)
            })
            .await
    }

    #[tracing::instrument(
        name = "staff.service.create_staff",
        skip(self, member),
        fields(staff_uuid = tracing::field::Empty),
        err
    )]
    async fn create_staff(&self, member: StaffMember) -> Result<StaffMember, StaffServiceError> {
        let uuid = member.uuid.unwrap_or_else(StaffUuid::new);

        tracing::Span::current().record("staff_uuid", tracing::field::display(uuid));

        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let created = self.repository.create_staff(&mut tx, uuid, &member).await?;

                tx.commit().await?;

                Ok::<_, StaffServiceError>(created)
            })
            .await
    }

    #[tracing::instrument(name = "staff.service.update_staff", skip(self, member), err)]
    async fn update_staff(
        &self,
        member: StaffMember,
    ) -> Result<Option<StaffMember>, StaffServiceError> {
        let Some(uuid) = member.uuid else {
            return Ok(None);
        };

        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let updated = self.repository.update_staff(&mut tx, uuid, &member).await?;

                tx.commit().await?;

                Ok::<_, StaffServiceError>(Some(updated))
            })
            .await
    }

    #[tracing::instrument(name = "staff.service.delete_staff", skip(self, member), err)]
    async fn delete_staff(&self, member: &StaffMember) -> Result<(), StaffServiceError> {
        let uuid = member.uuid.ok_or(StaffServiceError::NotPersisted)?;

        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let rows_affected = self.repository.delete_staff(&mut tx, uuid).await?;

                if rows_affected == 0 {
                    return Err(StaffServiceError::NotFound);
                }

                tx.commit().await?;

                Ok(())
            })
            .await?;

        info!(staff_uuid = %uuid, "deleted staff member");

        Ok(())
    }

    #[tracing::instrument(name = "staff.service.ensure_default_staff", skip(self), err)]
    async fn ensure_default_staff(&self) -> Result<StaffMember, StaffServiceError> {
        let hired_on = calendar::today(&self.time_zone);

        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let member = self
                    .repository
                    .ensure_default_staff(&mut tx, hired_on)
                    .await?;

                tx.commit().await?;

                Ok::<_, StaffServiceError>(member)
            })
            .await
    }
}

#[automock]
#[async_trait]
pub trait StaffService: Send + Sync {
    /// Retrieves every staff member, earliest hired first.
    async fn list_staff(&self) -> Result<Vec<StaffMember>, StaffServiceError>;

    /// Saves a new staff member, generating a key if they have none.
    async fn create_staff(&self, member: StaffMember) -> Result<StaffMember, StaffServiceError>;

    /// Overwrites a saved staff member. Unsaved members are left alone and
    /// `None` is returned.
    async fn update_staff(
        &self,
        member: StaffMember,
    ) -> Result<Option<StaffMember>, StaffServiceError>;

    /// Deletes a saved staff member who has never taken an order.
    async fn delete_staff(&self, member: &StaffMember) -> Result<(), StaffServiceError>;

    /// Returns the fallback cashier, creating it on first use and marking it
    /// active again if it was deactivated. Safe to call from several terminals
    /// at once.
    async fn ensure_default_staff(&self) -> Result<StaffMember, StaffServiceError>;
}
