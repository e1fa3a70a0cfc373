//! Staff Repository

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::domain::staff::models::{
    DEFAULT_STAFF_NAME, DEFAULT_STAFF_ROLE, StaffMember, StaffUuid, WorkHistory,
};

const LIST_STAFF_SQL: &str = include_str!("sql/list_staff.sql");
const CREATE_STAFF_SQL: &str = include_str!("sql/create_staff.sql");
const UPDATE_STAFF_SQL: &str = include_str!("sql/update_staff.sql");
const DELETE_STAFF_SQL: &str = include_str!("sql/delete_staff.sql");
const EARLIEST_ACTIVE_STAFF_SQL: &str = include_str!("sql/earliest_active_staff.sql");
const ENSURE_DEFAULT_STAFF_SQL: &str = include_str!("sql/ensure_default_staff.sql");

/// Unique marker of the fallback cashier row.
const DEFAULT_STAFF_KEY: &str = "cashier";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStaffRepository;

impl PgStaffRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<StaffMember>, sqlx::Error> {
        query_as::<Postgres, StaffMember>(LIST_STAFF_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: StaffUuid,
        member: &StaffMember,
    ) -> Result<StaffMember, sqlx::Error> {
        query_as::<Postgres, StaffMember>(CREATE_STAFF_SQL)
            .bind(uuid.into_uuid())
            .bind(&member.name)
            .bind(SqlxDate::from(member.hired_on))
            .bind(Json(&member.work_history))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: StaffUuid,
        member: &StaffMember,
    ) -> Result<StaffMember, sqlx::Error> {
        query_as::<Postgres, StaffMember>(UPDATE_STAFF_SQL)
            .bind(uuid.into_uuid())
            .bind(&member.name)
            .bind(SqlxDate::from(member.hired_on))
            .bind(Json(&member.work_history))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: StaffUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_STAFF_SQL)
            .bind(uuid.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn earliest_active_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<StaffMember>, sqlx::Error> {
        query_as::<Postgres, StaffMember>(EARLIEST_ACTIVE_STAFF_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Create the fallback cashier, or return it if another unit of work
    /// already has.
    #[tracing::instrument(name = "staff.repository.ensure_default_staff", skip(self, tx), err)]
    pub(crate) async fn ensure_default_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        hired_on: Date,
    ) -> Result<StaffMember, sqlx::Error> {
        let history = WorkHistory {
            role: DEFAULT_STAFF_ROLE.to_string(),
            active: true,
        };

        query_as::<Postgres, StaffMember>(ENSURE_DEFAULT_STAFF_SQL)
            .bind(StaffUuid::new().into_uuid())
            .bind(DEFAULT_STAFF_NAME)
            .bind(SqlxDate::from(hired_on))
            .bind(Json(&history))
            .bind(DEFAULT_STAFF_KEY)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StaffMember {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: Some(StaffUuid::from_uuid(row.try_get("uuid")?)),
            name: row.try_get("name")?,
            hired_on: row.try_get::<SqlxDate, _>("hired_on")?.to_jiff(),
            work_history: row.try_get::<Json<WorkHistory>, _>("work_history")?.0,
        })
    }
}
