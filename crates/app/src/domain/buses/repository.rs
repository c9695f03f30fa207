//! Buses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::domain::{
    buses::{
        data::{BusQuery, BusUpdate, DEFAULT_CAPACITY, Driver, NewBus, Stoppage},
        records::{BusRecord, BusUuid},
    },
    tenants::records::TenantUuid,
};

const CREATE_BUS_SQL: &str = include_str!("sql/create_bus.sql");
const GET_BUS_SQL: &str = include_str!("sql/get_bus.sql");
const LIST_BUSES_SQL: &str = include_str!("sql/list_buses.sql");
const COUNT_BUSES_SQL: &str = include_str!("sql/count_buses.sql");
const UPDATE_BUS_SQL: &str = include_str!("sql/update_bus.sql");
const DELETE_BUS_SQL: &str = include_str!("sql/delete_bus.sql");
const TOGGLE_BUS_STATUS_SQL: &str = include_str!("sql/toggle_bus_status.sql");
const BUS_STATS_SQL: &str = include_str!("sql/bus_stats.sql");

/// Raw counts as returned by `bus_stats.sql`.
pub(crate) struct StatsRow {
    pub(crate) total_buses: i64,
    pub(crate) active_buses: i64,
    pub(crate) total_routes: i64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBusesRepository;

impl PgBusesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_bus(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
        bus: &NewBus,
    ) -> Result<BusRecord, sqlx::Error> {
        query_as::<Postgres, BusRecord>(CREATE_BUS_SQL)
            .bind(bus.uuid.into_uuid())
            .bind(tenant.into_uuid())
            .bind(&bus.bus_number)
            .bind(&bus.route)
            .bind(Json(&bus.stoppages))
            .bind(&bus.driver.name)
            .bind(&bus.driver.phone_number)
            .bind(bus.capacity.unwrap_or(DEFAULT_CAPACITY))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_bus(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
        bus: BusUuid,
    ) -> Result<BusRecord, sqlx::Error> {
        query_as::<Postgres, BusRecord>(GET_BUS_SQL)
            .bind(bus.into_uuid())
            .bind(tenant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_buses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
        filter: &BusQuery,
    ) -> Result<Vec<BusRecord>, sqlx::Error> {
        let limit = i64::from(filter.page.limit());

        let offset = i64::try_from(filter.page.offset()).map_err(|e| sqlx::Error::ColumnDecode {
            index: "offset".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, BusRecord>(LIST_BUSES_SQL)
            .bind(tenant.into_uuid())
            .bind(filter.search_pattern())
            .bind(filter.is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_buses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
        filter: &BusQuery,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = query_as(COUNT_BUSES_SQL)
            .bind(tenant.into_uuid())
            .bind(filter.search_pattern())
            .bind(filter.is_active)
            .fetch_one(&mut **tx)
            .await?;

        Ok(count)
    }

    pub(crate) async fn update_bus(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
        bus: BusUuid,
        update: &BusUpdate,
    ) -> Result<BusRecord, sqlx::Error> {
        query_as::<Postgres, BusRecord>(UPDATE_BUS_SQL)
            .bind(bus.into_uuid())
            .bind(tenant.into_uuid())
            .bind(&update.bus_number)
            .bind(&update.route)
            .bind(Json(&update.stoppages))
            .bind(&update.driver.name)
            .bind(&update.driver.phone_number)
            .bind(update.capacity)
            .bind(update.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_bus(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
        bus: BusUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BUS_SQL)
            .bind(bus.into_uuid())
            .bind(tenant.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn toggle_bus_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
        bus: BusUuid,
    ) -> Result<BusRecord, sqlx::Error> {
        query_as::<Postgres, BusRecord>(TOGGLE_BUS_STATUS_SQL)
            .bind(bus.into_uuid())
            .bind(tenant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn bus_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantUuid,
    ) -> Result<StatsRow, sqlx::Error> {
        query_as::<Postgres, StatsRow>(BUS_STATS_SQL)
            .bind(tenant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BusRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let capacity_i32: i32 = row.try_get("capacity")?;

        let capacity = u32::try_from(capacity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "capacity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: BusUuid::from_uuid(row.try_get("uuid")?),
            tenant_uuid: TenantUuid::from_uuid(row.try_get("tenant_uuid")?),
            bus_number: row.try_get("bus_number")?,
            route: row.try_get("route")?,
            stoppages: row.try_get::<Json<Vec<Stoppage>>, _>("stoppages")?.0,
            driver: Driver {
                name: row.try_get("driver_name")?,
                phone_number: row.try_get("driver_phone_number")?,
            },
            capacity,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StatsRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            total_buses: row.try_get("total_buses")?,
            active_buses: row.try_get("active_buses")?,
            total_routes: row.try_get("total_routes")?,
        })
    }
}
