//! Buses service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        buses::{
            data::{BusQuery, BusUpdate, NewBus},
            errors::BusesServiceError,
            pagination::PageInfo,
            records::{BusPage, BusRecord, BusStats, BusUuid},
            repository::PgBusesRepository,
        },
        tenants::records::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgBusesService {
    db: Db,
    repository: PgBusesRepository,
}

impl PgBusesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBusesRepository::new(),
        }
    }
}

#[async_trait]
impl BusesService for PgBusesService {
    async fn create_bus(
        &self,
        tenant: TenantUuid,
        bus: NewBus,
    ) -> Result<BusRecord, BusesServiceError> {
        let bus = bus.validate()?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let created = self.repository.create_bus(&mut tx, tenant, &bus).await?;

        tx.commit().await?;

        tracing::info!(
            tenant_uuid = %tenant,
            bus_uuid = %created.uuid,
            bus_number = %created.bus_number,
            "created bus"
        );

        Ok(created)
    }

    async fn list_buses(
        &self,
        tenant: TenantUuid,
        filter: BusQuery,
    ) -> Result<BusPage, BusesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let buses = self.repository.list_buses(&mut tx, tenant, &filter).await?;
        let total = self.repository.count_buses(&mut tx, tenant, &filter).await?;

        tx.commit().await?;

        Ok(BusPage {
            buses,
            pagination: PageInfo::new(filter.page, u64::try_from(total)?),
        })
    }

    async fn get_bus(
        &self,
        tenant: TenantUuid,
        bus: BusUuid,
    ) -> Result<BusRecord, BusesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let bus = self.repository.get_bus(&mut tx, tenant, bus).await?;

        tx.commit().await?;

        Ok(bus)
    }

    async fn update_bus(
        &self,
        tenant: TenantUuid,
        bus: BusUuid,
        update: BusUpdate,
    ) -> Result<BusRecord, BusesServiceError> {
        let update = update.validate()?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let updated = self
            .repository
            .update_bus(&mut tx, tenant, bus, &update)
            .await?;

        tx.commit().await?;

        tracing::info!(tenant_uuid = %tenant, bus_uuid = %bus, "updated bus");

        Ok(updated)
    }

    async fn delete_bus(&self, tenant: TenantUuid, bus: BusUuid) -> Result<(), BusesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let rows_affected = self.repository.delete_bus(&mut tx, tenant, bus).await?;

        if rows_affected == 0 {
            return Err(BusesServiceError::NotFound);
        }

        tx.commit().await?;

        tracing::info!(tenant_uuid = %tenant, bus_uuid = %bus, "deleted bus");

        Ok(())
    }

    async fn toggle_bus_status(
        &self,
        tenant: TenantUuid,
        bus: BusUuid,
    ) -> Result<BusRecord, BusesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let toggled = self
            .repository
            .toggle_bus_status(&mut tx, tenant, bus)
            .await?;

        tx.commit().await?;

        tracing::info!(
            tenant_uuid = %tenant,
            bus_uuid = %bus,
            is_active = toggled.is_active,
            "toggled bus status"
        );

        Ok(toggled)
    }

    async fn bus_stats(&self, tenant: TenantUuid) -> Result<BusStats, BusesServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let row = self.repository.bus_stats(&mut tx, tenant).await?;

        tx.commit().await?;

        let total_buses = u64::try_from(row.total_buses)?;
        let active_buses = u64::try_from(row.active_buses)?;

        Ok(BusStats {
            total_buses,
            active_buses,
            inactive_buses: total_buses.saturating_sub(active_buses),
            total_routes: u64::try_from(row.total_routes)?,
        })
    }
}

#[automock]
#[async_trait]
pub trait BusesService: Send + Sync {
    /// Validates and stores a new bus owned by `tenant`.
    async fn create_bus(&self, tenant: TenantUuid, bus: NewBus)
    -> Result<BusRecord, BusesServiceError>;

    /// One page of the tenant's buses, newest first.
    async fn list_buses(
        &self,
        tenant: TenantUuid,
        filter: BusQuery,
    ) -> Result<BusPage, BusesServiceError>;

    /// Retrieve a single bus. Buses of other tenants are reported as not found.
    async fn get_bus(&self, tenant: TenantUuid, bus: BusUuid)
    -> Result<BusRecord, BusesServiceError>;

    /// Replace the editable fields of a bus.
    async fn update_bus(
        &self,
        tenant: TenantUuid,
        bus: BusUuid,
        update: BusUpdate,
    ) -> Result<BusRecord, BusesServiceError>;

    async fn delete_bus(&self, tenant: TenantUuid, bus: BusUuid) -> Result<(), BusesServiceError>;

    /// Flip the active flag and return the updated bus.
    async fn toggle_bus_status(
        &self,
        tenant: TenantUuid,
        bus: BusUuid,
    ) -> Result<BusRecord, BusesServiceError>;

    async fn bus_stats(&self, tenant: TenantUuid) -> Result<BusStats, BusesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::buses::{data::DEFAULT_CAPACITY, pagination::PageRequest},
        test::{TestContext, helpers::new_bus},
    };

    use super::*;

    fn update_from(bus: &BusRecord) -> BusUpdate {
        BusUpdate {
            bus_number: bus.bus_number.clone(),
            route: bus.route.clone(),
            stoppages: bus.stoppages.clone(),
            driver: bus.driver.clone(),
            capacity: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn create_bus_normalises_and_applies_defaults() -> TestResult {
        let ctx = TestContext::new().await;

        let mut bus = new_bus("mh12ab1234");

        bus.bus_number = "  mh12ab1234 ".to_string();

        let created = ctx.buses.create_bus(ctx.tenant_uuid, bus.clone()).await?;

        assert_eq!(created.uuid, bus.uuid);
        assert_eq!(created.tenant_uuid, ctx.tenant_uuid);
        assert_eq!(created.bus_number, "MH12AB1234");
        assert_eq!(created.capacity, u32::try_from(DEFAULT_CAPACITY)?);
        assert!(created.is_active);
        assert_eq!(created.stoppages, bus.stoppages);

        Ok(())
    }

    #[tokio::test]
    async fn create_bus_rejects_invalid_times_without_storing() -> TestResult {
        let ctx = TestContext::new().await;

        let mut bus = new_bus("KA01F0001");

        bus.stoppages[0].arrival_time = "24:00".to_string();

        let result = ctx.buses.create_bus(ctx.tenant_uuid, bus).await;

        assert!(
            matches!(&result, Err(BusesServiceError::Validation(errors)) if errors.contains_field("stoppages[0].arrivalTime")),
            "expected validation error, got {result:?}"
        );

        let stats = ctx.buses.bus_stats(ctx.tenant_uuid).await?;

        assert_eq!(stats.total_buses, 0);

        Ok(())
    }

    #[tokio::test]
    async fn bus_numbers_are_unique_case_insensitively_across_tenants() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_tenant("Other Depot").await;

        ctx.buses
            .create_bus(ctx.tenant_uuid, new_bus("mh12ab1234"))
            .await?;

        let same_tenant = ctx
            .buses
            .create_bus(ctx.tenant_uuid, new_bus("MH12AB1234"))
            .await;

        let other_tenant = ctx.buses.create_bus(other, new_bus("Mh12Ab1234")).await;

        assert!(
            matches!(same_tenant, Err(BusesServiceError::DuplicateBusNumber)),
            "expected DuplicateBusNumber, got {same_tenant:?}"
        );

        assert!(
            matches!(other_tenant, Err(BusesServiceError::DuplicateBusNumber)),
            "expected DuplicateBusNumber, got {other_tenant:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn other_tenants_buses_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_tenant("Other Depot").await;

        let bus = ctx
            .buses
            .create_bus(ctx.tenant_uuid, new_bus("MH12AB1234"))
            .await?;

        let get = ctx.buses.get_bus(other, bus.uuid).await;
        let update = ctx.buses.update_bus(other, bus.uuid, update_from(&bus)).await;
        let toggle = ctx.buses.toggle_bus_status(other, bus.uuid).await;
        let delete = ctx.buses.delete_bus(other, bus.uuid).await;

        assert!(matches!(get, Err(BusesServiceError::NotFound)), "{get:?}");
        assert!(matches!(update, Err(BusesServiceError::NotFound)), "{update:?}");
        assert!(matches!(toggle, Err(BusesServiceError::NotFound)), "{toggle:?}");
        assert!(matches!(delete, Err(BusesServiceError::NotFound)), "{delete:?}");

        let untouched = ctx.buses.get_bus(ctx.tenant_uuid, bus.uuid).await?;

        assert_eq!(untouched, bus);

        Ok(())
    }

    #[tokio::test]
    async fn listings_only_include_own_buses() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_tenant("Other Depot").await;

        ctx.buses
            .create_bus(ctx.tenant_uuid, new_bus("OWN0001"))
            .await?;

        ctx.buses.create_bus(other, new_bus("OTHER0001")).await?;

        let page = ctx
            .buses
            .list_buses(ctx.tenant_uuid, BusQuery::default())
            .await?;

        assert_eq!(page.buses.len(), 1);
        assert_eq!(page.buses[0].bus_number, "OWN0001");
        assert_eq!(page.pagination.total_items, 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_buses_pages_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        for n in 0..25 {
            ctx.buses
                .create_bus(ctx.tenant_uuid, new_bus(&format!("BUS{n:04}")))
                .await?;
        }

        let first = ctx
            .buses
            .list_buses(
                ctx.tenant_uuid,
                BusQuery::new(PageRequest::new(1, 10)?, None, None),
            )
            .await?;

        let last = ctx
            .buses
            .list_buses(
                ctx.tenant_uuid,
                BusQuery::new(PageRequest::new(3, 10)?, None, None),
            )
            .await?;

        assert_eq!(first.buses.len(), 10);
        assert_eq!(first.buses[0].bus_number, "BUS0024");
        assert_eq!(first.pagination.total_pages, 3);
        assert_eq!(first.pagination.total_items, 25);
        assert!(first.pagination.has_next);
        assert!(!first.pagination.has_prev);

        assert_eq!(last.buses.len(), 5);
        assert_eq!(last.buses[4].bus_number, "BUS0000");
        assert!(!last.pagination.has_next);
        assert!(last.pagination.has_prev);

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_route_and_driver_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;

        let mut airport = new_bus("AIR0001");

        airport.route = "Station - Airport".to_string();

        let mut market = new_bus("MKT0001");

        market.route = "Market Loop".to_string();
        market.driver.name = "Anita Kulkarni".to_string();

        ctx.buses.create_bus(ctx.tenant_uuid, airport).await?;
        ctx.buses.create_bus(ctx.tenant_uuid, market).await?;

        let by_route = ctx
            .buses
            .list_buses(
                ctx.tenant_uuid,
                BusQuery::new(PageRequest::default(), Some("airport".to_string()), None),
            )
            .await?;

        let by_driver = ctx
            .buses
            .list_buses(
                ctx.tenant_uuid,
                BusQuery::new(PageRequest::default(), Some("KULKARNI".to_string()), None),
            )
            .await?;

        let wildcard = ctx
            .buses
            .list_buses(
                ctx.tenant_uuid,
                BusQuery::new(PageRequest::default(), Some("%".to_string()), None),
            )
            .await?;

        assert_eq!(by_route.buses.len(), 1);
        assert_eq!(by_route.buses[0].bus_number, "AIR0001");
        assert_eq!(by_driver.buses.len(), 1);
        assert_eq!(by_driver.buses[0].bus_number, "MKT0001");
        assert!(wildcard.buses.is_empty(), "a literal % should match nothing");

        Ok(())
    }

    #[tokio::test]
    async fn active_filter_and_toggle() -> TestResult {
        let ctx = TestContext::new().await;

        let bus = ctx
            .buses
            .create_bus(ctx.tenant_uuid, new_bus("TGL0001"))
            .await?;

        ctx.buses
            .create_bus(ctx.tenant_uuid, new_bus("TGL0002"))
            .await?;

        let toggled = ctx.buses.toggle_bus_status(ctx.tenant_uuid, bus.uuid).await?;

        assert!(!toggled.is_active);

        let inactive = ctx
            .buses
            .list_buses(
                ctx.tenant_uuid,
                BusQuery::new(PageRequest::default(), None, Some(false)),
            )
            .await?;

        assert_eq!(inactive.buses.len(), 1);
        assert_eq!(inactive.buses[0].uuid, bus.uuid);

        let restored = ctx.buses.toggle_bus_status(ctx.tenant_uuid, bus.uuid).await?;

        assert!(restored.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn update_bus_replaces_fields_and_keeps_capacity() -> TestResult {
        let ctx = TestContext::new().await;

        let mut bus = new_bus("UPD0001");

        bus.capacity = Some(52);

        let bus = ctx.buses.create_bus(ctx.tenant_uuid, bus).await?;

        let mut update = update_from(&bus);

        update.route = "Night Route".to_string();
        update.is_active = Some(false);

        let updated = ctx
            .buses
            .update_bus(ctx.tenant_uuid, bus.uuid, update)
            .await?;

        assert_eq!(updated.route, "Night Route");
        assert_eq!(updated.bus_number, "UPD0001");
        assert_eq!(updated.capacity, 52);
        assert!(!updated.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn update_bus_rejects_another_buses_number() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.buses
            .create_bus(ctx.tenant_uuid, new_bus("TAKEN01"))
            .await?;

        let bus = ctx
            .buses
            .create_bus(ctx.tenant_uuid, new_bus("FREE001"))
            .await?;

        let mut update = update_from(&bus);

        update.bus_number = "taken01".to_string();

        let result = ctx.buses.update_bus(ctx.tenant_uuid, bus.uuid, update).await;

        assert!(
            matches!(result, Err(BusesServiceError::DuplicateBusNumber)),
            "expected DuplicateBusNumber, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_bus_removes_it() -> TestResult {
        let ctx = TestContext::new().await;

        let bus = ctx
            .buses
            .create_bus(ctx.tenant_uuid, new_bus("DEL0001"))
            .await?;

        ctx.buses.delete_bus(ctx.tenant_uuid, bus.uuid).await?;

        let get = ctx.buses.get_bus(ctx.tenant_uuid, bus.uuid).await;
        let again = ctx.buses.delete_bus(ctx.tenant_uuid, bus.uuid).await;

        assert!(matches!(get, Err(BusesServiceError::NotFound)), "{get:?}");
        assert!(matches!(again, Err(BusesServiceError::NotFound)), "{again:?}");

        Ok(())
    }

    #[tokio::test]
    async fn bus_stats_counts_active_and_routes() -> TestResult {
        let ctx = TestContext::new().await;

        let mut first = new_bus("STA0001");
        let mut second = new_bus("STA0002");
        let mut third = new_bus("STA0003");

        first.route = "Loop A".to_string();
        second.route = "Loop A".to_string();
        third.route = "Loop B".to_string();

        ctx.buses.create_bus(ctx.tenant_uuid, first).await?;
        ctx.buses.create_bus(ctx.tenant_uuid, second).await?;

        let third = ctx.buses.create_bus(ctx.tenant_uuid, third).await?;

        ctx.buses.toggle_bus_status(ctx.tenant_uuid, third.uuid).await?;

        let stats = ctx.buses.bus_stats(ctx.tenant_uuid).await?;

        assert_eq!(
            stats,
            BusStats {
                total_buses: 3,
                active_buses: 2,
                inactive_buses: 1,
                total_routes: 2,
            }
        );

        Ok(())
    }
}
