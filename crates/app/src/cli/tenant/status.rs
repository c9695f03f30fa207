use clap::Args;
use fleet_app::{
    database,
    domain::tenants::{PgTenantsService, TenantsService, records::TenantUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct TenantStatusArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    tenant_uuid: Uuid,
}

pub(crate) async fn run(args: TenantStatusArgs, active: bool) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let tenant = PgTenantsService::new(pool)
        .set_active(TenantUuid::from_uuid(args.tenant_uuid), active)
        .await
        .map_err(|error| format!("failed to update tenant: {error}"))?;

    println!("tenant_uuid: {}", tenant.uuid);
    println!("tenant_name: {}", tenant.name);
    println!("is_active: {}", tenant.is_active);

    Ok(())
}
