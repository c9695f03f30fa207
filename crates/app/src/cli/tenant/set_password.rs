use clap::Args;
use fleet_app::{
    auth::passwords::Password,
    database,
    domain::tenants::{PgTenantsService, TenantsService, records::TenantUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct SetPasswordArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    tenant_uuid: Uuid,

    /// New password
    #[arg(long, env = "TENANT_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: SetPasswordArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    PgTenantsService::new(pool)
        .set_password(
            TenantUuid::from_uuid(args.tenant_uuid),
            Password::new(args.password),
        )
        .await
        .map_err(|error| format!("failed to set password: {error}"))?;

    println!("password updated for tenant {}", args.tenant_uuid);

    Ok(())
}
