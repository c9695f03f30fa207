use clap::Args;
use fleet_app::{
    auth::token::{TokenSecret, TokenService},
    database,
    domain::tenants::{PgTenantsService, TenantsService, records::TenantUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct IssueTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Tenant the token authenticates as
    #[arg(long)]
    tenant_uuid: Uuid,

    /// HMAC signing secret shared with the API
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,
}

pub(crate) async fn run(args: IssueTokenArgs) -> Result<(), String> {
    let secret = TokenSecret::new(args.jwt_secret).map_err(|error| error.to_string())?;
    let tenant_uuid = TenantUuid::from_uuid(args.tenant_uuid);

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let tenant = PgTenantsService::new(pool)
        .find_tenant(tenant_uuid)
        .await
        .map_err(|error| format!("failed to load tenant: {error}"))?
        .filter(|tenant| tenant.is_active)
        .ok_or_else(|| format!("no active tenant {tenant_uuid}"))?;

    let issued = TokenService::new(&secret)
        .issue(tenant.uuid)
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("tenant_uuid: {}", tenant.uuid);
    println!("token_expires_at: {}", issued.expires_at);
    println!("bearer_token: {}", issued.token);

    Ok(())
}
