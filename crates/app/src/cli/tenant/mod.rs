use clap::{Args, Subcommand};

mod set_password;
mod status;

#[derive(Debug, Args)]
pub(crate) struct TenantCommand {
    #[command(subcommand)]
    command: TenantSubcommand,
}

#[derive(Debug, Subcommand)]
enum TenantSubcommand {
    /// Allow a tenant to log in and use its tokens again
    Activate(status::TenantStatusArgs),

    /// Block logins and reject existing tokens for a tenant
    Deactivate(status::TenantStatusArgs),

    /// Replace a tenant's password
    SetPassword(set_password::SetPasswordArgs),
}

pub(crate) async fn run(command: TenantCommand) -> Result<(), String> {
    match command.command {
        TenantSubcommand::Activate(args) => status::run(args, true).await,
        TenantSubcommand::Deactivate(args) => status::run(args, false).await,
        TenantSubcommand::SetPassword(args) => set_password::run(args).await,
    }
}
