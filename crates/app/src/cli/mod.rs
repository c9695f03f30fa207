use clap::{Parser, Subcommand};

mod db;
mod tenant;
mod token;

#[derive(Debug, Parser)]
#[command(name = "fleet-app", about = "Fleet registry operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Tenant(tenant::TenantCommand),
    Token(token::TokenCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Tenant(command) => tenant::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn tenant_activate_parses_uuid() {
        let parsed = Cli::try_parse_from([
            "fleet-app",
            "tenant",
            "activate",
            "--tenant-uuid",
            "01890a5d-ac96-774b-bcce-b302099a8057",
            "--database-url",
            "postgres://localhost/fleet",
        ]);

        assert!(parsed.is_ok(), "{parsed:?}");
    }

    #[test]
    fn token_issue_requires_tenant_uuid() {
        let parsed = Cli::try_parse_from(["fleet-app", "token", "issue"]);

        assert!(parsed.is_err());
    }
}
