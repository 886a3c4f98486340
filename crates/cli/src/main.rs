//! PharmaHub CLI - Database migrations and marketplace management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (marketplace tables and session store)
//! ph-cli migrate
//!
//! # Register a supplier
//! ph-cli supplier create -n "Emzor Pharmaceuticals" -e sales@emzor.com
//!
//! # Resolve a login email to a supplier
//! ph-cli supplier find -e sales@emzor.com
//!
//! # Verify a NAFDAC registration number
//! ph-cli verify A4-0123
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ph-cli")]
#[command(author, version, about = "PharmaHub CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage suppliers
    Supplier {
        #[command(subcommand)]
        action: SupplierAction,
    },
    /// Look up a NAFDAC registration number
    Verify {
        /// NAFDAC code as printed on the pack
        code: String,
    },
}

#[derive(Subcommand)]
enum SupplierAction {
    /// Register a new supplier
    Create {
        /// Supplier display name
        #[arg(short, long)]
        name: String,

        /// Contact email (used to match signed-in users)
        #[arg(short, long)]
        email: String,

        /// Contact phone number
        #[arg(short, long)]
        phone: Option<String>,
    },
    /// Find the supplier a login email resolves to
    Find {
        /// Email to match (case-insensitive)
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Supplier { action } => match action {
            SupplierAction::Create { name, email, phone } => {
                commands::supplier::create(&name, &email, phone.as_deref()).await?;
            }
            SupplierAction::Find { email } => commands::supplier::find(&email).await?,
        },
        Commands::Verify { code } => commands::verify::run(&code).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_supplier_create() {
        let cli = Cli::try_parse_from([
            "ph-cli", "supplier", "create", "-n", "Emzor", "-e", "sales@emzor.com",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Supplier {
                action: SupplierAction::Create { phone: None, .. }
            })
        ));
    }
}
