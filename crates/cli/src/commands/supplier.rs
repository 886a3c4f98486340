//! Supplier management commands.
//!
//! # Usage
//!
//! ```bash
//! # Register a supplier
//! ph-cli supplier create -n "Emzor Pharmaceuticals" -e sales@emzor.com -p "+234 1 000 0000"
//!
//! # Which supplier would this login resolve to?
//! ph-cli supplier find -e Sales@Emzor.com
//! ```

use pharmahub_api::db::SupplierRepository;
use pharmahub_core::Email;

use super::{CliError, connect};

/// Register a new supplier and print it as JSON.
pub async fn create(name: &str, email: &str, phone: Option<&str>) -> Result<(), CliError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput("supplier name is required".to_string()));
    }
    let email = Email::parse(email).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let pool = connect().await?;
    let supplier = SupplierRepository::new(&pool)
        .create(name, &email, phone)
        .await?;

    tracing::info!(supplier_id = %supplier.id, "Supplier created");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&supplier)?);
    }
    Ok(())
}

/// Resolve an email to a supplier the way the API does for signed-in users.
pub async fn find(email: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    let found = SupplierRepository::new(&pool).find_by_email(email).await?;

    #[allow(clippy::print_stdout)]
    {
        match found {
            Some(supplier) => {
                println!("{}", serde_json::to_string_pretty(&supplier.identity())?);
            }
            None => println!("No supplier matches {email}"),
        }
    }
    Ok(())
}
