//! Offline verification lookup.
//!
//! ```bash
//! ph-cli verify "A4-0123"
//! ```

use pharmahub_api::db::ProductRepository;
use pharmahub_core::{NafdacCode, VerificationOutcome};

use super::{CliError, connect};

/// Look up a NAFDAC code and print the outcome as JSON.
pub async fn run(code: &str) -> Result<(), CliError> {
    let code = NafdacCode::parse(code).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let pool = connect().await?;
    let record = ProductRepository::new(&pool).verify(&code).await?;
    let outcome = VerificationOutcome::from_lookup(&code, record);

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    Ok(())
}
