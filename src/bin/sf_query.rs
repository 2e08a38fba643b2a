//! Run one SOQL query against the org configured in `SF_*` variables and
//! print the first page of records as JSON.
//!
//! ```text
//! SF_CLIENT_ID=... SF_USERNAME=... SF_PASSWORD=... \
//!     cargo run --bin sf_query -- "SELECT Id, Name FROM Account LIMIT 5"
//! ```

use std::sync::Arc;

use sf_exchange::{HttpTransport, RestClient, SalesforceSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    sf_exchange::init_tracing();

    let soql = match std::env::args().nth(1) {
        Some(soql) => soql,
        None => {
            eprintln!("usage: sf_query <SOQL>");
            std::process::exit(2);
        }
    };

    let session = Arc::new(SalesforceSession::from_env()?);
    let transport = Arc::new(HttpTransport::default_transport()?);
    let client = RestClient::new(session.clone(), transport).await?;

    let page = client.query::<serde_json::Value>(&soql).await?;
    println!("{}", serde_json::to_string_pretty(&page.records)?);

    if page.has_more() {
        eprintln!(
            "{} of {} records shown; more pages available",
            page.records.len(),
            page.total_size
        );
    }

    session.logout().await?;
    Ok(())
}
