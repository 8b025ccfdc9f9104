/// Prints the raw JSON sent to and received from the completion endpoint.
///
/// Run with: cargo run --example inspector
use completion_client::{ApiKey, CompletionClient};
use dotenv::dotenv;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let client = CompletionClient::builder()
        .api_key(ApiKey::Default)
        .timeout(Duration::from_secs(30))
        .inspect_request(|req| {
            println!("━━━ REQUEST ━━━");
            println!("{}", serde_json::to_string_pretty(req).unwrap_or_default());
            println!();
        })
        .inspect_response(|res| {
            println!("━━━ RESPONSE ━━━");
            println!("{}", serde_json::to_string_pretty(res).unwrap_or_default());
            println!();
        })
        .build()?;

    client.get_completion("Say hello in French.").await?;

    Ok(())
}
