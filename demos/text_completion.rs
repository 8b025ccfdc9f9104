//! Run with: RUST_LOG=completion_client=debug cargo run --example text-completion
use completion_client::{ApiKey, CompletionClient};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = CompletionClient::builder()
        .api_key(ApiKey::Default)
        .require_credential(true)
        .max_tokens(128)
        .temperature(0.7)
        .stop(vec!["\n\n"])
        .build()?;

    let response = client
        .get_completion("Explain in one sentence what a borrow checker does.")
        .await?;

    match response["choices"][0]["text"].as_str() {
        Some(text) => println!("{}", text.trim()),
        None => println!("Unexpected response:\n{:#}", response),
    }

    Ok(())
}
