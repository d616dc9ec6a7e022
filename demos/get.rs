use std::time::Duration;

use http_retry_client::{HttpClient, Url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com/".to_owned());
    let url = Url::parse(&url)?;

    let client = HttpClient::builder()
        .with_retry(3, Duration::from_millis(500))
        .build()?;

    let response = client.get(url).await?;
    println!("{}", response.status());
    println!("{}", response.text().await?);

    Ok(())
}
