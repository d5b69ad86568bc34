//! FXDesk smoke CLI
//!
//! Logs in with env-supplied credentials and prints the dashboard figures
//! for the selected market. Mainly useful to verify connectivity and
//! credentials against a running backend.

use anyhow::Context;
use fxdesk_client::models::{ListQuery, LoginRequest};
use fxdesk_client::{ApiClient, Config, Market};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .init();

    tracing::info!(
        api = %config.api_base_url,
        environment = config.environment.as_str(),
        "Starting FXDesk client"
    );

    let client = ApiClient::new(&config).context("Failed to build API client")?;

    if let Ok(market) = std::env::var("FXDESK_MARKET") {
        let market = Market::from_str(&market)
            .with_context(|| format!("Unknown market: {}", market))?;
        client.select_market(market)?;
    }

    if !client.session().is_authenticated() {
        let email = std::env::var("FXDESK_EMAIL").context("FXDESK_EMAIL is not set")?;
        let password = std::env::var("FXDESK_PASSWORD").context("FXDESK_PASSWORD is not set")?;
        let user = client.login(LoginRequest { email, password }).await?;
        tracing::info!(user = %user.name, "Authenticated");
    }

    let metrics = client.dashboard_metrics().await?;
    println!("Market: {}", client.market().as_str());
    println!(
        "Customers: {}  Vendors: {}  Pending exchanges: {}  Pending orders: {}",
        metrics.total_customers,
        metrics.total_vendors,
        metrics.pending_exchanges,
        metrics.pending_payment_orders
    );
    for line in &metrics.wallet {
        println!("  {} {:.2}", line.currency.code(), line.balance);
    }

    let history = client
        .wallet_history(&ListQuery {
            limit: Some(5),
            ..Default::default()
        })
        .await?;
    println!(
        "Last {} of {} wallet movements:",
        history.items.len(),
        history.total
    );
    for tx in &history.items {
        println!(
            "  {} {} {:.2} {}",
            tx.created_at.format("%Y-%m-%d %H:%M"),
            tx.currency.code(),
            tx.amount,
            tx.description.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
