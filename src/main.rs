pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

use clap::Parser;
use tracing::info;

use crate::config::AppConfig;
use crate::models::Credentials;
use crate::repositories::portal_repository::PortalRepository;
use crate::services::{balance_service, mail_service, report_service};

// One linear pass: log in, extract balances, filter, render, mail. Any
// stage failure exits non-zero; the next scheduled run starts fresh.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Initialize environment
    dotenv::dotenv().ok();
    let app_config = AppConfig::parse();

    let portal = PortalRepository::new(app_config.login_url.clone())?;
    let credentials = Credentials {
        username: app_config.portal_username.clone(),
        password: app_config.portal_password.clone(),
    };

    let dashboard = portal.login(&credentials).await?;
    info!("logged in, dashboard fetched from {}", app_config.login_url);

    let balances = balance_service::extract_balances(&dashboard)?;
    info!("extracted {} account(s) from the dashboard", balances.len());

    let due = balance_service::filter_due(balances, app_config.min_balance);
    match report_service::due_report(&due) {
        Some(report) => {
            info!("{} account(s) with a balance due", due.len());
            mail_service::send_report(&report, &app_config).await?;
        }
        None => info!(
            "no balance above {}, skipping notification",
            app_config.min_balance
        ),
    }

    Ok(())
}
