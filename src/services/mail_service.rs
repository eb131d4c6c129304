use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::AppConfig;
use crate::error::{BillsError, Result};

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Mails the rendered report over a plain unauthenticated, unencrypted
/// SMTP conversation with the configured relay. Transport failures are
/// fatal; the next scheduled run is the retry.
pub async fn send_report(report: &str, config: &AppConfig) -> Result<()> {
    let message = build_report_message(report, config)?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_server)
        .port(config.smtp_port)
        .timeout(Some(SMTP_TIMEOUT))
        .build();

    mailer
        .send(message)
        .await
        .map_err(|e| BillsError::Delivery(Box::new(e)))?;

    info!("balance report mailed to {}", config.email_to);
    Ok(())
}

/// Plain-text message: configured subject, sender, single recipient, body
/// equal to the rendered report.
pub fn build_report_message(report: &str, config: &AppConfig) -> Result<Message> {
    let from = parse_mailbox(&config.email_from, "EMAIL_FROM")?;
    let to = parse_mailbox(&config.email_to, "EMAIL_TO")?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(config.email_subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(report.to_string())
        .map_err(|e| BillsError::Delivery(Box::new(e)))
}

fn parse_mailbox(address: &str, key: &str) -> Result<Mailbox> {
    address
        .parse()
        .map_err(|e| BillsError::Configuration(format!("{key} {address:?} is not a mail address: {e}")))
}
