use clap::Parser;
use rust_decimal::Decimal;

/// Runtime configuration, sourced from the environment (a `.env` file next
/// to the binary works via dotenv). Missing required keys abort the run
/// before any network activity.
#[derive(Parser)]
pub struct AppConfig {
    //Portal login
    #[clap(env)]
    pub portal_username: String,

    #[clap(env)]
    pub portal_password: String,

    #[clap(env, default_value = "https://secure.lomalinda-ca.gov/OneStop/login.aspx")]
    pub login_url: String,

    /// Generate a notification only if a balance exceeds this amount.
    /// Can be set below zero for testing.
    #[clap(env, default_value = "0")]
    pub min_balance: Decimal,

    //Notification mail
    #[clap(env)]
    pub email_subject: String,

    #[clap(env)]
    pub email_from: String,

    #[clap(env)]
    pub email_to: String,

    #[clap(env)]
    pub smtp_server: String,

    #[clap(env, default_value_t = 25)]
    pub smtp_port: u16,
}
