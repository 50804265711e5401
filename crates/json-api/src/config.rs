//! Server configuration module

use clap::Parser;

/// Atelier JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "atelier-json", about = "Atelier JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8710")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// JWT signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Payment gateway API address
    #[arg(long, env = "PAYMENT_GATEWAY_ADDR", default_value = "https://api.razorpay.com")]
    pub gateway_addr: String,

    /// Payment gateway key id
    #[arg(long, env = "PAYMENT_KEY_ID")]
    pub gateway_key_id: String,

    /// Payment gateway key secret, also used to verify callback signatures
    #[arg(long, env = "PAYMENT_KEY_SECRET", hide_env_values = true)]
    pub gateway_key_secret: String,

    /// File-hosting management API address
    #[arg(long, env = "MEDIA_API_ADDR")]
    pub media_api_addr: String,

    /// File-hosting delivery address
    #[arg(long, env = "MEDIA_DELIVERY_ADDR")]
    pub media_delivery_addr: String,

    /// File-hosting account namespace
    #[arg(long, env = "MEDIA_CLOUD_NAME")]
    pub media_cloud_name: String,

    /// File-hosting API key
    #[arg(long, env = "MEDIA_API_KEY")]
    pub media_api_key: String,

    /// File-hosting API secret
    #[arg(long, env = "MEDIA_API_SECRET", hide_env_values = true)]
    pub media_api_secret: String,

    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: String,

    /// SMTP username
    #[arg(long, env = "SMTP_USERNAME")]
    pub smtp_username: String,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: String,

    /// Sender address for outbound email
    #[arg(long, env = "MAIL_SENDER")]
    pub mail_sender: String,

    /// Studio address alerted on sales and bookings
    #[arg(long, env = "ADMIN_EMAIL")]
    pub admin_email: Option<String>,

    /// Public site base URL, used in password-reset links
    #[arg(long, env = "CLIENT_URL", default_value = "http://localhost:5173")]
    pub client_url: String,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
