use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Webhook that receives booking notifications; notifications are
    /// skipped when unset.
    pub notify_webhook_url: Option<String>,
    /// When true, a booking without a menu item or explicit owner falls
    /// back to the first registered admin.
    pub booking_fallback_tenant: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET")
                .expect("JWT_SECRET must be set"),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a number"),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL").ok(),
            booking_fallback_tenant: env::var("BOOKING_FALLBACK_TENANT")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .expect("BOOKING_FALLBACK_TENANT must be true or false"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
