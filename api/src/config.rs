use std::env;

/// Balance a user starts with when their account is first touched by a purchase
pub const DEFAULT_INITIAL_BALANCE: i64 = 1000;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Amount credited to a freshly created balance
    pub initial_balance: i64,
    /// Username of the bootstrap admin account
    pub admin_username: Option<String>,
    /// API key of the bootstrap admin account (stored hashed)
    pub admin_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            initial_balance: env::var("INITIAL_BALANCE")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(DEFAULT_INITIAL_BALANCE),
            admin_username: env::var("ADMIN_USERNAME").ok(),
            admin_api_key: env::var("ADMIN_API_KEY").ok(),
        })
    }

    /// Check if an admin account should be bootstrapped at startup
    pub fn admin_bootstrap(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_api_key) {
            (Some(name), Some(key)) => Some((name.as_str(), key.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/product_test".to_string(),
            port: 0,
            initial_balance: DEFAULT_INITIAL_BALANCE,
            admin_username: None,
            admin_api_key: None,
        }
    }
}
