use std::env;
use std::fmt;
use std::path::PathBuf;

/// Static product configuration sent with every bureau lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductConfig {
    pub customer: String,
    pub model: String,
    pub configuration: String,
    pub bill_to: String,
    pub ship_to: String,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            customer: "ECICHAPPYPAY".to_string(),
            model: "HAPPYPAY".to_string(),
            configuration: "Config".to_string(),
            bill_to: "EC004002B001".to_string(),
            ship_to: "EC004002B001S001".to_string(),
        }
    }
}

/// Configuration for the whole service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP service listens on
    pub bind_addr: String,
    /// Base URL of the operator authentication service
    pub auth_api_url: String,
    /// Base URL of the credit bureau (token and lookup endpoints)
    pub bureau_api_url: String,
    /// Base URL of the historical data service
    pub historical_api_url: String,
    pub bureau_client_id: String,
    pub bureau_client_secret: String,
    /// OAuth scope requested with the client-credentials grant
    pub bureau_scope: String,
    /// File backing the persisted token store
    pub token_store_path: PathBuf,
    pub product: ProductConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            auth_api_url: "http://localhost:8081".to_string(),
            bureau_api_url: "https://api.latam.equifax.com".to_string(),
            historical_api_url: "http://localhost:8082/api/histo-eqx".to_string(),
            bureau_client_id: String::new(),
            bureau_client_secret: String::new(),
            bureau_scope:
                "https://api.latam.equifax.com/business/interconnect/v1/decision-orchestrations"
                    .to_string(),
            token_store_path: PathBuf::from(".consulta/token.json"),
            product: ProductConfig::default(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => {
                write!(f, "{} environment variable must be set", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for everything except the bureau client credentials.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind_addr) = lookup("BIND_ADDR") {
            config.bind_addr = bind_addr;
        }
        if let Some(url) = lookup("AUTH_API_URL") {
            config.auth_api_url = url;
        }
        if let Some(url) = lookup("BUREAU_API_URL") {
            config.bureau_api_url = url;
        }
        if let Some(url) = lookup("HISTORICAL_API_URL") {
            config.historical_api_url = url;
        }
        if let Some(scope) = lookup("BUREAU_SCOPE") {
            config.bureau_scope = scope;
        }
        if let Some(path) = lookup("TOKEN_STORE_PATH") {
            config.token_store_path = PathBuf::from(path);
        }

        if let Some(customer) = lookup("BUREAU_CUSTOMER") {
            config.product.customer = customer;
        }
        if let Some(model) = lookup("BUREAU_MODEL") {
            config.product.model = model;
        }
        if let Some(configuration) = lookup("BUREAU_CONFIGURATION") {
            config.product.configuration = configuration;
        }
        if let Some(bill_to) = lookup("BUREAU_BILL_TO") {
            config.product.bill_to = bill_to;
        }
        if let Some(ship_to) = lookup("BUREAU_SHIP_TO") {
            config.product.ship_to = ship_to;
        }

        config.bureau_client_id = lookup("BUREAU_CLIENT_ID")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("BUREAU_CLIENT_ID"))?;
        config.bureau_client_secret = lookup("BUREAU_CLIENT_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("BUREAU_CLIENT_SECRET"))?;

        Ok(config)
    }
}
