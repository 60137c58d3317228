
/// CouchDB / Cloudant connection configuration
#[derive(Debug, Clone)]
pub struct CouchDbConfig {
    pub server_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: String,
    pub timeout_seconds: u64,
}

impl CouchDbConfig {
    /// Creates a new configuration for anonymous access
    pub fn new(server_url: String, database: String) -> Self {
        Self {
            server_url,
            username: None,
            password: None,
            database,
            timeout_seconds: 30,
        }
    }

    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server_url.is_empty() {
            return Err(anyhow::anyhow!("Server URL cannot be empty"));
        }

        if self.database.is_empty() {
            return Err(anyhow::anyhow!("Database name cannot be empty"));
        }

        let parsed = url::Url::parse(&self.server_url)
            .map_err(|e| anyhow::anyhow!("Server URL '{}' is invalid: {}", self.server_url, e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(anyhow::anyhow!("Server URL must start with http:// or https://"));
        }

        if self.password.is_some() && self.username.is_none() {
            return Err(anyhow::anyhow!("A password was given without a username"));
        }

        Ok(())
    }

    /// Returns the base URL of the memo database, e.g. `http://localhost:5984/memo`
    pub fn database_url(&self) -> String {
        format!(
            "{}/{}",
            self.server_url.trim_end_matches('/'),
            urlencoding::encode(&self.database)
        )
    }

    /// Gets the timeout duration
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}
