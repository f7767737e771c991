use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the ratings dataset (JSON object: user -> { item -> rating })
    #[serde(default = "default_ratings_path")]
    pub ratings_path: String,

    /// Default number of neighbors considered when the caller omits one
    #[serde(default = "default_neighbors")]
    pub default_neighbors: usize,

    /// Default number of results returned per list when the caller omits one
    #[serde(default = "default_results")]
    pub default_results: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_ratings_path() -> String {
    "ratings.json".to_string()
}

fn default_neighbors() -> usize {
    7
}

fn default_results() -> usize {
    7
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
