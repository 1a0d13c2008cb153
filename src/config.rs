use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the serialized k-NN model artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Path to the catalog dataset (CSV with `movieId` and `title` columns)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Number of recommendations returned per request
    #[serde(default = "default_recommendations")]
    pub recommendations: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_model_path() -> String {
    "models/knn_movies.bin".to_string()
}

fn default_catalog_path() -> String {
    "data/movies.csv".to_string()
}

fn default_recommendations() -> usize {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
