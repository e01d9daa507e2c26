//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// JSON file backing the local fallback store. In-memory when absent.
    #[serde(default)]
    pub local_store_path: Option<String>,
    /// Seed an empty local store with the demo hub's types and deliverers.
    #[serde(default)]
    pub seed_demo_data: bool,
    /// Hub that receives the demo seed.
    #[serde(default = "default_demo_hub_id")]
    pub demo_hub_id: i32,
}

fn default_demo_hub_id() -> i32 {
    1
}
