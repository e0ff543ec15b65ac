use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "BIND_ADDRESS", default_value = "127.0.0.1")]
    pub bind_address: String,
    #[arg(short, long, env = "PORT", default_value_t = 17419)]
    pub port: u16,
    #[arg(long, env = "WORKERS", default_value_t = 4)]
    pub workers: usize,
    /// Serve places from a registry CSV export instead of Postgres
    #[arg(long, env = "PLACES_CSV")]
    pub places_csv: Option<PathBuf>,
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 16)]
    pub db_pool_size: u32,
    #[arg(long, env = "MAP_CACHE_TTL_SECS", default_value_t = 300)]
    pub cache_ttl_secs: u64,
    #[arg(long, env = "MAP_CACHE_MAX_ENTRIES", default_value_t = 4096)]
    pub cache_max_entries: usize,
    /// Recompute every viewport instead of memoizing responses
    #[arg(long, env = "MAP_CACHE_DISABLED")]
    pub no_cache: bool,
}

impl Args {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
