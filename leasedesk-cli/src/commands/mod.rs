pub mod admin;
pub mod console;
pub mod inquiries;
pub mod serve;

use clap::{Args, ValueEnum};

use crate::console::HttpClient;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8788";

/// Options shared by commands that talk to a running server
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Base URL of the leasedesk server
    #[arg(long, global = true, env = "LEASEDESK_URL", default_value = DEFAULT_SERVER_URL)]
    pub server: String,
}

impl ServerArgs {
    pub fn client(&self) -> HttpClient {
        let client = HttpClient::new(self.server.as_str());
        tracing::debug!(server = client.base_url(), "using server");
        client
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Quiet mode - IDs only
    Quiet,
}
