//! Universal panel
//!
//! Two HTTP services over a shared document model:
//!
//! - **db-access** - browse MongoDB databases and collections, read and write
//!   documents, and infer collection schemas for form generation
//! - **mockdata** - generate realistic fake records from declarative schemas
//!   or a built-in preset catalog
//!
//! # CLI Usage
//!
//! ```bash
//! # Document gateway against a local MongoDB
//! panel serve-db-access --mongodb-uri mongodb://localhost:27017
//!
//! # Mock data service
//! panel serve-mockdata --port 8081
//!
//! # One-off generation, inference and validation
//! panel generate --preset user --count 100 --seed 42
//! panel infer --input users.jsonl --enhanced
//! panel validate --schema ticket.yaml
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use db_access::Deadlines;
use std::net::{IpAddr, SocketAddr};

pub mod config;
pub mod input;

pub use config::parse_duration;

/// Options shared by both HTTP services.
#[derive(Parser, Clone, Debug)]
pub struct HttpOpts {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "BIND_ADDRESS")]
    pub bind_address: IpAddr,

    /// Allowed CORS origins (comma separated)
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173,http://localhost:3000,http://localhost:8081"
    )]
    pub cors_origins: Vec<String>,
}

impl HttpOpts {
    pub fn socket_addr(&self, port: u16) -> SocketAddr {
        SocketAddr::new(self.bind_address, port)
    }
}

/// Backing store for the document gateway.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// MongoDB deployment given by `--mongodb-uri`
    Mongodb,
    /// In-process store, lost on exit
    Memory,
}

/// Deadlines applied to gateway operations.
#[derive(Parser, Clone, Debug)]
pub struct TimeoutOpts {
    /// Listing, counting and single-document operations (e.g. "10s")
    #[arg(long, default_value = "10s", env = "SHORT_TIMEOUT")]
    pub short_timeout: String,

    /// Schema detection and paginated reads
    #[arg(long, default_value = "30s", env = "MEDIUM_TIMEOUT")]
    pub medium_timeout: String,

    /// Multi-collection analysis and field removal
    #[arg(long, default_value = "60s", env = "LONG_TIMEOUT")]
    pub long_timeout: String,
}

impl TimeoutOpts {
    pub fn deadlines(&self) -> anyhow::Result<Deadlines> {
        Ok(Deadlines {
            short: parse_duration(&self.short_timeout).context("Invalid --short-timeout")?,
            medium: parse_duration(&self.medium_timeout).context("Invalid --medium-timeout")?,
            long: parse_duration(&self.long_timeout).context("Invalid --long-timeout")?,
        })
    }
}
