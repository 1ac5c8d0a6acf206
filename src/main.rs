//! Command-line interface for the universal panel
//!
//! # Usage Examples
//!
//! ## Services
//! ```bash
//! # Document gateway on :8080 backed by MongoDB
//! MONGODB_URI=mongodb://localhost:27017 panel serve-db-access
//!
//! # Document gateway with an in-memory store and tighter deadlines
//! panel serve-db-access --store memory --short-timeout 5s
//!
//! # Mock data service on :8081
//! panel serve-mockdata --max-records 5000
//! ```
//!
//! ## One-off commands
//! ```bash
//! panel generate --preset user --count 100 --seed 42
//! panel generate --schema ticket.yaml --count 20
//! panel infer --input users.jsonl --enhanced
//! panel validate --schema ticket.yaml
//! ```

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use db_access::{shared_client, DocumentStore, Gateway, MemoryStore};
use mockdata_service::{GenerateRequest, MockdataService, SchemaService};
use panel_api::{db_access_router, mockdata_router, serve, with_layers, MockdataState};
use panel_core::validation::MAX_RECORD_COUNT;
use panel_core::Schema;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use universal_panel::{input, HttpOpts, StoreKind, TimeoutOpts};

#[derive(Parser)]
#[command(name = "panel")]
#[command(about = "Document gateway and mock data generator for the universal panel")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the document gateway over HTTP
    ServeDbAccess {
        /// Port to listen on
        #[arg(long, default_value_t = 8080, env = "PORT")]
        port: u16,

        #[command(flatten)]
        http: HttpOpts,

        /// Backing store
        #[arg(long, value_enum, default_value = "mongodb", env = "STORE")]
        store: StoreKind,

        /// MongoDB connection string (required with --store mongodb)
        #[arg(long, env = "MONGODB_URI")]
        mongodb_uri: Option<String>,

        #[command(flatten)]
        timeouts: TimeoutOpts,
    },

    /// Serve the mock data generator over HTTP
    ServeMockdata {
        /// Port to listen on
        #[arg(long, default_value_t = 8081, env = "PORT")]
        port: u16,

        #[command(flatten)]
        http: HttpOpts,

        /// Upper bound on records per request
        #[arg(long, default_value_t = MAX_RECORD_COUNT, env = "MAX_RECORDS")]
        max_records: i64,
    },

    /// Generate records and print them as JSON
    #[command(group(ArgGroup::new("source").required(true).args(["preset", "schema"])))]
    Generate {
        /// Preset schema name (user, product, blog_post, order, company)
        #[arg(long)]
        preset: Option<String>,

        /// Schema file (YAML or JSON)
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Number of records
        #[arg(long, default_value_t = 10)]
        count: i64,

        /// Seed for repeatable output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Infer a schema from a JSON Lines sample and print it
    Infer {
        /// JSONL file, one document per line
        #[arg(long)]
        input: PathBuf,

        /// Include per-field statistics
        #[arg(long)]
        enhanced: bool,
    },

    /// Check a schema file and print the structural report
    Validate {
        /// Schema file (YAML or JSON)
        #[arg(long)]
        schema: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ServeDbAccess {
            port,
            http,
            store,
            mongodb_uri,
            timeouts,
        } => run_db_access(port, http, store, mongodb_uri, timeouts).await,
        Commands::ServeMockdata {
            port,
            http,
            max_records,
        } => run_mockdata(port, http, max_records).await,
        Commands::Generate {
            preset,
            schema,
            count,
            seed,
        } => run_generate(preset, schema, count, seed),
        Commands::Infer { input, enhanced } => run_infer(input, enhanced),
        Commands::Validate { schema } => run_validate(schema),
    }
}

async fn run_db_access(
    port: u16,
    http: HttpOpts,
    store: StoreKind,
    mongodb_uri: Option<String>,
    timeouts: TimeoutOpts,
) -> anyhow::Result<()> {
    let deadlines = timeouts.deadlines()?;

    let store: Arc<dyn DocumentStore> = match store {
        StoreKind::Mongodb => {
            let uri = mongodb_uri
                .context("--mongodb-uri (or MONGODB_URI) is required with --store mongodb")?;
            let client = shared_client(&uri)
                .await
                .context("Failed to connect to MongoDB")?;
            Arc::new(client.clone())
        }
        StoreKind::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let gateway = Gateway::new(store, deadlines);
    let app = with_layers(db_access_router(gateway), &http.cors_origins);

    tracing::info!("Starting db-access service with {:?} deadlines", deadlines);
    serve(http.socket_addr(port), app)
        .await
        .context("db-access server failed")
}

async fn run_mockdata(port: u16, http: HttpOpts, max_records: i64) -> anyhow::Result<()> {
    let service = MockdataService::new().with_max_records(max_records);
    let app = with_layers(
        mockdata_router(MockdataState::new(service)),
        &http.cors_origins,
    );

    tracing::info!("Starting mockdata service (max {} records)", max_records);
    serve(http.socket_addr(port), app)
        .await
        .context("mockdata server failed")
}

fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    Schema::from_file(path).with_context(|| format!("Failed to load schema from {path:?}"))
}

fn run_generate(
    preset: Option<String>,
    schema: Option<PathBuf>,
    count: i64,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut service = MockdataService::new();
    if let Some(seed) = seed {
        service = service.with_seed(seed);
    }

    let generated = match (preset, schema) {
        (Some(name), _) => service.generate_preset(&name, count)?,
        (None, Some(path)) => {
            let schema = load_schema(&path)?;
            service.generate(&GenerateRequest { schema, count })?
        }
        (None, None) => anyhow::bail!("Either --preset or --schema is required"),
    };

    tracing::info!("Generated {} records", generated.count);
    println!("{}", serde_json::to_string_pretty(&generated.data)?);
    Ok(())
}

fn run_infer(input: PathBuf, enhanced: bool) -> anyhow::Result<()> {
    let documents = input::read_documents_from_file(&input)?;
    tracing::info!("Read {} documents from {:?}", documents.len(), input);

    let summary = schema_inference::analyze(&documents, enhanced);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_validate(schema: PathBuf) -> anyhow::Result<()> {
    let parsed = load_schema(&schema)?;
    let report = SchemaService::new().validate_structure(&parsed);
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.valid {
        anyhow::bail!("Schema has {} error(s)", report.errors.len());
    }
    Ok(())
}
