use clap::Parser;
use miette::{IntoDiagnostic, Result};
use orderflow::application::engine::LifecycleEngine;
use orderflow::domain::ports::{OrderStoreBox, PaymentStoreBox};
use orderflow::infrastructure::in_memory::{InMemoryOrderStore, InMemoryPaymentStore};
#[cfg(feature = "storage-rocksdb")]
use orderflow::infrastructure::rocksdb::RocksDBStore;
use orderflow::interfaces::csv::event_reader::EventReader;
use orderflow::interfaces::csv::report_writer::ReportWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input lifecycle events CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn build_engine(db_path: Option<PathBuf>) -> Result<LifecycleEngine> {
    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = db_path {
        // Use persistent storage (RocksDB)
        let store = RocksDBStore::open(db_path).into_diagnostic()?;

        let order_store: OrderStoreBox = Box::new(store.clone());
        let payment_store: PaymentStoreBox = Box::new(store);

        return Ok(LifecycleEngine::new(order_store, payment_store));
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    if db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }

    let order_store: OrderStoreBox = Box::new(InMemoryOrderStore::new());
    let payment_store: PaymentStoreBox = Box::new(InMemoryPaymentStore::new());
    Ok(LifecycleEngine::new(order_store, payment_store))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = build_engine(cli.db_path)?;

    // Replay events; a rejected event is reported and does not abort the run
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    for event_result in reader.events() {
        match event_result {
            Ok(event) => {
                if let Err(e) = engine.apply(event).await {
                    eprintln!("Error processing event: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading event: {}", e);
            }
        }
    }

    // Collect final state from engine
    let pairs = engine.into_results().await.into_diagnostic()?;

    // Output final state
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_report(pairs).into_diagnostic()?;

    Ok(())
}
