mod api;
mod common;
mod config;
mod storage;
mod ui;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;

use api::{ApiWorker, NodeApi};
use storage::IdentityStore;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "mesh_chat",
    version,
    about = "Desktop chat client for a local mesh node"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone)]
enum Mode {
    /// Store the local identity and exit (stand-in for the login flow)
    Login { user_id: String },
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    storage::ensure_data_dir().ok();

    let cli = Cli::parse();

    let store = match IdentityStore::open_default() {
        Ok(store) => store,
        Err(err) => {
            log::error!("Failed to open identity store: {err}");
            std::process::exit(1);
        }
    };

    if let Some(Mode::Login { user_id }) = cli.mode {
        if let Err(err) = store.save(&user_id) {
            log::error!("Failed to store identity: {err}");
            std::process::exit(1);
        }
        println!("Identity stored; start the client without a subcommand to chat.");
        return Ok(());
    }

    // Without a stored identity the client is unauthenticated and must not start.
    let identity = match store.load() {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            log::error!("No local identity found; run `mesh_chat login <user-id>` first");
            std::process::exit(1);
        }
        Err(err) => {
            log::error!("Failed to read stored identity: {err}");
            std::process::exit(1);
        }
    };

    let app_config = config::load_config(&cli.config);
    run_client(identity, store, app_config.api_base).await
}

async fn run_client(
    identity: String,
    store: IdentityStore,
    api_base: String,
) -> Result<(), eframe::Error> {
    // UI -> API worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // API worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let worker_cmd_tx = cmd_tx.clone();
    let worker_base = api_base.clone();
    tokio::spawn(async move {
        let worker = ApiWorker::new(NodeApi::new(worker_base), event_tx, cmd_rx, worker_cmd_tx);
        worker.run().await;
        log::info!("API worker stopped");
    });

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);
    let mut store = Some(store);

    eframe::run_native(
        "Mesh Chat",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");
            let identity_store = store
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!("Client started against node API at {api_base}");

            Ok(Box::new(ChatApp::new(
                cc,
                identity.clone(),
                identity_store,
                cmd_tx.clone(),
                event_receiver,
            )))
        }),
    )
}
