mod app;
mod audio_url;
mod config;
mod feed;
mod preferences;
mod record;
mod store;
mod ui;

use app::AppState;
use config::{Config, Credentials};
use feed::UpdateFeed;
use preferences::Preferences;
use store::PostgrestStore;

fn main() {
    env_logger::init();
    log::info!("Update feed starting");

    // Without credentials there is nothing to show.
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            log::error!("Configuration error: {e}");
            eprintln!("update-feed: {e}");
            std::process::exit(1);
        }
    };

    let config = Config::load();
    let preferences = Preferences::load();
    log::info!(
        "Feed {:?} from table {}, {} per page, refresh every {} min",
        config.label,
        config.table,
        config.page_size,
        config.refresh_minutes
    );

    let store = PostgrestStore::new(&credentials, &config.table, &config.application_name);
    let storage_base = audio_url::storage_base(&credentials.endpoint, &config.audio_bucket);
    let feed = UpdateFeed::new(store, config.label.clone(), storage_base);
    let state = AppState::new(config, preferences, feed);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };
    runtime.block_on(app::run(state));
    // The stdin reader may still be parked in a blocking read.
    runtime.shutdown_background();
}
