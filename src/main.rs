use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use vocabmaster::app::{App, Tui};
use vocabmaster::catalogue::{load_all, SourceRegistry};
use vocabmaster::config::persistence::SavedWordsFile;
use vocabmaster::config::AppConfig;
use vocabmaster::error::user_friendly_message;
use vocabmaster::models::CATEGORIES;
use vocabmaster::saved::SavedWordsStore;
use vocabmaster::speech::speaker_for;
use vocabmaster::{Result, LOG_FILE, SAVED_WORDS_FILE};

/// Log to a file in the data directory; the terminal belongs to the UI
fn init_logging(config: &AppConfig) -> Result<()> {
    let dir = AppConfig::data_home()?;
    fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn source_registry(config: &AppConfig) -> SourceRegistry {
    let Some(dir) = &config.data_dir else {
        return SourceRegistry::embedded();
    };
    match SourceRegistry::embedded().with_directory(dir) {
        Ok(registry) => registry,
        Err(e) => {
            warn!(error = %e, "Ignoring word list directory");
            SourceRegistry::embedded()
        }
    }
}

fn saved_words_store() -> SavedWordsStore {
    let file = SavedWordsFile::new().unwrap_or_else(|e| {
        warn!(error = %e, "Falling back to saved words in the working directory");
        SavedWordsFile::at(SAVED_WORDS_FILE)
    });
    info!(path = %file.path().display(), "Saved words storage");
    SavedWordsStore::load(Box::new(file))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("{}", user_friendly_message(&e));
        AppConfig::default()
    });
    if let Err(e) = init_logging(&config) {
        eprintln!("Logging disabled: {}", e);
    }
    info!(?config, "Starting vocabmaster");

    let registry = source_registry(&config);
    let (catalogue_tx, catalogue_rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let catalogue = load_all(&registry, CATEGORIES).await;
        if catalogue_tx.send(catalogue).await.is_err() {
            debug!("UI closed before the catalogue arrived");
        }
    });

    let speaker = speaker_for(config.speech_enabled);
    let mut app = App::new(config, saved_words_store(), speaker, catalogue_rx);

    let mut tui = Tui::new()?;
    tui.init()?;
    let result = app.run(&mut tui);
    tui.restore()?;
    result
}
