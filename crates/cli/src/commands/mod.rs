//! Shared command plumbing: the app context and the terminal prompt.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;

use std::io::{BufRead, Write as _};
use std::sync::Arc;

use cycle_bazaar_admin::Prompt;
use cycle_bazaar_client::storage::DurableStore;
use cycle_bazaar_client::{ApiClient, CartStore, ClientConfig, FileStore, MemoryStore, SessionStore};

/// Everything a command needs: the API client and the two shared stores,
/// hydrated from durable storage when a storage path is configured.
pub struct Context {
    pub api: ApiClient,
    pub session: SessionStore,
    pub cart: CartStore,
}

impl Context {
    /// Build the context from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when configuration is missing or the storage file
    /// cannot be opened.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = ClientConfig::from_env()?;
        let storage: Arc<dyn DurableStore> = match &config.storage_path {
            Some(path) => Arc::new(FileStore::open(path.clone())?),
            None => Arc::new(MemoryStore::new()),
        };

        let api = ApiClient::new(&config);
        let session = SessionStore::new(storage.clone());
        let cart = CartStore::new(api.clone(), storage);
        Ok(Self { api, session, cart })
    }

    /// Pull the server-side cart for the stored identity, if any.
    pub async fn sync_cart(&mut self) {
        let identity = self.session.identity().cloned();
        self.cart.sync_identity(identity.as_ref()).await;
    }
}

/// Confirmation prompt backed by the terminal.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> bool {
        let answer = ask(&format!("{question} [y/N] "));
        matches!(answer.as_deref(), Some("y" | "Y" | "yes"))
    }

    fn input(&self, question: &str) -> Option<String> {
        ask(&format!("{question} "))
    }
}

fn ask(prompt: &str) -> Option<String> {
    print!("{prompt}");
    std::io::stdout().flush().ok()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).ok()?;
    let line = line.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_owned())
    }
}
