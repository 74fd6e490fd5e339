use anyhow::{Context as _, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::cache::DoneDateCache;
use crate::config::Config;
use crate::session::{AuthState, SessionContext};
use crate::workout::SaveTransaction;

/// Everything one command invocation needs, wired from the config file
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionContext>,
    pub client: Arc<ApiClient>,
    pub dates: Arc<DoneDateCache>,
}

impl AppContext {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(&PathBuf::from(path))?,
            None => Config::load()?,
        };
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let token = Some(config.auth.token.clone());
        let session = SessionContext::new(token);
        let client = Arc::new(ApiClient::new(&config.api, Arc::clone(&session))?);
        let dates = Arc::new(DoneDateCache::new(Arc::clone(&client)));

        Ok(Self {
            config,
            session,
            client,
            dates,
        })
    }

    pub fn save_transaction(&self) -> SaveTransaction {
        SaveTransaction::new(Arc::clone(&self.client), Arc::clone(&self.dates))
    }

    /// Stop early when no token is stored
    pub fn require_login(&self) -> Result<()> {
        if self.session.is_authenticated() {
            return Ok(());
        }
        Err(anyhow::anyhow!(
            "You are not logged in. Use 'muscle-log login' to authenticate."
        ))
    }

    /// Write the session back to the credential store.
    ///
    /// If the server rejected the token during this command the stored
    /// token is cleared so the next run starts at login.
    pub fn finish(mut self) -> Result<()> {
        let expired = *self.session.subscribe().borrow() == AuthState::Expired
            && self.config.is_authenticated();

        if expired {
            self.config.clear_token();
            self.config
                .save()
                .context("Failed to clear expired session token")?;

            println!();
            println!("{} Your session has expired.", "✗".red());
            println!("Use 'muscle-log login' to authenticate again.");
        }

        Ok(())
    }
}
