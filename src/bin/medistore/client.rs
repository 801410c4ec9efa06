use medistore::Storefront;
use medistore::config::{self, LoadError, Settings};
use medistore::domain::session::Session;
use medistore::infra::error::InfraError;
use thiserror::Error;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Everything a handler needs: the wired storefront and the caller's session.
pub struct Ctx {
    pub storefront: Storefront,
    pub session: Option<Session>,
}

impl Ctx {
    pub fn new(settings: &Settings, session: Option<&str>) -> Result<Self, CliError> {
        Ok(Self {
            storefront: Storefront::from_settings(settings)?,
            session: session.and_then(Session::new),
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

pub fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    Ok(config::load(&cli.config)?)
}
