use std::sync::Arc;

use burrow_cave::{CaveError, CaveSystem};
use burrow_runtime::{Runtime, RuntimeError};
use burrow_world::{CaveSettings, SettingsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Cave(#[from] CaveError),
}

/// Host for at most one cave.
pub struct App {
    runtime: Arc<Runtime>,
    cave: Option<CaveSystem>,
}

impl App {
    pub fn new(runtime: Arc<Runtime>) -> Self {
        Self {
            runtime,
            cave: None,
        }
    }

    pub fn create_cave(&mut self, settings: CaveSettings) -> Result<&mut CaveSystem, CaveError> {
        if self.cave.is_some() {
            log::warn!("cave already created; ignoring second initialization");
            return Err(CaveError::AlreadyCreated);
        }
        Ok(self
            .cave
            .insert(CaveSystem::new(Arc::new(settings), self.runtime.clone())))
    }

    pub fn cave(&self) -> Option<&CaveSystem> {
        self.cave.as_ref()
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}
