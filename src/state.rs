use std::sync::Arc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::config::Config;
use crate::translate::{GoogleTranslateClient, Translator};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub translator: Arc<dyn Translator>,
    pub session_tasks: Arc<DashMap<String, tokio::task::AbortHandle>>,
}

impl AppState {
    pub fn new(config: Config, api_key: String) -> anyhow::Result<Self> {
        let translator = Arc::new(GoogleTranslateClient::new(
            &config.translation_config,
            api_key,
        )?);

        Ok(Self {
            config,
            translator,
            session_tasks: Arc::new(DashMap::new()),
        })
    }

    pub fn generate_session_uid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
