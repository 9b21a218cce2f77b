pub mod vault_api;

use anyhow::Result;

use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> Result<BackendBox> {
        return Ok(Box::new(vault_api::VaultApi::from_config()?));
    }
}
