use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BreachLedger;
use crate::utils::errors::AppResult;

/// Registro en memoria; se pierde al reiniciar el proceso
#[derive(Debug, Default)]
pub struct MemoryBreachLedger {
    breached: RwLock<HashSet<Uuid>>,
}

impl MemoryBreachLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_breached(&self, vehicle_id: Uuid) -> bool {
        self.breached.read().await.contains(&vehicle_id)
    }
}

#[async_trait]
impl BreachLedger for MemoryBreachLedger {
    async fn mark_breached(&self, vehicle_id: Uuid) -> AppResult<bool> {
        Ok(self.breached.write().await.insert(vehicle_id))
    }

    async fn clear(&self, vehicle_id: Uuid) -> AppResult<()> {
        self.breached.write().await.remove(&vehicle_id);
        Ok(())
    }
}
