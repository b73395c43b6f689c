//! Session-scoped cart storage
//!
//! The cart is ephemeral, exclusively owned by one operator session, and
//! holds pending invoice lines until checkout. Reset points: explicit
//! clear, logout, and a completed sale.

use std::collections::HashMap;
use std::sync::Arc;

use shared::models::CartLine;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory carts keyed by session id.
#[derive(Clone, Default)]
pub struct CartStore {
    inner: Arc<RwLock<HashMap<Uuid, Vec<CartLine>>>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the session's cart.
    pub async fn add(&self, session_id: Uuid, line: CartLine) {
        self.inner
            .write()
            .await
            .entry(session_id)
            .or_default()
            .push(line);
    }

    /// Current lines of the session's cart, in insertion order.
    pub async fn lines(&self, session_id: Uuid) -> Vec<CartLine> {
        self.inner
            .read()
            .await
            .get(&session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop the session's cart.
    pub async fn clear(&self, session_id: Uuid) {
        self.inner.write().await.remove(&session_id);
    }

    /// Remove and return the session's cart (used at checkout).
    pub async fn take(&self, session_id: Uuid) -> Vec<CartLine> {
        self.inner
            .write()
            .await
            .remove(&session_id)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::types::LineKind;

    fn line(description: &str) -> CartLine {
        CartLine {
            kind: LineKind::Service,
            article_id: None,
            description: description.to_string(),
            quantity: 1,
            unit_price: Decimal::from(15),
            cost_snapshot: Decimal::ZERO,
        }
    }

    #[tokio::test]
    async fn carts_are_isolated_per_session() {
        let store = CartStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.add(a, line("montage")).await;
        store.add(b, line("valve")).await;

        assert_eq!(store.lines(a).await.len(), 1);
        assert_eq!(store.lines(b).await.len(), 1);
        assert_eq!(store.lines(a).await[0].description, "montage");
    }

    #[tokio::test]
    async fn take_empties_the_cart() {
        let store = CartStore::new();
        let session = Uuid::new_v4();
        store.add(session, line("montage")).await;

        let taken = store.take(session).await;
        assert_eq!(taken.len(), 1);
        assert!(store.lines(session).await.is_empty());
    }
}
