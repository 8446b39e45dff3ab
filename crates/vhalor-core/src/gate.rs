//! Loading gate
//!
//! Readiness is a shared object handed to whoever needs it, never a global.
//! It starts out loading and opens once the host has finished loading the
//! page and the product model preload has settled, successfully or not.

use tokio::sync::watch;
use tracing::info;

use crate::asset::AssetOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssetStatus {
    #[default]
    Pending,
    Loaded,
    /// Preload failed or timed out; the page continues with a fallback visual
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
    pub page_loaded: bool,
    pub assets: AssetStatus,
}

impl Readiness {
    pub fn is_loading(&self) -> bool {
        !self.page_loaded || self.assets == AssetStatus::Pending
    }

    pub fn models_failed(&self) -> bool {
        self.assets == AssetStatus::Failed
    }
}

/// Owner of the readiness channel. Share it behind an `Arc`.
#[derive(Debug)]
pub struct LoadingGate {
    tx: watch::Sender<Readiness>,
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingGate {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Readiness::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Readiness> {
        self.tx.subscribe()
    }

    pub fn readiness(&self) -> Readiness {
        *self.tx.borrow()
    }

    /// The host finished loading the page
    pub fn page_loaded(&self) {
        self.update(|r| {
            if r.page_loaded {
                return false;
            }
            r.page_loaded = true;
            true
        });
    }

    /// The product model preload settled. Only the first call counts.
    pub fn assets_settled(&self, outcome: &AssetOutcome) {
        let status = match outcome {
            AssetOutcome::Loaded(_) => AssetStatus::Loaded,
            AssetOutcome::Failed { .. } => AssetStatus::Failed,
        };
        self.update(|r| {
            if r.assets != AssetStatus::Pending {
                return false;
            }
            r.assets = status;
            true
        });
    }

    fn update(&self, modify: impl FnOnce(&mut Readiness) -> bool) {
        let was_loading = self.readiness().is_loading();
        self.tx.send_if_modified(modify);
        let now = self.readiness();
        if was_loading && !now.is_loading() {
            if now.models_failed() {
                info!("Loading gate open (product model unavailable, using fallback)");
            } else {
                info!("Loading gate open");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::ProductModel;

    #[test]
    fn test_opens_only_after_both_signals() {
        let gate = LoadingGate::new();
        let rx = gate.subscribe();
        assert!(rx.borrow().is_loading());

        gate.page_loaded();
        assert!(rx.borrow().is_loading());

        gate.assets_settled(&AssetOutcome::Loaded(ProductModel::fallback()));
        assert!(!rx.borrow().is_loading());
        assert!(!rx.borrow().models_failed());
    }

    #[test]
    fn test_failed_assets_still_open_the_gate() {
        let gate = LoadingGate::new();
        gate.assets_settled(&AssetOutcome::Failed {
            reason: "timeout".to_string(),
        });
        gate.page_loaded();
        let readiness = gate.readiness();
        assert!(!readiness.is_loading());
        assert!(readiness.models_failed());
    }

    #[test]
    fn test_settlement_is_one_shot() {
        let gate = LoadingGate::new();
        gate.page_loaded();
        gate.assets_settled(&AssetOutcome::Loaded(ProductModel::fallback()));
        gate.assets_settled(&AssetOutcome::Failed {
            reason: "late".to_string(),
        });
        gate.page_loaded();
        assert_eq!(gate.readiness().assets, AssetStatus::Loaded);
        assert!(!gate.readiness().is_loading());
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let gate = std::sync::Arc::new(LoadingGate::new());
        let mut rx = gate.subscribe();

        let opener = gate.clone();
        tokio::spawn(async move {
            opener.page_loaded();
            opener.assets_settled(&AssetOutcome::Loaded(ProductModel::fallback()));
        });

        rx.wait_for(|r| !r.is_loading()).await.unwrap();
    }
}
