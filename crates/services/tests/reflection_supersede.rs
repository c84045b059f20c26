use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use hafiz_core::model::{JuzId, ReflectionView};
use services::{ReflectionClient, ReflectionError, ReflectionService};
use tokio::sync::Notify;

/// Answers "juz N" for each prompt, but holds prompts for gated Juz until released.
struct GatedClient {
    gates: HashMap<u8, Arc<Notify>>,
}

#[async_trait]
impl ReflectionClient for GatedClient {
    async fn generate(&self, prompt: &str) -> Result<String, ReflectionError> {
        let juz = self
            .gates
            .keys()
            .copied()
            .find(|n| prompt.contains(&format!("Juz {n} ")))
            .unwrap_or(0);
        if let Some(gate) = self.gates.get(&juz) {
            gate.notified().await;
        }
        Ok(format!("juz {juz}"))
    }
}

fn id(n: u8) -> JuzId {
    JuzId::new(n).unwrap()
}

#[tokio::test]
async fn stale_reflection_does_not_overwrite_newer_one() {
    let slow = Arc::new(Notify::new());
    let fast = Arc::new(Notify::new());
    let client = GatedClient {
        gates: HashMap::from([(1, Arc::clone(&slow)), (2, Arc::clone(&fast))]),
    };
    let service = Arc::new(ReflectionService::new(Arc::new(client)));

    let first = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.refresh(id(1)).await }
    });
    tokio::task::yield_now().await;
    while !service.current().is_loading() {
        tokio::task::yield_now().await;
    }

    let second = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.refresh(id(2)).await }
    });
    while service.current() != (ReflectionView::Loading { juz: id(2) }) {
        tokio::task::yield_now().await;
    }

    fast.notify_one();
    assert!(second.await.unwrap());
    slow.notify_one();
    assert!(!first.await.unwrap());

    assert_eq!(
        service.current(),
        ReflectionView::Ready {
            juz: id(2),
            text: "juz 2".into()
        }
    );
}
