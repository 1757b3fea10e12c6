//! End-to-end message lifecycle over the in-memory collaborators.

use std::sync::Arc;

use mnemosyne::{EntityCache, MemoryIndex, MemoryStore, Message, MessageCache};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mnemosyne=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[tokio::test]
async fn message_lifecycle() {
    init_tracing();

    let engine = Arc::new(MemoryStore::new());
    let index = Arc::new(MemoryIndex::new("message"));
    let cache: MessageCache<_, _> = EntityCache::new(Arc::clone(&engine), Arc::clone(&index));

    assert_eq!(
        MessageCache::<MemoryStore<Message>, MemoryIndex>::build_id("42"),
        "message.42"
    );

    // Create: the bound result carries the assigned id, the index knows it.
    let created = cache.update("42", Message::new("hi")).await.unwrap();
    assert!(created.is_bound());
    let entity = created.entity().unwrap();
    assert_eq!(entity.id.as_deref(), Some("42"));
    assert_eq!(entity.content, "hi");
    assert!(index.contains("42"));
    assert_eq!(engine.keys(), vec!["message.42"]);

    // Read back through a fresh unbound call.
    let fetched = cache.get("42").await.unwrap().unwrap();
    assert_eq!(fetched.entity().unwrap().content, "hi");

    // Update through the bound instance, then query.
    let edited = created
        .update("42", Message::new("hi again").channel("#general"))
        .await
        .unwrap();
    assert_eq!(edited.entity().unwrap().content, "hi again");

    let found = cache
        .find(|m| m.channel.as_deref() == Some("#general"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.entity().unwrap().id.as_deref(), Some("42"));

    // Delete: index entry goes, a later get misses.
    assert!(cache.remove("42").await.unwrap().is_some());
    assert!(!index.contains("42"));
    assert!(cache.get("42").await.unwrap().is_none());
    assert!(engine.is_empty());
}

#[tokio::test]
async fn multiple_namespaced_messages() {
    init_tracing();

    let engine = Arc::new(MemoryStore::new());
    let index = Arc::new(MemoryIndex::new("message"));
    let cache: MessageCache<_, _> = EntityCache::new(engine, Arc::clone(&index));

    for (id, content) in [("1", "alpha"), ("2", "beta"), ("3", "gamma")] {
        cache.update(id, Message::new(content)).await.unwrap();
    }
    assert_eq!(index.len(), 3);

    let hits = cache
        .filter(|m| m.content.contains('a'), Some(&["1", "2", "3"]))
        .await
        .unwrap();
    assert_eq!(hits.len(), 3);

    let hits = cache
        .filter(|m| m.content.starts_with('b'), None)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entity().unwrap().id.as_deref(), Some("2"));
}
