use std::sync::Arc;

use gemdex_core::{EmojiGlyph, GemId, Record};
use gemdex_store::{FileStore, Preferences, RecordCache, ReplaceOutcome};
use tempfile::TempDir;

fn record(id: &str, name: &str) -> Record {
    Record::new(GemId::new(id).unwrap(), name, format!("{name} description"))
}

#[tokio::test]
async fn cache_and_preferences_share_one_document() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));
    let cache = RecordCache::new(store.clone());
    let prefs = Preferences::new(store.clone());

    let outcome = cache
        .replace_records(vec![record("a", "Alpha"), record("b", "Beta")])
        .await;
    assert_eq!(outcome, ReplaceOutcome::Replaced { count: 2 });

    prefs.toggle_favorite(&GemId::new("b").unwrap()).await.unwrap();
    prefs
        .set_emoji(&GemId::new("a").unwrap(), EmojiGlyph::new("🧪").unwrap())
        .await
        .unwrap();

    // A fresh handle sees everything that was written.
    let reopened = RecordCache::new(FileStore::new(dir.path()));
    let snapshot = reopened.snapshot().await;

    assert_eq!(snapshot.records.len(), 2);
    assert!(snapshot.favorites.contains(&GemId::new("b").unwrap()));
    assert_eq!(snapshot.emoji_map.glyph_for(&GemId::new("a").unwrap()), "🧪");
}

#[tokio::test]
async fn concurrent_writers_do_not_lose_keys() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let prefs = Preferences::new(store.clone());
        handles.push(tokio::spawn(async move {
            let id = GemId::new(format!("gem-{i}")).unwrap();
            prefs.set_emoji(&id, EmojiGlyph::new("⭐").unwrap()).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let prefs = Preferences::new(store);
    assert_eq!(prefs.emoji_map().await.unwrap().len(), 8);
}
