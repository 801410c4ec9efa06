//! Tag generations and tag <-> key bookkeeping.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use uuid::Uuid;

use crate::domain::tags::CacheTag;

use super::keys::CacheKey;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "medistore::cache::registry";

/// Monotonic per-tag counter; bumped on every invalidation.
pub type Generation = u64;

/// Generations of a read's tags, captured before the read was fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSnapshot {
    entries: Vec<(CacheTag, Generation)>,
}

impl TagSnapshot {
    pub fn tags(&self) -> impl Iterator<Item = &CacheTag> {
        self.entries.iter().map(|(tag, _)| tag)
    }
}

/// Result of invalidating a tag.
#[derive(Debug, Clone)]
pub struct InvalidationEvent {
    pub id: Uuid,
    pub tag: CacheTag,
    pub generation: Generation,
    /// Keys that were registered under the tag and are now stale.
    pub affected: HashSet<CacheKey>,
}

/// Lock order is always `generations`, then `tag_to_keys`, then `key_to_tags`.
#[derive(Default)]
pub struct TagRegistry {
    generations: RwLock<HashMap<CacheTag, Generation>>,
    tag_to_keys: RwLock<HashMap<CacheTag, HashSet<CacheKey>>>,
    key_to_tags: RwLock<HashMap<CacheKey, HashSet<CacheTag>>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self, tags: &[CacheTag]) -> TagSnapshot {
        let generations = rw_read(&self.generations, SOURCE, "snapshot");
        let mut entries: Vec<(CacheTag, Generation)> = Vec::with_capacity(tags.len());
        for tag in tags {
            if entries.iter().any(|(seen, _)| seen == tag) {
                continue;
            }
            entries.push((tag.clone(), generations.get(tag).copied().unwrap_or(0)));
        }
        TagSnapshot { entries }
    }

    /// True when no tag in the snapshot has been invalidated since it was taken.
    pub fn is_current(&self, snapshot: &TagSnapshot) -> bool {
        let generations = rw_read(&self.generations, SOURCE, "is_current");
        snapshot
            .entries
            .iter()
            .all(|(tag, generation)| generations.get(tag).copied().unwrap_or(0) == *generation)
    }

    pub fn register(&self, key: &CacheKey, snapshot: &TagSnapshot) {
        let mut tag_to_keys = rw_write(&self.tag_to_keys, SOURCE, "register.tag_to_keys");
        let mut key_to_tags = rw_write(&self.key_to_tags, SOURCE, "register.key_to_tags");

        let tags = key_to_tags.entry(key.clone()).or_default();
        for tag in snapshot.tags() {
            tags.insert(tag.clone());
            tag_to_keys
                .entry(tag.clone())
                .or_default()
                .insert(key.clone());
        }
    }

    pub fn unregister(&self, key: &CacheKey) {
        let mut tag_to_keys = rw_write(&self.tag_to_keys, SOURCE, "unregister.tag_to_keys");
        let mut key_to_tags = rw_write(&self.key_to_tags, SOURCE, "unregister.key_to_tags");

        if let Some(tags) = key_to_tags.remove(key) {
            for tag in tags {
                detach(&mut tag_to_keys, &tag, key);
            }
        }
    }

    /// Bump the tag's generation and forget every key registered under it.
    pub fn invalidate(&self, tag: &CacheTag) -> InvalidationEvent {
        let generation = {
            let mut generations = rw_write(&self.generations, SOURCE, "invalidate.generations");
            let slot = generations.entry(tag.clone()).or_insert(0);
            *slot += 1;
            *slot
        };

        let mut tag_to_keys = rw_write(&self.tag_to_keys, SOURCE, "invalidate.tag_to_keys");
        let mut key_to_tags = rw_write(&self.key_to_tags, SOURCE, "invalidate.key_to_tags");

        let affected = tag_to_keys.remove(tag).unwrap_or_default();
        for key in &affected {
            if let Some(tags) = key_to_tags.remove(key) {
                for other in tags.iter().filter(|other| *other != tag) {
                    detach(&mut tag_to_keys, other, key);
                }
            }
        }

        InvalidationEvent {
            id: Uuid::new_v4(),
            tag: tag.clone(),
            generation,
            affected,
        }
    }

}

fn detach(tag_to_keys: &mut HashMap<CacheTag, HashSet<CacheKey>>, tag: &CacheTag, key: &CacheKey) {
    if let Some(keys) = tag_to_keys.get_mut(tag) {
        keys.remove(key);
        if keys.is_empty() {
            tag_to_keys.remove(tag);
        }
    }
}
