//! Post-mutation revalidation.
//!
//! Mutation wrappers hand every result to [`Revalidator::after`], which
//! decides from the envelope and the configured policy which tags to stale.

use std::sync::Arc;

use medistore_api_types::{Envelope, Payload};
use tracing::{debug, info, warn};

use crate::domain::mutations::{
    InvalidationPolicy, Mutation, MutationOutcome, tags_to_invalidate,
};
use crate::domain::tags::CacheTag;

use super::tag_cache::TagCache;

#[derive(Clone)]
pub struct Revalidator {
    cache: Arc<dyn TagCache>,
    policy: InvalidationPolicy,
}

impl Revalidator {
    pub fn new(cache: Arc<dyn TagCache>, policy: InvalidationPolicy) -> Self {
        Self { cache, policy }
    }

    /// Invalidate the tags `mutation` owes for this result. Returns the tags
    /// that were staled.
    pub fn after(&self, mutation: &Mutation, envelope: &Envelope<Payload>) -> Vec<CacheTag> {
        let outcome = outcome_of(envelope);
        let tags = tags_to_invalidate(mutation, self.policy, outcome);

        if tags.is_empty() {
            debug!(
                mutation = %mutation,
                outcome = ?outcome,
                "mutation left cache untouched"
            );
            return tags;
        }

        if outcome == MutationOutcome::Failed {
            warn!(
                mutation = %mutation,
                policy = ?self.policy,
                "invalidating cache after a failed write"
            );
        }

        for tag in &tags {
            self.cache.invalidate(tag);
            info!(mutation = %mutation, tag = %tag, "revalidated tag");
        }
        tags
    }
}

/// Classify an envelope: non-null data means success, a locally produced
/// error means the write was never sent.
pub fn outcome_of(envelope: &Envelope<Payload>) -> MutationOutcome {
    match (envelope.data(), envelope.error()) {
        (_, Some(error)) if error.is_local() => MutationOutcome::NotAttempted,
        (Some(data), None) if !data.is_null() => MutationOutcome::Succeeded,
        _ => MutationOutcome::Failed,
    }
}
