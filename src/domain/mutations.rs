//! Mutation → cache tag map.
//!
//! Every write the storefront performs is a [`Mutation`]. Its tag set is
//! fixed; whether the set is applied depends on the [`InvalidationPolicy`]
//! and on how the write turned out.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use super::tags::CacheTag;

const ORDER_TAGS: [CacheTag; 3] = [CacheTag::Orders, CacheTag::MyOrders, CacheTag::SellerOrders];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
    CreateMedicine,
    UpdateMedicine,
    DeleteMedicine,
    CreateOrder,
    CancelOrder,
    UpdateOrderStatus,
    CreateReview { medicine_id: String },
    ReplyReview,
    DeleteReview,
}

impl Mutation {
    /// The complete set of tags this mutation stales.
    pub fn tags(&self) -> Vec<CacheTag> {
        match self {
            Self::CreateCategory | Self::UpdateCategory | Self::DeleteCategory => {
                vec![CacheTag::Categories]
            }
            Self::CreateMedicine | Self::UpdateMedicine | Self::DeleteMedicine => {
                vec![CacheTag::Medicines]
            }
            Self::CreateOrder | Self::CancelOrder | Self::UpdateOrderStatus => ORDER_TAGS.to_vec(),
            Self::CreateReview { medicine_id } => vec![
                CacheTag::reviews_for(medicine_id.as_str()),
                CacheTag::MyReviews,
            ],
            Self::ReplyReview => vec![CacheTag::SellerReviews],
            Self::DeleteReview => vec![CacheTag::MyReviews, CacheTag::SellerReviews],
        }
    }

    /// Review mutations always check the result before invalidating.
    /// Catalog and order mutations historically did not.
    pub fn always_checks_result(&self) -> bool {
        matches!(
            self,
            Self::CreateReview { .. } | Self::ReplyReview | Self::DeleteReview
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateCategory => "create_category",
            Self::UpdateCategory => "update_category",
            Self::DeleteCategory => "delete_category",
            Self::CreateMedicine => "create_medicine",
            Self::UpdateMedicine => "update_medicine",
            Self::DeleteMedicine => "delete_medicine",
            Self::CreateOrder => "create_order",
            Self::CancelOrder => "cancel_order",
            Self::UpdateOrderStatus => "update_order_status",
            Self::CreateReview { .. } => "create_review",
            Self::ReplyReview => "reply_review",
            Self::DeleteReview => "delete_review",
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a mutation turned out, as far as invalidation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The remote API accepted the write (`data` is non-null).
    Succeeded,
    /// The write was sent and failed (transport error or remote rejection).
    Failed,
    /// A local guard rejected the call; nothing was sent.
    NotAttempted,
}

/// When mutation wrappers invalidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidationPolicy {
    /// Invalidate only when the write succeeded.
    #[default]
    OnSuccess,
    /// Catalog and order writes invalidate even when they failed; review
    /// writes only on success.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown invalidation policy `{0}` (expected `on_success` or `legacy`)")]
pub struct UnknownPolicy(pub String);

impl FromStr for InvalidationPolicy {
    type Err = UnknownPolicy;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "on_success" => Ok(Self::OnSuccess),
            "legacy" => Ok(Self::Legacy),
            _ => Err(UnknownPolicy(raw.to_string())),
        }
    }
}

/// Tags to invalidate for `mutation` given its outcome under `policy`.
pub fn tags_to_invalidate(
    mutation: &Mutation,
    policy: InvalidationPolicy,
    outcome: MutationOutcome,
) -> Vec<CacheTag> {
    let invalidate = match outcome {
        MutationOutcome::Succeeded => true,
        MutationOutcome::NotAttempted => false,
        MutationOutcome::Failed => {
            policy == InvalidationPolicy::Legacy && !mutation.always_checks_result()
        }
    };
    if invalidate {
        mutation.tags()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn names(tags: Vec<CacheTag>) -> BTreeSet<String> {
        tags.into_iter().map(|tag| tag.to_string()).collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn catalog_mutations_touch_their_partition() {
        for m in [
            Mutation::CreateCategory,
            Mutation::UpdateCategory,
            Mutation::DeleteCategory,
        ] {
            assert_eq!(names(m.tags()), set(&["categories"]));
        }
        for m in [
            Mutation::CreateMedicine,
            Mutation::UpdateMedicine,
            Mutation::DeleteMedicine,
        ] {
            assert_eq!(names(m.tags()), set(&["medicines"]));
        }
    }

    #[test]
    fn order_mutations_touch_all_order_views() {
        for m in [
            Mutation::CreateOrder,
            Mutation::CancelOrder,
            Mutation::UpdateOrderStatus,
        ] {
            assert_eq!(
                names(m.tags()),
                set(&["orders", "my-orders", "seller-orders"])
            );
        }
    }

    #[test]
    fn review_mutations_map_exactly() {
        let create = Mutation::CreateReview {
            medicine_id: "m1".into(),
        };
        assert_eq!(names(create.tags()), set(&["reviews-m1", "my-reviews"]));
        assert_eq!(names(Mutation::ReplyReview.tags()), set(&["seller-reviews"]));
        assert_eq!(
            names(Mutation::DeleteReview.tags()),
            set(&["my-reviews", "seller-reviews"])
        );
    }

    #[test]
    fn on_success_policy_skips_failed_writes() {
        let tags = tags_to_invalidate(
            &Mutation::CancelOrder,
            InvalidationPolicy::OnSuccess,
            MutationOutcome::Failed,
        );
        assert!(tags.is_empty());
    }

    #[test]
    fn legacy_policy_invalidates_failed_order_writes() {
        let tags = tags_to_invalidate(
            &Mutation::CancelOrder,
            InvalidationPolicy::Legacy,
            MutationOutcome::Failed,
        );
        assert_eq!(names(tags), set(&["orders", "my-orders", "seller-orders"]));
    }

    #[test]
    fn legacy_policy_still_checks_review_results() {
        for m in [
            Mutation::CreateReview {
                medicine_id: "m1".into(),
            },
            Mutation::ReplyReview,
            Mutation::DeleteReview,
        ] {
            assert!(
                tags_to_invalidate(&m, InvalidationPolicy::Legacy, MutationOutcome::Failed)
                    .is_empty()
            );
        }
    }

    #[test]
    fn local_rejections_never_invalidate() {
        for policy in [InvalidationPolicy::OnSuccess, InvalidationPolicy::Legacy] {
            assert!(
                tags_to_invalidate(
                    &Mutation::CreateCategory,
                    policy,
                    MutationOutcome::NotAttempted
                )
                .is_empty()
            );
        }
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!(
            "legacy".parse::<InvalidationPolicy>(),
            Ok(InvalidationPolicy::Legacy)
        );
        assert_eq!(
            "on-success".parse::<InvalidationPolicy>(),
            Ok(InvalidationPolicy::OnSuccess)
        );
        assert!("sometimes".parse::<InvalidationPolicy>().is_err());
    }
}
