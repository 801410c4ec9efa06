//! Cache partition tags.
//!
//! A tag names a class of cached reads. Reads carry the tags of the
//! partitions they depend on; mutations invalidate tags, which stales every
//! read carrying them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const REVIEWS_PREFIX: &str = "reviews-";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheTag {
    Categories,
    Medicines,
    /// All orders (admin view).
    Orders,
    /// Orders placed by the current customer.
    MyOrders,
    /// Orders containing the current seller's medicines.
    SellerOrders,
    /// Reviews of one medicine, keyed by medicine id.
    Reviews(String),
    MyReviews,
    SellerReviews,
    /// Homepage aggregate.
    Homepage,
    /// Blog posts. Read-only partition.
    Blogs,
}

impl CacheTag {
    pub fn reviews_for(medicine_id: impl Into<String>) -> Self {
        Self::Reviews(medicine_id.into())
    }

    /// Wire name of the tag, e.g. `my-orders` or `reviews-m1`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categories => f.write_str("categories"),
            Self::Medicines => f.write_str("medicines"),
            Self::Orders => f.write_str("orders"),
            Self::MyOrders => f.write_str("my-orders"),
            Self::SellerOrders => f.write_str("seller-orders"),
            Self::Reviews(medicine_id) => write!(f, "{REVIEWS_PREFIX}{medicine_id}"),
            Self::MyReviews => f.write_str("my-reviews"),
            Self::SellerReviews => f.write_str("seller-reviews"),
            Self::Homepage => f.write_str("homepage"),
            Self::Blogs => f.write_str("blogs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cache tag `{0}`")]
pub struct UnknownTag(pub String);

impl FromStr for CacheTag {
    type Err = UnknownTag;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let tag = match raw {
            "categories" => Self::Categories,
            "medicines" => Self::Medicines,
            "orders" => Self::Orders,
            "my-orders" => Self::MyOrders,
            "seller-orders" => Self::SellerOrders,
            "my-reviews" => Self::MyReviews,
            "seller-reviews" => Self::SellerReviews,
            "homepage" => Self::Homepage,
            "blogs" => Self::Blogs,
            other => match other.strip_prefix(REVIEWS_PREFIX) {
                Some(medicine_id) if !medicine_id.is_empty() => {
                    Self::Reviews(medicine_id.to_string())
                }
                _ => return Err(UnknownTag(other.to_string())),
            },
        };
        Ok(tag)
    }
}
