//! Command-line surface for `medistore`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use medistore::cache::{CacheDirective, CacheMode};
use medistore::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "medistore",
    version,
    about = "Online pharmacy storefront data-access CLI",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigOverrides,

    /// Session cookie forwarded on authenticated calls (e.g. "token=...")
    #[arg(
        long,
        env = "MEDISTORE_SESSION",
        hide_env_values = true,
        global = true
    )]
    pub session: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Medicine categories
    Categories {
        #[command(subcommand)]
        action: CategoriesCmd,
    },
    /// Medicine catalogue
    Medicines {
        #[command(subcommand)]
        action: MedicinesCmd,
    },
    /// Orders (admin, customer, seller views)
    Orders {
        #[command(subcommand)]
        action: OrdersCmd,
    },
    /// Product reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewsCmd,
    },
    /// Health articles
    Blogs {
        #[command(subcommand)]
        action: BlogsCmd,
    },
    /// Homepage aggregate
    Home {
        #[command(flatten)]
        cache: CacheOpts,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CacheOpts {
    /// Cache mode (default|no-store|no-cache|reload|force-cache)
    #[arg(long, value_name = "MODE")]
    pub cache: Option<CacheMode>,

    /// Revalidate window in seconds
    #[arg(long, value_name = "SECONDS")]
    pub revalidate: Option<u64>,
}

impl CacheOpts {
    pub fn directive(&self) -> CacheDirective {
        CacheDirective {
            cache: self.cache,
            revalidate: self.revalidate.map(std::time::Duration::from_secs),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListOpts {
    /// Query filter as KEY=VALUE; repeatable. Empty values are dropped.
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    #[command(flatten)]
    pub cache: CacheOpts,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PayloadOpts {
    /// JSON payload inline
    #[arg(long, value_name = "JSON", conflicts_with = "file")]
    pub data: Option<String>,

    /// Read the JSON payload from a file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCmd {
    /// List categories
    List(ListOpts),
    /// Categories as {value, label} options
    Dropdown(CacheOpts),
    /// Show one category
    Get { id: String },
    /// Create a category
    Create(PayloadOpts),
    /// Update a category
    Update {
        id: String,
        #[command(flatten)]
        payload: PayloadOpts,
    },
    /// Delete a category
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum MedicinesCmd {
    /// List medicines
    List(ListOpts),
    /// The signed-in seller's medicines
    Mine(ListOpts),
    /// Show one medicine
    Get { id: String },
    /// Create a medicine
    Create(PayloadOpts),
    /// Update a medicine
    Update {
        id: String,
        #[command(flatten)]
        payload: PayloadOpts,
    },
    /// Delete a medicine
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum OrdersCmd {
    /// Every order (admin)
    All(ListOpts),
    /// The signed-in customer's orders
    Mine(ListOpts),
    /// Orders for the signed-in seller
    Seller(ListOpts),
    /// Show one order
    Get { id: String },
    /// Place an order from a JSON payload {items, shippingAddress, ...}
    Create(PayloadOpts),
    /// Cancel an order
    Cancel { id: String },
    /// Change an order's status
    Status {
        id: String,
        #[arg(long)]
        status: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReviewsCmd {
    /// Reviews of one medicine
    ForMedicine {
        medicine_id: String,
        #[command(flatten)]
        list: ListOpts,
    },
    /// Reviews written by the signed-in customer
    Mine(ListOpts),
    /// Reviews of the signed-in seller's medicines
    Seller(ListOpts),
    /// Review a medicine
    Create {
        #[arg(long, default_value = "")]
        medicine_id: String,
        #[arg(long, allow_negative_numbers = true)]
        rating: i32,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Reply to a review (seller)
    Reply {
        id: String,
        #[arg(long)]
        comment: String,
    },
    /// Delete a review
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum BlogsCmd {
    /// List posts
    List(ListOpts),
    /// Show one post
    Get {
        id: String,
        #[command(flatten)]
        cache: CacheOpts,
    },
}
