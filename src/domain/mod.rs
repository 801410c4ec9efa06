//! Domain vocabulary: cache partitions, mutations, request parameters and
//! the local guards applied before any request leaves the process.

pub mod cart;
pub mod error;
pub mod mutations;
pub mod params;
pub mod session;
pub mod tags;
pub mod validation;
