//! Client for the career-listing API.

mod client;
mod types;

pub use client::{CareersApi, FetchPosition};
pub use types::{JobPosition, Location};

#[cfg(test)]
pub use client::MockFetchPosition;
