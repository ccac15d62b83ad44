//! Unit tests for the blogger bounded context.
#![expect(
    clippy::expect_used,
    reason = "tests fail loudly when fixtures cannot be built"
)]

mod profile_sync_tests;

use super::domain::{Blogger, BloggerFamily};
use mockable::DefaultClock;

/// Builds a fashion blogger with an empty catalogue.
pub fn fashion_blogger() -> Blogger {
    Blogger::new("Mia", BloggerFamily::Fashion, &DefaultClock).expect("valid fixture blogger")
}
