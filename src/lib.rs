pub mod bucket_queue;
pub mod greedy;
pub mod instance;
pub mod genotype;

// Re-exports to flatten the crate.
pub use bucket_queue::{BucketQueue, BucketQueueError};
pub use greedy::{set_cover_greedy, set_cover_greedy_with, Cover, CoverStatus, SetCoverOptions, StopReason};
pub use instance::Instance;
