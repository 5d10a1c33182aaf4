pub mod detect;
pub mod dom;
pub mod error;
pub mod harvest;
pub mod links;
pub mod models;
pub mod paywall;
pub mod sites;
pub mod throttle;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use detect::SchemaVariant;
pub use error::AppError;
pub use harvest::{HarvestEvent, HarvestReporter, Harvester, SkipReason, TracingHarvestReporter};
pub use links::normalize;
pub use models::{
    ChapterOutcome, ChapterReference, ChapterStatus, ExtractionResult, Harvest, ListingState,
    sanitize_title,
};
pub use sites::{ListingScan, Site, SiteAdapter};
pub use throttle::ThrottleConfig;
pub use traits::{ChapterSink, Fetcher, NullSink};
