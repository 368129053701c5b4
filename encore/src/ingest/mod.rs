mod fetcher;
mod pipeline;
mod rate;
mod windows;

pub use fetcher::EventFetcher;
pub use pipeline::{IngestReport, IngestionPipeline};
pub use rate::{FixedDelay, RatePolicy};
pub use windows::{month_windows, DateWindow};
