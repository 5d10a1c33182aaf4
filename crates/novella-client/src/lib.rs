pub mod config;
pub mod fetcher;

pub use config::FetcherConfig;
pub use fetcher::ReqwestFetcher;
