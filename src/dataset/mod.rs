pub mod fetcher;
pub mod traits;

pub use fetcher::DataGovFetcher;
pub use traits::DatasetSource;
