mod types;
pub use types::Fetcher;

mod http_fetcher;
pub use http_fetcher::HttpFetcher;
