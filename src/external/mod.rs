mod data_source;
mod http_source;

pub use data_source::DataSource;
pub use http_source::HttpDataSource;
