pub mod order;
pub mod pager;
pub mod query;
pub mod url;

pub use order::OrderBy;
pub use pager::Pager;
pub use query::{ListingParams, ListingQuery};
pub use url::build_url_with_params;
