pub mod cache;
pub mod category;
pub mod deriver;
pub mod paginate;
pub mod pipeline;
pub mod price;
pub mod query;

pub use cache::{CachedEntry, MetadataCache};
pub use category::Category;
pub use deriver::derive_pairs;
pub use paginate::{paginate, Page, Pagination};
pub use pipeline::{find_pair, run_query, PairQuery, PairsResponse};
pub use price::format_price;
pub use query::{query_pairs, PairFilters, SortKey, SortOrder};
