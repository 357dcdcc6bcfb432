pub mod book_lookup;
pub mod fallback;
pub mod gateway;
pub mod substitutes;
pub mod upstream;

pub use fallback::{Resolved, Source};
pub use gateway::RecommendationGateway;
pub use upstream::{FetchOutcome, HttpUpstream, Upstream};
