//! Formation search and the cached global recommendation

pub mod cache;
pub mod search;

pub use cache::{fingerprint, CacheStatus, CachedRecommendation, RecommendationCache};
pub use search::{enumerate_formations, recommend, FormationCandidate, Recommendation, Roster};
