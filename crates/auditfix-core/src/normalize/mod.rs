pub mod extract;
pub mod ids;
pub mod model;

pub use extract::{normalize, normalize_with};
pub use ids::{IdSource, SequentialIds, UuidV4};
pub use model::{Normalized, NormalizedIssue};
