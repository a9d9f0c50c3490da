//! Value objects - immutable types that represent domain concepts

mod counters;
mod ids;

pub use counters::{CounterDelta, Counters};
pub use ids::{CommentId, IdParseError, PostId, UserId};
