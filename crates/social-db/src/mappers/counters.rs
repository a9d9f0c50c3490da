//! Counter projection mapper and the per-kind table layout

use social_core::entities::TargetKind;
use social_core::value_objects::Counters;

use crate::models::CountersModel;

impl From<CountersModel> for Counters {
    fn from(model: CountersModel) -> Self {
        Counters {
            like_count: model.like_count,
            dislike_count: model.dislike_count,
            comment_count: model.comment_count,
        }
    }
}

/// Table and column names backing one kind of reaction target
#[derive(Debug, Clone, Copy)]
pub struct TargetTables {
    /// Table holding the target row and its counters
    pub target: &'static str,
    /// Table holding per-user votes on the target
    pub reactions: &'static str,
    /// Foreign-key column in `reactions`
    pub fk: &'static str,
    /// Expression selected as `comment_count`
    pub comment_count: &'static str,
}

const POST_TABLES: TargetTables = TargetTables {
    target: "posts",
    reactions: "post_reactions",
    fk: "post_id",
    comment_count: "comment_count",
};

const COMMENT_TABLES: TargetTables = TargetTables {
    target: "comments",
    reactions: "comment_reactions",
    fk: "comment_id",
    comment_count: "NULL::BIGINT",
};

/// Tables used for `kind`
pub fn tables_for(kind: TargetKind) -> TargetTables {
    match kind {
        TargetKind::Post => POST_TABLES,
        TargetKind::Comment => COMMENT_TABLES,
    }
}
