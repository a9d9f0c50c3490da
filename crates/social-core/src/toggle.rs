//! Reaction toggle state machine
//!
//! Each (user, target) pair is in one of three states: no vote, liked or
//! disliked. A request carries the vote the user clicked. Clicking the vote
//! already held retracts it; clicking the other one switches it.
//!
//! | Current  | Request | Next     | Δlike | Δdislike | Store op        |
//! |----------|---------|----------|-------|----------|-----------------|
//! | none     | Like    | Like     | +1    | 0        | insert(Like)    |
//! | none     | Dislike | Dislike  | 0     | +1       | insert(Dislike) |
//! | Like     | Like    | none     | -1    | 0        | delete          |
//! | Like     | Dislike | Dislike  | -1    | +1       | update(Dislike) |
//! | Dislike  | Dislike | none     | 0     | -1       | delete          |
//! | Dislike  | Like    | Like     | +1    | -1       | update(Like)    |
//!
//! Decrements are only produced from a state that implies the matching
//! increment was committed earlier, so counters cannot go negative as long as
//! the read of the current state and the write happen in one unit of work.

use crate::entities::Vote;
use crate::value_objects::CounterDelta;

/// Mutation to issue against the reaction store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOp {
    Insert(Vote),
    Update(Vote),
    Delete,
}

/// Outcome of one toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Vote held after the request (`None` = no vote)
    pub next: Option<Vote>,
    pub delta: CounterDelta,
    pub op: ReactionOp,
}

impl Transition {
    /// Compute the next state for `desired` given the stored vote
    pub fn compute(current: Option<Vote>, desired: Vote) -> Self {
        match (current, desired) {
            (None, vote) => Self {
                next: Some(vote),
                delta: unit(vote, 1),
                op: ReactionOp::Insert(vote),
            },
            (Some(held), vote) if held == vote => Self {
                next: None,
                delta: unit(held, -1),
                op: ReactionOp::Delete,
            },
            (Some(held), vote) => {
                let removed = unit(held, -1);
                let added = unit(vote, 1);
                Self {
                    next: Some(vote),
                    delta: CounterDelta::votes(
                        removed.like + added.like,
                        removed.dislike + added.dislike,
                    ),
                    op: ReactionOp::Update(vote),
                }
            }
        }
    }
}

fn unit(vote: Vote, sign: i64) -> CounterDelta {
    match vote {
        Vote::Like => CounterDelta::votes(sign, 0),
        Vote::Dislike => CounterDelta::votes(0, sign),
    }
}
