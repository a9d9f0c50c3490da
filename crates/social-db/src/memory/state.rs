//! Tables of the in-memory store

use std::collections::HashMap;

use social_core::entities::{Comment, Post, Reactable, TargetKind, TargetRef, User, Vote};
use social_core::value_objects::{CommentId, Counters, PostId, UserId};

pub(crate) type VoteKey = (UserId, TargetRef);

#[derive(Debug, Default)]
pub(crate) struct State {
    /// User with their password hash
    pub users: HashMap<UserId, (User, String)>,
    pub posts: HashMap<PostId, Post>,
    pub comments: HashMap<CommentId, Comment>,
    pub reactions: HashMap<VoteKey, Vote>,
}

impl State {
    pub fn counters(&self, target: TargetRef) -> Option<Counters> {
        match target.kind {
            TargetKind::Post => self
                .posts
                .get(&PostId::from_uuid(target.id))
                .map(|target| target.counters()),
            TargetKind::Comment => self
                .comments
                .get(&CommentId::from_uuid(target.id))
                .map(|target| target.counters()),
        }
    }

    /// Overwrite the counters of an existing target; returns false if it is gone
    pub fn set_counters(&mut self, target: TargetRef, counters: Counters) -> bool {
        match target.kind {
            TargetKind::Post => match self.posts.get_mut(&PostId::from_uuid(target.id)) {
                Some(post) => {
                    post.set_counters(counters);
                    true
                }
                None => false,
            },
            TargetKind::Comment => match self.comments.get_mut(&CommentId::from_uuid(target.id)) {
                Some(comment) => {
                    comment.like_count = counters.like_count;
                    comment.dislike_count = counters.dislike_count;
                    true
                }
                None => false,
            },
        }
    }

    /// Remove every vote on `target`, returning what was removed
    pub fn remove_votes_on(&mut self, target: TargetRef) -> Vec<(VoteKey, Vote)> {
        let keys: Vec<VoteKey> = self
            .reactions
            .keys()
            .filter(|(_, t)| *t == target)
            .copied()
            .collect();

        keys.into_iter()
            .filter_map(|key| self.reactions.remove(&key).map(|vote| (key, vote)))
            .collect()
    }

    /// Remove a comment together with the votes on it
    pub fn remove_comment(&mut self, id: CommentId) -> Option<(Comment, Vec<(VoteKey, Vote)>)> {
        let comment = self.comments.remove(&id)?;
        let votes = self.remove_votes_on(TargetRef::comment(id));
        Some((comment, votes))
    }

    /// Remove a post with its comments and every vote on either
    pub fn remove_post(&mut self, id: PostId) -> bool {
        if self.posts.remove(&id).is_none() {
            return false;
        }
        self.remove_votes_on(TargetRef::post(id));

        let comment_ids: Vec<CommentId> = self
            .comments
            .values()
            .filter(|comment| comment.post_id == id)
            .map(|comment| comment.id)
            .collect();
        for comment_id in comment_ids {
            self.remove_comment(comment_id);
        }
        true
    }
}
