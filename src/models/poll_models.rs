use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A poll document. Votes live inside the choices so that every mutation is
/// a single-document write (see the version field and `store::PollStore`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Poll {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub creator_id: ObjectId,
    pub choices: Vec<Choice>,
    pub is_multi_select: bool,
    pub is_open: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub votes: Vec<ObjectId>,
    pub submitted_by: ObjectId,
}

impl Choice {
    fn new(text: String, submitted_by: ObjectId) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            text,
            votes: Vec::new(),
            submitted_by,
        }
    }

    fn has_vote(&self, user_id: &ObjectId) -> bool {
        self.votes.contains(user_id)
    }
}

impl Poll {
    pub fn new(creator_id: ObjectId, options: Vec<String>, is_multi_select: bool) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            creator_id,
            choices: options
                .into_iter()
                .map(|text| Choice::new(text, creator_id))
                .collect(),
            is_multi_select,
            is_open: true,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id == choice_id)
    }

    pub fn has_choice_text(&self, text: &str) -> bool {
        self.choices.iter().any(|choice| choice.text == text)
    }

    pub fn total_votes(&self) -> usize {
        self.choices.iter().map(|choice| choice.votes.len()).sum()
    }

    /// Number of choices the given user currently holds a vote on.
    pub fn votes_by(&self, user_id: &ObjectId) -> usize {
        self.choices
            .iter()
            .filter(|choice| choice.has_vote(user_id))
            .count()
    }

    /// Records a vote for `user_id` on the given choice. Returns whether the
    /// poll changed; voting again on the same choice is a no-op. On
    /// single-select polls any prior vote on a different choice is dropped in
    /// the same mutation (switch).
    pub fn place_vote(&mut self, choice_id: &str, user_id: ObjectId) -> bool {
        let mut changed = false;

        if !self.is_multi_select {
            for choice in &mut self.choices {
                if choice.id != choice_id && choice.has_vote(&user_id) {
                    choice.votes.retain(|voter| *voter != user_id);
                    changed = true;
                }
            }
        }

        if let Some(choice) = self.choices.iter_mut().find(|choice| choice.id == choice_id) {
            if !choice.has_vote(&user_id) {
                choice.votes.push(user_id);
                changed = true;
            }
        }

        changed
    }

    /// Drops the vote of `user_id` on the given choice. Retracting a vote
    /// that was never placed is a no-op; returns whether the poll changed.
    pub fn retract_vote(&mut self, choice_id: &str, user_id: &ObjectId) -> bool {
        match self.choices.iter_mut().find(|choice| choice.id == choice_id) {
            Some(choice) if choice.has_vote(user_id) => {
                choice.votes.retain(|voter| voter != user_id);
                true
            }
            _ => false,
        }
    }

    /// Appends a new choice at the end of the sequence, preserving display
    /// order. The caller is responsible for text validation.
    pub fn add_choice(&mut self, text: String, submitted_by: ObjectId) {
        self.choices.push(Choice::new(text, submitted_by));
    }

    /// Removes the choice and discards its votes; other choices are left
    /// untouched.
    pub fn remove_choice(&mut self, choice_id: &str) -> Option<Choice> {
        let index = self.choices.iter().position(|choice| choice.id == choice_id)?;
        Some(self.choices.remove(index))
    }
}
