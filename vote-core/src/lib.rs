//! Core data model for the vote timeline: records, card state and live results.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifiers arrive from the server as either JSON strings or integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Signed(value) => value.to_string(),
            RawId::Unsigned(value) => value.to_string(),
        }
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
            }
        }
    };
}

opaque_id!(
    /// Identifier of a vote post.
    VoteId
);
opaque_id!(
    /// Identifier of one option, unique within its vote.
    OptionId
);
opaque_id!(CommentId);

/// Author or commenter as shown on a card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub user_id: String,
}

/// A single timeline post representing a poll question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VoteRecord {
    pub id: VoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Participant count, displayed verbatim.
    #[serde(default)]
    pub pick_count: u64,
    #[serde(default)]
    pub author: UserRef,
}

/// One selectable choice, referencing its vote by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VoteOption {
    pub id: OptionId,
    pub vote_id: VoteId,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommentRecord {
    pub id: CommentId,
    pub vote_id: VoteId,
    #[serde(default)]
    pub author: UserRef,
    #[serde(default)]
    pub content: String,
}

/// Everything needed to render one card in a single pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VoteCard {
    pub vote: VoteRecord,
    #[serde(default)]
    pub options: Vec<VoteOption>,
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
}

impl VoteCard {
    /// Bundles the parts as given; ordering is kept and nothing is deduplicated.
    pub fn new(vote: VoteRecord, options: Vec<VoteOption>, comments: Vec<CommentRecord>) -> Self {
        Self {
            vote,
            options,
            comments,
        }
    }

    pub fn id(&self) -> &VoteId {
        &self.vote.id
    }

    /// Comment count shown on the icon bar.
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// Visibility of the expandable vote panel of one card.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    pub fn toggled(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == PanelState::Expanded
    }
}

/// Panel state for every card on a page. Unknown cards are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelStates {
    states: HashMap<VoteId, PanelState>,
}

impl PanelStates {
    pub fn get(&self, vote_id: &VoteId) -> PanelState {
        self.states.get(vote_id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, vote_id: VoteId, state: PanelState) {
        self.states.insert(vote_id, state);
    }

    /// Flips the card's state and returns the new one.
    pub fn toggle(&mut self, vote_id: &VoteId) -> PanelState {
        let next = self.get(vote_id).toggled();
        self.states.insert(vote_id.clone(), next);
        next
    }

    pub fn expanded(&self) -> impl Iterator<Item = &VoteId> {
        self.states
            .iter()
            .filter(|(_, state)| state.is_expanded())
            .map(|(id, _)| id)
    }
}

/// Pick count for one option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionTally {
    pub option_id: OptionId,
    pub picks: u64,
}

/// Live pick counts used to fill the result slots after render.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteResults {
    pub vote_id: VoteId,
    pub tallies: Vec<OptionTally>,
}

impl VoteResults {
    /// Sum of all picks, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.tallies
            .iter()
            .fold(0u64, |sum, tally| sum.saturating_add(tally.picks))
    }

    /// Share of each option in whole percent, rounded half up.
    pub fn percentages(&self) -> Vec<(OptionId, u32)> {
        // Summed in u128 so `picks * 100` cannot overflow.
        let total: u128 = self.tallies.iter().map(|tally| u128::from(tally.picks)).sum();
        self.tallies
            .iter()
            .map(|tally| {
                let percent = if total == 0 {
                    0
                } else {
                    ((u128::from(tally.picks) * 100 + total / 2) / total) as u32
                };
                (tally.option_id.clone(), percent)
            })
            .collect()
    }
}

/// Rendering settings: asset locations, menu labels and timestamp format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CardConfig {
    pub avatar_src: String,
    pub submit_icon_src: String,
    pub analyze_icon_src: String,
    pub share_label: String,
    pub delete_label: String,
    /// `chrono` format string for the creation timestamp.
    pub timestamp_format: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            avatar_src: "/images/avatar.jpg".to_string(),
            submit_icon_src: "/images/icons/arrow-right.svg".to_string(),
            analyze_icon_src: "/images/icons/analyze.svg".to_string(),
            share_label: "Share via messenger".to_string(),
            delete_label: "Delete post".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}

/// Errors raised while reading vote data.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("feed entry is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("could not read feed: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let numeric: VoteId = serde_json::from_str("42").unwrap();
        let text: VoteId = serde_json::from_str("\"v1\"").unwrap();
        assert_eq!(numeric.as_str(), "42");
        assert_eq!(text, VoteId::from("v1"));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "\"42\"");
    }

    #[test]
    fn panel_states_default_to_collapsed_and_toggle_indefinitely() {
        let mut states = PanelStates::default();
        let id = VoteId::from("v1");
        assert_eq!(states.get(&id), PanelState::Collapsed);
        assert_eq!(states.toggle(&id), PanelState::Expanded);
        assert_eq!(states.toggle(&id), PanelState::Collapsed);
        assert_eq!(states.toggle(&id), PanelState::Expanded);
        assert_eq!(states.get(&VoteId::from("v2")), PanelState::Collapsed);
        assert_eq!(states.expanded().collect::<Vec<_>>(), vec![&id]);
    }

    #[test]
    fn percentages_round_and_handle_empty_votes() {
        let results = VoteResults {
            vote_id: VoteId::from("v1"),
            tallies: vec![
                OptionTally {
                    option_id: OptionId::from("o1"),
                    picks: 1,
                },
                OptionTally {
                    option_id: OptionId::from("o2"),
                    picks: 2,
                },
            ],
        };
        assert_eq!(
            results.percentages(),
            vec![(OptionId::from("o1"), 33), (OptionId::from("o2"), 67)]
        );

        let empty = VoteResults {
            tallies: vec![OptionTally {
                option_id: OptionId::from("o1"),
                picks: 0,
            }],
            ..VoteResults::default()
        };
        assert_eq!(empty.percentages(), vec![(OptionId::from("o1"), 0)]);
    }

    #[test]
    fn large_tallies_neither_overflow_nor_lose_their_split() {
        let tally = |id: &str, picks: u64| OptionTally {
            option_id: OptionId::from(id),
            picks,
        };
        let results = VoteResults {
            vote_id: VoteId::from("v1"),
            tallies: vec![
                tally("o1", u64::MAX / 50),
                tally("o2", u64::MAX / 50),
                tally("o3", u64::MAX),
            ],
        };
        assert_eq!(results.total(), u64::MAX);
        let percents: Vec<u32> = results.percentages().into_iter().map(|(_, p)| p).collect();
        assert_eq!(percents, vec![2, 2, 96]);

        let lone = VoteResults {
            vote_id: VoteId::from("v2"),
            tallies: vec![tally("o1", u64::MAX)],
        };
        assert_eq!(lone.percentages(), vec![(OptionId::from("o1"), 100)]);
    }

    #[test]
    fn config_fills_missing_fields_from_defaults() {
        let config: CardConfig =
            serde_json::from_str(r#"{"shareLabel":"Share","timestampFormat":"%d/%m"}"#).unwrap();
        assert_eq!(config.share_label, "Share");
        assert_eq!(config.timestamp_format, "%d/%m");
        assert_eq!(config.delete_label, CardConfig::default().delete_label);
        assert_eq!(config.avatar_src, CardConfig::default().avatar_src);
    }

    #[test]
    fn comment_count_follows_supplied_comments() {
        let vote = VoteRecord {
            id: VoteId::from("v1"),
            pick_count: 9,
            ..VoteRecord::default()
        };
        let comments = (0..3)
            .map(|n| CommentRecord {
                id: CommentId::from(n as u64),
                vote_id: vote.id.clone(),
                ..CommentRecord::default()
            })
            .collect();
        let card = VoteCard::new(vote, Vec::new(), comments);
        assert_eq!(card.comment_count(), 3);
        assert_eq!(card.vote.pick_count, 9);
    }
}
