//! Server JSON feed to `VoteCard` converter.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime};
use log::warn;
use serde_json::Value;
use vote_core::{
    CommentId, CommentRecord, OptionId, TimelineError, UserRef, VoteCard, VoteId, VoteOption,
    VoteRecord,
};

const NO_ENTRIES: &[Value] = &[];

/// Read timeline cards from a JSON string.
pub fn parse_feed_str(feed_json: &str) -> Result<Vec<VoteCard>, TimelineError> {
    let value: Value =
        serde_json::from_str(feed_json).map_err(|err| TimelineError::Parse(err.to_string()))?;
    parse_feed_value(&value)
}

/// Read timeline cards from a `serde_json::Value`.
///
/// Accepts either a bare array of votes or an object with `votes` and optional
/// top-level `options` / `comments` arrays that point at their vote through
/// `voteId`. Card order follows the vote order of the feed.
pub fn parse_feed_value(feed: &Value) -> Result<Vec<VoteCard>, TimelineError> {
    let (votes, options, comments) = match feed {
        Value::Array(votes) => (votes.as_slice(), NO_ENTRIES, NO_ENTRIES),
        Value::Object(map) => {
            let votes = map
                .get("votes")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    TimelineError::Parse("expected a `votes` array in the feed object".to_string())
                })?;
            (
                votes.as_slice(),
                array_field(feed, &["options", "voteOptions"]),
                array_field(feed, &["comments"]),
            )
        }
        other => {
            return Err(TimelineError::Parse(format!(
                "expected an array or object at the top level, received {}",
                kind_name(other)
            )))
        }
    };

    let mut aggregate = FeedAggregate::default();
    for vote in votes {
        aggregate.handle_vote(vote)?;
    }
    for option in options {
        aggregate.handle_option(option, None)?;
    }
    for comment in comments {
        aggregate.handle_comment(comment, None)?;
    }

    Ok(aggregate.finalize())
}

/// Read a single card (one vote with nested options and comments).
pub fn parse_card_value(vote: &Value) -> Result<VoteCard, TimelineError> {
    let mut aggregate = FeedAggregate::default();
    aggregate.handle_vote(vote)?;
    aggregate
        .finalize()
        .pop()
        .ok_or(TimelineError::MissingField("id"))
}

#[derive(Default)]
struct FeedAggregate {
    cards: Vec<VoteCard>,
    index: HashMap<VoteId, usize>,
}

impl FeedAggregate {
    fn handle_vote(&mut self, resource: &Value) -> Result<(), TimelineError> {
        let id = VoteId::new(required_id(resource, &["id", "voteId"])?);
        let record = VoteRecord {
            id: id.clone(),
            title: text_field(resource, &["title"]),
            content: text_field(resource, &["content"]),
            created_at: extract_datetime(resource, &["createAt", "createdAt", "modifiedAt"]),
            pick_count: count_field(resource, &["pickCount", "participantCount"]),
            author: extract_user(resource),
        };

        // A later duplicate replaces the whole card, nested entries included,
        // but keeps the first position.
        match self.index.get(&id) {
            Some(&position) => {
                warn!("vote {id} appears more than once in the feed; keeping the last record");
                self.cards[position] = VoteCard::new(record, Vec::new(), Vec::new());
            }
            None => {
                self.index.insert(id.clone(), self.cards.len());
                self.cards.push(VoteCard::new(record, Vec::new(), Vec::new()));
            }
        }

        for option in array_field(resource, &["voteOptions", "options"]) {
            self.handle_option(option, Some(&id))?;
        }
        for comment in array_field(resource, &["comments", "commentDtos"]) {
            self.handle_comment(comment, Some(&id))?;
        }
        Ok(())
    }

    fn handle_option(
        &mut self,
        resource: &Value,
        parent: Option<&VoteId>,
    ) -> Result<(), TimelineError> {
        let id = OptionId::new(required_id(resource, &["id", "optionId"])?);
        let Some(card) = self.card_for(resource, parent) else {
            warn!("option {id} references an unknown vote; skipping");
            return Ok(());
        };
        let option = VoteOption {
            id,
            vote_id: card.vote.id.clone(),
            content: text_field(resource, &["content", "text"]),
        };
        card.options.push(option);
        Ok(())
    }

    fn handle_comment(
        &mut self,
        resource: &Value,
        parent: Option<&VoteId>,
    ) -> Result<(), TimelineError> {
        let id = CommentId::new(required_id(resource, &["id", "commentId"])?);
        let Some(card) = self.card_for(resource, parent) else {
            warn!("comment {id} references an unknown vote; skipping");
            return Ok(());
        };
        let comment = CommentRecord {
            id,
            vote_id: card.vote.id.clone(),
            author: extract_user(resource),
            content: text_field(resource, &["content"]),
        };
        card.comments.push(comment);
        Ok(())
    }

    fn card_for(&mut self, resource: &Value, parent: Option<&VoteId>) -> Option<&mut VoteCard> {
        let vote_id = match parent {
            Some(id) => id.clone(),
            None => VoteId::new(id_value(resource.get("voteId")?)?),
        };
        let position = *self.index.get(&vote_id)?;
        self.cards.get_mut(position)
    }

    fn finalize(self) -> Vec<VoteCard> {
        self.cards
    }
}

fn array_field<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn required_id(resource: &Value, keys: &[&str]) -> Result<String, TimelineError> {
    keys.iter()
        .find_map(|key| resource.get(*key).and_then(id_value))
        .ok_or(TimelineError::MissingField("id"))
}

fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn text_field(resource: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match resource.get(*key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

fn count_field(resource: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|key| {
            let value = resource.get(*key)?;
            value
                .as_u64()
                .or_else(|| value.as_str().and_then(|text| text.trim().parse().ok()))
        })
        .unwrap_or_default()
}

fn extract_user(resource: &Value) -> UserRef {
    let Some(user) = ["userDto", "user", "author"]
        .iter()
        .find_map(|key| resource.get(*key).filter(|value| value.is_object()))
    else {
        return UserRef::default();
    };

    UserRef {
        nickname: text_field(user, &["nickname"]),
        user_id: text_field(user, &["userId", "id"]),
    }
}

fn extract_datetime(resource: &Value, fields: &[&str]) -> Option<NaiveDateTime> {
    fields
        .iter()
        .filter_map(|field| resource.get(*field).and_then(Value::as_str))
        .find_map(parse_datetime)
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_options_and_comments_inherit_vote_id() {
        let feed = json!([{
            "id": 7,
            "title": "Lunch",
            "content": "Where?",
            "pickCount": 4,
            "userDto": { "userId": "user1", "nickname": "nick1" },
            "voteOptions": [{ "id": 70, "content": "Noodles" }],
            "comments": [{ "id": 1, "content": "hi", "userDto": { "userId": "user2" } }]
        }]);

        let cards = parse_feed_value(&feed).unwrap();
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.vote.id, VoteId::from("7"));
        assert_eq!(card.vote.pick_count, 4);
        assert_eq!(card.vote.author.nickname, "nick1");
        assert_eq!(card.options[0].vote_id, VoteId::from("7"));
        assert_eq!(card.comments[0].vote_id, VoteId::from("7"));
        assert_eq!(card.comments[0].author.user_id, "user2");
        assert_eq!(card.comments[0].author.nickname, "");
    }

    #[test]
    fn top_level_entries_attach_in_order_and_orphans_are_skipped() {
        let feed = json!({
            "votes": [{ "id": "a" }, { "id": "b" }],
            "options": [
                { "id": "o2", "voteId": "b", "content": "two" },
                { "id": "o1", "voteId": "b", "content": "one" },
                { "id": "ox", "voteId": "missing" }
            ],
            "comments": [{ "id": "c1", "voteId": "a", "content": "first" }]
        });

        let cards = parse_feed_value(&feed).unwrap();
        assert_eq!(cards[0].vote.id, VoteId::from("a"));
        assert!(cards[0].options.is_empty());
        assert_eq!(cards[0].comments.len(), 1);
        let ids: Vec<_> = cards[1].options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["o2", "o1"]);
    }

    #[test]
    fn missing_vote_id_is_an_error() {
        let err = parse_feed_value(&json!([{ "title": "no id" }])).unwrap_err();
        assert!(matches!(err, TimelineError::MissingField("id")));
    }

    #[test]
    fn scalar_feed_is_rejected() {
        let err = parse_feed_str("12").unwrap_err();
        assert!(matches!(err, TimelineError::Parse(_)));
        assert!(matches!(
            parse_feed_str("{not json").unwrap_err(),
            TimelineError::Parse(_)
        ));
    }

    #[test]
    fn object_feed_without_votes_array_is_rejected() {
        let err = parse_feed_value(&json!({ "options": [] })).unwrap_err();
        assert!(matches!(err, TimelineError::Parse(_)));
        let err = parse_feed_value(&json!({ "votes": "v1" })).unwrap_err();
        assert!(matches!(err, TimelineError::Parse(_)));
    }

    #[test]
    fn repeated_vote_keeps_first_position_and_last_record() {
        let feed = json!([
            { "id": 1, "title": "old", "voteOptions": [{ "id": 10 }, { "id": 11 }],
              "comments": [{ "id": 5 }] },
            { "id": 2 },
            { "id": 1, "title": "new", "voteOptions": [{ "id": 10 }] }
        ]);
        let cards = parse_feed_value(&feed).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].vote.id.as_str(), "1");
        assert_eq!(cards[0].vote.title, "new");
        let options: Vec<&str> = cards[0].options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(options, vec!["10"]);
        assert!(cards[0].comments.is_empty());
        assert_eq!(cards[1].vote.id.as_str(), "2");
    }

    #[test]
    fn timestamps_accept_local_and_offset_forms() {
        assert!(parse_datetime("2023-05-01T10:00:00").is_some());
        assert!(parse_datetime("2023-05-01T10:00:00.123456").is_some());
        assert!(parse_datetime("2023-05-01T10:00").is_some());
        assert_eq!(
            parse_datetime("2023-05-01T10:00:00+02:00"),
            parse_datetime("2023-05-01T08:00:00")
        );
        assert!(parse_datetime("yesterday").is_none());
    }
}
