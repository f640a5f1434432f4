use vote_core::{CommentRecord, VoteId, VoteRecord};

use crate::action::{detail_path, participants_path, Action};
use crate::fragment::{Element, FragmentNode};

const PARTICIPANT_PATHS: [&str; 2] = [
    "M10.854 7.854a.5.5 0 0 0-.708-.708L7.5 9.793 6.354 8.646a.5.5 0 1 0-.708.708l1.5 1.5a.5.5 0 0 0 .708 0l3-3z",
    "M14 14V4.5L9.5 0H4a2 2 0 0 0-2 2v12a2 2 0 0 0 2 2h8a2 2 0 0 0 2-2zM9.5 3A1.5 1.5 0 0 0 11 4.5h2V14a1 1 0 0 1-1 1H4a1 1 0 0 1-1-1V2a1 1 0 0 1 1-1h5.5v2z",
];

const COMMENT_PATHS: [&str; 2] = [
    "M5 8a1 1 0 1 1-2 0 1 1 0 0 1 2 0zm4 0a1 1 0 1 1-2 0 1 1 0 0 1 2 0zm3 1a1 1 0 1 0 0-2 1 1 0 0 0 0 2z",
    "m2.165 15.803.02-.004c1.83-.363 2.948-.842 3.468-1.105A9.06 9.06 0 0 0 8 15c4.418 0 8-3.134 8-7s-3.582-7-8-7-8 3.134-8 7c0 1.76.743 3.37 1.97 4.6a10.437 10.437 0 0 1-.524 2.318l-.003.011a10.722 10.722 0 0 1-.244.637c-.079.186.074.394.273.362a21.673 21.673 0 0 0 .693-.125zm.8-3.108a1 1 0 0 0-.287-.801C1.618 10.83 1 9.468 1 8c0-3.192 3.004-6 7-6s7 2.808 7 6c0 3.193-3.004 6-7 6a8.06 8.06 0 0 1-2.088-.272 1 1 0 0 0-.711.074c-.387.196-1.24.57-2.634.893a10.97 10.97 0 0 0 .398-2z",
];

const BOOKMARK_PATH: &str =
    "M2 2a2 2 0 0 1 2-2h8a2 2 0 0 1 2 2v13.5a.5.5 0 0 1-.777.416L8 13.101l-5.223 2.815A.5.5 0 0 1 2 15.5V2zm2-1a1 1 0 0 0-1 1v12.566l4.723-2.482a.5.5 0 0 1 .554 0L13 14.566V2a1 1 0 0 0-1-1H4z";

/// Element id of a vote's bookmark toggle.
pub fn bookmark_id(vote_id: &VoteId) -> String {
    format!("bookmark{vote_id}")
}

/// Participant count, comment count and bookmark toggle.
///
/// The comment count is the length of `comments`; everything else is shown as
/// given. Bookmark on/off styling belongs to the `click_bookmark` collaborator.
pub fn build_icons(vote: &VoteRecord, comments: &[CommentRecord]) -> FragmentNode {
    let participants = count_control(
        format!("vote-participants-{}", vote.id),
        Action::Navigate(participants_path(&vote.id)),
        icon("bi bi-file-earmark-check", &PARTICIPANT_PATHS),
        format!("vote-participantNum-{}", vote.id),
        vote.pick_count.to_string(),
    );
    let comment_count = count_control(
        format!("vote-comments-{}", vote.id),
        Action::Navigate(detail_path(&vote.id)),
        icon("bi bi-chat-dots", &COMMENT_PATHS),
        format!("vote-commentNum-{}", vote.id),
        comments.len().to_string(),
    );

    let element_id = bookmark_id(&vote.id);
    let bookmark = Element::new("button")
        .id(element_id.as_str())
        .class("vote-bookmark")
        .attr("type", "button")
        .on_click(Action::ClickBookmark(element_id))
        .child(icon("bi bi-bookmark bookmark-off", &[BOOKMARK_PATH]));

    Element::new("div")
        .id(format!("icon-area-{}", vote.id))
        .class("icons")
        .child(
            Element::new("div")
                .class("icons-left")
                .children(participants)
                .children(comment_count),
        )
        .child(Element::new("div").class("icons-right").child(bookmark))
        .into()
}

fn count_control(
    button_id: String,
    action: Action,
    icon: Element,
    count_id: String,
    count: String,
) -> [Element; 2] {
    [
        Element::new("button")
            .id(button_id)
            .attr("type", "button")
            .on_click(action)
            .child(icon),
        Element::new("span").id(count_id).class("icon-count").text(count),
    ]
}

fn icon(classes: &str, paths: &[&str]) -> Element {
    Element::new("svg")
        .class(classes)
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("width", "20")
        .attr("height", "20")
        .attr("fill", "currentColor")
        .attr("viewBox", "0 0 16 16")
        .children(paths.iter().map(|d| Element::new("path").attr("d", *d)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vote_core::CommentId;

    fn vote() -> VoteRecord {
        VoteRecord {
            id: VoteId::from("v1"),
            pick_count: 12,
            ..VoteRecord::default()
        }
    }

    fn comments(count: usize) -> Vec<CommentRecord> {
        (0..count)
            .map(|n| CommentRecord {
                id: CommentId::from(n as u64),
                vote_id: VoteId::from("v1"),
                ..CommentRecord::default()
            })
            .collect()
    }

    fn text_of(fragment: &FragmentNode, id: &str) -> String {
        fragment
            .find_by_id(id)
            .map(|el| FragmentNode::from(el.clone()).text_content())
            .unwrap_or_default()
    }

    #[test]
    fn comment_count_is_the_sequence_length() {
        assert_eq!(text_of(&build_icons(&vote(), &[]), "vote-commentNum-v1"), "0");
        assert_eq!(
            text_of(&build_icons(&vote(), &comments(3)), "vote-commentNum-v1"),
            "3"
        );
    }

    #[test]
    fn participant_count_is_taken_verbatim() {
        let fragment = build_icons(&vote(), &comments(1));
        assert_eq!(text_of(&fragment, "vote-participantNum-v1"), "12");
    }

    #[test]
    fn controls_navigate_and_toggle_bookmark() {
        let fragment = build_icons(&vote(), &[]);
        assert_eq!(
            fragment.handler_for("vote-participants-v1"),
            Some(&Action::Navigate("v1/participants".to_string()))
        );
        assert_eq!(
            fragment.handler_for("vote-comments-v1"),
            Some(&Action::Navigate("v1/detail".to_string()))
        );
        assert_eq!(
            fragment.handler_for("bookmarkv1"),
            Some(&Action::ClickBookmark("bookmarkv1".to_string()))
        );
        let icon = fragment.find_all_by_class("bi-bookmark");
        assert!(icon[0].has_class("bookmark-off"));
    }
}
