//! Assembles the four builders into timeline cards.

use vote_core::{CardConfig, PanelState, PanelStates, VoteCard};

use crate::comment::build_comment;
use crate::content::build_content;
use crate::fragment::{Element, FragmentNode};
use crate::header::build_header;
use crate::icons::build_icons;

pub fn card_id(card: &VoteCard) -> String {
    format!("vote-card-{}", card.id())
}

/// Header, content, icon bar and comments of one vote, in that order.
pub fn build_card(card: &VoteCard, state: PanelState, config: &CardConfig) -> FragmentNode {
    let vote = &card.vote;

    Element::new("article")
        .id(card_id(card))
        .class("timeline-card")
        .child(build_header(vote, &vote.author, config))
        .child(build_content(vote, &card.options, state, config))
        .child(build_icons(vote, &card.comments))
        .child(
            Element::new("div").class("comment-list").children(
                card.comments
                    .iter()
                    .map(|comment| build_comment(vote, comment, config)),
            ),
        )
        .into()
}

/// All cards in caller order, each reconciled against its panel state.
pub fn build_timeline(cards: &[VoteCard], panels: &PanelStates, config: &CardConfig) -> FragmentNode {
    Element::new("div")
        .class("vote-timeline")
        .children(
            cards
                .iter()
                .map(|card| build_card(card, panels.get(card.id()), config)),
        )
        .into()
}
