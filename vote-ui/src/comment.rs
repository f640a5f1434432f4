use vote_core::{CardConfig, CommentRecord, VoteRecord};

use crate::action::{detail_path, Action};
use crate::fragment::{Element, FragmentNode};

/// One comment row; both the click region and the body open the detail page.
pub fn build_comment(vote: &VoteRecord, comment: &CommentRecord, config: &CardConfig) -> FragmentNode {
    let open_detail = Action::Navigate(detail_path(&vote.id));

    let text = Element::new("section")
        .class("cm-text")
        .child(
            Element::new("div")
                .class("comment-id")
                .text(comment.author.user_id.as_str()),
        )
        .child(
            Element::new("div")
                .id(format!("comment-{}-block", comment.id))
                .class("cm-block")
                .on_click(open_detail.clone()),
        )
        .child(
            Element::new("div")
                .id(format!("comment-{}-body", comment.id))
                .class("cm-body")
                .on_click(open_detail)
                .text(comment.content.as_str()),
        );

    Element::new("section")
        .id(format!("comment-{}", comment.id))
        .class("comment-area profile")
        .child(
            Element::new("div").class("fl").child(
                Element::new("img")
                    .class("comment-circle")
                    .attr("src", config.avatar_src.as_str())
                    .attr("alt", ""),
            ),
        )
        .child(Element::new("div").class("comment-main").child(text))
        .child(Element::new("hr").class("comment-separator"))
        .into()
}
