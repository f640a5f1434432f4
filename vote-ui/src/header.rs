use vote_core::{CardConfig, UserRef, VoteRecord};

use crate::action::Action;
use crate::fragment::{Element, FragmentNode};

/// Author block plus the share/delete dropdown.
///
/// The delete item only gets an id; the surrounding page decides what it does.
pub fn build_header(vote: &VoteRecord, user: &UserRef, config: &CardConfig) -> FragmentNode {
    let avatar = Element::new("div").class("profile-avatar").child(
        Element::new("img")
            .class("profile-image")
            .attr("src", config.avatar_src.as_str())
            .attr("alt", ""),
    );

    let identity = Element::new("section")
        .class("profile-identity")
        .child(Element::new("div").class("profile-nickname").text(user.nickname.as_str()))
        .child(Element::new("div").class("profile-user-id").text(user.user_id.as_str()));

    let share = Element::new("a")
        .id(format!("share-{}", vote.id))
        .class("dropdown-item hover-cursor-pointer")
        .on_click(Action::SendLink(vote.id.clone()))
        .text(config.share_label.as_str());

    let delete = Element::new("a")
        .id(format!("delete-{}", vote.id))
        .class("dropdown-item hover-cursor-pointer")
        .text(config.delete_label.as_str());

    let menu = Element::new("div").class("profile-menu").child(
        Element::new("ul").class("navbar-nav").child(
            Element::new("li")
                .class("nav-item dropdown")
                .child(
                    Element::new("a")
                        .class("nav-link")
                        .attr("href", "#")
                        .attr("role", "button")
                        .attr("data-bs-toggle", "dropdown")
                        .attr("aria-expanded", "false"),
                )
                .child(
                    Element::new("ul")
                        .class("dropdown-menu dropdown-menu-end")
                        .child(Element::new("li").child(share))
                        .child(Element::new("li").child(delete)),
                ),
        ),
    );

    Element::new("header")
        .class("profile")
        .child(avatar)
        .child(identity)
        .child(menu)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vote_core::VoteId;

    fn vote() -> VoteRecord {
        VoteRecord {
            id: VoteId::from("v1"),
            ..VoteRecord::default()
        }
    }

    #[test]
    fn share_item_sends_link_and_delete_is_unwired() {
        let user = UserRef {
            nickname: "nick1".to_string(),
            user_id: "user1".to_string(),
        };
        let header = build_header(&vote(), &user, &CardConfig::default());

        let root = header.as_element().unwrap();
        assert_eq!(root.tag, "header");
        assert_eq!(root.element_children().count(), 3);
        assert_eq!(
            header.handler_for("share-v1"),
            Some(&Action::SendLink(VoteId::from("v1")))
        );
        assert!(header.find_by_id("delete-v1").is_some());
        assert_eq!(header.handler_for("delete-v1"), None);
        assert_eq!(
            header.find_all_by_class("profile-nickname")[0].children,
            vec![FragmentNode::Text("nick1".to_string())]
        );
    }

    #[test]
    fn missing_user_fields_render_as_empty_text() {
        let header = build_header(&vote(), &UserRef::default(), &CardConfig::default());
        let identity = header.find_all_by_class("profile-identity")[0];
        assert_eq!(FragmentNode::from(identity.clone()).text_content(), "");
        let image = header.find_all_by_class("profile-image")[0];
        assert_eq!(image.attribute("src"), Some("/images/avatar.jpg"));
    }
}
