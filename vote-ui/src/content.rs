//! Vote question, collapsed prompt surface and the expandable options panel.

use chrono::NaiveDateTime;
use vote_core::{CardConfig, OptionId, PanelState, VoteId, VoteOption, VoteRecord};

use crate::action::Action;
use crate::fragment::{Element, FragmentNode};

const HIDDEN_STYLE: &str = "display: none;";

/// Element id of a radio input, unique per `(vote, option)` pair.
pub fn option_input_id(vote_id: &VoteId, option_id: &OptionId) -> String {
    format!("vote{vote_id}option{option_id}")
}

/// Radio group name shared by all options of one vote.
pub fn option_group_name(vote_id: &VoteId) -> String {
    format!("vote{vote_id}option")
}

/// Element id of the slot the live percentage is written into.
pub fn result_slot_id(option_id: &OptionId) -> String {
    format!("result{option_id}")
}

/// Class shared by every result slot of one vote.
pub fn result_class(vote_id: &VoteId) -> String {
    format!("vote-result{vote_id}")
}

pub fn surface_id(vote_id: &VoteId) -> String {
    format!("vote-surface-{vote_id}")
}

pub fn panel_id(vote_id: &VoteId) -> String {
    format!("vote-panel-{vote_id}")
}

/// Builds the content block. Which half is visible follows `state`.
pub fn build_content(
    vote: &VoteRecord,
    options: &[VoteOption],
    state: PanelState,
    config: &CardConfig,
) -> FragmentNode {
    let body = Element::new("div").class("m-2 timeline-content").child(
        Element::new("div")
            .id(format!("vote-content-{}", vote.id))
            .class("timeline-content-title")
            .text(vote.content.as_str()),
    );

    Element::new("div")
        .class("timeline-vote")
        .attr("data-panel-state", panel_state_label(state))
        .child(body)
        .child(build_surface(vote, state, config))
        .child(build_panel(vote, options, state, config))
        .into()
}

fn build_surface(vote: &VoteRecord, state: PanelState, config: &CardConfig) -> Element {
    let surface = Element::new("section")
        .id(surface_id(&vote.id))
        .class(format!("vote-background-1 vote{}outer", vote.id))
        .on_click(Action::Show(vote.id.clone()))
        .child(
            Element::new("div")
                .child(
                    Element::new("div")
                        .class("wrap")
                        .child(Element::new("div").class("m-2 fl").child(indicator())),
                )
                .child(
                    Element::new("p")
                        .id(format!("vote-title-{}", vote.id))
                        .class("vote-background-p")
                        .text(vote.title.as_str()),
                )
                .child(
                    Element::new("div")
                        .class("vote-created-at")
                        .text(format_timestamp(vote.created_at, &config.timestamp_format)),
                ),
        );

    hide_unless(surface, !state.is_expanded())
}

fn build_panel(
    vote: &VoteRecord,
    options: &[VoteOption],
    state: PanelState,
    config: &CardConfig,
) -> Element {
    let controls = Element::new("div").class("mr-3 mt-1 fr").child(
        Element::new("button")
            .id(format!("vote-submit-{}", vote.id))
            .class(format!("vote-submit-btn vote-submit-btn{}", vote.id))
            .attr("type", "button")
            .on_click(Action::SubmitPick(vote.id.clone()))
            .child(icon_image(&config.submit_icon_src)),
    );
    // Analyze has no behaviour yet; it only reserves the slot.
    let controls = controls.child(
        Element::new("button")
            .id(format!("vote-analyze-{}", vote.id))
            .class(format!("vote-analyze-btn vote-analyze-btn{}", vote.id))
            .attr("type", "button")
            .child(icon_image(&config.analyze_icon_src)),
    );

    let header = Element::new("div").child(
        Element::new("div")
            .class("wrap")
            .child(Element::new("div").class("m-2 fl").child(indicator()))
            .child(controls),
    );

    let rows = Element::new("div")
        .class("vote-option-mp")
        .children(options.iter().map(|option| build_option_row(&vote.id, option)));

    let panel = Element::new("section")
        .id(panel_id(&vote.id))
        .class(format!("vote-background-2 vote{}inner", vote.id))
        .attr("data-vote-id", vote.id.as_str())
        .child(header)
        .child(rows);

    hide_unless(panel, state.is_expanded())
}

fn build_option_row(vote_id: &VoteId, option: &VoteOption) -> Element {
    let input_id = option_input_id(vote_id, &option.id);

    Element::new("div")
        .class("vote-button-check")
        .child(
            Element::new("div")
                .class("vote-select-box")
                .child(
                    Element::new("input")
                        .id(input_id.as_str())
                        .class("vote-select-btn")
                        .attr("type", "radio")
                        .attr("name", option_group_name(vote_id))
                        .attr("value", option.id.as_str()),
                )
                .child(
                    Element::new("label")
                        .class(format!("option-label option-label{vote_id}"))
                        .attr("for", input_id)
                        .text(option.content.as_str()),
                )
                .child(
                    Element::new("div")
                        .id(result_slot_id(&option.id))
                        .class("pick-percent")
                        .class(result_class(vote_id)),
                ),
        )
}

fn indicator() -> Element {
    Element::new("svg")
        .class("bi bi-circle-fill vote-background-circle")
        .attr("width", "14")
        .attr("height", "14")
        .attr("fill", "white")
        .attr("viewBox", "0 0 16 16")
        .child(
            Element::new("circle")
                .attr("cx", "8")
                .attr("cy", "8")
                .attr("r", "8"),
        )
}

fn icon_image(src: &str) -> Element {
    Element::new("img")
        .class("vote-control-icon")
        .attr("src", src)
        .attr("alt", "")
}

fn hide_unless(element: Element, visible: bool) -> Element {
    if visible {
        element
    } else {
        element.attr("style", HIDDEN_STYLE)
    }
}

fn panel_state_label(state: PanelState) -> &'static str {
    match state {
        PanelState::Collapsed => "collapsed",
        PanelState::Expanded => "expanded",
    }
}

fn format_timestamp(timestamp: Option<NaiveDateTime>, format: &str) -> String {
    timestamp
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn vote(id: &str) -> VoteRecord {
        VoteRecord {
            id: VoteId::from(id),
            title: "Pick one".to_string(),
            content: "Q?".to_string(),
            ..VoteRecord::default()
        }
    }

    fn options(vote_id: &str, ids: &[&str]) -> Vec<VoteOption> {
        ids.iter()
            .map(|id| VoteOption {
                id: OptionId::from(*id),
                vote_id: VoteId::from(vote_id),
                content: format!("option {id}"),
            })
            .collect()
    }

    fn radio_ids(fragment: &FragmentNode) -> Vec<String> {
        fragment
            .find_all_by_class("vote-select-btn")
            .into_iter()
            .filter_map(|input| input.id.clone())
            .collect()
    }

    #[test]
    fn one_row_per_option_in_caller_order() {
        let fragment = build_content(
            &vote("v1"),
            &options("v1", &["o3", "o1", "o2"]),
            PanelState::Collapsed,
            &CardConfig::default(),
        );
        assert_eq!(
            radio_ids(&fragment),
            vec!["votev1optiono3", "votev1optiono1", "votev1optiono2"]
        );
        let labels: Vec<_> = fragment
            .find_all_by_class("option-label")
            .into_iter()
            .map(|label| label.attribute("for").unwrap_or_default().to_string())
            .collect();
        assert_eq!(labels, radio_ids(&fragment));
    }

    #[test]
    fn radios_share_one_group_per_vote() {
        let fragment = build_content(
            &vote("v1"),
            &options("v1", &["o1", "o2"]),
            PanelState::Collapsed,
            &CardConfig::default(),
        );
        let names: Vec<_> = fragment
            .find_all_by_class("vote-select-btn")
            .into_iter()
            .map(|input| input.attribute("name"))
            .collect();
        assert_eq!(names, vec![Some("votev1option"), Some("votev1option")]);
    }

    #[test]
    fn empty_options_render_the_shell() {
        let fragment = build_content(
            &vote("v1"),
            &[],
            PanelState::Collapsed,
            &CardConfig::default(),
        );
        assert!(fragment.find_by_id("vote-panel-v1").is_some());
        assert!(fragment.find_all_by_class("vote-button-check").is_empty());
        assert_eq!(fragment.find_all_by_class("vote-option-mp").len(), 1);
    }

    #[test]
    fn visibility_follows_panel_state() {
        let config = CardConfig::default();
        let collapsed = build_content(&vote("v1"), &[], PanelState::Collapsed, &config);
        assert_eq!(
            collapsed.find_by_id("vote-surface-v1").unwrap().attribute("style"),
            None
        );
        assert_eq!(
            collapsed.find_by_id("vote-panel-v1").unwrap().attribute("style"),
            Some(HIDDEN_STYLE)
        );

        let expanded = build_content(&vote("v1"), &[], PanelState::Expanded, &config);
        assert_eq!(
            expanded.find_by_id("vote-surface-v1").unwrap().attribute("style"),
            Some(HIDDEN_STYLE)
        );
        assert_eq!(
            expanded.find_by_id("vote-panel-v1").unwrap().attribute("style"),
            None
        );
    }

    #[test]
    fn surface_shows_and_submit_picks() {
        let fragment = build_content(
            &vote("v1"),
            &[],
            PanelState::Collapsed,
            &CardConfig::default(),
        );
        assert_eq!(
            fragment.handler_for("vote-surface-v1"),
            Some(&Action::Show(VoteId::from("v1")))
        );
        assert_eq!(
            fragment.handler_for("vote-submit-v1"),
            Some(&Action::SubmitPick(VoteId::from("v1")))
        );
        assert_eq!(fragment.handler_for("vote-analyze-v1"), None);
    }

    #[test]
    fn title_and_timestamp_are_rendered() {
        let mut record = vote("v1");
        record.created_at = NaiveDate::from_ymd_opt(2023, 5, 1)
            .and_then(|date| date.and_hms_opt(9, 30, 0));
        let fragment = build_content(&record, &[], PanelState::Collapsed, &CardConfig::default());
        let surface = FragmentNode::from(fragment.find_by_id("vote-surface-v1").unwrap().clone());
        assert_eq!(surface.text_content(), "Pick one2023-05-01 09:30");
        assert_eq!(
            fragment.find_by_id("vote-content-v1").map(|el| el.children.clone()),
            Some(vec![FragmentNode::Text("Q?".to_string())])
        );
    }

    #[test]
    fn shared_option_ids_do_not_collide_across_votes() {
        let config = CardConfig::default();
        let first = build_content(&vote("1"), &options("1", &["5"]), PanelState::Collapsed, &config);
        let second =
            build_content(&vote("15"), &options("15", &["5"]), PanelState::Collapsed, &config);
        let mut ids = radio_ids(&first);
        ids.extend(radio_ids(&second));
        assert_eq!(ids, vec!["vote1option5", "vote15option5"]);
    }
}
