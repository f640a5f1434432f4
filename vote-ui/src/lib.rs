//! Vote timeline cards: builders, click dispatch and the browser mount.
//!
//! The builders produce a [`FragmentNode`] tree that carries [`Action`]s
//! instead of closures. Native code renders it to HTML or drives it through a
//! [`Dispatcher`]; on `wasm32` the same tree is turned into Yew nodes.

pub mod action;
pub mod card;
pub mod comment;
pub mod content;
pub mod fragment;
pub mod header;
pub mod icons;
pub mod results;

mod styles;

pub use action::{
    detail_path, dispatch, participants_path, Action, Dispatcher, Navigator, TimelineActions,
};
pub use card::{build_card, build_timeline};
pub use comment::build_comment;
pub use content::build_content;
pub use fragment::{Element, FragmentNode};
pub use header::build_header;
pub use icons::build_icons;
pub use results::apply_results;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::rc::Rc;

    use crate::action::{dispatch, Action, Navigator, TimelineActions};
    use crate::card::build_timeline;
    use crate::content::{result_class, result_slot_id};
    use crate::fragment::FragmentNode;
    use crate::styles;
    use js_sys::{Function, Reflect};
    use serde_wasm_bindgen::from_value;
    use vote_core::{CardConfig, PanelState, PanelStates, VoteCard, VoteId, VoteResults};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Document, Element, Window};
    use yew::html::onclick;
    use yew::prelude::*;
    use yew::virtual_dom::{VNode, VTag, VText};

    /// Host page callbacks, looked up by their JavaScript names.
    #[derive(Clone, Default, PartialEq)]
    pub struct JsActions {
        show: Option<Function>,
        submit_pick: Option<Function>,
        click_bookmark: Option<Function>,
        send_link: Option<Function>,
    }

    impl JsActions {
        fn from_object(actions: &JsValue) -> Self {
            let lookup = |name: &str| {
                Reflect::get(actions, &JsValue::from_str(name))
                    .ok()
                    .and_then(|value| value.dyn_into::<Function>().ok())
            };
            Self {
                show: lookup("show"),
                submit_pick: lookup("submitPick"),
                click_bookmark: lookup("clickBookmark"),
                send_link: lookup("sendLink"),
            }
        }

        fn call(function: &Option<Function>, name: &str, args: &[JsValue]) {
            let Some(function) = function else {
                console::warn_1(&JsValue::from_str(&format!(
                    "no `{name}` action registered"
                )));
                return;
            };
            let result = match args {
                [first] => function.call1(&JsValue::NULL, first),
                [first, second] => function.call2(&JsValue::NULL, first, second),
                _ => function.call0(&JsValue::NULL),
            };
            if let Err(err) = result {
                console::error_1(&err);
            }
        }
    }

    impl TimelineActions for JsActions {
        fn show(&self, vote_id: &VoteId, state: PanelState) {
            let expanded = JsValue::from_bool(state.is_expanded());
            Self::call(&self.show, "show", &[JsValue::from_str(vote_id.as_str()), expanded]);
        }

        fn submit_pick(&self, vote_id: &VoteId) {
            Self::call(
                &self.submit_pick,
                "submitPick",
                &[JsValue::from_str(vote_id.as_str())],
            );
        }

        fn click_bookmark(&self, element_id: &str) {
            Self::call(
                &self.click_bookmark,
                "clickBookmark",
                &[JsValue::from_str(element_id)],
            );
        }

        fn send_link(&self, vote_id: &VoteId) {
            Self::call(
                &self.send_link,
                "sendLink",
                &[JsValue::from_str(vote_id.as_str())],
            );
        }
    }

    struct WindowNavigator;

    impl Navigator for WindowNavigator {
        fn navigate(&self, path: &str) {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(err) = window.location().set_href(path) {
                console::error_1(&err);
            }
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct VoteTimelineProps {
        pub cards: Vec<VoteCard>,
        pub config: CardConfig,
        pub actions: JsActions,
    }

    #[function_component(VoteTimeline)]
    fn vote_timeline(props: &VoteTimelineProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    match styles::ensure_styles(&document) {
                        Ok(true) => log::debug!("installed vote card styles"),
                        Ok(false) => {}
                        Err(err) => console::error_1(&err),
                    }
                }
            }
            || ()
        });

        let panels = use_state(PanelStates::default);

        let on_action = {
            let panels = panels.clone();
            let actions = props.actions.clone();
            Callback::from(move |action: Action| {
                let mut next = (*panels).clone();
                dispatch(&action, &mut next, &actions, &WindowNavigator);
                if next != *panels {
                    panels.set(next);
                }
            })
        };

        let fragment = build_timeline(&props.cards, &panels, &props.config);
        fragment_to_html(&fragment, &on_action)
    }

    fn fragment_to_html(node: &FragmentNode, on_action: &Callback<Action>) -> Html {
        let element = match node {
            FragmentNode::Text(text) => return VNode::from(VText::new(text.clone())),
            FragmentNode::Element(element) => element,
        };

        let mut tag = VTag::new(element.tag);
        if let Some(id) = &element.id {
            tag.add_attribute("id", id.clone());
        }
        if !element.classes.is_empty() {
            tag.add_attribute("class", element.classes.join(" "));
        }
        for (name, value) in &element.attributes {
            tag.add_attribute(*name, value.clone());
        }
        if let Some(action) = &element.on_click {
            let action = action.clone();
            let on_action = on_action.clone();
            let callback = Callback::from(move |_: MouseEvent| on_action.emit(action.clone()));
            tag.add_listener(Rc::new(onclick::Wrapper::new(callback)));
        }
        for child in &element.children {
            tag.add_child(fragment_to_html(child, on_action));
        }
        tag.into()
    }

    fn document() -> Result<Document, JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        window
            .document()
            .ok_or_else(|| JsValue::from_str("document is not accessible"))
    }

    /// Mounts the timeline under `selector`.
    ///
    /// `feed` is the server feed, `actions` an object with `show`,
    /// `submitPick`, `clickBookmark` and `sendLink` functions, and `config` an
    /// optional partial `CardConfig`.
    #[wasm_bindgen]
    pub fn mount_vote_timeline(
        selector: &str,
        feed: JsValue,
        actions: JsValue,
        config: Option<JsValue>,
    ) -> Result<(), JsValue> {
        let document = document()?;
        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("no element matches the selector"))?;

        let feed: serde_json::Value = from_value(feed)?;
        let cards = vote_feed::parse_feed_value(&feed)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let config = match config {
            Some(value) => from_value::<CardConfig>(value)?,
            None => CardConfig::default(),
        };

        yew::Renderer::<VoteTimeline>::with_root_and_props(
            target,
            VoteTimelineProps {
                cards,
                config,
                actions: JsActions::from_object(&actions),
            },
        )
        .render();
        Ok(())
    }

    /// Writes live percentages into the mounted result slots of one vote.
    #[wasm_bindgen]
    pub fn update_vote_results(results: JsValue) -> Result<u32, JsValue> {
        let results: VoteResults = from_value(results)?;
        let document = document()?;
        let slots = document.get_elements_by_class_name(&result_class(&results.vote_id));

        let mut filled = 0;
        for (option_id, percent) in results.percentages() {
            let slot_id = result_slot_id(&option_id);
            let slot = (0..slots.length())
                .filter_map(|index| slots.item(index))
                .find(|slot| slot.id() == slot_id);
            match slot {
                Some(slot) => {
                    slot.set_text_content(Some(&format!("{percent}%")));
                    filled += 1;
                }
                None => console::debug_1(&JsValue::from_str(&format!(
                    "no result slot for option {option_id} of vote {}",
                    results.vote_id
                ))),
            }
        }
        Ok(filled)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{mount_vote_timeline, update_vote_results};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_vote_timeline(
    _: &str,
    _: wasm_bindgen::JsValue,
    _: wasm_bindgen::JsValue,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "vote-ui can only mount when built for wasm32",
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn update_vote_results(_: wasm_bindgen::JsValue) -> Result<u32, wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "vote-ui can only update results when built for wasm32",
    ))
}
