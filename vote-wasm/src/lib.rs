//! Framework-neutral WASM <-> JavaScript bridge rendering vote cards to HTML.

use serde_wasm_bindgen::from_value;
use vote_core::{CardConfig, PanelState, PanelStates, TimelineError, VoteId};
use wasm_bindgen::prelude::*;

/// Missing fields keep their `CardConfig::default()` values.
fn read_config(config: Option<JsValue>) -> Result<CardConfig, JsValue> {
    match config {
        Some(js_cfg) => from_value::<CardConfig>(js_cfg)
            .map_err(|err| JsValue::from_str(&format!("could not read config: {err}"))),
        None => Ok(CardConfig::default()),
    }
}

/// Renders a whole feed. `expanded` lists vote ids whose panel starts open.
#[wasm_bindgen]
pub fn render_feed_html(
    feed: JsValue,
    expanded: Option<JsValue>,
    config: Option<JsValue>,
) -> Result<String, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let feed_value = from_value::<serde_json::Value>(feed)
        .map_err(|err| JsValue::from_str(&format!("could not read JSON feed: {err}")))?;
    let cfg = read_config(config)?;

    let cards = vote_feed::parse_feed_value(&feed_value)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    let expanded: Vec<String> = match expanded {
        Some(ids) => from_value(ids)
            .map_err(|err| JsValue::from_str(&format!("could not read expanded ids: {err}")))?,
        None => Vec::new(),
    };

    let mut panels = PanelStates::default();
    for id in expanded {
        panels.set(VoteId::new(id), PanelState::Expanded);
    }

    Ok(vote_ui::build_timeline(&cards, &panels, &cfg).to_html())
}

/// Renders one vote object with nested options and comments.
#[wasm_bindgen]
pub fn render_card_html(
    vote: JsValue,
    expanded: bool,
    config: Option<JsValue>,
) -> Result<String, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let vote_value = from_value::<serde_json::Value>(vote)
        .map_err(|err| JsValue::from_str(&format!("could not read JSON vote: {err}")))?;
    let cfg = read_config(config)?;

    let card = vote_feed::parse_card_value(&vote_value)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;
    let state = if expanded {
        PanelState::Expanded
    } else {
        PanelState::Collapsed
    };

    Ok(vote_ui::build_card(&card, state, &cfg).to_html())
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}
