//! Default card stylesheet, injected once per document.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use web_sys::Document;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const STYLE_ELEMENT_ID: &str = "vote-ui-styles";

/// Bumped whenever `DEFAULT_STYLES` changes so stale copies get replaced.
const STYLE_VERSION: &str = "2";

/// Whether an injected stylesheet tagged `found` has to be rewritten.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn needs_refresh(found: Option<&str>) -> bool {
    found != Some(STYLE_VERSION)
}

/// Default CSS for the vote cards along with easy-to-override design tokens.
#[cfg(target_arch = "wasm32")]
pub const DEFAULT_STYLES: &str = r#"
:root {
  --vote-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --vote-card-bg: #ffffff;
  --vote-card-border: rgba(148, 163, 184, 0.28);
  --vote-radius: 16px;
  --vote-text: #1f2933;
  --vote-muted: #52606d;
  --vote-surface: #5b6cff;
  --vote-surface-open: #3f4dd8;
  --vote-result: #ffffff;
}

.vote-timeline {
  font-family: var(--vote-font-family);
  color: var(--vote-text);
  display: flex;
  flex-direction: column;
  gap: 18px;
}

.timeline-card {
  background: var(--vote-card-bg);
  border: 1px solid var(--vote-card-border);
  border-radius: var(--vote-radius);
  padding: 16px;
}

.profile {
  display: flex;
  align-items: center;
  gap: 10px;
  margin-bottom: 10px;
}

.profile-image,
.comment-circle {
  height: 48px;
  width: 48px;
  border-radius: 50%;
}

.comment-circle {
  height: 32px;
  width: 32px;
}

.profile-nickname,
.profile-user-id {
  font-weight: 700;
}

.profile-menu {
  margin-left: auto;
  margin-right: 15px;
}

.dropdown-menu {
  border-radius: 10px;
  z-index: 999;
}

.hover-cursor-pointer,
.vote-background-1,
.cm-block,
.cm-body {
  cursor: pointer;
}

.vote-background-1,
.vote-background-2 {
  border-radius: calc(var(--vote-radius) - 4px);
  color: #ffffff;
  padding: 8px 12px;
}

.vote-background-1 {
  background: var(--vote-surface);
}

.vote-background-2 {
  background: var(--vote-surface-open);
}

.vote-created-at {
  text-align: right;
  margin-right: 15px;
  font-size: 0.9rem;
}

.vote-select-box {
  display: flex;
  align-items: center;
  gap: 8px;
  padding: 6px 0;
}

.option-label {
  flex: 1;
}

.pick-percent {
  color: var(--vote-result);
  font-variant-numeric: tabular-nums;
}

.vote-control-icon {
  width: 25px;
  height: 30px;
}

.icons {
  display: flex;
  justify-content: space-between;
  margin-top: 10px;
}

.icon-count {
  margin: 0 10px 0 4px;
  color: var(--vote-muted);
}

.comment-area {
  display: flex;
  flex-wrap: wrap;
  gap: 10px;
}

.comment-main {
  width: 90%;
}

.comment-id {
  font-weight: 600;
}

.comment-separator {
  width: 100%;
  border-top: 1px solid #212529;
  margin: 16px 0;
}
"#;

/// Installs `DEFAULT_STYLES` unless the current version is already present.
/// Returns `true` when the document was changed.
#[cfg(target_arch = "wasm32")]
pub fn ensure_styles(document: &Document) -> Result<bool, JsValue> {
    let style = match document.get_element_by_id(STYLE_ELEMENT_ID) {
        Some(existing) => {
            if !needs_refresh(existing.get_attribute("data-version").as_deref()) {
                return Ok(false);
            }
            existing
        }
        None => {
            let created = document.create_element("style")?;
            created.set_id(STYLE_ELEMENT_ID);
            // Pages without a <head> still get the cards styled.
            let host: web_sys::Element = match document.head() {
                Some(head) => head.into(),
                None => document
                    .body()
                    .ok_or_else(|| JsValue::from_str("document has neither <head> nor <body>"))?
                    .into(),
            };
            host.append_child(&created)?;
            created
        }
    };

    style.set_attribute("data-version", STYLE_VERSION)?;
    style.set_text_content(Some(DEFAULT_STYLES));
    Ok(true)
}
