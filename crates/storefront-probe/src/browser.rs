//! Chromium driver over CDP.
//!
//! [`ChromiumDriver`] implements the synchronous [`BrowserDriver`] boundary
//! on top of chromiumoxide. It owns a private tokio runtime and blocks on it
//! for every call.
//!
//! Elements are tagged with a `data-probe-id` attribute the first time a
//! lookup returns them. The id embeds a per-document token, so a handle from
//! a previous page never resolves on the next one, and a node React replaced
//! loses its tag. Both cases surface as `StaleElement`.

use crate::driver::{BrowserDriver, DragTarget, DriverConfig, ElementHandle, PointerAction};
use crate::locator::Locator;
use crate::result::{ProbeError, ProbeResult};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType, InsertTextParams, MouseButton,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

/// Attribute carrying the driver-assigned node id
const PROBE_ATTR: &str = "data-probe-id";

/// How long a highlighted element keeps its tint
const HIGHLIGHT_MS: u64 = 400;

/// Element snapshot as returned by the page scripts
#[derive(Debug, Deserialize)]
struct Snapshot {
    id: String,
    tag: String,
    text: String,
    displayed: bool,
    enabled: bool,
}

impl Snapshot {
    fn into_handle(self, locator: Locator, index: usize) -> ElementHandle {
        ElementHandle::new(locator, self.id, index, self.tag)
            .with_text(self.text)
            .with_displayed(self.displayed)
            .with_enabled(self.enabled)
    }
}

/// Centre of an element in viewport coordinates
#[derive(Debug, Clone, Copy, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

/// Chromium controlled over the DevTools protocol
pub struct ChromiumDriver {
    runtime: Runtime,
    browser: Option<Browser>,
    page: Page,
    handler: JoinHandle<()>,
}

impl fmt::Debug for ChromiumDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromiumDriver")
            .field("open", &self.browser.is_some())
            .finish_non_exhaustive()
    }
}

impl ChromiumDriver {
    /// Launch a browser and open one blank page
    pub fn launch(config: &DriverConfig) -> ProbeResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| launch_error(e.to_string()))?;

        let mut builder = BrowserConfig::builder()
            .window_size(config.window_width, config.window_height)
            .args(config.browser_args());
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &config.executable_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder.build().map_err(launch_error)?;

        let (browser, page, handler) = runtime.block_on(async {
            let (browser, mut handler) = Browser::launch(cdp_config)
                .await
                .map_err(|e| launch_error(e.to_string()))?;

            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| launch_error(e.to_string()))?;
            Ok::<_, ProbeError>((browser, page, handler))
        })?;

        tracing::info!(headless = config.headless, "chromium launched");
        Ok(Self {
            runtime,
            browser: Some(browser),
            page,
            handler,
        })
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn ensure_open(&self) -> ProbeResult<()> {
        if self.browser.is_some() {
            Ok(())
        } else {
            Err(ProbeError::driver("browser is closed"))
        }
    }

    fn evaluate(&self, script: &str) -> ProbeResult<Value> {
        self.ensure_open()?;
        let result = self
            .block_on(self.page.evaluate(script))
            .map_err(|e| ProbeError::Script {
                message: e.to_string(),
            })?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    /// Run `body` with `el` bound to the element's live node
    fn on_node(&self, element: &ElementHandle, body: &str) -> ProbeResult<Value> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) {{ return {{ stale: true }}; }} \
             return {{ stale: false, value: ({body}) }}; }})()",
            node_expr(&element.node_id)
        );
        let mut result = self.evaluate(&script)?;
        if result.get("stale").and_then(Value::as_bool).unwrap_or(true) {
            return Err(ProbeError::StaleElement {
                locator: element.locator.name().to_string(),
                node_id: element.node_id.clone(),
            });
        }
        Ok(result.get_mut("value").map(Value::take).unwrap_or(Value::Null))
    }

    fn centre(&self, element: &ElementHandle) -> ProbeResult<Point> {
        let value = self.on_node(
            element,
            &format!(
                "(() => {{ const host = {HOST_EXPR}; \
                 host.scrollIntoView({{ block: 'center', inline: 'center' }}); \
                 const r = host.getBoundingClientRect(); \
                 return {{ x: r.left + r.width / 2, y: r.top + r.height / 2 }}; }})()"
            ),
        )?;
        Ok(serde_json::from_value(value)?)
    }

    fn mouse(
        &self,
        kind: DispatchMouseEventType,
        at: Point,
        button: MouseButton,
        click_count: i64,
    ) -> ProbeResult<()> {
        let mut params = DispatchMouseEventParams::new(kind, at.x, at.y);
        params.button = Some(button);
        params.click_count = Some(click_count);
        self.block_on(self.page.execute(params))
            .map(|_| ())
            .map_err(|e| ProbeError::driver(e.to_string()))
    }

    fn press(&self, at: Point, button: MouseButton, click_count: i64) -> ProbeResult<()> {
        self.mouse(DispatchMouseEventType::MousePressed, at, button.clone(), click_count)?;
        self.mouse(DispatchMouseEventType::MouseReleased, at, button, click_count)
    }
}

fn launch_error(message: impl Into<String>) -> ProbeError {
    ProbeError::BrowserLaunch {
        message: message.into(),
    }
}

/// JavaScript expression for the live node tagged `id`, or `null`
fn node_expr(id: &str) -> String {
    let selector = format!("[{PROBE_ATTR}=\"{id}\"]");
    format!("document.querySelector({selector:?})")
}

/// Script returning a tagged snapshot of every match of `locator`
fn find_script(locator: &Locator) -> String {
    format!(
        "(() => {{ \
         window.__probeDoc = window.__probeDoc || Math.random().toString(36).slice(2); \
         window.__probeSeq = window.__probeSeq || 0; \
         return {query}.map((el) => {{ \
           if (!el.hasAttribute('{PROBE_ATTR}')) {{ \
             el.setAttribute('{PROBE_ATTR}', window.__probeDoc + '-' + (++window.__probeSeq)); \
           }} \
           {snapshot} \
         }}); }})()",
        query = locator.to_query_all(),
        snapshot = SNAPSHOT_BODY,
    )
}

/// Element whose box stands for `el`
///
/// An `<option>` of a closed dropdown has an empty rect, so its enclosing
/// `<select>` is measured instead.
macro_rules! host_expr {
    () => {
        concat!(
            "((el.tagName === 'OPTION' || el.tagName === 'OPTGROUP') ",
            "? (el.closest('select') || el) : el)"
        )
    };
}

const HOST_EXPR: &str = host_expr!();

/// Body building a `Snapshot` object from `el`
const SNAPSHOT_BODY: &str = concat!(
    "const host = ",
    host_expr!(),
    "; ",
    "const s = window.getComputedStyle(host); ",
    "const r = host.getBoundingClientRect(); ",
    "return { id: el.getAttribute('data-probe-id'), tag: el.tagName.toLowerCase(), ",
    "text: (el.innerText || el.textContent || '').trim(), ",
    "displayed: s.display !== 'none' && s.visibility !== 'hidden' && r.width > 0 && r.height > 0, ",
    "enabled: !el.disabled && !host.disabled };"
);

/// Select `el` in its dropdown the way a user pick does
///
/// The native setter keeps React's value tracker in step, so the bubbling
/// `change` event reaches the page's handler.
const SELECT_OPTION: &str = "(() => { const sel = el.closest('select'); \
    if (!sel) { return false; } \
    const desc = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value'); \
    desc.set.call(sel, el.value); \
    sel.dispatchEvent(new Event('input', { bubbles: true })); \
    sel.dispatchEvent(new Event('change', { bubbles: true })); \
    return true; })()";

/// Tint background and border, restoring both after `HIGHLIGHT_MS`
fn highlight_script() -> String {
    format!(
        "(() => {{ const bg = el.style.background; const border = el.style.border; \
         el.style.background = 'yellow'; el.style.border = '2px solid red'; \
         setTimeout(() => {{ el.style.background = bg; el.style.border = border; }}, \
         {HIGHLIGHT_MS}); return true; }})()"
    )
}

/// Whether a click on `tag` is a dropdown pick rather than a mouse press
fn is_option(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("option")
}

impl BrowserDriver for ChromiumDriver {
    fn name(&self) -> &'static str {
        "chromium"
    }

    fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        self.ensure_open()?;
        self.block_on(self.page.goto(url))
            .map(|_| ())
            .map_err(|e| ProbeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    fn current_url(&mut self) -> ProbeResult<String> {
        self.ensure_open()?;
        self.block_on(self.page.url())
            .map_err(|e| ProbeError::driver(e.to_string()))
            .map(Option::unwrap_or_default)
    }

    fn execute_script(&mut self, script: &str) -> ProbeResult<Value> {
        self.evaluate(script)
    }

    fn find_elements(&mut self, locator: &Locator) -> ProbeResult<Vec<ElementHandle>> {
        let value = self.evaluate(&find_script(locator))?;
        let snapshots: Vec<Snapshot> = serde_json::from_value(value)?;
        Ok(snapshots
            .into_iter()
            .enumerate()
            .map(|(i, s)| s.into_handle(*locator, i))
            .collect())
    }

    fn resolve(&mut self, element: &ElementHandle) -> ProbeResult<ElementHandle> {
        let value = self.on_node(element, &format!("(() => {{ {SNAPSHOT_BODY} }})()"))?;
        let snapshot: Snapshot = serde_json::from_value(value)?;
        Ok(snapshot.into_handle(element.locator, element.index))
    }

    fn pointer(&mut self, element: &ElementHandle, action: PointerAction) -> ProbeResult<()> {
        if action == PointerAction::Click && is_option(&element.tag_name) {
            let picked = self.on_node(element, SELECT_OPTION)?;
            if picked.as_bool() != Some(true) {
                return Err(ProbeError::driver(format!(
                    "option outside a dropdown: {}",
                    element.node_id
                )));
            }
            return Ok(());
        }
        let at = self.centre(element)?;
        self.mouse(DispatchMouseEventType::MouseMoved, at, MouseButton::None, 0)?;
        match action {
            PointerAction::Hover => Ok(()),
            PointerAction::Click => self.press(at, MouseButton::Left, 1),
            PointerAction::DoubleClick => {
                self.press(at, MouseButton::Left, 1)?;
                self.press(at, MouseButton::Left, 2)
            }
            PointerAction::ContextClick => self.press(at, MouseButton::Right, 1),
        }
    }

    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        self.on_node(element, "(el.focus(), true)")?;
        self.block_on(self.page.execute(InsertTextParams::new(text)))
            .map(|_| ())
            .map_err(|e| ProbeError::driver(e.to_string()))
    }

    fn clear(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        // Native setter plus an input event, so framework state sees the change
        self.on_node(
            element,
            "(() => { const proto = Object.getPrototypeOf(el); \
             const desc = Object.getOwnPropertyDescriptor(proto, 'value'); \
             if (desc && desc.set) { desc.set.call(el, ''); } else { el.value = ''; } \
             el.dispatchEvent(new Event('input', { bubbles: true })); return true; })()",
        )
        .map(|_| ())
    }

    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String> {
        let value = self.on_node(element, "(el.innerText || el.textContent || '').trim()")?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        let body = if name == "value" {
            "(el.value === undefined ? el.getAttribute('value') : String(el.value))".to_string()
        } else {
            format!("el.getAttribute({name:?})")
        };
        let value = self.on_node(element, &body)?;
        Ok(value.as_str().map(str::to_string))
    }

    fn drag(&mut self, element: &ElementHandle, target: &DragTarget) -> ProbeResult<()> {
        let from = self.centre(element)?;
        let to = match target {
            DragTarget::Offset { dx, dy } => Point {
                x: from.x + dx,
                y: from.y + dy,
            },
            DragTarget::Element(other) => self.centre(other)?,
        };
        self.mouse(DispatchMouseEventType::MouseMoved, from, MouseButton::None, 0)?;
        self.mouse(DispatchMouseEventType::MousePressed, from, MouseButton::Left, 1)?;
        self.mouse(DispatchMouseEventType::MouseMoved, to, MouseButton::Left, 0)?;
        self.mouse(DispatchMouseEventType::MouseReleased, to, MouseButton::Left, 1)
    }

    fn scroll_into_view(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.on_node(
            element,
            "(el.scrollIntoView({ block: 'center', inline: 'center' }), true)",
        )
        .map(|_| ())
    }

    fn highlight(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.on_node(element, &highlight_script()).map(|_| ())
    }

    fn close(&mut self) -> ProbeResult<()> {
        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };
        let result = self.runtime.block_on(async {
            browser.close().await?;
            browser.wait().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        });
        self.handler.abort();
        tracing::info!("chromium closed");
        result.map_err(|e| ProbeError::driver(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ITEM: Locator = Locator::css("inventory.item_name", "div.inventory_item_name");

    #[test]
    fn test_node_expr_escapes_selector() {
        assert_eq!(
            node_expr("abc-3"),
            "document.querySelector(\"[data-probe-id=\\\"abc-3\\\"]\")"
        );
    }

    #[test]
    fn test_find_script_tags_matches() {
        let script = find_script(&ITEM);
        assert!(script.contains("querySelectorAll(\"div.inventory_item_name\")"));
        assert!(script.contains("setAttribute('data-probe-id'"));
        assert!(script.contains("__probeDoc"));
    }

    #[test]
    fn test_options_measure_their_dropdown() {
        assert!(SNAPSHOT_BODY.contains("el.closest('select')"));
        assert!(SNAPSHOT_BODY.contains("window.getComputedStyle(host)"));
        assert!(SNAPSHOT_BODY.contains("host.getBoundingClientRect()"));
        assert!(SNAPSHOT_BODY.contains(HOST_EXPR));
    }

    #[test]
    fn test_option_click_picks_value() {
        assert!(is_option("option"));
        assert!(is_option("OPTION"));
        assert!(!is_option("select"));
        assert!(!is_option("button"));
        assert!(SELECT_OPTION.contains("desc.set.call(sel, el.value)"));
        assert!(SELECT_OPTION.contains("new Event('change', { bubbles: true })"));
    }

    #[test]
    fn test_highlight_tints_and_reverts() {
        let script = highlight_script();
        assert!(script.contains("el.style.background = 'yellow'"));
        assert!(script.contains("el.style.border = '2px solid red'"));
        assert!(script.contains("el.style.background = bg; el.style.border = border;"));
        assert!(script.contains("}, 400);"));
    }

    #[test]
    fn test_snapshot_into_handle() {
        let snapshot: Snapshot = serde_json::from_value(serde_json::json!({
            "id": "k2-1",
            "tag": "div",
            "text": "Sauce Labs Onesie",
            "displayed": true,
            "enabled": true,
        }))
        .unwrap();
        let handle = snapshot.into_handle(ITEM, 4);
        assert_eq!(handle.node_id, "k2-1");
        assert_eq!(handle.index, 4);
        assert_eq!(handle.text, "Sauce Labs Onesie");
    }
}
