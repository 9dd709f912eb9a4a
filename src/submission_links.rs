use std::cell::RefCell;

use geo_challenge_core::submission::submission_link;
use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

pub(crate) const PROCESSED_ATTRIBUTE: &str = "data-processed";
pub(crate) const WATCH_INTERVAL_MS: u32 = 2_000;
const CANDIDATE_SELECTOR: &str = "pre, td";

thread_local! {
    static WATCHER: RefCell<Option<Interval>> = RefCell::new(None);
}

/// Wraps the content of every `<pre>`/`<td>` whose text is exactly a stored
/// submission in an OpenStreetMap link. Returns how many were decorated.
pub(crate) fn decorate(document: &Document) -> u32 {
    let Ok(nodes) = document.query_selector_all(CANDIDATE_SELECTOR) else {
        return 0;
    };
    let mut decorated = 0;
    for index in 0..nodes.length() {
        let Some(element) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        if element.has_attribute(PROCESSED_ATTRIBUTE) {
            continue;
        }
        let Some(url) = submission_link(&element.inner_text()) else {
            continue;
        };
        if wrap_in_link(document, &element, &url).is_ok() {
            decorated += 1;
        }
    }
    decorated
}

fn wrap_in_link(
    document: &Document,
    element: &HtmlElement,
    url: &str,
) -> Result<(), wasm_bindgen::JsValue> {
    let anchor = document.create_element("a")?;
    anchor.set_attribute("href", url)?;
    anchor.set_attribute("target", "_blank")?;
    anchor.set_attribute("rel", "noopener")?;
    while let Some(child) = element.first_child() {
        anchor.append_child(&child)?;
    }
    element.append_child(&anchor)?;
    element.set_attribute(PROCESSED_ATTRIBUTE, "true")?;
    Ok(())
}

/// Re-runs `decorate` on a timer so rows rendered later get links too.
/// Returns `false` if a watcher is already running.
pub(crate) fn watch() -> bool {
    WATCHER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(Interval::new(WATCH_INTERVAL_MS, || {
            if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                decorate(&document);
            }
        }));
        true
    })
}

pub(crate) fn stop_watching() -> bool {
    WATCHER.with(|slot| slot.borrow_mut().take().is_some())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().and_then(|w| w.document()).unwrap()
    }

    #[wasm_bindgen_test]
    fn decorates_matching_cells_once() {
        let doc = document();
        let table = doc.create_element("table").unwrap();
        table.set_inner_html(
            "<tr><td id=\"cell-hit\">lat:48.8584,lon:2.2945</td>\
             <td id=\"cell-miss\">Correct</td></tr>",
        );
        doc.body().unwrap().append_child(&table).unwrap();

        assert_eq!(decorate(&doc), 1);
        let hit = doc.get_element_by_id("cell-hit").unwrap();
        let link = hit.query_selector("a").unwrap().unwrap();
        assert_eq!(
            link.get_attribute("href").as_deref(),
            Some("https://www.openstreetmap.org/?mlat=48.8584&mlon=2.2945&zoom=15")
        );
        assert_eq!(link.text_content().as_deref(), Some("lat:48.8584,lon:2.2945"));
        assert_eq!(hit.get_attribute(PROCESSED_ATTRIBUTE).as_deref(), Some("true"));

        let miss = doc.get_element_by_id("cell-miss").unwrap();
        assert!(miss.query_selector("a").unwrap().is_none());

        assert_eq!(decorate(&doc), 0);
        table.remove();
    }

    #[wasm_bindgen_test]
    fn watcher_starts_once() {
        assert!(watch());
        assert!(!watch());
        assert!(stop_watching());
        assert!(!stop_watching());
    }
}
