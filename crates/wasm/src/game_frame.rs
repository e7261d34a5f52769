//! Embedded game frame
//!
//! A DOM overlay above the egui canvas: header with title, fullscreen and close
//! buttons, and an `<iframe>` for the game. DOM events are queued and polled by
//! the app each frame.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlIFrameElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    Loaded,
    Failed,
    ToggleFullscreen,
    Close,
    FullscreenChanged(bool),
}

type Listener = Closure<dyn FnMut(Event)>;

pub struct GameFrame {
    document: Document,
    overlay: HtmlElement,
    title: Element,
    fullscreen_button: Element,
    iframe: HtmlIFrameElement,
    events: Rc<RefCell<Vec<FrameEvent>>>,
    _listeners: Vec<Listener>,
}

const OVERLAY_STYLE: &str = "position:fixed;inset:0;z-index:1000;display:none;flex-direction:column;background:#111;";
const HEADER_STYLE: &str = "display:flex;align-items:center;gap:8px;padding:6px 12px;background:#1e1e2e;color:#eee;font-family:sans-serif;";
const IFRAME_STYLE: &str = "flex:1;width:100%;border:0;background:#000;";

fn js_err(e: JsValue) -> String {
    format!("{:?}", e)
}

impl GameFrame {
    /// Build the overlay (hidden) and attach it to the page body
    pub fn mount() -> Result<Self, String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("No document")?;
        let body = document.body().ok_or("No body")?;

        let overlay: HtmlElement = document.create_element("div").map_err(js_err)?.unchecked_into();
        overlay.set_attribute("style", OVERLAY_STYLE).map_err(js_err)?;

        let header = document.create_element("div").map_err(js_err)?;
        header.set_attribute("style", HEADER_STYLE).map_err(js_err)?;

        let title = document.create_element("span").map_err(js_err)?;
        title.set_attribute("style", "flex:1;font-weight:bold;").map_err(js_err)?;

        let fullscreen_button = document.create_element("button").map_err(js_err)?;
        fullscreen_button.set_text_content(Some("Fullscreen"));
        let close_button = document.create_element("button").map_err(js_err)?;
        close_button.set_text_content(Some("Close"));

        let iframe: HtmlIFrameElement = document.create_element("iframe").map_err(js_err)?.unchecked_into();
        iframe.set_attribute("style", IFRAME_STYLE).map_err(js_err)?;
        iframe.set_attribute("allow", "fullscreen; autoplay; gamepad").map_err(js_err)?;
        iframe.set_attribute("allowfullscreen", "").map_err(js_err)?;

        header.append_child(&title).map_err(js_err)?;
        header.append_child(&fullscreen_button).map_err(js_err)?;
        header.append_child(&close_button).map_err(js_err)?;
        overlay.append_child(&header).map_err(js_err)?;
        overlay.append_child(&iframe).map_err(js_err)?;
        body.append_child(&overlay).map_err(js_err)?;

        let events: Rc<RefCell<Vec<FrameEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Vec::new();

        listen(&iframe, "load", FrameEvent::Loaded, &events, &mut listeners)?;
        listen(&iframe, "error", FrameEvent::Failed, &events, &mut listeners)?;
        listen(&fullscreen_button, "click", FrameEvent::ToggleFullscreen, &events, &mut listeners)?;
        listen(&close_button, "click", FrameEvent::Close, &events, &mut listeners)?;

        // Fullscreen can also be left through browser controls or Escape inside the frame
        {
            let queue = events.clone();
            let doc = document.clone();
            let listener = Listener::new(move |_e: Event| {
                let active = doc.fullscreen_element().is_some();
                queue.borrow_mut().push(FrameEvent::FullscreenChanged(active));
            });
            document
                .add_event_listener_with_callback("fullscreenchange", listener.as_ref().unchecked_ref())
                .map_err(js_err)?;
            listeners.push(listener);
        }

        Ok(Self {
            document,
            overlay,
            title,
            fullscreen_button,
            iframe,
            events,
            _listeners: listeners,
        })
    }

    pub fn poll_events(&self) -> Vec<FrameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn set_visible(&self, visible: bool) {
        let display = if visible { "flex" } else { "none" };
        let _ = self.overlay.style().set_property("display", display);
    }

    pub fn open(&self, title: &str, url: &str) {
        self.title.set_text_content(Some(title));
        let _ = self.iframe.remove_attribute("srcdoc");
        self.iframe.set_src(url);
        self.set_fullscreen_label(false);
        self.set_visible(true);
    }

    /// Replace the frame content with a notice linking to the game
    pub fn show_fallback(&self, title: &str, link: &str) {
        self.iframe.set_srcdoc(&fallback_notice_html(title, link));
    }

    pub fn request_fullscreen(&self) {
        if let Err(e) = self.overlay.request_fullscreen() {
            tracing::debug!("Fullscreen request rejected: {:?}", e);
        }
        self.set_fullscreen_label(true);
    }

    pub fn exit_fullscreen(&self) {
        if self.document.fullscreen_element().is_some() {
            self.document.exit_fullscreen();
        }
        self.set_fullscreen_label(false);
    }

    pub fn set_fullscreen_label(&self, fullscreen: bool) {
        let label = if fullscreen { "Exit Fullscreen" } else { "Fullscreen" };
        self.fullscreen_button.set_text_content(Some(label));
    }

    pub fn close(&self) {
        self.set_visible(false);
        self.iframe.set_src("about:blank");
    }
}

fn listen(
    target: &web_sys::EventTarget,
    name: &str,
    event: FrameEvent,
    events: &Rc<RefCell<Vec<FrameEvent>>>,
    listeners: &mut Vec<Listener>,
) -> Result<(), String> {
    let queue = events.clone();
    let listener = Listener::new(move |_e: Event| {
        queue.borrow_mut().push(event);
    });
    target
        .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
        .map_err(js_err)?;
    listeners.push(listener);
    Ok(())
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn fallback_notice_html(title: &str, link: &str) -> String {
    format!(
        r#"<div style="display:flex;justify-content:center;align-items:center;height:100vh;font-family:Arial,sans-serif;text-align:center;background:linear-gradient(135deg,#667eea 0%,#764ba2 100%);color:white;">
<div><h2>{title}</h2><p>This game could not be embedded.</p>
<p><a href="{link}" target="_blank" rel="noopener" style="color:#4ecdc4;">Click here to play in a new tab</a></p></div></div>"#,
        title = escape_html(title),
        link = escape_html(link),
    )
}
