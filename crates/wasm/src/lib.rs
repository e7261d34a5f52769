//! PlayDeck WASM Frontend
//!
//! Browser client: loads the game catalog over HTTP, renders it with egui and
//! runs games in an embedded frame.

#![cfg(target_arch = "wasm32")]

mod app;
mod auth_bridge;
mod game_frame;
mod http_client;
mod panels;
mod storage;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

const CANVAS_ID: &str = "canvas";

fn find_canvas() -> Result<HtmlCanvasElement, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("missing #canvas element"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("#canvas is not a canvas"))
}

fn install_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let canvas = find_canvas()?;

    wasm_bindgen_futures::spawn_local(async move {
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| {
                    egui_extras::install_image_loaders(&cc.egui_ctx);
                    install_fonts(&cc.egui_ctx);
                    Ok(Box::new(app::WasmApp::new(cc.egui_ctx.clone())))
                }),
            )
            .await;
        if let Err(e) = started {
            tracing::error!("PlayDeck failed to start: {:?}", e);
        }
    });

    Ok(())
}
