//! Asynchronous loading of the configuration, the model, and the cue files.
//! Every load reports its own outcome; a failed asset never blocks the rest.

use crate::audio;
use crate::dom;
use crate::ui;
use crate::SharedShowcase;
use reog_core::{load_model, Cue, ShowcaseConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn fetch_response(path: &str) -> anyhow::Result<web::Response> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {} failed: {:?}", path, e))?
        .dyn_into::<web::Response>()
        .map_err(|e| anyhow::anyhow!("fetch {} returned a non-Response: {:?}", path, e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {} returned HTTP {}", path, resp.status());
    }
    Ok(resp)
}

pub async fn fetch_array_buffer(path: &str) -> anyhow::Result<js_sys::ArrayBuffer> {
    let resp = fetch_response(path).await?;
    let promise = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("{} body error: {:?}", path, e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{} body error: {:?}", path, e))?
        .dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|e| anyhow::anyhow!("{} body is not an ArrayBuffer: {:?}", path, e))
}

pub async fn fetch_bytes(path: &str) -> anyhow::Result<Vec<u8>> {
    let buffer = fetch_array_buffer(path).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

pub async fn fetch_text(path: &str) -> anyhow::Result<String> {
    let resp = fetch_response(path).await?;
    let promise = resp
        .text()
        .map_err(|e| anyhow::anyhow!("{} body error: {:?}", path, e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{} body error: {:?}", path, e))?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("{} body is not text", path))
}

/// Read the tuning file. A missing or invalid file falls back to defaults.
pub async fn load_config(path: &str) -> ShowcaseConfig {
    let text = match fetch_text(path).await {
        Ok(text) => text,
        Err(e) => {
            log::info!("[config] {} not available ({}), using defaults", path, e);
            return ShowcaseConfig::default();
        }
    };
    match ShowcaseConfig::from_toml_str(&text) {
        Ok(config) => {
            log::info!("[config] loaded {}", path);
            config
        }
        Err(e) => {
            log::warn!("[config] {} rejected: {}; using defaults", path, e);
            ShowcaseConfig::default()
        }
    }
}

pub fn spawn_model_load(showcase: SharedShowcase) {
    let path = showcase.borrow().config().model.path.clone();
    spawn_local(async move {
        let bytes = match fetch_bytes(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("[assets] model download failed: {:?}", e);
                return;
            }
        };
        log::debug!("[assets] {} downloaded ({} bytes)", path, bytes.len());
        match load_model(&bytes) {
            Ok(model) => showcase.borrow_mut().attach_model(model),
            Err(e) => showcase.borrow().model_failed(&e),
        }
    });
}

/// Start all three cue downloads. The music button appears once the ambient
/// track has decoded.
pub fn spawn_cue_loads(showcase: SharedShowcase) {
    for cue in Cue::ALL {
        let showcase = showcase.clone();
        spawn_local(async move {
            let (ctx, path) = {
                let s = showcase.borrow();
                let audio_cfg = &s.config().audio;
                let path = match cue {
                    Cue::Ambient => audio_cfg.ambient_path.clone(),
                    Cue::Click => audio_cfg.click_cue_path.clone(),
                    Cue::Hover => audio_cfg.hover_cue_path.clone(),
                };
                (s.audio().context().clone(), path)
            };
            match audio::load_cue_buffer(&ctx, &path).await {
                Ok(buffer) => {
                    {
                        let mut s = showcase.borrow_mut();
                        s.audio_mut().set_buffer(cue, buffer);
                        s.cue_loaded(cue);
                    }
                    if cue == Cue::Ambient {
                        if let Some(document) = dom::window_document() {
                            ui::create_music_button(&document, &showcase);
                        }
                    }
                }
                Err(e) => showcase.borrow().cue_failed(cue, &format!("{:#}", e)),
            }
        });
    }
}
