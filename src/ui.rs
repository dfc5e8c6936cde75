//! On-screen chrome: title banner, camera control panel, music button.

use crate::dom;
use crate::SharedShowcase;
use reog_core::{CommandOutcome, UiCommand};
use web_sys as web;

const TITLE: &str = "Reog Ponorogo 3D Interactive Museum";
const TITLE_STYLE: &str = "position:absolute; top:20px; left:50%; transform:translateX(-50%); \
    padding:10px 20px; font-size:22px; color:white; background:rgba(0,0,0,0.6); \
    border-radius:6px; font-family:sans-serif; z-index:1000;";
const PANEL_STYLE: &str = "position:absolute; left:20px; bottom:20px; padding:10px 15px; \
    background:rgba(0,0,0,0.7); color:white; font-family:sans-serif; font-size:13px; \
    border-radius:8px; z-index:1000; max-width:220px;";
const PANEL_HEADING_STYLE: &str = "font-weight:bold; margin-bottom:8px;";
const BUTTON_STYLE: &str = "display:block; width:100%; margin-top:5px; padding:6px 8px; \
    border:none; border-radius:4px; background:#aa0000; color:white; cursor:pointer; \
    font-size:12px;";
const HINT_STYLE: &str = "margin-top:8px; font-size:11px; opacity:0.9;";
const HINT_HTML: &str = "Orbit: drag mouse, wheel to zoom<br>\
    First person: W/A/S/D + arrow keys<br>\
    Click Reog: info + gong<br>\
    Hover: highlight + kendang";
const MUSIC_STYLE: &str = "position:absolute; bottom:20px; right:20px; padding:10px 20px; \
    font-size:14px; background:#aa0000; color:white; border:none; border-radius:6px; \
    cursor:pointer; font-weight:bold; z-index:1000;";

pub fn build_title(document: &web::Document) {
    if let Some(title) = dom::create_element(document, "div", Some("reog-title"), TITLE_STYLE, Some(TITLE)) {
        dom::append_to_body(document, &title);
    }
}

/// Build the camera panel and wire each button to its command.
pub fn build_control_panel(document: &web::Document, showcase: &SharedShowcase) {
    let Some(panel) = dom::create_element(document, "div", Some("control-panel"), PANEL_STYLE, None)
    else {
        log::error!("[mode] could not create the control panel");
        return;
    };
    if let Some(heading) =
        dom::create_element(document, "div", None, PANEL_HEADING_STYLE, Some("Camera Controls"))
    {
        _ = panel.append_child(&heading);
    }
    for command in UiCommand::PANEL {
        if let Some(button) = dom::create_element(
            document,
            "button",
            Some(command.element_id()),
            BUTTON_STYLE,
            Some(command.initial_label()),
        ) {
            _ = panel.append_child(&button);
        }
    }
    if let Some(hint) = dom::create_element(document, "div", Some("control-hint"), HINT_STYLE, None) {
        hint.set_inner_html(HINT_HTML);
        _ = panel.append_child(&hint);
    }
    dom::append_to_body(document, &panel);

    for command in UiCommand::PANEL {
        wire_command_button(document, showcase, command);
    }
}

/// Created once the ambient track has decoded, so it never offers music that
/// cannot play.
pub fn create_music_button(document: &web::Document, showcase: &SharedShowcase) {
    let command = UiCommand::ToggleMusic;
    if document.get_element_by_id(command.element_id()).is_some() {
        return;
    }
    if let Some(button) = dom::create_element(
        document,
        "button",
        Some(command.element_id()),
        MUSIC_STYLE,
        Some(command.initial_label()),
    ) {
        dom::append_to_body(document, &button);
        wire_command_button(document, showcase, command);
    }
}

fn wire_command_button(document: &web::Document, showcase: &SharedShowcase, command: UiCommand) {
    let showcase = showcase.clone();
    dom::add_click_listener(document, command.element_id(), move || {
        let outcome = showcase.borrow_mut().command(command);
        refresh_label(command, &outcome);
    });
}

fn refresh_label(command: UiCommand, outcome: &CommandOutcome) {
    if let (Some(label), Some(document)) = (outcome.label(), dom::window_document()) {
        dom::set_text(&document, command.element_id(), label);
    }
}
