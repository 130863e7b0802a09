use crate::constants::{CONFIRM_PASSWORD_FIELD_ID, PASSWORD_FIELD_ID, TYPING_ATTR};
use crate::core::interaction::InteractionFlags;
use crate::input::{field_state, flags_from_fields, FieldState};
use wasm_bindgen::JsCast;
use web_sys as web;

fn read_field(document: &web::Document, id: &str) -> Option<FieldState> {
    let input = document
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlInputElement>()
        .ok()?;
    Some(field_state(&input.value(), &input.type_()))
}

fn focused_is_typing_target(document: &web::Document) -> bool {
    document
        .active_element()
        .map(|el| el.has_attribute(TYPING_ATTR))
        .unwrap_or(false)
}

/// Poll the host form for the current interaction flags.
pub fn read_form_flags(document: &web::Document) -> InteractionFlags {
    flags_from_fields(
        focused_is_typing_target(document),
        read_field(document, PASSWORD_FIELD_ID),
        read_field(document, CONFIRM_PASSWORD_FIELD_ID),
    )
}
