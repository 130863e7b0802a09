use super::core::interaction::InteractionFlags;

/// Length and reveal state of one password input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldState {
    pub len: usize,
    pub shown: bool,
}

/// A password input reveals its value when its `type` is switched to `text`.
#[inline]
pub fn field_state(value: &str, input_type: &str) -> FieldState {
    FieldState {
        len: value.chars().count(),
        shown: input_type.eq_ignore_ascii_case("text"),
    }
}

/// Missing fields count as empty and hidden.
pub fn flags_from_fields(
    is_typing: bool,
    password: Option<FieldState>,
    confirm: Option<FieldState>,
) -> InteractionFlags {
    let password = password.unwrap_or_default();
    let confirm = confirm.unwrap_or_default();
    InteractionFlags {
        is_typing,
        password_len: password.len,
        show_password: password.shown,
        confirm_password_len: confirm.len,
        show_confirm_password: confirm.shown,
    }
}

/// Host-supplied lengths arrive as JS numbers; negative values mean empty.
#[inline]
pub fn length_from_js(len: i32) -> usize {
    len.max(0) as usize
}
