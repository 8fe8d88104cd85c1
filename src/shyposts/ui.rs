//! Edit-screen surface: the checkbox + nonce field rendered into the post
//! editor's sidebar box. Rendering produces the HTML fragment the host
//! embeds; nothing here prints or touches storage.

use crate::flag::FLAG_ON;

/// Form name of the checkbox input.
pub const FIELD_NAME: &str = "shyposts_hide_field";

/// Form name of the anti-forgery token input.
pub const NONCE_FIELD_NAME: &str = "shyposts_nonce";

pub const LABEL: &str = "Hide on the homepage?";
pub const TOOLTIP: &str = "Removes this post from the homepage, but NOT from any other page";

/// The shy checkbox, reflecting the post's current flag state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub name: String,
    pub value: String,
    pub checked: bool,
    pub label: String,
    pub tooltip: String,
}

impl Checkbox {
    pub fn render(&self) -> String {
        let checked = if self.checked { " checked" } else { "" };
        format!(
            "<input type=\"checkbox\" id=\"{name}\" name=\"{name}\" value=\"{value}\"{checked} \
             title=\"{tooltip}\"> <label for=\"{name}\" title=\"{tooltip}\">{label}</label>",
            name = self.name,
            value = self.value,
            checked = checked,
            tooltip = self.tooltip,
            label = self.label,
        )
    }
}

/// Hidden input carrying the single-use save token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonceField {
    pub name: String,
    pub token: String,
}

impl NonceField {
    pub fn render(&self) -> String {
        format!(
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            self.name, self.token
        )
    }
}

/// The whole sidebar box: nonce field first, then the checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaBox {
    pub nonce: NonceField,
    pub checkbox: Checkbox,
}

impl MetaBox {
    pub fn new(token: String, flag_value: Option<&str>) -> Self {
        Self {
            nonce: NonceField {
                name: NONCE_FIELD_NAME.to_string(),
                token,
            },
            checkbox: Checkbox {
                name: FIELD_NAME.to_string(),
                value: FLAG_ON.to_string(),
                checked: flag_value == Some(FLAG_ON),
                label: LABEL.to_string(),
                tooltip: TOOLTIP.to_string(),
            },
        }
    }

    pub fn render(&self) -> String {
        format!("{}\n{}", self.nonce.render(), self.checkbox.render())
    }
}

/// Sanitize a raw form value the way the host sanitizes text fields:
/// strip tags and control characters, collapse runs of whitespace, trim.
pub fn sanitize_field(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for ch in raw.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if in_tag || c.is_control() => {}
            c => out.push(c),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
