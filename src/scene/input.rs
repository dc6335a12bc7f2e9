/// Kind of element holding keyboard focus when a key arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Body,
    Input,
    TextArea,
    Select,
    Button,
    Other,
}

impl Focus {
    /// Elements that consume Space themselves.
    pub fn captures_space(self) -> bool {
        matches!(self, Self::Input | Self::TextArea | Self::Select | Self::Button)
    }

    /// Map an element tag name, ignoring case.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "body" | "" => Self::Body,
            "input" => Self::Input,
            "textarea" => Self::TextArea,
            "select" => Self::Select,
            "button" => Self::Button,
            _ => Self::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Toggle playback and suppress the key's default action.
    TogglePlayback,
    Ignored,
}

pub fn handle_key(code: &str, focus: Focus) -> KeyOutcome {
    if code != "Space" || focus.captures_space() {
        return KeyOutcome::Ignored;
    }
    KeyOutcome::TogglePlayback
}
