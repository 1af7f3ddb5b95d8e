//! Keyboard shortcut matching for the theme toggle.

/// A key press, reduced to what shortcut matching needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.key`
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    /// The event originated in a text field or contenteditable element
    pub in_editable: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }
}

/// Single-key shortcut with no modifiers.
///
/// Shift is allowed so caps lock and shifted presses still toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    key: char,
}

impl Shortcut {
    pub fn new(key: char) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
        }
    }

    pub fn matches(&self, press: &KeyPress) -> bool {
        if press.ctrl || press.alt || press.meta || press.in_editable {
            return false;
        }
        let mut chars = press.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_ascii_lowercase() == self.key,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_plain_and_shifted_key() {
        let shortcut = Shortcut::new('t');
        assert!(shortcut.matches(&KeyPress::new("t")));
        assert!(shortcut.matches(&KeyPress::new("T")));
    }

    #[test]
    fn test_configured_uppercase_key() {
        assert!(Shortcut::new('D').matches(&KeyPress::new("d")));
    }

    #[test]
    fn test_rejects_modifiers() {
        let shortcut = Shortcut::new('t');
        for press in [
            KeyPress {
                ctrl: true,
                ..KeyPress::new("t")
            },
            KeyPress {
                alt: true,
                ..KeyPress::new("t")
            },
            KeyPress {
                meta: true,
                ..KeyPress::new("t")
            },
        ] {
            assert!(!shortcut.matches(&press), "{:?}", press);
        }
    }

    #[test]
    fn test_rejects_other_keys_and_editable_targets() {
        let shortcut = Shortcut::new('t');
        assert!(!shortcut.matches(&KeyPress::new("r")));
        assert!(!shortcut.matches(&KeyPress::new("Tab")));
        assert!(!shortcut.matches(&KeyPress::new("")));
        assert!(!shortcut.matches(&KeyPress {
            in_editable: true,
            ..KeyPress::new("t")
        }));
    }
}
