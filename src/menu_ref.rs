/// One placement of a command in the menu tree: the path of its containing
/// submenus plus its display label with shortcut indicators stripped.
///
/// Two `MenuRef`s are equal iff both `path` and normalized `text` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MenuRef {
    path: String,
    text: String,
}

impl MenuRef {
    /// `text` is normalized once here so equality checks never re-normalize.
    #[must_use]
    pub fn new(path: impl Into<String>, text: &str) -> Self {
        Self {
            path: path.into(),
            text: normalize(text),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Strips every shortcut-indicator character (`&`) from a display label.
/// Idempotent; no other character is altered.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars().filter(|c| *c != '&').collect()
}
