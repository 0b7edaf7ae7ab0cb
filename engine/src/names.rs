//! Name list input
//!
//! Hosts collect names as free text, one per line. `NameList` keeps that text
//! and the parsed list side by side so a winner can be struck off without
//! touching what the user typed.

/// Split free text into names: one per line, blank lines dropped, each trimmed
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameList {
    text: String,
    names: Vec<String>,
}

impl NameList {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            names: parse_names(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Re-parse the list from edited text. Returns true if the names changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        self.text = text.to_string();
        let names = parse_names(text);
        if names == self.names {
            return false;
        }
        self.names = names;
        true
    }

    /// Remove the first occurrence of `name`. Returns true if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(pos) => {
                self.names.remove(pos);
                true
            }
            None => false,
        }
    }
}
