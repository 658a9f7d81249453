use std::fmt;

/// Element kinds understood by the layout model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    Table,
    Caption,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
    /// Text run. Carries its string and measures it, never has children.
    Text,
}

impl Tag {
    pub const fn name(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Table => "table",
            Tag::Caption => "caption",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
            Tag::Text => "#text",
        }
    }

    pub const fn is_cell(&self) -> bool {
        matches!(self, Tag::Th | Tag::Td)
    }

    pub const fn is_row_group(&self) -> bool {
        matches!(self, Tag::Thead | Tag::Tbody)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
}

impl Overflow {
    /// Parse a CSS overflow keyword. Unknown keywords fall back to `Visible`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hidden" => Overflow::Hidden,
            "scroll" => Overflow::Scroll,
            "auto" => Overflow::Auto,
            _ => Overflow::Visible,
        }
    }

    /// Whether the axis can be scrolled programmatically or by the user.
    pub const fn scrolls(&self) -> bool {
        matches!(self, Overflow::Scroll | Overflow::Auto)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
}

impl Position {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "relative" => Position::Relative,
            "absolute" => Position::Absolute,
            _ => Position::Static,
        }
    }
}
