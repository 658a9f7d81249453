use std::collections::BTreeMap;

use crate::types::Tag;

/// Detached markup description, instantiated with [`Dom::create`](crate::Dom::create).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn table() -> Self {
        Self::new(Tag::Table)
    }

    pub fn caption(text: impl Into<String>) -> Self {
        Self::new(Tag::Caption).child(Self::text(text))
    }

    pub fn thead() -> Self {
        Self::new(Tag::Thead)
    }

    pub fn tbody() -> Self {
        Self::new(Tag::Tbody)
    }

    pub fn tr() -> Self {
        Self::new(Tag::Tr)
    }

    /// Header cell containing a single text run.
    pub fn th(text: impl Into<String>) -> Self {
        Self::new(Tag::Th).child(Self::text(text))
    }

    /// Data cell containing a single text run.
    pub fn td(text: impl Into<String>) -> Self {
        Self::new(Tag::Td).child(Self::text(text))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(Tag::Text)
        }
    }

    // Identity
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn style(mut self, prop: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(prop.into(), value.into());
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}
