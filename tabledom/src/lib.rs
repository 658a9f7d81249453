pub mod document;
pub mod dom;
pub mod element;
pub mod event;
pub mod layout;
pub mod text;
pub mod types;

pub use document::Document;
pub use dom::Dom;
pub use element::{Element, NodeId};
pub use event::{Dispatch, DomEvent, EventKind, ListenerId, Target};
pub use text::TextMetrics;
pub use types::*;
