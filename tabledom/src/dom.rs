use crate::element::{Element, NodeId};
use crate::event::{Dispatch, EventKind, ListenerId, Target};
use crate::types::Tag;

/// Element tree, style and box-metrics services a host provides.
///
/// Every operation taking a [`NodeId`] tolerates handles of destroyed nodes:
/// mutations become no-ops and queries return empty or zero values.
///
/// Metrics are always computed from the current tree, so they reflect every
/// structural change made before the call.
pub trait Dom {
    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Instantiate detached markup and return the handle of its root.
    fn create(&mut self, element: Element) -> NodeId;

    /// Detached deep copy of `node`, including attributes and inline styles.
    fn deep_clone(&mut self, node: NodeId) -> Option<NodeId>;

    /// Detach `node` and free it together with its descendants and listeners.
    fn destroy(&mut self, node: NodeId);

    fn exists(&self, node: NodeId) -> bool;

    fn tag(&self, node: NodeId) -> Option<Tag>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Move `child` to the end of `parent`'s children.
    fn append(&mut self, parent: NodeId, child: NodeId);

    /// Move `child` to the front of `parent`'s children.
    fn prepend(&mut self, parent: NodeId, child: NodeId);

    /// Move `node` immediately before `reference`.
    fn insert_before(&mut self, reference: NodeId, node: NodeId);

    /// Put `wrapper` where `node` is and move `node` into it.
    fn wrap(&mut self, node: NodeId, wrapper: NodeId);

    /// Replace `wrapper` with its children and destroy it.
    fn unwrap(&mut self, wrapper: NodeId);

    /// Detach `node` from its parent without freeing it.
    fn remove(&mut self, node: NodeId);

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Descendants of `root` carrying `class`, in document order.
    fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId>;

    /// Descendants of `root` with the given tag, in document order.
    fn query_tag(&self, root: NodeId, tag: Tag) -> Vec<NodeId>;

    /// `root` or the first descendant whose `id` attribute equals `id`.
    fn find_by_id(&self, root: NodeId, id: &str) -> Option<NodeId>;

    /// Concatenated text of every text run under `node`.
    fn text_content(&self, node: NodeId) -> String;

    // -------------------------------------------------------------------------
    // Attributes and classes
    // -------------------------------------------------------------------------

    fn attr(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);

    fn remove_attr(&mut self, node: NodeId, name: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    // -------------------------------------------------------------------------
    // Style
    // -------------------------------------------------------------------------

    /// Inline style value as set.
    fn style(&self, node: NodeId, prop: &str) -> Option<String>;

    fn set_style(&mut self, node: NodeId, prop: &str, value: &str);

    fn remove_style(&mut self, node: NodeId, prop: &str);

    /// Resolved pixel value of a box property (`padding-left`,
    /// `border-top-width`, `width`, ...).
    fn computed_px(&self, node: NodeId, prop: &str) -> f32;

    // -------------------------------------------------------------------------
    // Metrics
    // -------------------------------------------------------------------------

    fn offset_width(&self, node: NodeId) -> f32;

    fn offset_height(&self, node: NodeId) -> f32;

    /// Inner width excluding borders and a vertical scrollbar.
    fn client_width(&self, node: NodeId) -> f32;

    /// Inner height excluding borders and a horizontal scrollbar.
    fn client_height(&self, node: NodeId) -> f32;

    fn scroll_width(&self, node: NodeId) -> f32;

    fn scroll_height(&self, node: NodeId) -> f32;

    /// Position of `node`'s border box relative to `ancestor`'s border box.
    fn offset_within(&self, node: NodeId, ancestor: NodeId) -> Option<(f32, f32)>;

    /// Available content width for `node` from its containing block.
    fn containing_width(&self, node: NodeId) -> f32;

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    fn scroll_top(&self, node: NodeId) -> f32;

    fn scroll_left(&self, node: NodeId) -> f32;

    /// Clamp and apply. Raises a `Scroll` event when the position changed.
    fn set_scroll_top(&mut self, node: NodeId, value: f32);

    /// Clamp and apply. Raises a `Scroll` event when the position changed.
    fn set_scroll_left(&mut self, node: NodeId, value: f32);

    /// Scroll every scrollable ancestor so `node` becomes visible.
    fn scroll_into_view(&mut self, node: NodeId);

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    fn listen(&mut self, target: Target, kind: EventKind) -> ListenerId;

    /// Returns `false` when the listener was already gone.
    fn unlisten(&mut self, listener: ListenerId) -> bool;

    fn poll_event(&mut self) -> Option<Dispatch>;

    // -------------------------------------------------------------------------
    // Platform
    // -------------------------------------------------------------------------

    /// Width of a native scrollbar in pixels.
    fn scrollbar_width(&self) -> f32;

    fn viewport_size(&self) -> (f32, f32);
}
