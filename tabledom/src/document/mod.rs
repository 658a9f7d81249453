//! In-memory element tree with a table-aware box model.

use crate::dom::Dom;
use crate::element::{Element, Node, NodeId};
use crate::event::{Dispatch, DomEvent, EventKind, EventQueue, ListenerId, Target};
use crate::layout;
use crate::text::TextMetrics;
use crate::types::Tag;

/// Arena-backed document implementing [`Dom`].
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    events: EventQueue,
    viewport: (f32, f32),
    scrollbar_width: f32,
    text_metrics: TextMetrics,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            events: EventQueue::default(),
            viewport: (1024.0, 768.0),
            scrollbar_width: 15.0,
            text_metrics: TextMetrics::default(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = (width, height);
        self
    }

    pub fn with_scrollbar_width(mut self, width: f32) -> Self {
        self.scrollbar_width = width;
        self
    }

    pub fn with_text_metrics(mut self, metrics: TextMetrics) -> Self {
        self.text_metrics = metrics;
        self
    }

    pub fn text_metrics(&self) -> TextMetrics {
        self.text_metrics
    }

    /// Change the viewport and notify `Resize` listeners.
    pub fn resize_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        self.events
            .emit(Target::Viewport, &DomEvent::Resize { width, height });
    }

    /// Simulate a wheel gesture over `node`.
    ///
    /// Listeners on `node` and its ancestors are notified, then the nearest
    /// ancestor able to scroll vertically is scrolled by `delta_y`.
    pub fn wheel(&mut self, node: NodeId, delta_x: f32, delta_y: f32) {
        if !self.exists(node) {
            return;
        }
        let event = DomEvent::Wheel {
            node,
            delta_x,
            delta_y,
        };

        let mut scroll_target = None;
        let mut current = Some(node);
        while let Some(id) = current {
            self.events.emit(Target::Node(id), &event);
            if scroll_target.is_none() && layout::overflow_y(self, id).scrolls() {
                scroll_target = Some(id);
            }
            current = self.parent(id);
        }

        if let Some(target) = scroll_target {
            let top = self.scroll_top(target);
            self.set_scroll_top(target, top + delta_y);
        }
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    /// Undelivered dispatches, including ones whose listener is gone.
    pub fn pending_events(&self) -> usize {
        self.events.pending_len()
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let Some(text) = &node.text {
            out.push_str(text);
        }
        for child in &node.children {
            self.collect_text(*child, out);
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Slots are never reused, so a `NodeId` can't alias a newer node after
    /// its own is destroyed. The arena grows with every creation, which is
    /// fine for a document that lives as long as one table.
    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    fn instantiate(&mut self, element: Element) -> NodeId {
        let Element {
            tag,
            classes,
            attrs,
            style,
            text,
            children,
        } = element;

        let id = self.alloc(Node {
            classes,
            attrs,
            style,
            text,
            ..Node::new(tag)
        });
        if tag != Tag::Text {
            for child in children {
                let child_id = self.instantiate(child);
                self.link(id, child_id, None);
            }
        }
        id
    }

    fn clone_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        let (copy, children) = {
            let node = self.node(id)?;
            (node.shallow_copy(), node.children.clone())
        };
        let new_id = self.alloc(copy);
        for child in children {
            if let Some(child_copy) = self.clone_subtree(child) {
                self.link(new_id, child_copy, None);
            }
        }
        Some(new_id)
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).and_then(|node| node.parent) else {
            return;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|child| *child != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    /// Attach `child` under `parent` at `index` (end when `None`).
    ///
    /// Refuses text parents, dead handles and moves that would create a cycle.
    fn link(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        let parent_ok = self
            .node(parent)
            .is_some_and(|node| node.tag != Tag::Text);
        if !parent_ok || !self.exists(child) || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(parent_node) = self.node_mut(parent) {
            let at = index
                .unwrap_or(parent_node.children.len())
                .min(parent_node.children.len());
            parent_node.children.insert(at, child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn free(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(id.0).and_then(Option::take) {
            Some(node) => node.children,
            None => return,
        };
        self.events.purge(id);
        for child in children {
            self.free(child);
        }
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(node) = self.node(root) {
            for child in &node.children {
                self.preorder(*child, &mut out);
            }
        }
        out
    }

    fn preorder(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(node) = self.node(id) {
            out.push(id);
            for child in &node.children {
                self.preorder(*child, out);
            }
        }
    }

    fn apply_scroll(&mut self, id: NodeId, left: Option<f32>, top: Option<f32>) {
        let max_left = (layout::scroll_width(self, id) - layout::client_width(self, id)).max(0.0);
        let max_top = (layout::scroll_height(self, id) - layout::client_height(self, id)).max(0.0);

        let Some(node) = self.node_mut(id) else {
            return;
        };
        let mut changed = false;
        if let Some(left) = left {
            let left = left.clamp(0.0, max_left);
            if left != node.scroll_left {
                node.scroll_left = left;
                changed = true;
            }
        }
        if let Some(top) = top {
            let top = top.clamp(0.0, max_top);
            if top != node.scroll_top {
                node.scroll_top = top;
                changed = true;
            }
        }
        if changed {
            self.events
                .emit(Target::Node(id), &DomEvent::Scroll { node: id });
        }
    }
}

impl Dom for Document {
    fn create(&mut self, element: Element) -> NodeId {
        self.instantiate(element)
    }

    fn deep_clone(&mut self, node: NodeId) -> Option<NodeId> {
        self.clone_subtree(node)
    }

    fn destroy(&mut self, node: NodeId) {
        self.detach(node);
        self.free(node);
    }

    fn exists(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn tag(&self, node: NodeId) -> Option<Tag> {
        self.node(node).map(|n| n.tag)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        self.link(parent, child, None);
    }

    fn prepend(&mut self, parent: NodeId, child: NodeId) {
        self.link(parent, child, Some(0));
    }

    fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        if reference == node {
            return;
        }
        let Some(parent) = self.parent(reference) else {
            return;
        };
        // Detach first so the reference index accounts for the move.
        if !self.exists(node) || self.contains(node, parent) {
            return;
        }
        self.detach(node);
        let index = self
            .node(parent)
            .and_then(|p| p.children.iter().position(|child| *child == reference));
        self.link(parent, node, index);
    }

    fn wrap(&mut self, node: NodeId, wrapper: NodeId) {
        if node == wrapper || !self.exists(node) || !self.exists(wrapper) {
            return;
        }
        if self.parent(node).is_some() {
            self.insert_before(node, wrapper);
        }
        self.append(wrapper, node);
    }

    fn unwrap(&mut self, wrapper: NodeId) {
        let children = self.children(wrapper);
        if self.parent(wrapper).is_some() {
            for child in children {
                self.insert_before(wrapper, child);
            }
        } else {
            for child in children {
                self.detach(child);
            }
        }
        self.destroy(wrapper);
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.node(node).map(|_| node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    fn query_tag(&self, root: NodeId, tag: Tag) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.tag(*id) == Some(tag))
            .collect()
    }

    fn find_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        if self.attr(root, "id").as_deref() == Some(id) {
            return Some(root);
        }
        self.descendants(root)
            .into_iter()
            .find(|node| self.attr(*node, "id").as_deref() == Some(id))
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node).and_then(|n| n.attrs.get(name).cloned())
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attrs.remove(name);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.retain(|c| c != class);
        }
    }

    fn style(&self, node: NodeId, prop: &str) -> Option<String> {
        self.node(node).and_then(|n| n.style.get(prop).cloned())
    }

    fn set_style(&mut self, node: NodeId, prop: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.style.insert(prop.to_string(), value.to_string());
        }
    }

    fn remove_style(&mut self, node: NodeId, prop: &str) {
        if let Some(n) = self.node_mut(node) {
            n.style.remove(prop);
        }
    }

    fn computed_px(&self, node: NodeId, prop: &str) -> f32 {
        layout::computed_px(self, node, prop)
    }

    fn offset_width(&self, node: NodeId) -> f32 {
        layout::offset_width(self, node)
    }

    fn offset_height(&self, node: NodeId) -> f32 {
        layout::offset_height(self, node)
    }

    fn client_width(&self, node: NodeId) -> f32 {
        layout::client_width(self, node)
    }

    fn client_height(&self, node: NodeId) -> f32 {
        layout::client_height(self, node)
    }

    fn scroll_width(&self, node: NodeId) -> f32 {
        layout::scroll_width(self, node)
    }

    fn scroll_height(&self, node: NodeId) -> f32 {
        layout::scroll_height(self, node)
    }

    fn offset_within(&self, node: NodeId, ancestor: NodeId) -> Option<(f32, f32)> {
        layout::offset_within(self, node, ancestor)
    }

    fn containing_width(&self, node: NodeId) -> f32 {
        layout::containing_width(self, node)
    }

    fn scroll_top(&self, node: NodeId) -> f32 {
        self.node(node).map(|n| n.scroll_top).unwrap_or(0.0)
    }

    fn scroll_left(&self, node: NodeId) -> f32 {
        self.node(node).map(|n| n.scroll_left).unwrap_or(0.0)
    }

    fn set_scroll_top(&mut self, node: NodeId, value: f32) {
        self.apply_scroll(node, None, Some(value));
    }

    fn set_scroll_left(&mut self, node: NodeId, value: f32) {
        self.apply_scroll(node, Some(value), None);
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        if !self.exists(node) {
            return;
        }
        let width = layout::offset_width(self, node);
        let height = layout::offset_height(self, node);

        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            current = self.parent(ancestor);

            let scroll_x = layout::overflow_x(self, ancestor).scrolls();
            let scroll_y = layout::overflow_y(self, ancestor).scrolls();
            if !scroll_x && !scroll_y {
                continue;
            }
            let Some((x, y)) = layout::offset_within(self, node, ancestor) else {
                continue;
            };
            let border = layout::border(self, ancestor);

            let left = if scroll_x {
                let visible = layout::client_width(self, ancestor);
                let start = x - border.left;
                let current_left = self.scroll_left(ancestor);
                if start < current_left {
                    Some(start)
                } else if start + width > current_left + visible {
                    Some(start + width - visible)
                } else {
                    None
                }
            } else {
                None
            };

            let top = if scroll_y {
                let visible = layout::client_height(self, ancestor);
                let start = y - border.top;
                let current_top = self.scroll_top(ancestor);
                if start < current_top {
                    Some(start)
                } else if start + height > current_top + visible {
                    Some(start + height - visible)
                } else {
                    None
                }
            } else {
                None
            };

            if left.is_some() || top.is_some() {
                self.apply_scroll(ancestor, left, top);
            }
        }
    }

    fn listen(&mut self, target: Target, kind: EventKind) -> ListenerId {
        self.events.listen(target, kind)
    }

    fn unlisten(&mut self, listener: ListenerId) -> bool {
        self.events.unlisten(listener)
    }

    fn poll_event(&mut self) -> Option<Dispatch> {
        self.events.poll()
    }

    fn scrollbar_width(&self) -> f32 {
        self.scrollbar_width
    }

    fn viewport_size(&self) -> (f32, f32) {
        self.viewport
    }
}
