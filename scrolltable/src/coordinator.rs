//! Position coupling between the scrolling body and the virtual scrollbar.
//!
//! Setting either element's scroll position raises a scroll event on it, so
//! mirroring one into the other would echo forever. Every mirror installs a
//! [`ScrollLock`] tagged with the side that moved; until it expires, events
//! coming from the other side are treated as echoes and ignored.

use std::time::{Duration, Instant};

use log::{debug, trace};
use tabledom::{px, Dispatch, Dom, DomEvent, EventKind, ListenerId, NodeId, Target};

use crate::classes;

/// Which surface moved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    /// The real scrolling body.
    Native,
    /// The virtual scrollbar.
    Virtual,
}

/// Short-lived reentrancy guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollLock {
    pub source: ScrollSource,
    pub expires_at: Instant,
}

impl ScrollLock {
    pub fn is_held(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    scroller: NodeId,
    scrollbar: NodeId,
    header: Option<NodeId>,
    scroller_listener: ListenerId,
    scrollbar_listener: ListenerId,
    wheel_listener: Option<ListenerId>,
}

#[derive(Debug)]
pub struct ScrollCoordinator {
    timeout: Duration,
    binding: Option<Binding>,
    lock: Option<ScrollLock>,
}

impl ScrollCoordinator {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            binding: None,
            lock: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// The current lock, if it has not expired.
    pub fn lock(&self, now: Instant) -> Option<ScrollLock> {
        self.lock.filter(|lock| lock.is_held(now))
    }

    /// Subscribe to the body, the scrollbar and the fixed header.
    ///
    /// Binding the same nodes again is a no-op; binding different nodes
    /// releases the previous subscriptions first.
    pub fn bind<D: Dom>(
        &mut self,
        dom: &mut D,
        scroller: NodeId,
        scrollbar: NodeId,
        header: Option<NodeId>,
    ) {
        if let Some(binding) = &self.binding {
            if binding.scroller == scroller
                && binding.scrollbar == scrollbar
                && binding.header == header
            {
                return;
            }
            self.unbind(dom);
        }

        let scroller_listener = dom.listen(Target::Node(scroller), EventKind::Scroll);
        let scrollbar_listener = dom.listen(Target::Node(scrollbar), EventKind::Scroll);
        let wheel_listener = header.map(|node| dom.listen(Target::Node(node), EventKind::Wheel));

        debug!("bound scrollbar {scrollbar} to scroller {scroller}");
        self.binding = Some(Binding {
            scroller,
            scrollbar,
            header,
            scroller_listener,
            scrollbar_listener,
            wheel_listener,
        });
    }

    /// Release every subscription and cancel the lock.
    pub fn unbind<D: Dom>(&mut self, dom: &mut D) {
        self.lock = None;
        let Some(binding) = self.binding.take() else {
            return;
        };
        dom.unlisten(binding.scroller_listener);
        dom.unlisten(binding.scrollbar_listener);
        if let Some(listener) = binding.wheel_listener {
            dom.unlisten(listener);
        }
        debug!("unbound scrollbar {}", binding.scrollbar);
    }

    /// Drop the lock once it has expired.
    pub fn expire(&mut self, now: Instant) {
        if self.lock.is_some_and(|lock| !lock.is_held(now)) {
            trace!("scroll lock expired");
            self.lock = None;
        }
    }

    /// Route a dispatch. Returns `false` when it is not one of ours.
    pub fn handle<D: Dom>(&mut self, dom: &mut D, dispatch: &Dispatch, now: Instant) -> bool {
        let Some(binding) = self.binding else {
            return false;
        };

        if dispatch.listener == binding.scroller_listener {
            self.on_native_scroll(dom, binding, now);
        } else if dispatch.listener == binding.scrollbar_listener {
            self.on_virtual_scroll(dom, binding, now);
        } else if Some(dispatch.listener) == binding.wheel_listener {
            if let DomEvent::Wheel { delta_y, .. } = dispatch.event {
                self.on_header_wheel(dom, binding, delta_y, now);
            }
        } else {
            return false;
        }
        true
    }

    fn on_native_scroll<D: Dom>(&mut self, dom: &mut D, binding: Binding, now: Instant) {
        if self.lock(now).is_some_and(|lock| lock.source == ScrollSource::Virtual) {
            trace!("ignoring body scroll echo");
            return;
        }
        self.install_lock(ScrollSource::Native, now);
        let top = dom.scroll_top(binding.scroller);
        dom.set_scroll_top(binding.scrollbar, top);
    }

    fn on_virtual_scroll<D: Dom>(&mut self, dom: &mut D, binding: Binding, now: Instant) {
        if self.lock(now).is_some_and(|lock| lock.source == ScrollSource::Native) {
            trace!("ignoring scrollbar scroll echo");
            return;
        }
        self.install_lock(ScrollSource::Virtual, now);
        let top = dom.scroll_top(binding.scrollbar);
        dom.set_scroll_top(binding.scroller, top);
    }

    /// A wheel over the fixed header moves the body directly, so it counts as
    /// a native scroll even while a virtual lock is held.
    fn on_header_wheel<D: Dom>(&mut self, dom: &mut D, binding: Binding, delta_y: f32, now: Instant) {
        self.install_lock(ScrollSource::Native, now);
        let top = dom.scroll_top(binding.scroller);
        dom.set_scroll_top(binding.scroller, top + delta_y);
        let top = dom.scroll_top(binding.scroller);
        dom.set_scroll_top(binding.scrollbar, top);
    }

    fn install_lock(&mut self, source: ScrollSource, now: Instant) {
        trace!("scroll lock -> {source:?}");
        self.lock = Some(ScrollLock {
            source,
            expires_at: now + self.timeout,
        });
    }

    /// Size the scrollbar after a layout pass and bring it to the body's position.
    ///
    /// The track starts one header height below the top of the body, where
    /// the rows begin, and runs to its bottom. The inner content is as tall as
    /// everything the body can scroll.
    pub fn refresh<D: Dom>(&mut self, dom: &mut D, now: Instant) {
        let Some(binding) = self.binding else {
            return;
        };
        let header_height = binding
            .header
            .map(|header| dom.offset_height(header))
            .unwrap_or(0.0);
        let track = (dom.client_height(binding.scroller) - header_height).max(0.0);
        let content = dom.scroll_height(binding.scroller);
        let body_top = dom
            .parent(binding.scrollbar)
            .and_then(|parent| dom.offset_within(binding.scroller, parent))
            .map_or(0.0, |(_, y)| y);

        dom.set_style(binding.scrollbar, "top", &px(body_top + header_height));
        dom.set_style(binding.scrollbar, "height", &px(track));
        for inner in dom.query_class(binding.scrollbar, classes::SCROLLBAR_CONTENT) {
            dom.set_style(inner, "height", &px(content));
        }

        let top = dom.scroll_top(binding.scroller);
        if dom.scroll_top(binding.scrollbar) != top {
            self.install_lock(ScrollSource::Native, now);
            dom.set_scroll_top(binding.scrollbar, top);
        }
    }
}
