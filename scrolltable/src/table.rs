//! The public component: attributes, lifecycle and change handling.

use std::time::Instant;

use log::{debug, info};
use tabledom::{Dispatch, Dom, NodeId};

use crate::classes;
use crate::clock::{Clock, SystemClock};
use crate::columns;
use crate::config::{parse_length, ScrollSetting, ScrollTunables, TableAttrs};
use crate::coordinator::ScrollCoordinator;
use crate::error::ConfigError;
use crate::mode::{self, ScrollAxes};
use crate::scroll_to::{self, ScrollTarget};
use crate::structure::{LayoutState, Structure, StructureManager, TableNodes};

/// Row set mutations reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataChange {
    Add,
    Remove,
    Reset,
    Update,
}

/// Anything that can invalidate the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Scrollable,
    Width,
    Height,
    Caption,
    /// The column set changed and the live header was re-rendered.
    Columns,
    Data(DataChange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Initialized,
    Rendered,
    TornDown,
}

/// Scrolling behaviour for one host table.
///
/// The host renders the table, calls [`initialize`](Self::initialize) and
/// [`after_render`](Self::after_render), then feeds every polled
/// [`Dispatch`] to [`handle_event`](Self::handle_event) and calls
/// [`tick`](Self::tick) regularly so timers fire.
#[derive(Debug)]
pub struct ScrollableTable<C: Clock = SystemClock> {
    attrs: TableAttrs,
    tunables: ScrollTunables,
    clock: C,
    nodes: Option<TableNodes>,
    lifecycle: Lifecycle,
    axes: ScrollAxes,
    structure: StructureManager,
    coordinator: ScrollCoordinator,
    pending_resize: Option<Instant>,
}

impl ScrollableTable<SystemClock> {
    pub fn new(attrs: TableAttrs) -> Self {
        Self::with_clock(attrs, SystemClock)
    }
}

impl<C: Clock> ScrollableTable<C> {
    pub fn with_clock(attrs: TableAttrs, clock: C) -> Self {
        let tunables = ScrollTunables::default();
        Self {
            attrs,
            tunables,
            clock,
            nodes: None,
            lifecycle: Lifecycle::Created,
            axes: ScrollAxes::NONE,
            structure: StructureManager::new(),
            coordinator: ScrollCoordinator::new(tunables.lock_timeout),
            pending_resize: None,
        }
    }

    pub fn tunables(mut self, tunables: ScrollTunables) -> Self {
        self.tunables = tunables;
        self.coordinator = ScrollCoordinator::new(tunables.lock_timeout);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn attrs(&self) -> &TableAttrs {
        &self.attrs
    }

    /// Axes resolved by the most recent pass.
    pub fn axes(&self) -> ScrollAxes {
        self.axes
    }

    pub fn layout_state(&self) -> LayoutState {
        self.structure.state()
    }

    pub fn structure(&self) -> &Structure {
        self.structure.parts()
    }

    pub fn coordinator(&self) -> &ScrollCoordinator {
        &self.coordinator
    }

    /// When the debounced resize recompute will run.
    pub fn pending_resize(&self) -> Option<Instant> {
        self.pending_resize
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Attach to the host nodes. A caption already present in the markup is
    /// adopted when no caption attribute was given.
    pub fn initialize<D: Dom>(&mut self, dom: &D, nodes: TableNodes) {
        if self.attrs.caption.is_none() {
            if let Some(caption) = self.structure.caption(dom, nodes) {
                self.attrs.caption = Some(dom.text_content(caption));
            }
        }
        self.nodes = Some(nodes);
        self.lifecycle = Lifecycle::Initialized;
        debug!("initialized on table {}", nodes.table);
    }

    /// First layout pass, once the host has rendered the table.
    pub fn after_render<D: Dom>(&mut self, dom: &mut D) {
        if self.lifecycle != Lifecycle::Initialized {
            return;
        }
        self.lifecycle = Lifecycle::Rendered;
        self.sync_ui(dom);
    }

    /// Drop every subscription and timer. Nothing fires afterwards.
    pub fn teardown<D: Dom>(&mut self, dom: &mut D) {
        self.coordinator.unbind(dom);
        self.structure.release(dom);
        self.pending_resize = None;
        self.lifecycle = Lifecycle::TornDown;
        info!("scrollable table torn down");
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    /// Set `scrollable` from its string form.
    pub fn set_scrollable<D: Dom>(&mut self, dom: &mut D, value: &str) -> Result<(), ConfigError> {
        let setting: ScrollSetting = value.parse()?;
        self.set_scroll_setting(dom, setting);
        Ok(())
    }

    pub fn set_scroll_setting<D: Dom>(&mut self, dom: &mut D, setting: impl Into<ScrollSetting>) {
        self.attrs.scrollable = setting.into();
        self.notify(dom, Change::Scrollable);
    }

    /// `None` clears the width.
    pub fn set_width<D: Dom>(&mut self, dom: &mut D, value: Option<&str>) -> Result<(), ConfigError> {
        self.attrs.width = value.map(|v| parse_length("width", v)).transpose()?;
        self.notify(dom, Change::Width);
        Ok(())
    }

    /// `None` clears the height.
    pub fn set_height<D: Dom>(&mut self, dom: &mut D, value: Option<&str>) -> Result<(), ConfigError> {
        self.attrs.height = value.map(|v| parse_length("height", v)).transpose()?;
        self.notify(dom, Change::Height);
        Ok(())
    }

    pub fn set_caption<D: Dom>(&mut self, dom: &mut D, caption: Option<&str>) {
        self.attrs.caption = caption.map(str::to_string);
        self.notify(dom, Change::Caption);
    }

    // -------------------------------------------------------------------------
    // Triggers
    // -------------------------------------------------------------------------

    /// React to a change. Outside the rendered lifecycle the change is only
    /// remembered for the next pass.
    pub fn notify<D: Dom>(&mut self, dom: &mut D, change: Change) {
        debug!("change: {change:?}");
        if change == Change::Columns {
            self.structure.mark_header_stale();
        }
        if self.lifecycle == Lifecycle::Rendered {
            self.sync_ui(dom);
        }
    }

    /// Route a polled dispatch. Returns `false` when it is not ours.
    pub fn handle_event<D: Dom>(&mut self, dom: &mut D, dispatch: &Dispatch) -> bool {
        if self.lifecycle != Lifecycle::Rendered {
            return false;
        }
        let now = self.clock.now();
        if Some(dispatch.listener) == self.structure.resize_listener() {
            self.pending_resize = Some(now + self.tunables.resize_debounce);
            return true;
        }
        self.coordinator.handle(dom, dispatch, now)
    }

    /// Fire due timers: lock expiry and the debounced resize recompute.
    pub fn tick<D: Dom>(&mut self, dom: &mut D) {
        let now = self.clock.now();
        self.coordinator.expire(now);
        if self.pending_resize.is_some_and(|due| now >= due) {
            self.pending_resize = None;
            if self.lifecycle == Lifecycle::Rendered {
                debug!("viewport settled, recomputing layout");
                self.sync_ui(dom);
            }
        }
    }

    /// Bring `target` into view. Returns whether anything was scrolled to.
    pub fn scroll_to<D: Dom>(&mut self, dom: &mut D, target: &ScrollTarget) -> bool {
        if self.lifecycle != Lifecycle::Rendered || !self.axes.any() {
            return false;
        }
        let Some(nodes) = self.nodes else {
            return false;
        };
        match scroll_to::resolve(dom, nodes, self.structure.parts(), target) {
            Some(node) => {
                dom.scroll_into_view(node);
                true
            }
            None => {
                debug!("scroll target {target:?} not found");
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Pass
    // -------------------------------------------------------------------------

    fn sync_ui<D: Dom>(&mut self, dom: &mut D) {
        let Some(nodes) = self.nodes else {
            return;
        };

        let axes = mode::resolve_attrs(&self.attrs);
        if axes != self.axes {
            info!("scroll axes x={} y={}", axes.x, axes.y);
        }
        self.axes = axes;
        toggle_class(dom, nodes.container, classes::SCROLLABLE_X, axes.x);
        toggle_class(dom, nodes.container, classes::SCROLLABLE_Y, axes.y);

        if !axes.y {
            self.coordinator.unbind(dom);
        }
        self.structure.synchronize(dom, nodes, &self.attrs, axes);
        if self.structure.resize_listener().is_none() {
            self.pending_resize = None;
        }

        let parts = *self.structure.parts();
        if let (Some(fixed_header), Some(live_thead)) =
            (parts.fixed_header, columns::live_header(dom, nodes.table))
        {
            columns::align_column_widths(dom, live_thead, fixed_header);
        }

        match (parts.y_scroller, parts.scrollbar) {
            (Some(scroller), Some(scrollbar)) => {
                self.coordinator
                    .bind(dom, scroller, scrollbar, parts.fixed_header);
                self.coordinator.refresh(dom, self.clock.now());
            }
            _ => self.coordinator.unbind(dom),
        }
    }
}

fn toggle_class<D: Dom>(dom: &mut D, node: NodeId, class: &str, on: bool) {
    if on {
        dom.add_class(node, class);
    } else {
        dom.remove_class(node, class);
    }
}
