//! Split-layout structure: wrappers, fixed header, virtual scrollbar and
//! caption placement.
//!
//! The manager is the only owner of the generated nodes. Every pass tears
//! down what the requested axes no longer need before building what is
//! missing, so running it twice with the same inputs is a no-op.

use log::debug;
use tabledom::{px, Dom, Element, EventKind, Length, ListenerId, NodeId, Tag, Target};

use crate::classes;
use crate::columns;
use crate::config::TableAttrs;
use crate::mode::ScrollAxes;

/// Host nodes the engine operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableNodes {
    /// Bounding box of the whole component.
    pub container: NodeId,
    /// The live table holding header and body rows.
    pub table: NodeId,
}

/// Which split is currently built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    Unsplit,
    SplitX,
    SplitY,
    SplitXY,
}

/// Handles of the generated nodes. `None` means not built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Structure {
    pub caption_table: Option<NodeId>,
    pub x_scroller: Option<NodeId>,
    pub y_scroller: Option<NodeId>,
    pub fixed_header: Option<NodeId>,
    pub scrollbar: Option<NodeId>,
}

impl Structure {
    pub fn state(&self) -> LayoutState {
        match (self.x_scroller.is_some(), self.y_scroller.is_some()) {
            (false, false) => LayoutState::Unsplit,
            (true, false) => LayoutState::SplitX,
            (false, true) => LayoutState::SplitY,
            (true, true) => LayoutState::SplitXY,
        }
    }
}

#[derive(Debug, Default)]
pub struct StructureManager {
    parts: Structure,
    header_stale: bool,
    resize_listener: Option<ListenerId>,
}

impl StructureManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parts(&self) -> &Structure {
        &self.parts
    }

    pub fn state(&self) -> LayoutState {
        self.parts.state()
    }

    /// The viewport listener registered for percentage widths.
    pub fn resize_listener(&self) -> Option<ListenerId> {
        self.resize_listener
    }

    /// Force a fresh header clone on the next pass.
    pub fn mark_header_stale(&mut self) {
        self.header_stale = true;
    }

    /// The caption node, wherever it currently lives.
    pub fn caption<D: Dom>(&self, dom: &D, nodes: TableNodes) -> Option<NodeId> {
        let owners = [Some(nodes.table), self.parts.caption_table];
        owners.into_iter().flatten().find_map(|owner| {
            dom.children(owner)
                .into_iter()
                .find(|child| dom.tag(*child) == Some(Tag::Caption))
        })
    }

    /// Bring the tree in line with `axes` and the current attributes.
    pub fn synchronize<D: Dom>(
        &mut self,
        dom: &mut D,
        nodes: TableNodes,
        attrs: &TableAttrs,
        axes: ScrollAxes,
    ) {
        if !axes.y {
            self.disable_y(dom);
        }
        if !axes.x {
            self.disable_x(dom);
        }

        self.sync_caption(dom, nodes, attrs, axes.any());

        if axes.y {
            self.enable_y(dom, nodes);
        }
        if axes.x {
            self.enable_x(dom, nodes);
        }

        self.apply_widths(dom, nodes, attrs, axes);
        if axes.y {
            self.apply_height(dom, nodes, attrs);
        }
        self.sync_resize_listener(dom, attrs, axes);
    }

    /// Drop the viewport listener. The generated nodes stay in place.
    pub fn release<D: Dom>(&mut self, dom: &mut D) {
        if let Some(listener) = self.resize_listener.take() {
            dom.unlisten(listener);
        }
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    fn disable_y<D: Dom>(&mut self, dom: &mut D) {
        if let Some(scrollbar) = self.parts.scrollbar.take() {
            dom.destroy(scrollbar);
        }
        if let Some(header) = self.parts.fixed_header.take() {
            dom.destroy(header);
        }
        if let Some(scroller) = self.parts.y_scroller.take() {
            dom.unwrap(scroller);
            debug!("removed y scroller {scroller}");
        }
    }

    fn disable_x<D: Dom>(&mut self, dom: &mut D) {
        if let Some(scroller) = self.parts.x_scroller.take() {
            dom.unwrap(scroller);
            debug!("removed x scroller {scroller}");
        }
    }

    // -------------------------------------------------------------------------
    // Caption
    // -------------------------------------------------------------------------

    fn sync_caption<D: Dom>(
        &mut self,
        dom: &mut D,
        nodes: TableNodes,
        attrs: &TableAttrs,
        split: bool,
    ) {
        let existing = self.caption(dom, nodes);
        let caption = match (&attrs.caption, existing) {
            (None, None) => None,
            (None, Some(node)) => {
                dom.destroy(node);
                None
            }
            (Some(text), Some(node)) => {
                if dom.text_content(node) != *text {
                    for child in dom.children(node) {
                        dom.destroy(child);
                    }
                    let run = dom.create(Element::text(text.as_str()));
                    dom.append(node, run);
                }
                Some(node)
            }
            (Some(text), None) => {
                let node = dom.create(Element::caption(text.as_str()));
                dom.prepend(nodes.table, node);
                Some(node)
            }
        };

        match caption {
            Some(caption) if split => {
                let holder = match self.parts.caption_table {
                    Some(holder) => holder,
                    None => {
                        let holder = dom.create(Element::table().class(classes::CAPTION_TABLE));
                        dom.prepend(nodes.container, holder);
                        self.parts.caption_table = Some(holder);
                        debug!("created caption table {holder}");
                        holder
                    }
                };
                if dom.parent(caption) != Some(holder) {
                    dom.append(holder, caption);
                }
                let id = caption_id(dom, nodes.table, caption);
                dom.set_attr(nodes.table, "aria-describedby", &id);
            }
            _ => {
                if let Some(caption) = caption {
                    if dom.parent(caption) != Some(nodes.table) {
                        dom.prepend(nodes.table, caption);
                    }
                }
                dom.remove_attr(nodes.table, "aria-describedby");
                if let Some(holder) = self.parts.caption_table.take() {
                    dom.destroy(holder);
                    debug!("removed caption table {holder}");
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Build
    // -------------------------------------------------------------------------

    fn enable_y<D: Dom>(&mut self, dom: &mut D, nodes: TableNodes) {
        let scroller = match self.parts.y_scroller {
            Some(scroller) => scroller,
            None => {
                let scroller = dom.create(
                    Element::div()
                        .class(classes::Y_SCROLLER)
                        .style("overflow-y", "auto")
                        .style("overflow-x", "hidden"),
                );
                dom.wrap(nodes.table, scroller);
                self.parts.y_scroller = Some(scroller);
                debug!("created y scroller {scroller}");
                scroller
            }
        };

        let Some(live_thead) = columns::live_header(dom, nodes.table) else {
            // Headerless: the native scrollbar is enough.
            if let Some(header) = self.parts.fixed_header.take() {
                dom.destroy(header);
            }
            if let Some(scrollbar) = self.parts.scrollbar.take() {
                dom.destroy(scrollbar);
            }
            return;
        };

        let fixed_header = match self.parts.fixed_header {
            Some(header) => header,
            None => {
                let header = dom.create(
                    Element::table()
                        .class(classes::FIXED_HEADER)
                        .attr("role", "presentation")
                        .attr("aria-hidden", "true"),
                );
                dom.insert_before(scroller, header);
                self.parts.fixed_header = Some(header);
                self.header_stale = true;
                debug!("created fixed header {header}");
                header
            }
        };

        let has_rows = dom
            .children(fixed_header)
            .into_iter()
            .any(|child| dom.tag(child) == Some(Tag::Thead));
        if self.header_stale || !has_rows {
            columns::clone_header(dom, live_thead, fixed_header);
            self.header_stale = false;
        }

        if self.parts.scrollbar.is_none() {
            let width = px(dom.scrollbar_width());
            let scrollbar = dom.create(
                Element::div()
                    .class(classes::SCROLLBAR)
                    .attr("aria-hidden", "true")
                    .style("position", "absolute")
                    .style("right", "0px")
                    .style("overflow-y", "scroll")
                    .style("width", &width)
                    .child(Element::div().class(classes::SCROLLBAR_CONTENT)),
            );
            dom.append(nodes.container, scrollbar);
            self.parts.scrollbar = Some(scrollbar);
            debug!("created virtual scrollbar {scrollbar}");
        }
    }

    fn enable_x<D: Dom>(&mut self, dom: &mut D, nodes: TableNodes) {
        if self.parts.x_scroller.is_some() {
            return;
        }

        let block: Vec<NodeId> = match self.parts.y_scroller {
            Some(y) => self.parts.fixed_header.into_iter().chain([y]).collect(),
            None => vec![nodes.table],
        };
        let Some(first) = block.first().copied() else {
            return;
        };

        let scroller = dom.create(
            Element::div()
                .class(classes::X_SCROLLER)
                .style("overflow-x", "auto"),
        );
        dom.insert_before(first, scroller);
        for node in block {
            dom.append(scroller, node);
        }
        self.parts.x_scroller = Some(scroller);
        debug!("created x scroller {scroller}");
    }

    // -------------------------------------------------------------------------
    // Sizing
    // -------------------------------------------------------------------------

    fn apply_widths<D: Dom>(
        &mut self,
        dom: &mut D,
        nodes: TableNodes,
        attrs: &TableAttrs,
        axes: ScrollAxes,
    ) {
        match attrs.width {
            Some(width) => dom.set_style(nodes.container, "width", &width.to_string()),
            None => dom.remove_style(nodes.container, "width"),
        }

        match (self.parts.x_scroller, attrs.width) {
            (Some(x_scroller), _) => self.lock_table_width(dom, nodes.table, x_scroller),
            (None, Some(_)) if axes.y => dom.set_style(nodes.table, "width", "100%"),
            (None, Some(Length::Px(width))) => dom.set_style(nodes.table, "width", &px(width)),
            (None, Some(Length::Percent(_))) => dom.set_style(nodes.table, "width", "100%"),
            (None, None) => dom.remove_style(nodes.table, "width"),
        }

        if let Some(y_scroller) = self.parts.y_scroller {
            let locked = self.parts.x_scroller.is_some()
                && dom
                    .style(nodes.table, "width")
                    .is_some_and(|width| width.ends_with("px"));
            if locked {
                let width = dom.offset_width(nodes.table) + dom.scrollbar_width();
                dom.set_style(y_scroller, "width", &px(width));
            } else {
                dom.remove_style(y_scroller, "width");
            }
        }

        if let Some(holder) = self.parts.caption_table {
            match self.parts.x_scroller {
                Some(x_scroller) => {
                    let width = dom.offset_width(x_scroller);
                    dom.set_style(holder, "width", &px(width));
                }
                None => dom.set_style(holder, "width", "100%"),
            }
        }
    }

    /// Pin the table to its natural width so the X scroller can overflow,
    /// unless the scroller already has more room than the table needs.
    fn lock_table_width<D: Dom>(&self, dom: &mut D, table: NodeId, x_scroller: NodeId) {
        dom.remove_style(table, "width");
        let natural = dom.offset_width(table);
        dom.set_style(table, "width", &px(natural));

        let mut room = dom.client_width(x_scroller);
        if self.parts.y_scroller.is_some() {
            room -= dom.scrollbar_width();
        }
        if room > natural {
            dom.set_style(table, "width", "100%");
        }
        debug!("table natural width {natural}, room {room}");
    }

    fn apply_height<D: Dom>(&mut self, dom: &mut D, nodes: TableNodes, attrs: &TableAttrs) {
        let (Some(y_scroller), Some(height)) = (self.parts.y_scroller, attrs.height) else {
            return;
        };

        let total = height.resolve(dom.viewport_size().1);
        let mut consumed = dom
            .offset_within(y_scroller, nodes.container)
            .map_or(0.0, |(_, top)| top);
        if let Some(x_scroller) = self.parts.x_scroller {
            if dom.scroll_width(x_scroller) > dom.client_width(x_scroller) {
                consumed += dom.scrollbar_width();
            }
        }
        let borders = dom.computed_px(y_scroller, "border-top-width")
            + dom.computed_px(y_scroller, "border-bottom-width");

        let height = (total - consumed - borders).max(0.0);
        dom.set_style(y_scroller, "height", &px(height));
    }

    fn sync_resize_listener<D: Dom>(&mut self, dom: &mut D, attrs: &TableAttrs, axes: ScrollAxes) {
        let wanted = axes.any()
            && [attrs.width, attrs.height]
                .iter()
                .any(|length| length.is_some_and(|length| length.is_percent()));
        match (wanted, self.resize_listener) {
            (true, None) => {
                let listener = dom.listen(Target::Viewport, EventKind::Resize);
                debug!("listening for viewport resizes");
                self.resize_listener = Some(listener);
            }
            (false, Some(_)) => self.release(dom),
            _ => {}
        }
    }
}

/// The caption's id, assigning `<table-id>-caption` when it has none.
fn caption_id<D: Dom>(dom: &mut D, table: NodeId, caption: NodeId) -> String {
    if let Some(id) = dom.attr(caption, "id") {
        return id;
    }
    let base = dom.attr(table, "id").unwrap_or_else(|| table.to_string());
    let id = format!("{base}-caption");
    dom.set_attr(caption, "id", &id);
    id
}
