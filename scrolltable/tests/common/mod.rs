#![allow(dead_code)]

use scrolltable::scroll_to::ROW_ID_ATTR;
use scrolltable::{ManualClock, ScrollableTable, TableAttrs, TableNodes};
use tabledom::{Document, Dom, Element, NodeId};

pub const ROWS: usize = 50;

/// 5px padding all round. With 20px text every row is 30px tall.
pub fn padded(cell: Element) -> Element {
    cell.style("padding-top", "5px")
        .style("padding-right", "5px")
        .style("padding-bottom", "5px")
        .style("padding-left", "5px")
}

pub fn header_row() -> Element {
    Element::tr()
        .child(padded(Element::th("Name")).id("col-name"))
        .child(padded(Element::th("Email")).id("col-email").style("width", "120px"))
}

pub fn body_row(i: usize) -> Element {
    Element::tr()
        .attr(ROW_ID_ATTR, format!("r{i}"))
        .child(padded(Element::td(format!("user{i:02}"))).id(format!("name-{i}")))
        .child(padded(Element::td("user@example.com")))
}

/// Two columns, 58px and 138px wide at their natural size (196px table).
pub fn people_table(rows: usize, with_header: bool) -> Element {
    let mut table = Element::table().id("people");
    if with_header {
        table = table.child(Element::thead().child(header_row()));
    }
    table.child(Element::tbody().children((0..rows).map(body_row)))
}

pub struct Harness {
    pub doc: Document,
    pub nodes: TableNodes,
    pub clock: ManualClock,
    pub table: ScrollableTable<ManualClock>,
}

impl Harness {
    pub fn new(attrs: TableAttrs) -> Self {
        Self::with_markup(attrs, people_table(ROWS, true))
    }

    pub fn with_markup(attrs: TableAttrs, markup: Element) -> Self {
        let mut harness = Self::initialized(attrs, markup);
        harness.table.after_render(&mut harness.doc);
        harness
    }

    /// Attached but not rendered yet.
    pub fn initialized(attrs: TableAttrs, markup: Element) -> Self {
        let mut doc = Document::new();
        let container = doc.create(Element::div().id("people-container"));
        let table_node = doc.create(markup);
        doc.append(container, table_node);

        let nodes = TableNodes {
            container,
            table: table_node,
        };
        let clock = ManualClock::new();
        let mut table = ScrollableTable::with_clock(attrs, clock.clone());
        table.initialize(&doc, nodes);

        Self {
            doc,
            nodes,
            clock,
            table,
        }
    }

    /// Deliver every queued dispatch. Returns how many the table claimed.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(dispatch) = self.doc.poll_event() {
            if self.table.handle_event(&mut self.doc, &dispatch) {
                handled += 1;
            }
        }
        handled
    }

    pub fn y_scroller(&self) -> NodeId {
        self.table.structure().y_scroller.expect("y scroller")
    }

    pub fn x_scroller(&self) -> NodeId {
        self.table.structure().x_scroller.expect("x scroller")
    }

    pub fn fixed_header(&self) -> NodeId {
        self.table.structure().fixed_header.expect("fixed header")
    }

    pub fn scrollbar(&self) -> NodeId {
        self.table.structure().scrollbar.expect("scrollbar")
    }

    pub fn caption_table(&self) -> NodeId {
        self.table.structure().caption_table.expect("caption table")
    }

    pub fn tbody(&self) -> NodeId {
        self.doc
            .children(self.nodes.table)
            .into_iter()
            .find(|child| self.doc.tag(*child) == Some(tabledom::Tag::Tbody))
            .expect("tbody")
    }

    pub fn style(&self, node: NodeId, prop: &str) -> Option<String> {
        self.doc.style(node, prop)
    }
}
