use std::fs::File;
use std::thread;
use std::time::Duration;

use log::info;
use scrolltable::scroll_to::ROW_ID_ATTR;
use scrolltable::{ScrollSetting, ScrollTarget, ScrollableTable, TableAttrs, TableNodes};
use simplelog::{Config, LevelFilter, WriteLogger};
use tabledom::{Document, Dom, Element, Length};

fn cell(element: Element) -> Element {
    element
        .style("padding-left", "6px")
        .style("padding-right", "6px")
        .style("padding-top", "4px")
        .style("padding-bottom", "4px")
}

fn people() -> Element {
    let header = Element::thead().child(
        Element::tr()
            .child(cell(Element::th("Id")))
            .child(cell(Element::th("Name")))
            .child(cell(Element::th("City"))),
    );
    let rows = (0..200).map(|i| {
        Element::tr()
            .attr(ROW_ID_ATTR, format!("person-{i}"))
            .child(cell(Element::td(i.to_string())))
            .child(cell(Element::td(format!("Person number {i}"))))
            .child(cell(Element::td(if i % 2 == 0 { "Lisbon" } else { "Utrecht" })))
    });
    Element::table()
        .id("people")
        .child(Element::caption("People"))
        .child(header)
        .child(Element::tbody().children(rows))
}

/// Deliver queued events and fire due timers.
fn settle(doc: &mut Document, table: &mut ScrollableTable) {
    while let Some(dispatch) = doc.poll_event() {
        table.handle_event(doc, &dispatch);
    }
    table.tick(doc);
}

fn report(doc: &Document, table: &ScrollableTable) {
    let parts = table.structure();
    println!("layout: {:?}, axes: {:?}", table.layout_state(), table.axes());
    if let Some(scroller) = parts.y_scroller {
        println!(
            "  body: height {:?}, scroll {}/{}",
            doc.style(scroller, "height"),
            doc.scroll_top(scroller),
            doc.scroll_height(scroller) - doc.client_height(scroller),
        );
    }
    if let Some(scrollbar) = parts.scrollbar {
        println!(
            "  scrollbar: top {:?}, height {:?}, position {}",
            doc.style(scrollbar, "top"),
            doc.style(scrollbar, "height"),
            doc.scroll_top(scrollbar),
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("scroll_demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut doc = Document::new();
    let container = doc.create(Element::div().id("people-container"));
    let table_node = doc.create(people());
    doc.append(container, table_node);

    let attrs = TableAttrs::new()
        .scrollable(ScrollSetting::Y)
        .height(Length::Px(300.0));
    let mut table = ScrollableTable::new(attrs);
    table.initialize(
        &doc,
        TableNodes {
            container,
            table: table_node,
        },
    );
    table.after_render(&mut doc);
    report(&doc, &table);

    info!("scrolling to person-120");
    table.scroll_to(&mut doc, &ScrollTarget::RowId("person-120".into()));
    settle(&mut doc, &mut table);
    report(&doc, &table);

    // Let the lock lapse before driving the other surface.
    thread::sleep(Duration::from_millis(350));
    table.tick(&mut doc);
    if let Some(scrollbar) = table.structure().scrollbar {
        doc.set_scroll_top(scrollbar, 40.0);
    }
    settle(&mut doc, &mut table);
    report(&doc, &table);

    table.set_width(&mut doc, Some("320px"))?;
    table.set_scrollable(&mut doc, "xy")?;
    report(&doc, &table);

    table.set_scroll_setting(&mut doc, false);
    report(&doc, &table);

    table.teardown(&mut doc);
    Ok(())
}
