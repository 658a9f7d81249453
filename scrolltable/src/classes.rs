//! Class names carried by the generated structure.

/// Table holding the caption while the layout is split.
pub const CAPTION_TABLE: &str = "table-caption-table";
/// Horizontally overflowing wrapper.
pub const X_SCROLLER: &str = "table-x-scroller";
/// Vertically overflowing wrapper around the body table.
pub const Y_SCROLLER: &str = "table-y-scroller";
/// Presentational table holding the cloned header.
pub const FIXED_HEADER: &str = "table-scroll-header";
/// Width carrier inside each cloned header cell.
pub const LINER: &str = "table-scroll-liner";
pub const SCROLLBAR: &str = "table-scrollbar";
pub const SCROLLBAR_CONTENT: &str = "table-scrollbar-content";

// Markers on the host container.
pub const SCROLLABLE_X: &str = "table-scrollable-x";
pub const SCROLLABLE_Y: &str = "table-scrollable-y";
