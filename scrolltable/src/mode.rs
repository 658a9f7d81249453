//! Scroll mode resolution.

use crate::config::{ScrollSetting, TableAttrs};

/// Axes that actually scroll after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollAxes {
    pub x: bool,
    pub y: bool,
}

impl ScrollAxes {
    pub const NONE: ScrollAxes = ScrollAxes { x: false, y: false };

    pub const fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Resolve the active axes.
///
/// An axis is only active when its dimension is configured: asking for `y`
/// without a height leaves the table static rather than failing.
pub fn resolve(setting: ScrollSetting, has_width: bool, has_height: bool) -> ScrollAxes {
    ScrollAxes {
        x: has_width && setting.wants_x(),
        y: has_height && setting.wants_y(),
    }
}

/// [`resolve`] applied to the current attribute values.
pub fn resolve_attrs(attrs: &TableAttrs) -> ScrollAxes {
    resolve(attrs.scrollable, attrs.width.is_some(), attrs.height.is_some())
}
