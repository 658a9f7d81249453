//! Attribute values and tunables.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tabledom::Length;

use crate::error::ConfigError;

/// The `scrollable` attribute: which axes the host asked to scroll.
///
/// Whether an axis actually scrolls also depends on a width (x) or height (y)
/// being configured, see [`crate::mode::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollSetting {
    #[default]
    Off,
    X,
    Y,
    Xy,
}

impl ScrollSetting {
    pub const fn wants_x(&self) -> bool {
        matches!(self, ScrollSetting::X | ScrollSetting::Xy)
    }

    pub const fn wants_y(&self) -> bool {
        matches!(self, ScrollSetting::Y | ScrollSetting::Xy)
    }
}

impl From<bool> for ScrollSetting {
    fn from(enabled: bool) -> Self {
        if enabled {
            ScrollSetting::Xy
        } else {
            ScrollSetting::Off
        }
    }
}

impl FromStr for ScrollSetting {
    type Err = ConfigError;

    /// Accepts `x`, `y`, `xy`, `true` and `false`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(ScrollSetting::X),
            "y" => Ok(ScrollSetting::Y),
            "xy" | "true" => Ok(ScrollSetting::Xy),
            "false" => Ok(ScrollSetting::Off),
            _ => Err(ConfigError::InvalidScrollable(s.to_string())),
        }
    }
}

impl fmt::Display for ScrollSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScrollSetting::Off => "false",
            ScrollSetting::X => "x",
            ScrollSetting::Y => "y",
            ScrollSetting::Xy => "xy",
        })
    }
}

/// Parse a width or height attribute value.
pub fn parse_length(attribute: &'static str, value: &str) -> Result<Length, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::InvalidLength { attribute, source })
}

/// Host attributes the engine reacts to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableAttrs {
    /// Requested scroll axes.
    pub scrollable: ScrollSetting,

    /// Overall component width. Required for horizontal scrolling.
    pub width: Option<Length>,

    /// Overall component height. Required for vertical scrolling.
    ///
    /// A percentage resolves against the viewport height, not the
    /// container, and is recomputed when the viewport is resized.
    pub height: Option<Length>,

    /// Caption text. `None` means the table has no caption.
    pub caption: Option<String>,
}

impl TableAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scrollable(mut self, setting: ScrollSetting) -> Self {
        self.scrollable = setting;
        self
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: Length) -> Self {
        self.height = Some(height);
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Timing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTunables {
    /// How long a scroll lock suppresses events from the other source.
    /// Too short and mirrored positions echo back; too long and genuine
    /// input on the other surface is dropped.
    pub lock_timeout: Duration,

    /// Delay between a viewport resize and the width recompute it triggers.
    pub resize_debounce: Duration,
}

impl Default for ScrollTunables {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_millis(300),
            resize_debounce: Duration::from_millis(100),
        }
    }
}

impl ScrollTunables {
    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }
}
