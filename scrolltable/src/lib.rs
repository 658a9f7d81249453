//! Scrollable table layouts on top of a [`tabledom::Dom`].
//!
//! A [`ScrollableTable`] splits a host table into wrappers so the body can
//! scroll horizontally, vertically or both while the header stays put, keeps
//! the fixed header's columns aligned with the live ones, and keeps a virtual
//! scrollbar in step with the body.

pub mod classes;
pub mod clock;
pub mod columns;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod mode;
pub mod scroll_to;
pub mod structure;
pub mod table;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ScrollSetting, ScrollTunables, TableAttrs};
pub use coordinator::{ScrollCoordinator, ScrollLock, ScrollSource};
pub use error::ConfigError;
pub use mode::ScrollAxes;
pub use scroll_to::ScrollTarget;
pub use structure::{LayoutState, Structure, TableNodes};
pub use table::{Change, DataChange, ScrollableTable};
