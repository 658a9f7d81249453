use std::time::Duration;

use scrolltable::config::parse_length;
use scrolltable::mode::{resolve, resolve_attrs};
use scrolltable::{ConfigError, ScrollAxes, ScrollSetting, ScrollTunables, TableAttrs};
use tabledom::{Length, LengthError};

// ============================================================================
// Scroll setting
// ============================================================================

#[test]
fn test_scroll_setting_parsing() {
    assert_eq!("x".parse::<ScrollSetting>(), Ok(ScrollSetting::X));
    assert_eq!("Y".parse::<ScrollSetting>(), Ok(ScrollSetting::Y));
    assert_eq!("xY".parse::<ScrollSetting>(), Ok(ScrollSetting::Xy));
    assert_eq!("true".parse::<ScrollSetting>(), Ok(ScrollSetting::Xy));
    assert_eq!("FALSE".parse::<ScrollSetting>(), Ok(ScrollSetting::Off));
    assert_eq!(
        "z".parse::<ScrollSetting>(),
        Err(ConfigError::InvalidScrollable("z".to_string()))
    );
}

#[test]
fn test_scroll_setting_from_bool() {
    assert_eq!(ScrollSetting::from(true), ScrollSetting::Xy);
    assert_eq!(ScrollSetting::from(false), ScrollSetting::Off);
    assert_eq!(ScrollSetting::default(), ScrollSetting::Off);
    assert_eq!(ScrollSetting::Xy.to_string(), "xy");
}

#[test]
fn test_parse_length_reports_attribute() {
    assert_eq!(parse_length("width", "300px"), Ok(Length::Px(300.0)));
    let err = parse_length("height", "tall").unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidLength {
            attribute: "height",
            source: LengthError::Invalid("tall".to_string()),
        }
    );
    assert!(err.to_string().starts_with("invalid height"));
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolver_truth_table() {
    let settings = [
        ScrollSetting::Off,
        ScrollSetting::X,
        ScrollSetting::Y,
        ScrollSetting::Xy,
    ];
    for setting in settings {
        for has_width in [false, true] {
            for has_height in [false, true] {
                let axes = resolve(setting, has_width, has_height);
                let want_x = matches!(setting, ScrollSetting::X | ScrollSetting::Xy);
                let want_y = matches!(setting, ScrollSetting::Y | ScrollSetting::Xy);
                assert_eq!(
                    axes,
                    ScrollAxes {
                        x: want_x && has_width,
                        y: want_y && has_height,
                    },
                    "{setting} width={has_width} height={has_height}"
                );
            }
        }
    }
}

#[test]
fn test_y_without_height_is_static() {
    let attrs = TableAttrs::new()
        .scrollable(ScrollSetting::Y)
        .width(Length::Px(300.0));
    assert_eq!(resolve_attrs(&attrs), ScrollAxes::NONE);
    assert!(!resolve_attrs(&attrs).any());
}

#[test]
fn test_xy_degrades_to_available_axis() {
    let attrs = TableAttrs::new()
        .scrollable(ScrollSetting::Xy)
        .height(Length::Px(200.0));
    assert_eq!(resolve_attrs(&attrs), ScrollAxes { x: false, y: true });
}

// ============================================================================
// Tunables
// ============================================================================

#[test]
fn test_tunable_defaults_and_builders() {
    let tunables = ScrollTunables::default();
    assert_eq!(tunables.lock_timeout, Duration::from_millis(300));
    assert_eq!(tunables.resize_debounce, Duration::from_millis(100));

    let tunables = tunables
        .lock_timeout(Duration::from_millis(50))
        .resize_debounce(Duration::from_millis(10));
    assert_eq!(tunables.lock_timeout, Duration::from_millis(50));
    assert_eq!(tunables.resize_debounce, Duration::from_millis(10));
}
