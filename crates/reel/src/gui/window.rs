use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;

pub const DEFAULT_SIZE: (i32, i32) = (1280, 820);
const MONITOR_FRACTION: f64 = 0.9;

pub fn first_monitor() -> Option<gdk::Monitor> {
    let display = gdk::Display::default()?;
    let monitors = display.monitors();
    (0..monitors.n_items()).find_map(|i| {
        monitors
            .item(i)
            .and_then(|item| item.downcast::<gdk::Monitor>().ok())
    })
}

/// The default size, shrunk to fit a smaller monitor.
pub fn fitted_size(monitor_width: i32, monitor_height: i32) -> (i32, i32) {
    let cap = |monitor: i32, wanted: i32| {
        if monitor <= 0 {
            return wanted;
        }
        wanted.min((monitor as f64 * MONITOR_FRACTION) as i32)
    };
    (
        cap(monitor_width, DEFAULT_SIZE.0),
        cap(monitor_height, DEFAULT_SIZE.1),
    )
}

pub fn init_window(window: &gtk::ApplicationWindow) {
    let (w, h) = first_monitor()
        .map(|m| {
            let geometry = m.geometry();
            fitted_size(geometry.width(), geometry.height())
        })
        .unwrap_or(DEFAULT_SIZE);
    window.set_default_size(w, h);
}
