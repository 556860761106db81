pub mod app;
pub mod deck;
pub mod theme;
pub mod window;

/// Milliseconds on the GLib monotonic clock, the time base every animation
/// in the window runs on.
pub fn now_ms() -> u64 {
    (glib::monotonic_time() / 1000).max(0) as u64
}
