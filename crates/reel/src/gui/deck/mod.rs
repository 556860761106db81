pub mod model;
pub mod panel;
pub mod view;

pub use model::{Deck, DeckAction, Track};
pub use panel::DetailPanel;
pub use view::{bar_at, draw_horizontal, draw_panel, draw_vertical};

pub const CARD_RADIUS: f64 = 8.0;
pub const CARD_FONT_SIZE: f64 = 18.0;
pub const CARD_TEXT_PADDING: f64 = 20.0;
pub const INACTIVE_BORDER_WIDTH: f64 = 2.0;
pub const ACTIVE_BORDER_WIDTH: f64 = 1.0;

pub const PANEL_PADDING: f64 = 32.0;
pub const PANEL_RADIUS: f64 = 4.0;
pub const TICKER_FONT_SIZE: f64 = 120.0;
pub const TITLE_FONT_SIZE: f64 = 24.0;
pub const DESCRIPTION_FONT_SIZE: f64 = 16.0;
pub const LINE_SPACING: f64 = 1.4;

pub const BAR_HEIGHT: f64 = 5.0;
pub const BAR_GAP: f64 = 12.0;
pub const BAR_HIT_SLOP: f64 = 8.0; // clickable margin above and below a bar
