use super::panel::DetailPanel;
use super::{
    ACTIVE_BORDER_WIDTH, BAR_GAP, BAR_HEIGHT, BAR_HIT_SLOP, CARD_FONT_SIZE, CARD_RADIUS,
    CARD_TEXT_PADDING, DESCRIPTION_FONT_SIZE, INACTIVE_BORDER_WIDTH, LINE_SPACING, PANEL_PADDING,
    PANEL_RADIUS, TICKER_FONT_SIZE, TITLE_FONT_SIZE,
};
use crate::gui::theme::{ThemeColors, mix};
use cairo::Context;
use palette::Srgba;
use reel_core::carousel::{CardFrame, Carousel, Layout};
use reel_core::motion::lerp;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, x: f64, y: f64, w: f64, h: f64, radius: f64) {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 1.5 * PI);
    cr.close_path();
}

/// Greedy word wrap against the current font. A single word wider than
/// `max_width` gets a line of its own.
fn wrap_lines(cr: &Context, text: &str, max_width: f64) -> Result<Vec<String>, cairo::Error> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_owned()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && cr.text_extents(&candidate)?.x_advance() > max_width {
            lines.push(std::mem::replace(&mut line, word.to_owned()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    Ok(lines)
}

struct CardRenderer<'a> {
    frame: &'a CardFrame,
    label: Option<&'a str>,
    layout: &'a Layout,
}

impl<'a> CardRenderer<'a> {
    fn new(frame: &'a CardFrame, label: Option<&'a str>, layout: &'a Layout) -> Self {
        Self {
            frame,
            label,
            layout,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (w, h) = (self.layout.card_width, self.layout.card_height);
        let t = self.frame.transform;

        cr.save()?;
        // rotate about the card's own center
        cr.translate(t.x + w / 2.0, t.y + h / 2.0);
        cr.rotate(t.rotation.to_radians());

        self.draw_body(cr, colors, w, h)?;
        if let Some(label) = self.label {
            self.draw_label(cr, colors, label, w)?;
        }
        cr.restore()
    }

    fn draw_body(
        &self,
        cr: &Context,
        colors: &ThemeColors,
        w: f64,
        h: f64,
    ) -> Result<(), cairo::Error> {
        let lit = self.frame.highlight;
        rounded_rect(cr, -w / 2.0, -h / 2.0, w, h, CARD_RADIUS);
        set_color(cr, mix(colors.inactive, colors.active, lit));
        cr.fill_preserve()?;

        set_color(cr, mix(colors.inactive_border, colors.active, lit));
        cr.set_line_width(lerp(INACTIVE_BORDER_WIDTH, ACTIVE_BORDER_WIDTH, lit));
        cr.stroke()
    }

    fn draw_label(
        &self,
        cr: &Context,
        colors: &ThemeColors,
        label: &str,
        w: f64,
    ) -> Result<(), cairo::Error> {
        set_color(
            cr,
            mix(colors.inactive_text, colors.active_text, self.frame.highlight),
        );
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(CARD_FONT_SIZE);

        let lines = wrap_lines(cr, label, w - 2.0 * CARD_TEXT_PADDING)?;
        let line_height = CARD_FONT_SIZE * LINE_SPACING;
        let ascent = cr.font_extents()?.ascent();
        let top = -(lines.len() as f64 * line_height) / 2.0;

        for (i, line) in lines.iter().enumerate() {
            let ext = cr.text_extents(line)?;
            cr.move_to(
                -ext.x_advance() / 2.0,
                top + i as f64 * line_height + (line_height + ascent) / 2.0 - ascent / 4.0,
            );
            cr.show_text(line)?;
        }
        Ok(())
    }
}

/// Cards in paint order: farthest from the center first.
fn paint_order(carousel: &Carousel, now_ms: u64) -> Vec<CardFrame> {
    let mut frames = carousel.frames(now_ms);
    frames.sort_by_key(|f| f.z_index);
    frames
}

fn draw_cards(
    cr: &Context,
    carousel: &Carousel,
    now_ms: u64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let layout = carousel.layout();
    for frame in paint_order(carousel, now_ms) {
        CardRenderer::new(&frame, carousel.label(frame.content), layout).draw(cr, colors)?;
    }
    Ok(())
}

fn clear(cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.background);
    cr.paint()
}

/// Upright carousel, centered vertically in the area.
pub fn draw_vertical(
    cr: &Context,
    carousel: &Carousel,
    now_ms: u64,
    colors: &ThemeColors,
    height: f64,
) -> Result<(), cairo::Error> {
    clear(cr, colors)?;
    cr.save()?;
    cr.translate(0.0, (height - carousel.layout().container_height) / 2.0);
    draw_cards(cr, carousel, now_ms, colors)?;
    cr.restore()
}

/// The same carousel turned a quarter counter-clockwise, so the first visible
/// slot sits on the left. Mount it with the area's height as its width.
pub fn draw_horizontal(
    cr: &Context,
    carousel: &Carousel,
    now_ms: u64,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    clear(cr, colors)?;
    cr.save()?;
    cr.translate((width - carousel.layout().container_height) / 2.0, height);
    cr.rotate(-PI / 2.0);
    draw_cards(cr, carousel, now_ms, colors)?;
    cr.restore()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BarRect {
    x: f64,
    y: f64,
    w: f64,
}

fn bar_rects(width: f64, height: f64, count: usize) -> Vec<BarRect> {
    if count == 0 {
        return Vec::new();
    }
    let avail = (width - 2.0 * PANEL_PADDING).max(0.0);
    let w = ((avail - BAR_GAP * (count - 1) as f64) / count as f64).max(0.0);
    let y = height - PANEL_PADDING - BAR_HEIGHT;
    (0..count)
        .map(|i| BarRect {
            x: PANEL_PADDING + i as f64 * (w + BAR_GAP),
            y,
            w,
        })
        .collect()
}

/// Which progress bar, if any, a click at `(x, y)` lands on.
pub fn bar_at(x: f64, y: f64, width: f64, height: f64, count: usize) -> Option<usize> {
    bar_rects(width, height, count).iter().position(|bar| {
        (bar.x..=bar.x + bar.w).contains(&x)
            && (bar.y - BAR_HIT_SLOP..=bar.y + BAR_HEIGHT + BAR_HIT_SLOP).contains(&y)
    })
}

fn draw_text_block(
    cr: &Context,
    panel: &DetailPanel,
    now_ms: u64,
    colors: &ThemeColors,
    width: f64,
) -> Result<(), cairo::Error> {
    let mut y = PANEL_PADDING;

    set_color(cr, colors.ticker);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(TICKER_FONT_SIZE);
    y += cr.font_extents()?.ascent();
    cr.move_to(PANEL_PADDING, y);
    cr.show_text(&panel.ticker_text(now_ms))?;
    y += TITLE_FONT_SIZE;

    set_color(cr, colors.panel_text);
    cr.set_font_size(TITLE_FONT_SIZE);
    let text_width = width - 2.0 * PANEL_PADDING;
    for line in wrap_lines(cr, &panel.title_text(), text_width)? {
        y += TITLE_FONT_SIZE * LINE_SPACING;
        cr.move_to(PANEL_PADDING, y);
        cr.show_text(&line)?;
    }
    y += DESCRIPTION_FONT_SIZE;

    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(DESCRIPTION_FONT_SIZE);
    for line in wrap_lines(cr, &panel.description_text(), text_width)? {
        y += DESCRIPTION_FONT_SIZE * LINE_SPACING;
        cr.move_to(PANEL_PADDING, y);
        cr.show_text(&line)?;
    }
    Ok(())
}

pub fn draw_panel(
    cr: &Context,
    panel: &DetailPanel,
    now_ms: u64,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    clear(cr, colors)?;
    rounded_rect(cr, 0.0, 0.0, width, height, PANEL_RADIUS);
    set_color(cr, colors.panel);
    cr.fill()?;

    // the text block dips on change, the bars stay put
    let scale = panel.scale(now_ms);
    let (cx, cy) = (width / 2.0, height / 2.0);
    cr.save()?;
    cr.translate(cx, cy);
    cr.scale(scale, scale);
    cr.translate(-cx, -cy);
    draw_text_block(cr, panel, now_ms, colors, width)?;
    cr.restore()?;

    for (i, bar) in bar_rects(width, height, panel.bar_count()).into_iter().enumerate() {
        rounded_rect(cr, bar.x, bar.y, bar.w, BAR_HEIGHT, BAR_HEIGHT / 2.0);
        set_color(cr, colors.bar_track);
        cr.fill()?;

        let fill = panel.bar_fill(i, now_ms);
        if fill > 0.0 {
            rounded_rect(cr, bar.x, bar.y, bar.w * fill, BAR_HEIGHT, BAR_HEIGHT / 2.0);
            set_color(cr, colors.bar_fill);
            cr.fill()?;
        }
    }
    Ok(())
}
