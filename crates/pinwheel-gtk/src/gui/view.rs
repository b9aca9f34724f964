use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use pinwheel::surface::{Frame, Sector};
use pinwheel::{Point, Radii, Selection};
use std::f64::consts::PI;

const LABEL_FONT_SIZE: f64 = 16.0;
const GUIDE_LINE_WIDTH: f64 = 2.0;
const DETACHED_RADIUS: f64 = 36.0;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct SectorRenderer<'a> {
    sector: Sector<'a>,
    origin: Point,
    radii: Radii,
}

impl SectorRenderer<'_> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_ring(cr, colors)?;
        draw_text(cr, colors.label, self.sector.item.name(), self.sector.label_at)
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        if self.sector.selected {
            colors.selected
        } else if self.sector.index % 2 == 0 {
            colors.default
        } else {
            colors.alternate
        }
    }

    /// Ring segment between the cancel zone and the outer radius.
    fn draw_ring(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let Sector {
            start_angle,
            end_angle,
            ..
        } = self.sector;
        let Point { x, y } = self.origin;

        cr.new_path();
        cr.arc(x, y, self.radii.outer(), start_angle, end_angle);
        cr.arc_negative(x, y, self.radii.inner(), end_angle, start_angle);
        cr.close_path();
        set_color(cr, self.color(colors));
        cr.fill()
    }
}

fn draw_text(
    cr: &Context,
    color: Srgba<f64>,
    text: &str,
    at: Point,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(LABEL_FONT_SIZE);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            at.x - ext.width() / 2.0 - ext.x_bearing(),
            at.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(text)?;
    }
    Ok(())
}

fn draw_cancel_zone(
    cr: &Context,
    frame: &Frame<'_>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if frame.selection != Selection::Cancel {
        return Ok(());
    }
    set_color(cr, colors.cancel);
    cr.new_path();
    cr.arc(
        frame.origin.x,
        frame.origin.y,
        frame.radii.inner(),
        0.0,
        2.0 * PI,
    );
    cr.fill()
}

fn draw_guide_line(
    cr: &Context,
    frame: &Frame<'_>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let Some((angle, length)) = frame.guide_line() else {
        return Ok(());
    };
    let end = frame.origin.offset(angle, length);

    set_color(cr, colors.label);
    cr.set_line_width(GUIDE_LINE_WIDTH);
    cr.new_path();
    cr.move_to(frame.origin.x, frame.origin.y);
    cr.line_to(end.x, end.y);
    cr.stroke()
}

/// The dragged item follows the pointer while it is outside every sector.
fn draw_detached(
    cr: &Context,
    frame: &Frame<'_>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (Some(item), Some(pointer)) = (frame.detached(), frame.pointer) else {
        return Ok(());
    };

    set_color(cr, colors.selected);
    cr.new_path();
    cr.arc(pointer.x, pointer.y, DETACHED_RADIUS, 0.0, 2.0 * PI);
    cr.fill()?;
    draw_text(cr, colors.label, item.name(), pointer)
}

pub fn draw(cr: &Context, frame: &Frame<'_>, colors: &ThemeColors) -> Result<(), cairo::Error> {
    for sector in frame.sectors() {
        SectorRenderer {
            sector,
            origin: frame.origin,
            radii: frame.radii,
        }
        .draw(cr, colors)?;
    }
    draw_cancel_zone(cr, frame, colors)?;
    draw_guide_line(cr, frame, colors)?;
    draw_detached(cr, frame, colors)
}
