//! The three explanatory figures.

use crate::chute::ChuteParams;
use crate::diagram::{Color, Figure, Panel, Style};
use crate::errors::ValidationError;
use crate::float_types::Real;
use nalgebra::Point2;

/// Depth the chute reaches into the coin machine, measured from the front.
pub const MACHINE_INSERT: Real = 100.0;

/// Outlet offset drawn as the recommended position when none is configured.
pub const FRONT_OFFSET: Real = 80.0;

const COIN_RADIUS: Real = 5.0;

fn p(x: Real, y: Real) -> Point2<Real> {
    Point2::new(x, y)
}

/// Distance from the front edge to the outlet center.
fn outlet_distance(params: &ChuteParams) -> Real {
    params.outlet_offset.unwrap_or(FRONT_OFFSET)
}

/// Footprint with the centered outlet against the front-offset one, and a
/// side section showing which part of the chute sits inside the machine.
pub fn top_view(params: &ChuteParams) -> Result<Figure, ValidationError> {
    params.validate()?;
    let (w, d, h) = (params.outer_width, params.outer_depth, params.part_height);
    let r = params.outlet_diameter / 2.0;
    let front = params.front_y();
    let offset = outlet_distance(params);

    let mut top = Panel::new("Top view", p(-w / 2.0 - 60.0, front - 60.0), p(w / 2.0 + 80.0, -front + 60.0));
    top.rect(p(-w / 2.0, front), p(w / 2.0, -front), Style::filled(Color::LIGHT_BLUE, Color::BLUE))
        .circle(p(0.0, 0.0), r, Style::filled(Color::PINK, Color::RED).dashed())
        .label(p(0.0, r + 15.0), "centered: inside the machine", Color::RED)
        .circle(p(0.0, front + offset), r, Style::filled(Color::LIGHT_GREEN, Color::GREEN))
        .label(p(0.0, front + offset - r - 15.0), "front offset: clears the machine", Color::GREEN)
        .dimension(p(-w / 2.0, front - 25.0), p(w / 2.0, front - 25.0), format!("{w}mm"), Color::BLACK)
        .dimension(p(w / 2.0 + 25.0, front), p(w / 2.0 + 25.0, -front), format!("{d}mm"), Color::BLACK)
        .dimension(
            p(-r, front + offset),
            p(r, front + offset),
            format!("Ø{}mm", params.outlet_diameter),
            Color::GREEN,
        )
        .dimension(
            p(-w / 2.0 + 15.0, front),
            p(-w / 2.0 + 15.0, front + offset - r),
            format!("{:.0}mm", offset - r),
            Color::GREEN,
        );

    let mut side = Panel::new("Side view", p(-40.0, -40.0), p(d + 80.0, 2.0 * h + 80.0));
    side.rect(p(0.0, 2.0 * h), p(MACHINE_INSERT * 1.5, 2.0 * h + 40.0), Style::filled(Color::LIGHT_GRAY, Color::GRAY))
        .label(p(MACHINE_INSERT * 0.75, 2.0 * h + 20.0), "coin machine", Color::BLACK)
        .rect(p(0.0, h), p(d, 2.0 * h), Style::filled(Color::LIGHT_BLUE, Color::BLUE))
        .polygon(
            vec![p(0.0, h), p(d, h), p(offset + r, 0.0), p(offset - r, 0.0)],
            Style::filled(Color::LIGHT_GREEN, Color::GREEN),
        )
        .line(p(offset, 0.0), p(offset, -15.0), Style::outline(Color::GREEN, 3.0))
        .label(p(offset, -30.0), "outlet", Color::GREEN)
        .line(
            p(MACHINE_INSERT, -10.0),
            p(MACHINE_INSERT, 2.0 * h + 60.0),
            Style::outline(Color::RED, 2.0).dashed(),
        )
        .dimension(p(0.0, h - 8.0), p(MACHINE_INSERT, h - 8.0), format!("insert {MACHINE_INSERT}mm"), Color::RED)
        .dimension(p(d + 20.0, 0.0), p(d + 20.0, 2.0 * h), format!("{}mm", 2.0 * h), Color::BLACK);

    Ok(Figure::new("Coin chute: outlet position").panel(top).panel(side))
}

/// Side sections of the same box with a flat floor and with a sloped floor.
///
/// On the flat floor everything behind the outlet is a retention zone where
/// coins come to rest; on the sloped floor they slide toward the outlet.
pub fn slope_comparison(params: &ChuteParams) -> Result<Figure, ValidationError> {
    params.validate()?;
    let (d, h) = (params.outer_depth, params.part_height);
    let r = params.outlet_diameter / 2.0;
    let offset = outlet_distance(params);
    let slope = params.slope(0.0)?;
    let drop = slope.total_drop;
    let box_top = 2.0 * h;
    let window = (p(-40.0, -50.0), p(d + 80.0, box_top.max(drop) + 50.0));

    let mut flat = Panel::new("Flat floor", window.0, window.1);
    flat.rect(p(0.0, 0.0), p(d, box_top), Style::filled(Color::LIGHT_BLUE, Color::BLUE))
        .line(p(0.0, 0.0), p(d, 0.0), Style::outline(Color::RED, 4.0))
        .rect(
            p(offset + r, 0.0),
            p(d, 4.0 * COIN_RADIUS),
            Style::filled(Color::YELLOW, Color::ORANGE).dashed(),
        )
        .label(p((offset + r + d) / 2.0, 6.0 * COIN_RADIUS), "coins stuck: retention zone", Color::RED);
    for k in 0..4 {
        let x = offset + r + 20.0 + 30.0 * k as Real;
        if x + COIN_RADIUS < d {
            flat.circle(p(x, COIN_RADIUS), COIN_RADIUS, Style::filled(Color::ORANGE, Color::ORANGE));
        }
    }
    flat.line(p(offset, 0.0), p(offset, -20.0), Style::outline(Color::GREEN, 3.0))
        .label(p(offset, -35.0), format!("outlet {offset}mm from front"), Color::GREEN);

    let y_at = |x: Real| slope.elevation(params.front_y() + x);
    let mut sloped = Panel::new(format!("Sloped floor ({}°)", params.slope_angle), window.0, window.1);
    sloped
        .rect(p(0.0, 0.0), p(d, box_top), Style::filled(Color::LIGHT_BLUE, Color::BLUE))
        .polygon(
            vec![p(0.0, 0.0), p(d, 0.0), p(d, y_at(d))],
            Style::filled(Color::LIGHT_GREEN, Color::GREEN),
        )
        .line(p(0.0, y_at(0.0)), p(d, y_at(d)), Style::outline(Color::GREEN, 4.0))
        .dimension(p(d + 25.0, 0.0), p(d + 25.0, drop), format!("{drop:.1}mm drop"), Color::GREEN)
        .label(p(d / 2.0, y_at(d / 2.0) + 40.0), "coins slide to the outlet", Color::GREEN);
    for k in 0..4 {
        let x = offset + r + 40.0 + 40.0 * k as Real;
        if x + COIN_RADIUS < d {
            sloped.circle(p(x, y_at(x) + COIN_RADIUS), COIN_RADIUS, Style::filled(Color::ORANGE, Color::ORANGE));
        }
    }
    sloped
        .line(p(offset, y_at(offset)), p(offset, -20.0), Style::outline(Color::GREEN, 3.0))
        .label(p(offset, -35.0), format!("outlet {offset}mm from front"), Color::GREEN);

    Ok(Figure::new("Coin chute: slope comparison").panel(flat).panel(sloped))
}

/// A level box with only its floor sloped, against a box sloped as a whole.
///
/// Only the first [`MACHINE_INSERT`] millimeters rest on the machine. With a
/// level box the span behind that is unsupported and sags; sloping the whole
/// box keeps the floor angle without relying on that span.
pub fn structure_comparison(params: &ChuteParams) -> Result<Figure, ValidationError> {
    params.validate()?;
    let (d, h, t) = (params.outer_depth, params.part_height, params.wall_thickness);
    let drop = params.slope(0.0)?.total_drop;
    let window = (p(-40.0, -70.0), p(d + 90.0, h + drop + 60.0));

    let mut level = Panel::new("Floor sloped inside a level box", window.0, window.1);
    level
        .rect(p(0.0, 0.0), p(MACHINE_INSERT, h + 30.0), Style::filled(Color::LIGHT_GRAY, Color::GRAY))
        .label(p(MACHINE_INSERT / 2.0, h + 40.0), "machine", Color::BLACK)
        .rect(p(0.0, 0.0), p(d, h), Style::outline(Color::BLUE, 3.0))
        .polygon(
            vec![p(t, t), p(d - t, t), p(d - t, (t + drop).min(h - t))],
            Style::filled(Color::YELLOW, Color::ORANGE),
        )
        .line(
            p(MACHINE_INSERT, -10.0),
            p(MACHINE_INSERT, h + 50.0),
            Style::outline(Color::RED, 2.0).dashed(),
        )
        .dimension(
            p(MACHINE_INSERT, -20.0),
            p(d, -20.0),
            format!("unsupported: {}mm", d - MACHINE_INSERT),
            Color::RED,
        )
        .line(p(d / 2.0 + 50.0, h / 2.0), p(d / 2.0 + 50.0, -45.0), Style::outline(Color::RED, 3.0))
        .label(p(d / 2.0 + 50.0, -60.0), "sags: no support", Color::RED);

    let mut whole = Panel::new("Whole box sloped", window.0, window.1);
    whole
        .rect(p(0.0, 0.0), p(MACHINE_INSERT, h + 30.0), Style::filled(Color::LIGHT_GRAY, Color::GRAY))
        .label(p(MACHINE_INSERT / 2.0, h + 40.0), "machine", Color::BLACK)
        .polygon(
            vec![p(0.0, 0.0), p(d, 0.0), p(d, h + drop), p(0.0, h)],
            Style::filled(Color::LIGHT_GREEN, Color::GREEN),
        )
        .line(p(0.0, t), p(d, t + drop), Style::outline(Color::GREEN, 3.0))
        .dimension(p(-20.0, 0.0), p(-20.0, h), format!("{h:.0}mm"), Color::GREEN)
        .dimension(p(d + 20.0, 0.0), p(d + 20.0, h + drop), format!("{:.0}mm", h + drop), Color::GREEN)
        .dimension(p(d + 50.0, h), p(d + 50.0, h + drop), format!("{drop:.1}mm"), Color::GREEN)
        .line(
            p(MACHINE_INSERT, -10.0),
            p(MACHINE_INSERT, h + 50.0),
            Style::outline(Color::RED, 2.0).dashed(),
        )
        .label(p(d / 2.0 + 50.0, -60.0), "keeps its angle", Color::GREEN);

    Ok(Figure::new("Coin chute: box structure").panel(level).panel(whole))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sloped() -> ChuteParams {
        ChuteParams {
            slope_angle: 20.0,
            outlet_offset: Some(80.0),
            ..ChuteParams::default()
        }
    }

    #[test]
    fn every_view_has_two_panels() {
        for figure in [
            top_view(&sloped()).unwrap(),
            slope_comparison(&sloped()).unwrap(),
            structure_comparison(&sloped()).unwrap(),
        ] {
            assert_eq!(figure.panels.len(), 2, "{}", figure.title);
            assert!(figure.panels.iter().all(|panel| !panel.marks.is_empty()));
        }
    }

    #[test]
    fn views_reject_invalid_parameters() {
        let params = ChuteParams {
            slope_angle: 95.0,
            ..sloped()
        };
        assert!(slope_comparison(&params).is_err());
        assert!(structure_comparison(&params).is_err());
    }

    #[cfg(feature = "svg-io")]
    #[test]
    fn slope_figure_labels_the_drop() {
        let text = slope_comparison(&sloped()).unwrap().to_svg().to_string();
        assert!(text.contains("114.7mm drop"));
        assert!(text.contains("retention zone"));
    }
}
