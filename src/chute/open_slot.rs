//! Straight upper tube over a boxed lower part with a rectangular slot.
//!
//! The slot is bored through the sloped floor near the front edge, so coins
//! leave through a wide opening instead of a round hole.

use crate::chute::Chute;
use crate::chute::funnel::sloped_base;
use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::mesh::{Part, Surface};
use crate::shapes::{Elevation, Shell};
use crate::sketch::{Inset, Section};

pub fn build(chute: &Chute, slot_width: Real, slot_length: Real) -> Result<Vec<Part>, ValidationError> {
    let p = &chute.params;
    let height = p.part_height;
    let slot = Section::slot(slot_width, slot_length, p.outlet_center());
    p.check_outlet(&slot)?;

    let outer = p.footprint();
    let inner = outer.inset(p.wall_thickness)?;
    let upper = Shell::new(chute.part_name("upper"), p.segment_count)?
        .ring(Surface::Outer, &outer, Elevation::Flat(2.0 * height))?
        .ring(Surface::BottomCap, &outer, Elevation::Flat(height))?
        .ring(Surface::Inner, &inner, Elevation::Flat(height))?
        .ring(Surface::TopCap, &inner, Elevation::Flat(2.0 * height))?
        .close()?;

    let lower = sloped_base(chute, &slot, height)?
        .ring(Surface::TopCap, &inner, Elevation::Flat(height))?
        .close()?;
    Ok(vec![upper, lower])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chute::{ChuteParams, Design};
    use approx::assert_relative_eq;

    fn open_slot(slot_width: Real, slot_length: Real) -> Chute {
        Chute::new(
            "open_slot",
            Design::OpenSlot { slot_width, slot_length },
            ChuteParams {
                slope_angle: 20.0,
                outlet_offset: Some(40.0),
                ..ChuteParams::default()
            },
        )
    }

    #[test]
    fn slot_sits_on_the_slope() {
        let parts = open_slot(100.0, 30.0).build().unwrap();
        let lower = &parts[1];
        // front edge of the slot, 25 mm behind the footprint front
        let floor_front = lower
            .vertices
            .iter()
            .filter(|v| (v.y + 132.5).abs() < 1e-9 && v.x.abs() <= 50.0 && v.z > 0.0)
            .map(|v| v.z)
            .fold(Real::INFINITY, Real::min);
        assert_relative_eq!(floor_front, 2.0 + 25.0 * (20.0 as Real).to_radians().tan(), epsilon = 1e-9);
    }

    #[test]
    fn lower_part_fills_the_footprint_from_the_bed() {
        let parts = open_slot(100.0, 30.0).build().unwrap();
        let lower = &parts[1];
        let (min, max) = lower.bounding_box().unwrap();
        assert_relative_eq!(min, nalgebra::Point3::new(-120.0, -157.5, 0.0));
        assert_relative_eq!(max, nalgebra::Point3::new(120.0, 157.5, 60.0));
        assert!(lower.signed_volume() > 0.0);
        assert!(lower.count(Surface::BottomCap) > 0);
    }

    #[test]
    fn slot_on_a_floor_above_the_rim_is_rejected() {
        let mut chute = open_slot(100.0, 30.0);
        chute.params.slope_angle = 70.0;
        chute.params.outlet_offset = Some(200.0);
        assert!(matches!(chute.build(), Err(ValidationError::FloorOutOfRange { .. })));
    }

    #[test]
    fn slot_thinner_than_two_walls_is_rejected() {
        assert!(matches!(
            open_slot(100.0, 4.0).build(),
            Err(ValidationError::NonPositiveDimension { .. })
        ));
    }
}
