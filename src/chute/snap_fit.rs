//! Two stacked parts held together by a lap joint.
//!
//! The upper part is a straight rectangular tube whose wall narrows into a
//! boss below its base. The lower part is a box with a sloped floor, an
//! offset outlet bored through it and a hopper wall from the outlet up to a
//! ledge. Above the ledge a recess rebated into the inside of the top rim
//! takes the boss.

use crate::chute::Chute;
use crate::chute::funnel::sloped_base;
use crate::errors::ValidationError;
use crate::mesh::{Part, Surface};
use crate::shapes::{Elevation, Shell};
use crate::sketch::Inset;
use crate::sketch::joint::JointPair;

pub fn build(chute: &Chute) -> Result<Vec<Part>, ValidationError> {
    let p = &chute.params;
    let (t, height, joint) = (p.wall_thickness, p.part_height, p.joint);
    joint.check_overlap("height", joint.height, height)?;

    let outer = p.footprint();
    let inner = outer.inset(t)?;
    let pair = JointPair::new(&outer, t, joint.clearance)?;
    let shoulder = height - joint.height;

    let lower = sloped_base(chute, &p.outlet()?, shoulder)?
        .ring(Surface::Joint, &inner, Elevation::Flat(shoulder))?
        .ring(Surface::Joint, &pair.recess, Elevation::Flat(shoulder))?
        .ring(Surface::TopCap, &pair.recess, Elevation::Flat(height))?
        .close()?;

    let (base, top) = (height, 2.0 * height);
    let upper = Shell::new(chute.part_name("upper"), p.segment_count)?
        .ring(Surface::Outer, &outer, Elevation::Flat(top))?
        .ring(Surface::BottomCap, &outer, Elevation::Flat(base))?
        .ring(Surface::Joint, &pair.boss, Elevation::Flat(base))?
        .ring(Surface::Joint, &pair.boss, Elevation::Flat(shoulder))?
        .ring(Surface::Inner, &inner, Elevation::Flat(shoulder))?
        .ring(Surface::TopCap, &inner, Elevation::Flat(top))?
        .close()?;

    Ok(vec![upper, lower])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chute::{ChuteParams, Design};
    use approx::assert_relative_eq;

    fn snap_fit(params: ChuteParams) -> Chute {
        Chute::new("snap_fit", Design::SnapFit, params)
    }

    fn preset() -> ChuteParams {
        ChuteParams {
            slope_angle: 20.0,
            outlet_offset: Some(80.0),
            ..ChuteParams::default()
        }
    }

    #[test]
    fn boss_hangs_into_the_recess() {
        let parts = snap_fit(preset()).build().unwrap();
        let (upper_min, upper_max) = parts[0].bounding_box().unwrap();
        let (_, lower_max) = parts[1].bounding_box().unwrap();
        assert_relative_eq!(upper_min.z, 55.0);
        assert_relative_eq!(upper_max.z, 120.0);
        assert_relative_eq!(lower_max.z, 60.0);
        assert!(parts[0].count(Surface::Joint) > 0);
        assert!(parts[1].count(Surface::Joint) > 0);
    }

    #[test]
    fn lower_part_is_a_box_outside() {
        let parts = snap_fit(preset()).build().unwrap();
        let lower = &parts[1];
        let (min, max) = lower.bounding_box().unwrap();
        assert_relative_eq!(min, nalgebra::Point3::new(-120.0, -157.5, 0.0));
        assert_relative_eq!(max, nalgebra::Point3::new(120.0, 157.5, 60.0));
        assert!(lower.signed_volume() > 0.0);

        // every outer wall vertex stands on the footprint outline
        for face in lower.faces.iter().filter(|f| f.surface == Surface::Outer) {
            for p in lower.triangle(face) {
                let on_side = (p.x.abs() - 120.0).abs() < 1e-9 || (p.y.abs() - 157.5).abs() < 1e-9;
                assert!(on_side, "{p:?} is off the box");
            }
        }
    }

    #[test]
    fn outlet_is_bored_up_to_the_floor() {
        let parts = snap_fit(preset()).build().unwrap();
        let lower = &parts[1];
        let tan = (20.0 as crate::float_types::Real).to_radians().tan();
        // front of the outlet, 30 mm behind the footprint front
        let floor_front = lower
            .vertices
            .iter()
            .filter(|v| v.x.abs() < 1e-9 && (v.y + 127.5).abs() < 1e-9)
            .map(|v| v.z)
            .fold(0.0, crate::float_types::Real::max);
        assert_relative_eq!(floor_front, 2.0 + 30.0 * tan, epsilon = 1e-9);
    }

    #[test]
    fn steep_floor_hits_the_recess() {
        let params = ChuteParams {
            slope_angle: 60.0,
            ..preset()
        };
        assert!(matches!(
            snap_fit(params).build(),
            Err(ValidationError::FloorOutOfRange { .. })
        ));
    }

    #[test]
    fn joint_taller_than_part_is_rejected() {
        let mut params = preset();
        params.joint.height = 60.0;
        assert!(matches!(snap_fit(params).build(), Err(ValidationError::JointTooLarge(_))));
    }
}
