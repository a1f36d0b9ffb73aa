//! One-piece and two-piece transitional funnels, and the boxed hopper that
//! forms the lower part of the sloped designs.

use crate::chute::Chute;
use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::mesh::{Part, Surface};
use crate::shapes::{Elevation, Shell};
use crate::sketch::{Inset, Section};
use log::debug;

/// Hollow transition from `top` (level, at `top_z`) down to `bottom`.
///
/// Both curves are offset inward by `thickness` for the inner wall. The top
/// and bottom rims come out as flat or sloped annuli between the two walls.
pub fn transition(
    name: String,
    segments: usize,
    thickness: Real,
    (top, top_z): (&Section, Real),
    (bottom, bottom_elevation): (&Section, Elevation),
) -> Result<Part, ValidationError> {
    Shell::new(name, segments)?
        .ring(Surface::Outer, top, Elevation::Flat(top_z))?
        .ring(Surface::BottomCap, bottom, bottom_elevation)?
        .ring(Surface::Inner, &bottom.inset(thickness)?, bottom_elevation)?
        .ring(Surface::TopCap, &top.inset(thickness)?, Elevation::Flat(top_z))?
        .close()
}

/// Lower part of a sloped design, up to the hopper wall.
///
/// Outside it is a plain box over the footprint from 0 to `part_height`.
/// `opening` is bored straight through the bottom up to the sloped floor,
/// which sits one wall thickness above the bed at the front edge and rises
/// toward the back, leaving a solid wedge under it. The returned shell ends
/// with the hopper wall band starting on the floor; the caller adds the
/// rings of the rim, the last one tagged [`Surface::TopCap`].
pub fn sloped_base(chute: &Chute, opening: &Section, rim: Real) -> Result<Shell, ValidationError> {
    let p = &chute.params;
    let floor = Elevation::Sloped(p.slope(p.wall_thickness)?);
    let highest = floor.max_over(&opening.sample(p.segment_count)?);
    if highest >= rim {
        return Err(ValidationError::FloorOutOfRange {
            elevation: highest,
            limit: rim,
        });
    }
    debug!("{}: floor rises to {:.3} below the rim at {:.3}", chute.name, highest, rim);

    let footprint = p.footprint();
    Shell::new(chute.part_name("lower"), p.segment_count)?
        .ring(Surface::Outer, &footprint, Elevation::Flat(p.part_height))?
        .ring(Surface::BottomCap, &footprint, Elevation::Flat(0.0))?
        .ring(Surface::Inner, opening, Elevation::Flat(0.0))?
        .ring(Surface::Inner, opening, floor)
}

/// Rectangular intake at `part_height` to the circular outlet at 0.
pub fn body(chute: &Chute) -> Result<Part, ValidationError> {
    let p = &chute.params;
    let outlet = p.outlet()?;
    transition(
        chute.part_name("body"),
        p.segment_count,
        p.wall_thickness,
        (&p.footprint(), p.part_height),
        (&outlet, Elevation::Flat(0.0)),
    )
}

/// Upper part from the intake to an elliptical waist, lower part from the
/// waist to the outlet. The waist is centered over the outlet.
pub fn two_piece(chute: &Chute, waist_width: Real, waist_depth: Real) -> Result<Vec<Part>, ValidationError> {
    let p = &chute.params;
    let outlet = p.outlet()?;
    let waist = Section::ellipse(waist_width, waist_depth, outlet.center());
    p.check_outlet(&waist)?;
    let height = p.part_height;

    let upper = transition(
        chute.part_name("upper"),
        p.segment_count,
        p.wall_thickness,
        (&p.footprint(), 2.0 * height),
        (&waist, Elevation::Flat(height)),
    )?;
    let lower = transition(
        chute.part_name("lower"),
        p.segment_count,
        p.wall_thickness,
        (&waist, height),
        (&outlet, Elevation::Flat(0.0)),
    )?;
    Ok(vec![upper, lower])
}
