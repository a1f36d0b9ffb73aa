//! Open-topped channel split across the depth axis.
//!
//! Both parts are swept along the depth axis with a U cross-section whose
//! floor follows the slope. The back part is closed by an end wall and has
//! its side walls and floor thinned into a recess at the split. The front part
//! carries the matching boss and ends in a low lip, or opens out over a bare
//! floor slab in front of its side walls.

use crate::chute::{Chute, FrontLip};
use crate::errors::{ValidationError, positive};
use crate::float_types::Real;
use crate::mesh::{Part, Surface};
use crate::shapes::Sweep;
use crate::sketch::Channel;
use crate::sketch::joint::JointPair;
use nalgebra::{Matrix3, Rotation3};

/// Local `(u, v, w)` to world `(-u, w, v)`: sweep axis along +y.
fn back_placement() -> Rotation3<Real> {
    Rotation3::from_matrix_unchecked(Matrix3::new(
        -1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, //
        0.0, 1.0, 0.0,
    ))
}

/// Local `(u, v, w)` to world `(u, -w, v)`: sweep axis along -y.
fn front_placement() -> Rotation3<Real> {
    Rotation3::from_matrix_unchecked(Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, 0.0, -1.0, //
        0.0, 1.0, 0.0,
    ))
}

pub fn build(chute: &Chute, front_depth: Real, lip: FrontLip) -> Result<Vec<Part>, ValidationError> {
    let p = &chute.params;
    let (t, height, joint) = (p.wall_thickness, p.part_height, p.joint);
    positive("front depth behind the lip", front_depth - t)?;
    let back_depth = positive("back depth in front of the end wall", p.outer_depth - front_depth - t)?;
    joint.check_overlap("depth", joint.depth, back_depth)?;

    let floor = p.slope(t)?;
    let (front_y, back_y) = (p.front_y(), p.back_y());
    let split_y = front_y + front_depth;
    let highest = floor.elevation(back_y - t);
    if highest >= height {
        return Err(ValidationError::FloorOutOfRange {
            elevation: highest,
            limit: height,
        });
    }

    let outer = Channel::new(p.outer_width / 2.0, 0.0);
    let inner = |y: Real| Channel::new(outer.half_width - t, floor.elevation(y));
    let pair = JointPair::new(&outer, t, joint.clearance)?;
    let j = joint.depth;

    // Stations run from the back wall toward the split, w = y.
    let closed = inner(back_y).with_bottom(height);
    let back = Sweep::new(chute.part_name("back"), height, pair.recess.half_width)
        .station(back_y, outer, closed, None)
        .station(back_y - t, outer, closed, Some(Surface::EndWall))
        .station(back_y - t, outer, inner(back_y - t), None)
        .station(split_y + j, outer, inner(split_y + j), Some(Surface::Joint))
        .station(split_y + j, outer, pair.recess, None)
        .station(split_y, outer, pair.recess, None)
        .build(Surface::Outer, Surface::Joint, &back_placement())?;

    // Stations run from the front edge toward the split, w = -y.
    let mut front = Sweep::new(chute.part_name("front"), height, pair.boss.half_width);
    front = match lip {
        FrontLip::Wall { height: lip } => {
            let behind = floor.elevation(front_y + t);
            if lip <= behind {
                return Err(ValidationError::FloorOutOfRange {
                    elevation: behind,
                    limit: lip,
                });
            }
            if lip > height {
                return Err(ValidationError::FloorOutOfRange {
                    elevation: lip,
                    limit: height,
                });
            }
            let closed = inner(front_y).with_bottom(lip);
            front
                .station(-front_y, outer, closed, None)
                .station(-front_y - t, outer, closed, Some(Surface::EndWall))
                .station(-front_y - t, outer, inner(front_y + t), None)
        },
        FrontLip::Open { start } => {
            positive("opening start", start)?;
            positive("side walls behind the opening", front_depth - start)?;
            let cut_y = front_y + start;
            front
                .station_at(-front_y, floor.elevation(front_y), outer, inner(front_y), None)
                .station_at(-cut_y, floor.elevation(cut_y), outer, inner(cut_y), Some(Surface::EndWall))
                .station(-cut_y, outer, inner(cut_y), None)
        },
    };
    let front = front
        .station(-split_y, outer, inner(split_y), Some(Surface::Joint))
        .station(-split_y, pair.boss, inner(split_y), None)
        .station(-split_y - j, pair.boss, inner(split_y + j), None)
        .build(Surface::EndWall, Surface::Joint, &front_placement())?;

    Ok(vec![front, back])
}
