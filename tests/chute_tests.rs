mod support;

use approx::assert_relative_eq;
use coin_chute::chute::{Chute, ChuteParams, Design, FrontLip};
use coin_chute::errors::ValidationError;
use coin_chute::float_types::Real;
use coin_chute::mesh::Surface;
use coin_chute::sketch::joint::JointPair;
use coin_chute::sketch::slope::SlopeProfile;
use coin_chute::sketch::{Section, edge_arcs};
use coin_chute::triangulated::facet_normal;
use nalgebra::Point2;

#[test]
fn flat_rectangle_to_circle_scenario() {
    let chute = Chute::new("funnel", Design::Funnel, support::funnel_params());
    let parts = chute.build().unwrap();
    assert_eq!(parts.len(), 1);
    let part = &parts[0];

    // 32 quads per band, two triangles each
    assert_eq!(part.count(Surface::Outer), 64);
    assert_eq!(part.count(Surface::Inner), 64);
    assert_eq!(part.count(Surface::TopCap), 64);
    assert_eq!(part.count(Surface::BottomCap), 64);
    assert_eq!(part.faces.len(), 256);

    let analysis = support::assert_closed(part);
    assert_eq!(analysis.boundary_edges, 0);
    assert_eq!(analysis.euler_characteristic, 0, "a hollow funnel is a torus");
    assert!(analysis.signed_volume > 0.0);
}

#[test]
fn funnel_normals_point_out_of_the_wall() {
    let part = Chute::new("funnel", Design::Funnel, support::funnel_params())
        .build()
        .unwrap()
        .remove(0);
    for face in &part.faces {
        let tri = part.triangle(face);
        let normal = facet_normal(&tri);
        let centroid = (tri[0].coords + tri[1].coords + tri[2].coords) / 3.0;
        let radial = nalgebra::Vector2::new(centroid.x, centroid.y);
        let outward = nalgebra::Vector2::new(normal.x, normal.y).dot(&radial);
        match face.surface {
            Surface::TopCap => assert!(normal.z > 0.99),
            Surface::BottomCap => assert!(normal.z < -0.99),
            Surface::Outer => assert!(outward > 0.0, "outer face turned inward"),
            Surface::Inner => assert!(outward < 0.0, "inner face turned outward"),
            other => panic!("unexpected surface {other:?}"),
        }
    }
}

#[test]
fn every_index_is_inside_the_pool() {
    for chute in Chute::presets() {
        for part in chute.build().unwrap() {
            assert!(part.indices_valid(), "{}", part.name);
            assert!(part.faces.iter().all(|f| f.indices.iter().all(|&i| i < part.vertices.len())));
        }
    }
}

#[test]
fn every_preset_is_closed_with_positive_volume() {
    for chute in Chute::presets() {
        let parts = chute.build().unwrap();
        assert_eq!(parts.len(), if chute.design == Design::Funnel { 1 } else { 2 });
        for part in &parts {
            assert!(part.name.starts_with(&chute.name));
            let analysis = support::assert_closed(part);
            assert_eq!(analysis.boundary_edges, 0, "{} is not watertight", part.name);
            assert!(analysis.signed_volume > 0.0, "{} is wound inside out", part.name);
        }
    }
}

#[test]
fn every_preset_is_solid_behind_every_face() {
    for chute in Chute::presets() {
        let (hw, front, back) = (
            chute.params.outer_width / 2.0,
            chute.params.front_y(),
            chute.params.back_y(),
        );
        for part in chute.build().unwrap() {
            for v in &part.vertices {
                assert!(
                    v.x.abs() <= hw + 1e-9 && v.y >= front - 1e-9 && v.y <= back + 1e-9 && v.z >= -1e-9,
                    "{}: {v:?} lies outside the footprint",
                    part.name
                );
            }
            support::assert_solid(&part);
        }
    }
}

#[test]
fn recess_and_ledge_stay_inside_the_outer_wall() {
    for clearance in [0.15, 0.0] {
        let mut chute = support::preset("snap_fit");
        chute.params.joint.clearance = clearance;
        let p = chute.params;
        let lower = chute.build().unwrap().remove(1);
        let rebate = p.wall_thickness / 2.0 - clearance / 2.0;
        let shoulder = p.part_height - p.joint.height;

        let joint: Vec<_> = lower
            .faces
            .iter()
            .filter(|f| f.surface == Surface::Joint)
            .flat_map(|f| lower.triangle(f))
            .collect();
        assert!(!joint.is_empty());
        for v in &joint {
            assert!(v.x.abs() <= p.outer_width / 2.0 - rebate + 1e-9, "{v:?} cuts into the outer wall");
            assert!(v.y.abs() <= p.outer_depth / 2.0 - rebate + 1e-9, "{v:?} cuts into the outer wall");
            assert!(v.z >= shoulder - 1e-9 && v.z <= p.part_height + 1e-9, "{v:?} is off the rim");
        }
        support::assert_solid(&lower);
    }
}

#[test]
fn open_front_ends_its_walls_over_the_floor_slab() {
    let chute = Chute::new(
        "front_back_open",
        Design::FrontBack {
            front_depth: 100.0,
            lip: FrontLip::Open { start: 40.0 },
        },
        ChuteParams {
            part_height: 120.0,
            slope_angle: 20.0,
            ..ChuteParams::default()
        },
    );
    let parts = chute.build().unwrap();
    let front = &parts[0];
    assert_eq!(front.name, "front_back_open_front");
    let analysis = support::assert_closed(front);
    assert_eq!(analysis.boundary_edges, 0);
    assert!(front.open_edges.is_empty());
    assert!(front.count(Surface::EndWall) > 0);
    support::assert_solid(front);

    let back = support::assert_closed(&parts[1]);
    assert_eq!(back.boundary_edges, 0);
}

#[test]
fn edge_arc_correspondence_is_bijective() {
    for count in [16, 32, 64] {
        let arcs = edge_arcs(count).unwrap();
        let mut seen = vec![0usize; count];
        for arc in &arcs {
            assert_eq!(arc.len(), count / 4);
            for i in arc.clone() {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1), "count {count}: {seen:?}");

        let (hw, hd) = (120.0, 157.5);
        let rect = Section::rectangle(2.0 * hw, 2.0 * hd).sample(count).unwrap();
        let ellipse = Section::ellipse(2.0 * hw, 2.0 * hd, Point2::origin()).sample(count).unwrap();
        for (edge, arc) in arcs.iter().enumerate() {
            for i in arc.clone() {
                let r = rect[i];
                let on_edge = match edge {
                    0 => (r.y + hd).abs(),
                    1 => (r.x - hw).abs(),
                    2 => (r.y - hd).abs(),
                    _ => (r.x + hw).abs(),
                };
                assert!(on_edge < 1e-9, "count {count}: sample {i} is off edge {edge}");

                let (x, y) = (ellipse[i].x / hw, ellipse[i].y / hd);
                let facing = match edge {
                    0 => -y - x.abs(),
                    1 => x - y.abs(),
                    2 => y - x.abs(),
                    _ => -x - y.abs(),
                };
                assert!(facing > -1e-9, "count {count}: arc point {i} does not face edge {edge}");
            }
        }
    }
}

#[test]
fn slope_is_monotonic_with_exact_extremes() {
    let params = support::funnel_params();
    let outlet = Section::circle(100.0, Point2::new(0.0, -77.5)).sample(64).unwrap();
    let angles: [Real; 5] = [0.0, 10.0, 20.0, 45.0, 89.9];
    for angle in angles {
        let slope = SlopeProfile::new(params.front_y(), params.outer_depth, angle, 2.0).unwrap();
        let drop: Real = params.outer_depth * angle.to_radians().tan();
        assert_relative_eq!(slope.elevation(params.front_y()), 2.0);
        assert_relative_eq!(slope.elevation(params.back_y()), 2.0 + drop, max_relative = 1e-12);

        let mut lifted = slope.lift(&outlet);
        lifted.sort_by(|a, b| a.y.total_cmp(&b.y));
        for pair in lifted.windows(2) {
            assert!(pair[1].z >= pair[0].z, "angle {angle}: floor drops toward the back");
        }
    }
    assert_eq!(
        SlopeProfile::new(params.front_y(), params.outer_depth, 90.0, 0.0),
        Err(ValidationError::SlopeAngle(90.0))
    );
}

#[test]
fn zero_clearance_boss_equals_recess() {
    let outer = Section::rectangle(240.0, 315.0);
    let pair = JointPair::new(&outer, 2.0, 0.0).unwrap();
    let boss = pair.boss.sample(32).unwrap();
    let recess = pair.recess.sample(32).unwrap();
    for (b, r) in boss.iter().zip(&recess) {
        assert_relative_eq!(b, r, epsilon = 1e-12);
    }
}

#[test]
fn wall_thicker_than_half_the_outlet_is_rejected() {
    let params = ChuteParams {
        wall_thickness: 51.0,
        ..support::funnel_params()
    };
    let result = Chute::new("funnel", Design::Funnel, params).build();
    assert!(
        matches!(result, Err(ValidationError::NonPositiveDimension { .. })),
        "{result:?}"
    );
}

#[test]
fn segment_count_not_divisible_by_four_is_rejected() {
    for count in [0, 6, 30, 33] {
        let params = ChuteParams {
            segment_count: count,
            ..support::funnel_params()
        };
        assert_eq!(
            Chute::new("funnel", Design::Funnel, params).build().err(),
            Some(ValidationError::SegmentCount(count))
        );
    }
}

#[test]
fn segment_count_scales_every_band() {
    for count in [16, 64] {
        let params = ChuteParams {
            segment_count: count,
            ..support::funnel_params()
        };
        let part = Chute::new("funnel", Design::Funnel, params).build().unwrap().remove(0);
        assert_eq!(part.count(Surface::Outer), 2 * count);
        support::assert_closed(&part);
    }
}

#[test]
fn snap_fit_offset_of_forty_leaves_the_footprint() {
    let mut chute = support::preset("snap_fit");
    chute.params.outlet_offset = Some(40.0);
    assert!(matches!(
        chute.build(),
        Err(ValidationError::OutletOutsideFootprint { .. })
    ));
}

#[test]
fn zero_clearance_snap_fit_still_builds() {
    let mut chute = support::preset("snap_fit");
    chute.params.joint.clearance = 0.0;
    for part in chute.build().unwrap() {
        let analysis = support::assert_closed(&part);
        assert!(analysis.signed_volume > 0.0, "{} is wound inside out", part.name);
        assert_relative_eq!(analysis.signed_volume, part.signed_volume(), max_relative = 1e-9);
        support::assert_solid(&part);
    }
}
