// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property sweeps over roof types, walls and element kinds

use approx::assert_relative_eq;
use hall_envelope_core::{
    ElementSize, FacadeElement, FacadeElementKind, HallDimensions, RoofElement, RoofElementKind,
    RoofType, Wall,
};
use hall_envelope_geometry::{
    derive_roof_geometry, place_new_element, transform_facade_element, transform_roof_element,
    CanvasSize, FacadeCanvas, OccupiedSpan, PlacementStrategy, Point2, RoofCanvas, ROOF_CLEARANCE,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::{FRAC_PI_2, PI};

const WALL_THICKNESS: f64 = 0.15;

fn sample_dims() -> Vec<HallDimensions> {
    let mut dims = Vec::new();
    for roof_type in RoofType::ALL {
        for (length, width, height) in [(20.0, 15.0, 6.0), (48.0, 24.0, 9.5), (8.0, 12.0, 3.0)] {
            for pitch in [0.0, 5.0, 20.0, roof_type.max_pitch()] {
                dims.push(HallDimensions::new(length, width, height, roof_type, pitch));
            }
        }
    }
    dims
}

#[test]
fn roof_pose_converges_to_flat_as_pitch_vanishes() {
    let base = HallDimensions::flat(30.0, 12.0, 6.0);
    let size = ElementSize::new(1.3, 0.08);

    for roof_type in [RoofType::Gable, RoofType::Monopitch] {
        for z in [-5.0, -2.0, 0.0, 1.5, 5.0] {
            let el = RoofElement::new("r", RoofElementKind::RoofWindow, size).at(3.0, z);
            let flat = transform_roof_element(&el, &base).unwrap();

            let mut previous_gap = f64::INFINITY;
            for pitch in [10.0, 1.0, 0.1, 0.001] {
                let pose = transform_roof_element(&el, &base.with_roof(roof_type, pitch)).unwrap();
                let gap = (pose.position - flat.position).norm() + pose.rotation.x.abs();
                assert!(gap <= previous_gap + 1e-12);
                previous_gap = gap;
            }
            assert!(previous_gap < 1e-3);

            let zero = transform_roof_element(&el, &base.with_roof(roof_type, 0.0)).unwrap();
            assert_relative_eq!(zero.position, flat.position, epsilon = 1e-12);
            assert_eq!(zero.rotation.x.abs(), 0.0);
        }
    }
}

#[test]
fn doors_always_stand_on_the_ground() {
    let kinds = [
        FacadeElementKind::Door,
        FacadeElementKind::SectionalDoor,
        FacadeElementKind::WindowedSectionalDoor,
    ];
    for dims in sample_dims() {
        for wall in Wall::ALL {
            for kind in kinds {
                for (height, stored) in [(2.1, 0.0), (3.0, 7.5), (4.5, -2.0), (0.5, 1.0)] {
                    let el = FacadeElement::new("d", kind, wall, ElementSize::new(1.0, height))
                        .at(1.0, stored);
                    let pose = transform_facade_element(&el, &dims, WALL_THICKNESS).unwrap();
                    assert_eq!(pose.position.y, height / 2.0);
                }
            }
        }
    }
}

#[test]
fn facade_elements_face_outward() {
    let expected = [
        (Wall::North, PI),
        (Wall::South, 0.0),
        (Wall::East, -FRAC_PI_2),
        (Wall::West, FRAC_PI_2),
    ];
    for dims in sample_dims() {
        for (wall, yaw) in expected {
            for kind in FacadeElementKind::ALL {
                let el = FacadeElement::new("e", kind, wall, kind.default_size(wall.span(&dims)))
                    .at(-0.7, 1.9);
                let pose = transform_facade_element(&el, &dims, WALL_THICKNESS).unwrap();
                assert_eq!(pose.rotation.x, 0.0);
                assert_eq!(pose.rotation.y, yaw);
                assert_eq!(pose.rotation.z, 0.0);

                // Outside the wall line on the wall's own axis
                let outward = if wall.is_length_wall() {
                    pose.position.z
                } else {
                    pose.position.x
                };
                assert!(outward * wall.outward_sign() > wall.half_depth(&dims));
            }
        }
    }
}

#[test]
fn facade_editor_round_trips_on_every_wall() {
    for dims in sample_dims() {
        for wall in Wall::ALL {
            let editor = FacadeCanvas::new(wall, dims, CanvasSize::new(700.0, 260.0), WALL_THICKNESS).unwrap();
            let span = editor.span();
            for fx in [-0.45, -0.1, 0.0, 0.3, 0.45] {
                for fy in [0.05, 0.5, 0.95] {
                    let p = Point2::new(fx * span.x, fy * span.y);
                    let back = editor.to_local(editor.to_canvas(p));
                    assert_relative_eq!(back, p, epsilon = 1e-9);
                }
            }
        }
    }
}

#[test]
fn roof_editor_round_trips_for_all_roof_types() {
    for dims in sample_dims() {
        let editor = RoofCanvas::new(dims, CanvasSize::new(640.0, 320.0)).unwrap();
        for fx in [-0.45, 0.0, 0.2] {
            for fz in [-0.49, -0.25, -0.01, 0.0, 0.01, 0.3, 0.49] {
                let p = Point2::new(fx * dims.length, fz * dims.width);
                let back = editor.to_local(editor.to_canvas(p));
                assert_relative_eq!(back, p, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn roof_drag_height_matches_transform() {
    for dims in sample_dims() {
        let editor = RoofCanvas::new(dims, CanvasSize::new(640.0, 320.0)).unwrap();
        let el = RoofElement::new("r", RoofElementKind::RoofWindow, ElementSize::new(1.0, 0.08));
        for pixel in [Point2::new(10.0, 10.0), Point2::new(320.0, 159.0), Point2::new(600.0, 300.0)] {
            let dragged = editor.drag_to(&el, pixel).unwrap();
            let pose = transform_roof_element(&dragged.element, &dims).unwrap();
            assert_eq!(dragged.pose, pose);

            let roof = derive_roof_geometry(&dims);
            let surface = roof.surface_height_at(dragged.element.z).unwrap();
            assert_relative_eq!(pose.position.y, surface + ROOF_CLEARANCE, epsilon = 1e-12);
        }
    }
}

#[test]
fn gable_sign_rule() {
    let dims = HallDimensions::new(20.0, 10.0, 5.0, RoofType::Gable, 20.0);
    let angle = (10.0_f64 * 0.2 / (10.0 / 2.0)).atan();
    assert_relative_eq!(angle, 0.3805, epsilon = 1e-4);

    let size = ElementSize::new(1.3, 0.08);
    let front = RoofElement::new("f", RoofElementKind::RoofWindow, size).at(0.0, -2.0);
    let back = RoofElement::new("b", RoofElementKind::RoofWindow, size).at(0.0, 2.0);

    assert_relative_eq!(transform_roof_element(&front, &dims).unwrap().rotation.x, -angle);
    assert_relative_eq!(transform_roof_element(&back, &dims).unwrap().rotation.x, angle);
}

#[test]
fn monopitch_mid_span_height() {
    let dims = HallDimensions::new(20.0, 8.0, 5.0, RoofType::Monopitch, 25.0);
    let el = RoofElement::new("r", RoofElementKind::RoofWindow, ElementSize::new(1.3, 0.08)).at(0.0, 0.0);
    let pose = transform_roof_element(&el, &dims).unwrap();
    assert_relative_eq!(pose.position.y, 6.0, epsilon = ROOF_CLEARANCE + 1e-12);
}

#[test]
fn wider_than_span_is_centered() {
    let mut rng = StdRng::seed_from_u64(11);
    for dims in sample_dims() {
        for wall in Wall::ALL {
            let span = wall.span(&dims);
            let el = FacadeElement::new(
                "lb",
                FacadeElementKind::LightBand,
                wall,
                ElementSize::new(span + 1.0, 0.6),
            )
            .at(span, 2.0);
            let pose = transform_facade_element(&el, &dims, WALL_THICKNESS).unwrap();
            let along = if wall.is_length_wall() {
                pose.position.x
            } else {
                pose.position.z
            };
            assert_eq!(along, 0.0);

            let placement = place_new_element(span + 1.0, span, &[], 0.5, &mut rng);
            assert_eq!(placement.offset, 0.0);
        }
    }
}

#[test]
fn placement_avoids_two_existing_elements() {
    let mut rng = StdRng::seed_from_u64(3);
    let width = 1.2;
    for span in [10.0, 15.0, 20.0, 36.0] {
        let layouts = [
            [OccupiedSpan::new(-span / 4.0, 2.0), OccupiedSpan::new(span / 4.0, 2.0)],
            [OccupiedSpan::new(-span / 3.0, 3.0), OccupiedSpan::new(0.0, 1.0)],
            [OccupiedSpan::new(-2.0, 1.5), OccupiedSpan::new(span / 3.0, 0.9)],
        ];
        for existing in layouts {
            let placement = place_new_element(width, span, &existing, 0.5, &mut rng);
            assert_eq!(placement.strategy, PlacementStrategy::Candidate);
            assert!(placement.offset.abs() <= span / 2.0 - width / 2.0);
            for e in &existing {
                assert!((placement.offset - e.center).abs() > (width + e.width) / 2.0);
            }
        }
    }
}
