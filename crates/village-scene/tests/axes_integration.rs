use std::f32::consts::PI;

use glam::{Quat, Vec3};
use village_core::{SceneSnapshot, Transform, World};
use village_scene::axes::{arrow_points, label_position};
use village_scene::{
    Axis, AxisLength, LinesRenderer, SceneContext, build_global_axes, build_local_axes,
    object_kind,
};

fn len(l: f32) -> AxisLength {
    AxisLength::new(l).unwrap()
}

fn world_points(world: &World, entity: village_core::EntityId) -> Vec<Vec3> {
    let matrix = world.world_matrix(entity);
    world
        .get::<LinesRenderer>(entity)
        .unwrap()
        .0
        .points
        .iter()
        .map(|p| matrix.transform_point3(*p))
        .collect()
}

#[test]
fn global_axes_of_length_six() {
    let mut world = World::new();
    let axes = build_global_axes(&mut world, len(6.0)).unwrap();

    let x = world_points(&world, axes.arrow(Axis::X).entity);
    assert_eq!(
        x,
        vec![
            Vec3::ZERO,
            Vec3::new(6.0, 0.0, 0.0),
            Vec3::new(5.7, 0.3, 0.0),
            Vec3::new(6.0, 0.0, 0.0),
            Vec3::new(5.7, -0.3, 0.0),
        ]
    );

    let labels: Vec<Vec3> = Axis::ALL
        .iter()
        .map(|axis| world.world_position(axes.label(*axis).entity))
        .collect();
    assert!(labels[0].abs_diff_eq(Vec3::new(5.4, -0.3, 0.0), 1e-5));
    assert!(labels[1].abs_diff_eq(Vec3::new(0.0, 5.4, -0.3), 1e-5));
    assert!(labels[2].abs_diff_eq(Vec3::new(0.0, 0.3, 5.4), 1e-5));
}

#[test]
fn local_axes_follow_a_rotated_parent() {
    let mut world = World::new();
    let child = world.create_transform_node("child").unwrap();
    world
        .set_transform(
            child,
            Transform::from_position(Vec3::new(0.0, 2.0, 0.0)).with_euler(PI / 4.0, PI / 4.0, PI / 4.0),
        )
        .unwrap();

    let axes = build_local_axes(&mut world, len(1.0)).unwrap();
    axes.attach_to(&mut world, child).unwrap();

    let child_matrix = world.world_matrix(child);
    for axis in Axis::ALL {
        let expected: Vec<Vec3> = arrow_points(axis, len(1.0))
            .iter()
            .map(|p| child_matrix.transform_point3(*p))
            .collect();
        let actual = world_points(&world, axes.arrow(axis).entity);
        for (a, e) in actual.iter().zip(&expected) {
            assert!(a.abs_diff_eq(*e, 1e-5), "{axis:?}: {a} != {e}");
        }
        // 根元は親の原点
        assert!(actual[0].abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-5));
    }
}

#[test]
fn local_axes_move_rigidly_with_their_parent() {
    let mut world = World::new();
    let parent = world.create_transform_node("parent").unwrap();
    let axes = build_local_axes(&mut world, len(2.0)).unwrap();
    axes.attach_to(&mut world, parent).unwrap();

    let before = world_points(&world, axes.arrow(Axis::Z).entity);

    let offset = Vec3::new(3.0, -1.0, 0.5);
    let rotation = Quat::from_rotation_y(PI / 3.0);
    world
        .set_transform(parent, Transform::new(offset, rotation, Vec3::ONE))
        .unwrap();

    let after = world_points(&world, axes.arrow(Axis::Z).entity);
    for (b, a) in before.iter().zip(&after) {
        assert!((rotation * *b + offset).abs_diff_eq(*a, 1e-5));
    }
}

#[test]
fn building_twice_yields_equal_geometry() {
    let mut world = World::new();
    let first = build_global_axes(&mut world, len(4.0)).unwrap();
    let second = build_global_axes(&mut world, len(4.0)).unwrap();
    for axis in Axis::ALL {
        assert_ne!(first.arrow(axis).entity, second.arrow(axis).entity);
        assert_eq!(
            world_points(&world, first.arrow(axis).entity),
            world_points(&world, second.arrow(axis).entity)
        );
        assert_eq!(
            world.world_position(first.label(axis).entity),
            label_position(axis, len(4.0))
        );
    }
}

#[test]
fn disposing_the_anchor_removes_local_axes() {
    let mut world = World::new();
    let anchor = world.create_transform_node("anchor").unwrap();
    let axes = build_local_axes(&mut world, len(1.0)).unwrap();
    axes.attach_to(&mut world, anchor).unwrap();
    assert_eq!(world.entity_count(), 5);

    world.dispose(anchor);
    assert_eq!(world.entity_count(), 0);
    assert!(!world.is_alive(axes.origin));
}

#[test]
fn snapshot_lists_axis_objects() {
    let mut world = World::new();
    build_global_axes(&mut world, len(6.0)).unwrap();
    build_local_axes(&mut world, len(1.0)).unwrap();

    let snapshot = SceneSnapshot::capture_with(&world, object_kind);
    assert_eq!(snapshot.entities.len(), 10);
    assert_eq!(snapshot.find_by_name("TextPlane").count(), 3);
    let origin = snapshot.find_by_name("local_origin").next().unwrap();
    assert_eq!(origin.kind, Some("transform_node"));
    assert_eq!(origin.children.len(), 3);
    let x = snapshot.find_by_name("axisX").next().unwrap();
    assert_eq!(x.kind, Some("lines"));

    let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(json["entities"].as_array().unwrap().len(), 10);
}
