//! 快照采集性能基准测试
//!
//! 测试六轴机械臂在不同访问方式下的快照采集与序列化开销。

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use parking_lot::RwLock;
use robot_state::model::JointSpec;
use robot_state::{KinematicModel, ModelDescription, capture_link_poses};
use std::f64::consts::FRAC_PI_2;

fn six_axis_arm() -> KinematicModel {
    let mut desc = ModelDescription::new("bench_arm").with_link("base_link");
    let mut parent = "base_link".to_string();
    for i in 1..=6 {
        let child = format!("link{}", i);
        let rpy = if i % 2 == 0 { [FRAC_PI_2, 0.0, 0.0] } else { [0.0; 3] };
        desc = desc.with_link(child.clone()).with_joint(
            JointSpec::revolute(format!("joint{}", i), parent.clone(), child.clone())
                .with_origin([0.0, 0.05, 0.1], rpy)
                .with_limits(-2.5, 2.5),
        );
        parent = child;
    }
    desc = desc
        .with_link("tool0")
        .with_joint(JointSpec::fixed("flange", parent, "tool0").with_origin([0.0, 0.0, 0.08], [0.0; 3]));

    let mut model = KinematicModel::from_description(&desc).unwrap();
    model
        .set_joint_positions((1..=6).map(|i| (format!("joint{}", i), 0.1 * i as f64)))
        .unwrap();
    model
}

fn bench_capture(c: &mut Criterion) {
    let model = six_axis_arm();
    c.bench_function("capture_link_poses", |b| {
        b.iter(|| capture_link_poses(black_box(&model)).unwrap())
    });

    // 每个 link 单独取读锁
    let shared = RwLock::new(six_axis_arm());
    c.bench_function("capture_link_poses_rwlock", |b| {
        b.iter(|| capture_link_poses(black_box(&shared)).unwrap())
    });

    // 整个快照只取一次读锁
    c.bench_function("capture_link_poses_rwlock_batch", |b| {
        b.iter(|| capture_link_poses(&*black_box(&shared).read()).unwrap())
    });
}

fn bench_serialize(c: &mut Criterion) {
    let snapshot = capture_link_poses(&six_axis_arm()).unwrap();
    c.bench_function("snapshot_to_json", |b| {
        b.iter(|| black_box(&snapshot).to_json().unwrap())
    });
}

criterion_group!(benches, bench_capture, bench_serialize);
criterion_main!(benches);
