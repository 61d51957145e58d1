//! 刚体变换工具
//!
//! 关节原点、关节运动到 `Isometry3` 的转换。

use crate::description::{JointKind, Origin};
use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

/// 轴向量长度下限，小于此值视为零轴
pub(crate) const AXIS_NORM_EPSILON: f64 = 1e-9;

/// 原点 → 刚体变换
///
/// rpy 为固定轴 X-Y-Z 顺序（R = Rz(yaw)·Ry(pitch)·Rx(roll)）。
pub(crate) fn origin_to_isometry(origin: &Origin) -> Isometry3<f64> {
    let [x, y, z] = origin.xyz;
    let [roll, pitch, yaw] = origin.rpy;
    Isometry3::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    )
}

/// 关节运动部分（joint 坐标系内）
pub(crate) fn joint_motion(
    kind: JointKind,
    axis: &Unit<Vector3<f64>>,
    position: f64,
) -> Isometry3<f64> {
    match kind {
        JointKind::Fixed => Isometry3::identity(),
        JointKind::Revolute | JointKind::Continuous => {
            Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(axis, position),
            )
        },
        JointKind::Prismatic => {
            Isometry3::from_parts(
                Translation3::from(axis.into_inner() * position),
                UnitQuaternion::identity(),
            )
        },
    }
}

/// 变换中所有分量是否有限
pub(crate) fn is_finite(iso: &Isometry3<f64>) -> bool {
    iso.translation.vector.iter().all(|v| v.is_finite())
        && iso.rotation.coords.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_origin_translation_only() {
        let iso = origin_to_isometry(&Origin {
            xyz: [1.0, 2.0, 3.0],
            rpy: [0.0, 0.0, 0.0],
        });
        assert_eq!(iso.translation.vector, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(iso.rotation, UnitQuaternion::identity());
    }

    #[test]
    fn test_origin_yaw() {
        let iso = origin_to_isometry(&Origin {
            xyz: [0.0, 0.0, 0.0],
            rpy: [0.0, 0.0, FRAC_PI_2],
        });
        // 绕 Z 轴 90°：X 轴映射到 Y 轴
        let v = iso * nalgebra::Point3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_revolute_motion() {
        let axis = Vector3::z_axis();
        let iso = joint_motion(JointKind::Revolute, &axis, FRAC_PI_2);
        let v = iso * nalgebra::Point3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
        assert_eq!(iso.translation.vector, Vector3::zeros());
    }

    #[test]
    fn test_prismatic_motion() {
        let axis = Vector3::x_axis();
        let iso = joint_motion(JointKind::Prismatic, &axis, 0.25);
        assert_eq!(iso.translation.vector, Vector3::new(0.25, 0.0, 0.0));
        assert_eq!(iso.rotation, UnitQuaternion::identity());
    }

    #[test]
    fn test_fixed_motion_ignores_position() {
        let axis = Vector3::y_axis();
        assert_eq!(
            joint_motion(JointKind::Fixed, &axis, 1.0),
            Isometry3::identity()
        );
    }

    #[test]
    fn test_is_finite() {
        assert!(is_finite(&Isometry3::identity()));
        let bad = Isometry3::translation(f64::NAN, 0.0, 0.0);
        assert!(!is_finite(&bad));
    }
}
