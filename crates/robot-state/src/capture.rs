//! Link 位姿快照构建
//!
//! 按模型的原生顺序遍历所有 link，把每个 link 的全局齐次变换转换成
//! `[name, tx, ty, tz, qx, qy, qz, qw]` 记录。构建过程只读，不缓存任何结果。

use crate::error::StateError;
use crate::snapshot::{LinkTransform, Snapshot};
use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};
use robot_state_model::{GlobalTransform, ModelProvider};

/// 采集所有 link 的全局位姿
///
/// # Errors
/// - `StateError::ModelUnavailable`: provider 报告自身无效
/// - `StateError::LinkTransform`: 某个 link 的变换查询失败（整个快照中止，不返回部分数据）
pub fn capture_link_poses<P>(provider: &P) -> Result<Snapshot, StateError>
where
    P: ModelProvider + ?Sized,
{
    if !provider.is_valid() {
        return Err(StateError::ModelUnavailable);
    }

    let names = provider.link_names();
    let mut links = Vec::with_capacity(names.len());
    for name in names {
        let transform = match provider.global_link_transform(&name) {
            Ok(transform) => transform,
            Err(source) => {
                tracing::debug!("Snapshot aborted at link '{}': {}", name, source);
                return Err(StateError::LinkTransform { link: name, source });
            },
        };
        links.push(link_transform_from_matrix(name, &transform));
    }

    tracing::debug!("Captured {} link pose(s)", links.len());
    Ok(Snapshot::global(links))
}

/// 由齐次变换矩阵构造 link 位姿
///
/// 旋转部分交给 `UnitQuaternion::from_rotation_matrix`（按迹 / 最大对角元分支），
/// 结果的符号保持原样。
pub fn link_transform_from_matrix(name: impl Into<String>, matrix: &GlobalTransform) -> LinkTransform {
    let translation: Vector3<f64> = matrix.fixed_view::<3, 1>(0, 3).into_owned();
    let rotation: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation));
    LinkTransform::new(name, translation, rotation)
}
