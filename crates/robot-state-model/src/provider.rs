//! Model Provider 接口
//!
//! 快照构建器只通过 [`ModelProvider`] 访问模型：枚举 link、查询 link 的全局变换。
//! 任何能给出"link 列表 + 全局齐次变换"的模型（本 crate 的 [`KinematicModel`]、
//! 外部求解器的绑定、测试用的 mock）都可以作为快照来源。
//!
//! [`KinematicModel`]: crate::KinematicModel

use crate::error::ModelError;
use nalgebra::Matrix4;
use parking_lot::RwLock;
use std::sync::Arc;

/// link 的全局齐次变换（4×4，左上 3×3 为旋转矩阵，右上 3×1 为平移）
pub type GlobalTransform = Matrix4<f64>;

/// Model Provider Trait
///
/// # 顺序约定
///
/// `link_names()` 的返回顺序就是快照中记录的顺序；实现必须保证对未修改的模型
/// 多次调用结果完全一致。
///
/// # 线程安全
///
/// 实现本身不要求内部加锁。需要在其他线程修改模型时，用 `parking_lot::RwLock`
/// 包裹模型（本模块为 `RwLock<M>` 提供了实现，每次调用各自取读锁）。
pub trait ModelProvider: Send + Sync {
    /// 句柄是否有效（已初始化、可读取）
    fn is_valid(&self) -> bool {
        true
    }

    /// 按模型原生顺序枚举所有 link 名称
    fn link_names(&self) -> Vec<String>;

    /// 查询 link 的全局变换
    ///
    /// # Errors
    /// - `ModelError::UnknownLink`: link 不存在
    /// - 其他实现相关的计算失败
    fn global_link_transform(&self, link: &str) -> Result<GlobalTransform, ModelError>;
}

impl<M: ModelProvider + ?Sized> ModelProvider for &M {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn link_names(&self) -> Vec<String> {
        (**self).link_names()
    }

    fn global_link_transform(&self, link: &str) -> Result<GlobalTransform, ModelError> {
        (**self).global_link_transform(link)
    }
}

impl<M: ModelProvider + ?Sized> ModelProvider for Box<M> {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn link_names(&self) -> Vec<String> {
        (**self).link_names()
    }

    fn global_link_transform(&self, link: &str) -> Result<GlobalTransform, ModelError> {
        (**self).global_link_transform(link)
    }
}

impl<M: ModelProvider + ?Sized> ModelProvider for Arc<M> {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn link_names(&self) -> Vec<String> {
        (**self).link_names()
    }

    fn global_link_transform(&self, link: &str) -> Result<GlobalTransform, ModelError> {
        (**self).global_link_transform(link)
    }
}

// 每次调用单独取读锁：一次快照期间若有写者插入，结果可能跨越两个时刻
impl<M: ModelProvider> ModelProvider for RwLock<M> {
    fn is_valid(&self) -> bool {
        self.read().is_valid()
    }

    fn link_names(&self) -> Vec<String> {
        self.read().link_names()
    }

    fn global_link_transform(&self, link: &str) -> Result<GlobalTransform, ModelError> {
        self.read().global_link_transform(link)
    }
}
