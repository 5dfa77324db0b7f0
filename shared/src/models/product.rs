//! 商品

use serde::{Deserialize, Serialize};

/// 目录中的商品; `price` 是当前售价, 下单时快照到销售行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    /// 分类被删除后为空
    pub category_id: Option<i64>,
    /// 下架商品仍保留, 历史销售需要关联
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category_id: Option<i64>,
}
