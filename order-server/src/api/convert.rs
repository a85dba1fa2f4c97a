//! 类型转换模块
//!
//! 将数据库模型 (db::models) 转换为 API 响应模型 (shared::models)

use crate::db::models as db;
use shared::models as api;

// ============ Helper ============

pub fn record_id_to_string(id: &surrealdb::RecordId) -> String {
    id.to_string()
}

pub fn option_record_id_to_string(id: &Option<surrealdb::RecordId>) -> String {
    id.as_ref().map(record_id_to_string).unwrap_or_default()
}

// ============ OrderLine ============

impl From<db::DbOrderLine> for api::OrderLine {
    fn from(l: db::DbOrderLine) -> Self {
        Self {
            menu_item: l.menu_item,
            name: l.name,
            quantity: l.quantity,
            price: l.price,
            special_instructions: l.special_instructions,
        }
    }
}

// ============ Order ============

impl From<db::DbOrder> for api::Order {
    fn from(o: db::DbOrder) -> Self {
        Self {
            id: option_record_id_to_string(&o.id),
            order_number: o.order_number,
            table_number: o.table_number,
            items: o.items.into_iter().map(Into::into).collect(),
            total_amount: o.total_amount,
            status: o.status,
            customer_name: o.customer_name,
            customer_phone: o.customer_phone,
            special_requests: o.special_requests,
            is_edited: o.is_edited,
            estimated_time: o.estimated_time,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}
