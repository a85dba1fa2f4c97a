//! Orders API Handlers
//!
//! Every mutation commits to the database first and broadcasts its event
//! after; subscribers never observe an event for a write that did not
//! happen.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use shared::OrderEvent;
use shared::models::{CreateOrderRequest, EditItemsRequest, Order, OrderStatus, UpdateStatusRequest};

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Optional status filter (`?status=pending`)
    pub status: Option<OrderStatus>,
}

/// GET /api/orders - 获取所有订单 (新到旧)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all(query.status).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| crate::utils::AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order.into()))
}

/// POST /api/orders - 创建订单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let repo = OrderRepository::new(state.db.clone());
    let order: Order = repo.create(payload).await?.into();

    tracing::info!(
        order_number = %order.order_number,
        table = %order.table_number,
        "Order created"
    );
    state.publish_event(OrderEvent::NewOrder(order.clone()));

    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /api/orders/:id/status - 更新订单状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order: Order = repo.update_status(&id, payload.status).await?.into();

    tracing::info!(
        order_number = %order.order_number,
        status = %order.status,
        "Order status updated"
    );
    state.publish_event(OrderEvent::OrderStatusUpdated(order.clone()));

    Ok(Json(order))
}

/// PUT /api/orders/:id/edit-items - 替换订单项目
pub async fn edit_items(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EditItemsRequest>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order: Order = repo.edit_items(&id, payload).await?.into();

    tracing::info!(
        order_number = %order.order_number,
        total = %order.total_amount,
        "Order items edited"
    );
    state.publish_event(OrderEvent::OrderUpdated(order.clone()));

    Ok(Json(order))
}

/// DELETE /api/orders/clear-all/all - 清空所有订单 (管理操作)
pub async fn clear_all(State(state): State<ServerState>) -> AppResult<StatusCode> {
    let repo = OrderRepository::new(state.db.clone());
    repo.delete_all().await?;

    tracing::warn!("All orders cleared");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/orders/table/:table_number - 清空指定桌台的订单
pub async fn clear_table(
    State(state): State<ServerState>,
    Path(table_number): Path<String>,
) -> AppResult<StatusCode> {
    let repo = OrderRepository::new(state.db.clone());
    repo.delete_by_table(&table_number).await?;

    tracing::info!(table = %table_number, "Table orders cleared");
    state.publish_event(OrderEvent::TableOrdersCleared { table_number });

    Ok(StatusCode::NO_CONTENT)
}
