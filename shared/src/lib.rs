//! Shared types for the QR ordering system
//!
//! These types are shared between `order-server` and `order-client`:
//!
//! - **Models** (`models`): the order data model as it travels over the wire
//!   (camelCase JSON, matching the REST API)
//! - **Events** (`events`): typed order lifecycle events pushed over the
//!   socket channel

pub mod events;
pub mod models;

// Re-export the common types
pub use events::{ClientFrame, OrderEvent};
pub use models::{
    CreateOrderRequest, EditItemsRequest, Order, OrderLine, OrderLineInput, OrderStatus,
    UpdateStatusRequest, total_of,
};
