//! Wire models shared between server and clients

pub mod order;

pub use order::{
    CreateOrderRequest, EditItemsRequest, Order, OrderLine, OrderLineInput, OrderStatus,
    SPECIAL_REQUESTS_MAX_LEN, UpdateStatusRequest, total_of,
};
