//! HTTP/WebSocket 接口契约测试
//!
//! 在随机端口上启动完整路由 (内存数据库)，用真实的 HTTP 和 WebSocket
//! 客户端验证：状态码、结构化错误体、以及事件对所有连接的全量推送。

use futures::{SinkExt, StreamExt};
use order_server::{Config, ServerState};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use tokio::time::{Duration, timeout};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use shared::models::{CreateOrderRequest, Order, OrderLineInput, OrderStatus, UpdateStatusRequest};
use shared::{ClientFrame, OrderEvent};

type WsConn =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn spawn_server() -> SocketAddr {
    let config = Config::with_overrides("/tmp/unused", 0);
    let state = ServerState::initialize_in_memory(&config).await.unwrap();
    let app = order_server::api::router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn line(menu_item: &str, qty: u32, price: i64) -> OrderLineInput {
    OrderLineInput {
        menu_item: menu_item.to_string(),
        name: format!("Item {menu_item}"),
        quantity: qty,
        price: Decimal::from(price),
        special_instructions: String::new(),
    }
}

fn request(table: &str, items: Vec<OrderLineInput>) -> CreateOrderRequest {
    CreateOrderRequest {
        table_number: table.to_string(),
        customer_name: "Alice".to_string(),
        customer_phone: String::new(),
        items,
        total_amount: None,
        special_requests: String::new(),
    }
}

/// Next order event frame from a socket, skipping control frames
async fn next_event(ws: &mut WsConn) -> OrderEvent {
    loop {
        let msg = timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for event")
            .expect("socket ended")
            .expect("socket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

#[tokio::test]
async fn create_returns_201_and_order_is_fetchable() {
    let addr = spawn_server().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&request("5", vec![line("menu_item:tea", 2, 30)]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Order = resp.json().await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, Decimal::from(60));
    assert_eq!(order.order_number.len(), 11);

    let resp = client
        .get(format!("{base}/api/orders/{}", order.id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Order = resp.json().await.unwrap();
    assert_eq!(fetched.order_number, order.order_number);

    // 状态过滤列表
    let resp = client
        .put(format!("{base}/api/orders/{}/status", order.id))
        .json(&UpdateStatusRequest {
            status: OrderStatus::Ready,
        })
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let ready: Vec<Order> = client
        .get(format!("{base}/api/orders?status=ready"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ready.len(), 1);
    let pending: Vec<Order> = client
        .get(format!("{base}/api/orders?status=pending"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(pending.is_empty());
}

#[tokio::test]
async fn rejections_carry_structured_error_bodies() {
    let addr = spawn_server().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    // 空项目 → 400 验证错误
    let resp = client
        .post(format!("{base}/api/orders"))
        .json(&request("5", vec![]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "E0002");
    assert!(body["message"].as_str().unwrap().contains("Items"));

    // 未知订单 → 404
    let resp = client
        .get(format!("{base}/api/orders/order:doesnotexist"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn clears_return_204_and_empty_the_list() {
    let addr = spawn_server().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    for table in ["5", "5", "7"] {
        let resp = client
            .post(format!("{base}/api/orders"))
            .json(&request(table, vec![line("menu_item:tea", 1, 10)]))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = client
        .delete(format!("{base}/api/orders/table/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let orders: Vec<Order> = client
        .get(format!("{base}/api/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].table_number, "7");

    let resp = client
        .delete(format!("{base}/api/orders/clear-all/all"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let orders: Vec<Order> = client
        .get(format!("{base}/api/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn events_reach_every_connected_socket() {
    let addr = spawn_server().await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    // 一个普通连接 (例如顾客桌台页)，一个仪表盘连接
    let (mut plain, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
    let (mut dashboard, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
    let join = serde_json::to_string(&ClientFrame::JoinDashboard).unwrap();
    dashboard.send(Message::Text(join.into())).await.unwrap();

    // 等待两个会话完成总线订阅
    tokio::time::sleep(Duration::from_millis(100)).await;

    // join-dashboard 只作为会话标记，不影响推送
    let health: serde_json::Value = client
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["connectedSessions"], 2);
    assert_eq!(health["dashboardSessions"], 1);

    let order: Order = client
        .post(format!("{base}/api/orders"))
        .json(&request("9", vec![line("menu_item:tea", 1, 10)]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // 未加入仪表盘的连接同样收到全量事件，由客户端自行筛选
    for ws in [&mut plain, &mut dashboard] {
        let event = next_event(ws).await;
        assert_eq!(event.name(), "new-order");
        assert_eq!(event.order().unwrap().order_number, order.order_number);
    }

    let resp = client
        .delete(format!("{base}/api/orders/table/9"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let event = next_event(&mut plain).await;
    assert_eq!(event.name(), "table-orders-cleared");
    assert_eq!(
        serde_json::to_value(&event).unwrap()["data"]["tableNumber"],
        "9"
    );
}
