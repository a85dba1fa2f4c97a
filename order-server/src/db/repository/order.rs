//! Order Repository
//!
//! Authoritative CRUD and lifecycle management for orders. Order numbers are
//! allocated through [`CounterRepository`] after validation passes, so a
//! rejected order never consumes a sequence. Mutations are last-write-wins:
//! there is no per-order locking or version token — contention on a single
//! order is low in this domain and the tradeoff is documented in DESIGN.md.

use super::{BaseRepository, CounterRepository, MenuItemRepository, RepoError, RepoResult};
use crate::db::models::{DbOrder, DbOrderLine};
use crate::utils::time;
use chrono::Utc;
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use shared::models::{
    CreateOrderRequest, EditItemsRequest, OrderLineInput, OrderStatus, SPECIAL_REQUESTS_MAX_LEN,
};

const TABLE: &str = "order";

/// Sum of `price × quantity` over persisted lines
fn total_of(lines: &[DbOrderLine]) -> Decimal {
    lines
        .iter()
        .map(|l| l.price * Decimal::from(l.quantity))
        .sum()
}

/// Status transition policy, a deliberate configuration point
///
/// The observed behavior of the system is fully permissive — staff move
/// orders between any two statuses to correct mistakes. `Strict` enforces
/// the forward kitchen flow instead (see [`OrderStatus::can_transition_to`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusTransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
    policy: StatusTransitionPolicy,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
            policy: StatusTransitionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: StatusTransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn counter(&self) -> CounterRepository {
        CounterRepository::new(self.base.db().clone())
    }

    fn menu_items(&self) -> MenuItemRepository {
        MenuItemRepository::new(self.base.db().clone())
    }

    /// Create a new order: validate, snapshot lines with server-trusted
    /// prices, allocate the day-scoped order number, persist as `pending`.
    pub async fn create(&self, req: CreateOrderRequest) -> RepoResult<DbOrder> {
        Self::validate_items(&req.items)?;
        if req.special_requests.len() > SPECIAL_REQUESTS_MAX_LEN {
            return Err(RepoError::Validation(format!(
                "Special requests must be at most {SPECIAL_REQUESTS_MAX_LEN} characters"
            )));
        }

        let items = self.snapshot_lines(&req.items).await?;
        let total_amount = total_of(&items);

        // Number allocation comes last: validation failures must leave the
        // day counter untouched, and an allocation failure fails creation
        // outright — never a fallback number.
        let day_key = time::today_key();
        let sequence = self.counter().next_sequence(&day_key).await?;
        let order_number = super::counter::format_order_number(&day_key, sequence);

        let now = Utc::now();
        let order = DbOrder {
            id: None,
            order_number,
            table_number: req.table_number,
            items,
            total_amount,
            status: OrderStatus::Pending,
            customer_name: req.customer_name,
            customer_phone: req.customer_phone,
            special_requests: req.special_requests,
            is_edited: false,
            estimated_time: 30,
            created_at: now,
            updated_at: now,
        };

        let created: Option<DbOrder> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// List orders, newest first, optionally filtered by status
    pub async fn find_all(&self, status: Option<OrderStatus>) -> RepoResult<Vec<DbOrder>> {
        let orders: Vec<DbOrder> = match status {
            Some(status) => {
                self.base
                    .db()
                    .query("SELECT * FROM order WHERE status = $status ORDER BY created_at DESC")
                    .bind(("status", status))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM order ORDER BY created_at DESC")
                    .await?
                    .take(0)?
            }
        };
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DbOrder>> {
        let thing = Self::parse_id(id)?;
        let order: Option<DbOrder> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Change an order's status
    ///
    /// Under the default permissive policy any status can move to any other
    /// so staff can correct mistakes.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<DbOrder> {
        let thing = Self::parse_id(id)?;
        let current = self.require(id).await?;

        if self.policy == StatusTransitionPolicy::Strict
            && !current.status.can_transition_to(status)
        {
            return Err(RepoError::Validation(format!(
                "Cannot move order from {} to {}",
                current.status, status
            )));
        }

        self.base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", Utc::now()))
            .await?;

        self.require(id).await
    }

    /// Replace an order's item list wholesale, recompute the total and mark
    /// the order as edited
    pub async fn edit_items(&self, id: &str, req: EditItemsRequest) -> RepoResult<DbOrder> {
        Self::validate_items(&req.items)?;
        let thing = Self::parse_id(id)?;
        self.require(id).await?;

        // Staff-supplied replacement lines are stored as given; the client
        // total is ignored and recomputed here.
        let items: Vec<DbOrderLine> = req.items.iter().map(Self::line_from_input).collect();
        let total_amount = total_of(&items);

        self.base
            .db()
            .query(
                "UPDATE $thing SET items = $items, total_amount = $total, \
                 is_edited = true, updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("items", items))
            .bind(("total", total_amount))
            .bind(("now", Utc::now()))
            .await?;

        self.require(id).await
    }

    /// Delete every order (administrative reset)
    pub async fn delete_all(&self) -> RepoResult<()> {
        self.base.db().query("DELETE order").await?;
        Ok(())
    }

    /// Delete all orders for one table
    pub async fn delete_by_table(&self, table_number: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE order WHERE table_number = $table")
            .bind(("table", table_number.to_string()))
            .await?;
        Ok(())
    }

    // ========== Internal helpers ==========

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::NotFound(format!("Invalid order ID format: {}", id)))
    }

    async fn require(&self, id: &str) -> RepoResult<DbOrder> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    fn validate_items(items: &[OrderLineInput]) -> RepoResult<()> {
        if items.is_empty() {
            return Err(RepoError::Validation("Items are required".to_string()));
        }
        if let Some(bad) = items.iter().find(|i| i.quantity < 1) {
            return Err(RepoError::Validation(format!(
                "Quantity must be at least 1 for item {}",
                bad.menu_item
            )));
        }
        Ok(())
    }

    fn line_from_input(input: &OrderLineInput) -> DbOrderLine {
        DbOrderLine {
            menu_item: input.menu_item.clone(),
            name: input.name.clone(),
            quantity: input.quantity,
            price: input.price,
            special_instructions: input.special_instructions.clone(),
        }
    }

    /// Build persisted lines from cart input, preferring the menu item's
    /// current name and price over the client-supplied values. Lines whose
    /// menu item no longer exists fall back to the client snapshot.
    async fn snapshot_lines(&self, inputs: &[OrderLineInput]) -> RepoResult<Vec<DbOrderLine>> {
        let menu = self.menu_items();
        let mut lines = Vec::with_capacity(inputs.len());
        for input in inputs {
            let mut line = Self::line_from_input(input);
            if let Some(item) = menu.find_by_id(&input.menu_item).await? {
                line.name = item.name;
                line.price = item.price;
            }
            lines.push(line);
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::MenuItem;

    async fn repo() -> OrderRepository {
        let db = DbService::memory().await.unwrap();
        OrderRepository::new(db.db)
    }

    fn line_input(menu_item: &str, qty: u32, price: i64) -> OrderLineInput {
        OrderLineInput {
            menu_item: menu_item.to_string(),
            name: format!("Item {menu_item}"),
            quantity: qty,
            price: Decimal::from(price),
            special_instructions: String::new(),
        }
    }

    fn create_request(table: &str, items: Vec<OrderLineInput>) -> CreateOrderRequest {
        CreateOrderRequest {
            table_number: table.to_string(),
            customer_name: "Alice".to_string(),
            customer_phone: String::new(),
            items,
            total_amount: None,
            special_requests: String::new(),
        }
    }

    #[tokio::test]
    async fn create_computes_total_and_assigns_number() {
        let repo = repo().await;
        let order = repo
            .create(create_request(
                "5",
                vec![line_input("menu_item:tea", 2, 100), line_input("menu_item:cake", 1, 50)],
            ))
            .await
            .unwrap();

        assert_eq!(order.total_amount, Decimal::from(250));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.table_number, "5");
        assert!(!order.is_edited);
        // DDMMYY prefix plus 5-digit sequence
        assert_eq!(order.order_number.len(), 11);
        assert!(order.order_number.chars().all(|c| c.is_ascii_digit()));
        assert!(order.order_number.starts_with(&time::today_key()));
    }

    #[tokio::test]
    async fn create_prefers_current_menu_price() {
        let db = DbService::memory().await.unwrap();
        let _: Option<MenuItem> = db
            .db
            .create(("menu_item", "tea"))
            .content(MenuItem {
                id: None,
                name: "Jasmine Tea".to_string(),
                price: Decimal::from(30),
                available: true,
            })
            .await
            .unwrap();
        let repo = OrderRepository::new(db.db);

        // Client claims the tea costs 1 — the menu price wins
        let order = repo
            .create(create_request("2", vec![line_input("menu_item:tea", 2, 1)]))
            .await
            .unwrap();

        assert_eq!(order.items[0].price, Decimal::from(30));
        assert_eq!(order.items[0].name, "Jasmine Tea");
        assert_eq!(order.total_amount, Decimal::from(60));
    }

    #[tokio::test]
    async fn create_rejects_empty_items_without_burning_a_sequence() {
        let repo = repo().await;
        let err = repo.create(create_request("5", vec![])).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        // No counter row was touched
        let counter = repo.counter();
        assert_eq!(counter.current_value(&time::today_key()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_rejects_zero_quantity() {
        let repo = repo().await;
        let err = repo
            .create(create_request("5", vec![line_input("menu_item:tea", 0, 10)]))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn edit_items_recomputes_total_and_flags_edit() {
        let repo = repo().await;
        let order = repo
            .create(create_request("5", vec![line_input("menu_item:tea", 1, 10)]))
            .await
            .unwrap();
        let id = order.id.unwrap().to_string();

        let edited = repo
            .edit_items(
                &id,
                EditItemsRequest {
                    items: vec![line_input("menu_item:cake", 3, 80)],
                    total_amount: Some(Decimal::from(1)), // client total is ignored
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.total_amount, Decimal::from(240));
        assert!(edited.is_edited);
        assert_eq!(edited.items.len(), 1);
        // Order number never regenerates
        assert_eq!(edited.order_number, order.order_number);
    }

    #[tokio::test]
    async fn edit_items_rejects_empty_list() {
        let repo = repo().await;
        let order = repo
            .create(create_request("5", vec![line_input("menu_item:tea", 1, 10)]))
            .await
            .unwrap();
        let id = order.id.unwrap().to_string();

        let err = repo
            .edit_items(
                &id,
                EditItemsRequest {
                    items: vec![],
                    total_amount: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn update_status_is_permissive_and_404s_on_unknown() {
        let repo = repo().await;
        let order = repo
            .create(create_request("5", vec![line_input("menu_item:tea", 1, 10)]))
            .await
            .unwrap();
        let id = order.id.unwrap().to_string();

        // served → pending is allowed (manual correction)
        repo.update_status(&id, OrderStatus::Served).await.unwrap();
        let back = repo.update_status(&id, OrderStatus::Pending).await.unwrap();
        assert_eq!(back.status, OrderStatus::Pending);

        let err = repo
            .update_status("order:doesnotexist", OrderStatus::Ready)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn strict_policy_rejects_backward_transitions() {
        let repo = repo().await.with_policy(StatusTransitionPolicy::Strict);
        let order = repo
            .create(create_request("5", vec![line_input("menu_item:tea", 1, 10)]))
            .await
            .unwrap();
        let id = order.id.unwrap().to_string();

        repo.update_status(&id, OrderStatus::Confirmed).await.unwrap();

        let err = repo
            .update_status(&id, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn clear_by_table_leaves_other_tables_untouched() {
        let repo = repo().await;
        repo.create(create_request("5", vec![line_input("menu_item:tea", 1, 10)]))
            .await
            .unwrap();
        repo.create(create_request("5", vec![line_input("menu_item:cake", 1, 20)]))
            .await
            .unwrap();
        repo.create(create_request("7", vec![line_input("menu_item:tea", 1, 10)]))
            .await
            .unwrap();

        repo.delete_by_table("5").await.unwrap();

        let remaining = repo.find_all(None).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|o| o.table_number != "5"));
    }

    #[tokio::test]
    async fn find_all_filters_by_status() {
        let repo = repo().await;
        let order = repo
            .create(create_request("1", vec![line_input("menu_item:tea", 1, 10)]))
            .await
            .unwrap();
        repo.create(create_request("2", vec![line_input("menu_item:tea", 1, 10)]))
            .await
            .unwrap();
        repo.update_status(&order.id.unwrap().to_string(), OrderStatus::Ready)
            .await
            .unwrap();

        let ready = repo.find_all(Some(OrderStatus::Ready)).await.unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].status, OrderStatus::Ready);
        assert_eq!(repo.find_all(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_all_empties_the_store() {
        let repo = repo().await;
        repo.create(create_request("1", vec![line_input("menu_item:tea", 1, 10)]))
            .await
            .unwrap();
        repo.delete_all().await.unwrap();
        assert!(repo.find_all(None).await.unwrap().is_empty());
    }
}
