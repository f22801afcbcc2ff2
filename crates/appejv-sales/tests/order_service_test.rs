//! Integration tests for the order service.

use appejv_audit::AuditRecorder;
use appejv_authz::Actor;
use appejv_core::error::AppejvError;
use appejv_core::models::customer::CreateCustomer;
use appejv_core::models::order::OrderStatus;
use appejv_core::models::order_history::ActionType;
use appejv_core::models::profile::{Role, TeamRoster};
use appejv_core::repository::{
    AuditLogFilter, AuditLogRepository, CustomerRepository, OrderRepository, Pagination,
};
use appejv_db::{
    SurrealAuditLogRepository, SurrealCustomerRepository, SurrealOrderHistoryRepository,
    SurrealOrderRepository,
};
use appejv_sales::OrderService;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type Service = OrderService<
    SurrealOrderRepository<Db>,
    SurrealCustomerRepository<Db>,
    SurrealOrderHistoryRepository<Db>,
    SurrealAuditLogRepository<Db>,
>;

struct Harness {
    service: Service,
    orders: SurrealOrderRepository<Db>,
    customers: SurrealCustomerRepository<Db>,
    audit: SurrealAuditLogRepository<Db>,
}

async fn setup() -> Harness {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    appejv_db::run_migrations(&db).await.unwrap();

    let orders = SurrealOrderRepository::new(db.clone());
    let customers = SurrealCustomerRepository::new(db.clone());
    let history = SurrealOrderHistoryRepository::new(db.clone());
    let audit = SurrealAuditLogRepository::new(db.clone());

    let service = OrderService::new(
        orders.clone(),
        customers.clone(),
        history.clone(),
        AuditRecorder::new(audit.clone()),
    );

    Harness {
        service,
        orders,
        customers,
        audit,
    }
}

fn sale_actor() -> Actor {
    Actor::new(Uuid::new_v4(), Role::Sale).with_email("sale@appejv.test")
}

#[tokio::test]
async fn new_orders_start_as_draft_with_a_created_entry() {
    let h = setup().await;
    let sale = sale_actor();

    let order = h.service.create_order(&sale, None, 125.50).await.unwrap();
    assert_eq!(order.status, OrderStatus::Draft);
    assert_eq!(order.sale_id, sale.id);

    let history = h.service.order_history(&sale, order.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action_type, ActionType::Created);
    assert_eq!(history[0].user_id, sale.id);
}

#[tokio::test]
async fn negative_total_is_rejected() {
    let h = setup().await;
    let sale = sale_actor();

    let err = h.service.create_order(&sale, None, -1.0).await.unwrap_err();
    assert!(matches!(err, AppejvError::Validation { .. }));
}

#[tokio::test]
async fn warehouse_cannot_create_orders() {
    let h = setup().await;
    let warehouse = Actor::new(Uuid::new_v4(), Role::Warehouse);

    let err = h
        .service
        .create_order(&warehouse, None, 10.0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppejvError::Forbidden { .. }));
}

#[tokio::test]
async fn full_forward_chain_appends_one_entry_per_step() {
    let h = setup().await;
    let sale = sale_actor();

    let order = h.service.create_order(&sale, None, 99.0).await.unwrap();

    let steps = [
        OrderStatus::Ordered,
        OrderStatus::Shipping,
        OrderStatus::Paid,
        OrderStatus::Completed,
    ];
    for status in steps {
        let updated = h.service.advance_order(&sale, order.id, status).await.unwrap();
        assert_eq!(updated.status, status);
    }

    let history = h.service.order_history(&sale, order.id).await.unwrap();
    assert_eq!(history.len(), 1 + steps.len());

    let mut previous = OrderStatus::Draft;
    for (entry, status) in history[1..].iter().zip(steps) {
        assert_eq!(entry.action_type, ActionType::StatusChange);
        assert_eq!(entry.old_value, Some(previous));
        assert_eq!(entry.new_value, Some(status));
        previous = status;
    }
}

#[tokio::test]
async fn skipping_a_state_fails_and_writes_no_history() {
    let h = setup().await;
    let sale = sale_actor();

    let order = h.service.create_order(&sale, None, 50.0).await.unwrap();

    let err = h
        .service
        .advance_order(&sale, order.id, OrderStatus::Shipping)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppejvError::InvalidTransition {
            from: OrderStatus::Draft,
            to: OrderStatus::Shipping,
        }
    ));

    let history = h.service.order_history(&sale, order.id).await.unwrap();
    assert_eq!(history.len(), 1, "only the created entry may exist");
}

#[tokio::test]
async fn cancellation_records_the_reason() {
    let h = setup().await;
    let sale = sale_actor();

    let order = h.service.create_order(&sale, None, 75.0).await.unwrap();
    h.service
        .advance_order(&sale, order.id, OrderStatus::Ordered)
        .await
        .unwrap();

    let cancelled = h
        .service
        .cancel_order(&sale, order.id, Some("customer withdrew".into()))
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let history = h.service.order_history(&sale, order.id).await.unwrap();
    let last = history.last().unwrap();
    assert_eq!(last.action_type, ActionType::StatusChange);
    assert_eq!(last.old_value, Some(OrderStatus::Ordered));
    assert_eq!(last.new_value, Some(OrderStatus::Cancelled));
    assert_eq!(last.comment.as_deref(), Some("customer withdrew"));
}

#[tokio::test]
async fn terminal_orders_cannot_be_cancelled() {
    let h = setup().await;
    let sale = sale_actor();

    let order = h.service.create_order(&sale, None, 75.0).await.unwrap();
    for status in [
        OrderStatus::Ordered,
        OrderStatus::Shipping,
        OrderStatus::Paid,
        OrderStatus::Completed,
    ] {
        h.service.advance_order(&sale, order.id, status).await.unwrap();
    }

    let err = h
        .service
        .cancel_order(&sale, order.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppejvError::InvalidTransition { .. }));
}

#[tokio::test]
async fn comments_append_to_the_trail() {
    let h = setup().await;
    let sale = sale_actor();

    let order = h.service.create_order(&sale, None, 20.0).await.unwrap();
    let entry = h
        .service
        .add_comment(&sale, order.id, "called the customer".into())
        .await
        .unwrap();
    assert_eq!(entry.action_type, ActionType::Comment);
    assert_eq!(entry.comment.as_deref(), Some("called the customer"));

    let err = h
        .service
        .add_comment(&sale, order.id, "  ".into())
        .await
        .unwrap_err();
    assert!(matches!(err, AppejvError::Validation { .. }));
}

#[tokio::test]
async fn another_sale_cannot_touch_the_order() {
    let h = setup().await;
    let owner = sale_actor();
    let stranger = Actor::new(Uuid::new_v4(), Role::Sale).with_email("other@appejv.test");

    let order = h.service.create_order(&owner, None, 30.0).await.unwrap();

    let err = h.service.get_order(&stranger, order.id).await.unwrap_err();
    assert!(matches!(err, AppejvError::Forbidden { .. }));

    let err = h
        .service
        .advance_order(&stranger, order.id, OrderStatus::Ordered)
        .await
        .unwrap_err();
    assert!(matches!(err, AppejvError::Forbidden { .. }));

    // Each denial lands in the audit log.
    let denials = h
        .audit
        .query(AuditLogFilter {
            success: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(denials.len(), 2);
}

#[tokio::test]
async fn customer_stewardship_grants_access() {
    let h = setup().await;
    let owner = sale_actor();
    let steward = Actor::new(Uuid::new_v4(), Role::Sale);

    let customer = h
        .customers
        .create(CreateCustomer {
            full_name: "Duck Farm Binh Minh".into(),
            phone: None,
            address: None,
            assigned_to: Some(steward.id),
        })
        .await
        .unwrap();

    let order = h
        .service
        .create_order(&owner, Some(customer.id), 60.0)
        .await
        .unwrap();

    // The steward of the order's customer may read it, but without
    // authorship or approval rights may not advance it.
    h.service.get_order(&steward, order.id).await.unwrap();
    let err = h
        .service
        .advance_order(&steward, order.id, OrderStatus::Ordered)
        .await
        .unwrap_err();
    assert!(matches!(err, AppejvError::Forbidden { .. }));
}

#[tokio::test]
async fn sale_admin_with_approval_advances_a_team_order() {
    let h = setup().await;
    let member = sale_actor();
    let manager = Actor::new(Uuid::new_v4(), Role::SaleAdmin)
        .with_roster(TeamRoster::from_iter([member.id]));

    let customer = h
        .customers
        .create(CreateCustomer {
            full_name: "Feed Depot An Giang".into(),
            phone: None,
            address: None,
            assigned_to: Some(manager.id),
        })
        .await
        .unwrap();

    let order = h
        .service
        .create_order(&member, Some(customer.id), 200.0)
        .await
        .unwrap();

    let updated = h
        .service
        .advance_order(&manager, order.id, OrderStatus::Ordered)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Ordered);
}

#[tokio::test]
async fn stale_status_update_conflicts() {
    let h = setup().await;
    let sale = sale_actor();

    let order = h.service.create_order(&sale, None, 10.0).await.unwrap();

    h.orders
        .update_status(order.id, OrderStatus::Draft, OrderStatus::Ordered)
        .await
        .unwrap();
    let err = h
        .orders
        .update_status(order.id, OrderStatus::Draft, OrderStatus::Ordered)
        .await
        .unwrap_err();
    assert!(matches!(err, AppejvError::Conflict { .. }));
}

#[tokio::test]
async fn racing_advances_produce_exactly_one_success() {
    let h = setup().await;
    let sale = sale_actor();

    let order = h.service.create_order(&sale, None, 10.0).await.unwrap();

    let (a, b) = tokio::join!(
        h.service.advance_order(&sale, order.id, OrderStatus::Ordered),
        h.service.advance_order(&sale, order.id, OrderStatus::Ordered),
    );

    assert_eq!(
        a.is_ok() as u8 + b.is_ok() as u8,
        1,
        "exactly one racer may win: {a:?} / {b:?}"
    );

    let current = h.orders.get_by_id(order.id).await.unwrap();
    assert_eq!(current.status, OrderStatus::Ordered);
}

#[tokio::test]
async fn listing_respects_data_scope() {
    let h = setup().await;
    let sale_a = sale_actor();
    let sale_b = Actor::new(Uuid::new_v4(), Role::Sale);
    let admin = Actor::new(Uuid::new_v4(), Role::Admin);
    let warehouse = Actor::new(Uuid::new_v4(), Role::Warehouse);

    h.service.create_order(&sale_a, None, 1.0).await.unwrap();
    h.service.create_order(&sale_a, None, 2.0).await.unwrap();
    h.service.create_order(&sale_b, None, 3.0).await.unwrap();

    let own = h
        .service
        .list_orders(&sale_a, Pagination::default())
        .await
        .unwrap();
    assert_eq!(own.total, 2);
    assert!(own.items.iter().all(|o| o.sale_id == sale_a.id));

    let all = h
        .service
        .list_orders(&admin, Pagination::default())
        .await
        .unwrap();
    assert_eq!(all.total, 3);

    let none = h
        .service
        .list_orders(&warehouse, Pagination::default())
        .await
        .unwrap();
    assert_eq!(none.total, 0);
    assert!(none.items.is_empty());
}
