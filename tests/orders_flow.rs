use bakery_orders_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::orders::{CustomerInfo, OrderItemInput, SubmitOrderRequest},
    notify::Notifier,
    services::order_service,
    state::AppState,
};

// Integration flow: rejected submissions write nothing, a valid submission
// writes exactly one header plus its items atomically, a mid-insert failure
// rolls everything back, and the admin listing comes back newest first.
#[tokio::test]
async fn submit_list_and_rollback_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(());
            }
        };

    let state = setup_state(&database_url).await?;

    // A submission missing its email is rejected before any row is written.
    let mut invalid = pickup_order("First Customer", vec![cake(2)]);
    invalid.customer.email = String::new();
    assert!(order_service::submit_order(&state, invalid).await.is_err());
    assert_eq!(order_count(&state).await?, 0);
    assert_eq!(item_count(&state).await?, 0);

    // A client total disagreeing with the items is rejected too.
    let mut bad_total = pickup_order("First Customer", vec![cake(2)]);
    bad_total.total += 1;
    assert!(
        order_service::submit_order(&state, bad_total)
            .await
            .is_err()
    );
    assert_eq!(order_count(&state).await?, 0);

    // Valid order with two items: exactly one header and two item rows.
    let first_id = order_service::submit_order(
        &state,
        pickup_order("First Customer", vec![cake(2), croissants(1)]),
    )
    .await?;
    assert_eq!(order_count(&state).await?, 1);
    assert_eq!(item_count(&state).await?, 2);

    // Force a failure after the header insert: the second item overflows the
    // product_name column, so the whole transaction must roll back.
    let mut doomed = pickup_order("Doomed Customer", vec![cake(1)]);
    doomed.items.push(OrderItemInput {
        id: 99,
        name: "x".repeat(300),
        price: 100,
        quantity: 1,
    });
    doomed.total += 100;
    assert!(order_service::submit_order(&state, doomed).await.is_err());
    assert_eq!(order_count(&state).await?, 1, "no orphaned header");
    assert_eq!(item_count(&state).await?, 2, "no orphaned items");

    // Two more orders, submitted later, must list before the first one.
    let second_id =
        order_service::submit_order(&state, pickup_order("Second Customer", vec![cake(1)]))
            .await?;
    let third_id = order_service::submit_order(
        &state,
        delivery_order("Third Customer", "1 Baker Street", vec![croissants(3)]),
    )
    .await?;

    let orders = order_service::list_orders(&state).await?;
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![third_id, second_id, first_id]);

    // Round-trip: the first order's cake line carries its server-computed subtotal.
    let first = orders.iter().find(|o| o.id == first_id).unwrap();
    assert_eq!(first.status, "pending");
    assert_eq!(first.total_amount, 350 * 2 + 250);
    let cake_line = first
        .items
        .iter()
        .find(|i| i.product_name == "Chocolate Cake")
        .unwrap();
    assert_eq!(cake_line.quantity, 2);
    assert_eq!(cake_line.subtotal, 700);

    // Delivery order keeps its address; pickup orders were accepted without one.
    let third = orders.iter().find(|o| o.id == third_id).unwrap();
    assert_eq!(third.delivery_method, "delivery");
    assert_eq!(third.delivery_address, "1 Baker Street");

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;
    let pool = create_pool(database_url).await?;

    // Clean tables between runs
    sqlx::query("TRUNCATE TABLE order_items, orders RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await?;

    Ok(AppState {
        pool,
        orm,
        notifier: Notifier::new("orders@test.example"),
    })
}

async fn order_count(state: &AppState) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(&state.pool)
        .await?;
    Ok(row.0)
}

async fn item_count(state: &AppState) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM order_items")
        .fetch_one(&state.pool)
        .await?;
    Ok(row.0)
}

fn cake(quantity: i32) -> OrderItemInput {
    OrderItemInput {
        id: 1,
        name: "Chocolate Cake".to_string(),
        price: 350,
        quantity,
    }
}

fn croissants(quantity: i32) -> OrderItemInput {
    OrderItemInput {
        id: 2,
        name: "Fresh Croissants".to_string(),
        price: 250,
        quantity,
    }
}

fn pickup_order(name: &str, items: Vec<OrderItemInput>) -> SubmitOrderRequest {
    order_with_method(name, "pickup", "", items)
}

fn delivery_order(name: &str, address: &str, items: Vec<OrderItemInput>) -> SubmitOrderRequest {
    order_with_method(name, "delivery", address, items)
}

fn order_with_method(
    name: &str,
    method: &str,
    address: &str,
    items: Vec<OrderItemInput>,
) -> SubmitOrderRequest {
    let total = items.iter().map(|i| i.price * i64::from(i.quantity)).sum();
    SubmitOrderRequest {
        customer: CustomerInfo {
            name: name.to_string(),
            email: "customer@example.com".to_string(),
            phone: "555-0101".to_string(),
            delivery_method: method.to_string(),
            address: address.to_string(),
            notes: String::new(),
        },
        items,
        total,
    }
}
