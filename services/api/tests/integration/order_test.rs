use uuid::Uuid;

use market_api::domain::repository::{NewOrderItem, OrderFilter};
use market_api::domain::types::{
    OrderStatus, OrderTotals, PaymentMethod, PaymentStatus, ShippingAddress,
};
use market_api::error::ApiError;
use market_api::usecase::order::{
    CreateOrderInput, CreateOrderUseCase, DeleteOrderUseCase, GetOrderUseCase, ListOrdersUseCase,
    SubmitPaymentProofUseCase, UpdateOrderStatusUseCase, VerifyPaymentUseCase,
};

use crate::helpers::MemOrders;

fn order_input(method: PaymentMethod) -> CreateOrderInput {
    CreateOrderInput {
        customer_id: Uuid::now_v7(),
        items: vec![NewOrderItem {
            product_id: Uuid::now_v7(),
            product_name: "Runner 2".into(),
            quantity: 1,
            price: 1200.0,
            variant: None,
        }],
        total_price: 1200.0,
        shipping_address: ShippingAddress::default(),
        payment_method: method,
        coupon_id: None,
        order_total: OrderTotals {
            subtotal: 1200.0,
            discount: 0.0,
            total: 1200.0,
        },
    }
}

#[tokio::test]
async fn telebirr_order_runs_the_full_verification_lifecycle() {
    let orders = MemOrders::default();

    let order = CreateOrderUseCase { orders: &orders }
        .execute(order_input(PaymentMethod::Telebirr))
        .await
        .unwrap();
    assert_eq!(order.order_status, OrderStatus::PaymentPending);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert!(order.payment_proof.is_none());

    // nothing to verify until a proof is attached
    let pending = ListOrdersUseCase { orders: &orders }
        .execute(OrderFilter {
            pending_verification: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(pending.is_empty());

    let order = SubmitPaymentProofUseCase { orders: &orders }
        .execute(order.id, "https://cdn.example.com/proof.png".into())
        .await
        .unwrap();
    let proof = order.payment_proof.as_ref().unwrap();
    assert!(!proof.verified);
    assert!(proof.uploaded_at.is_some());

    let pending = ListOrdersUseCase { orders: &orders }
        .execute(OrderFilter {
            pending_verification: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, order.id);

    let order = VerifyPaymentUseCase { orders: &orders }
        .execute(order.id, true)
        .await
        .unwrap();
    assert_eq!(order.order_status, OrderStatus::Processing);
    assert_eq!(order.payment_status, PaymentStatus::Verified);
    let proof = order.payment_proof.as_ref().unwrap();
    assert!(proof.verified);
    assert!(proof.verified_at.is_some());

    let order = UpdateOrderStatusUseCase { orders: &orders }
        .execute(
            order.id,
            OrderStatus::Shipped,
            Some("https://track.example.com/42".into()),
        )
        .await
        .unwrap();
    assert_eq!(order.order_status, OrderStatus::Shipped);
    assert_eq!(order.tracking_url.as_deref(), Some("https://track.example.com/42"));

    DeleteOrderUseCase { orders: &orders }
        .execute(order.id)
        .await
        .unwrap();
    let result = GetOrderUseCase { orders: &orders }.execute(order.id).await;
    assert!(matches!(result, Err(ApiError::NotFound("order"))));
}

#[tokio::test]
async fn cod_proof_is_recorded_without_entering_verification() {
    let orders = MemOrders::default();

    let order = CreateOrderUseCase { orders: &orders }
        .execute(order_input(PaymentMethod::Cod))
        .await
        .unwrap();
    assert_eq!(order.order_status, OrderStatus::Pending);

    let order = SubmitPaymentProofUseCase { orders: &orders }
        .execute(order.id, "https://cdn.example.com/proof.png".into())
        .await
        .unwrap();
    assert_eq!(order.order_status, OrderStatus::Pending);
    assert!(order.payment_proof.is_some());

    // cod never reaches the verification queue
    let pending = ListOrdersUseCase { orders: &orders }
        .execute(OrderFilter {
            pending_verification: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(pending.is_empty());
}

#[tokio::test]
async fn rejected_payment_cancels_the_order() {
    let orders = MemOrders::default();

    let order = CreateOrderUseCase { orders: &orders }
        .execute(order_input(PaymentMethod::Cbe))
        .await
        .unwrap();
    SubmitPaymentProofUseCase { orders: &orders }
        .execute(order.id, "https://cdn.example.com/proof.png".into())
        .await
        .unwrap();

    let order = VerifyPaymentUseCase { orders: &orders }
        .execute(order.id, false)
        .await
        .unwrap();
    assert_eq!(order.order_status, OrderStatus::Cancelled);
    assert_eq!(order.payment_status, PaymentStatus::Failed);
    assert!(!order.payment_proof.as_ref().unwrap().verified);
}

#[tokio::test]
async fn approval_settles_the_payment_even_without_a_proof() {
    let orders = MemOrders::default();

    let order = CreateOrderUseCase { orders: &orders }
        .execute(order_input(PaymentMethod::Cbe))
        .await
        .unwrap();

    let order = VerifyPaymentUseCase { orders: &orders }
        .execute(order.id, true)
        .await
        .unwrap();
    assert_eq!(order.order_status, OrderStatus::Processing);
    assert_eq!(order.payment_status, PaymentStatus::Verified);
    assert!(order.payment_proof.is_none());
}

#[tokio::test]
async fn orders_filter_by_customer_and_payment_status() {
    let orders = MemOrders::default();
    let create = CreateOrderUseCase { orders: &orders };

    let mine = create.execute(order_input(PaymentMethod::Cod)).await.unwrap();
    create.execute(order_input(PaymentMethod::Cod)).await.unwrap();

    let list = ListOrdersUseCase { orders: &orders };
    let by_customer = list
        .execute(OrderFilter {
            customer_id: Some(mine.customer_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_customer.len(), 1);
    assert_eq!(by_customer[0].id, mine.id);

    let pending = list
        .execute(OrderFilter {
            payment_status: Some(PaymentStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);
}
