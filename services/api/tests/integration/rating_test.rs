use uuid::Uuid;

use market_api::domain::repository::NewOrderItem;
use market_api::domain::types::{OrderTotals, PaymentMethod, ShippingAddress};
use market_api::usecase::order::{CreateOrderInput, CreateOrderUseCase};
use market_api::usecase::rating::{
    GetCustomerRatingUseCase, GetRatingStatsUseCase, ListProductRatingsUseCase, UpsertRatingInput,
    UpsertRatingUseCase,
};
use market_core::pagination::PageRequest;

use crate::helpers::{MemOrders, MemRatings};

fn rating_input(product_id: Uuid, customer_id: Uuid, rating: i16) -> UpsertRatingInput {
    UpsertRatingInput {
        product_id,
        customer_id,
        customer_name: "Abebe".into(),
        rating,
        review: "solid".into(),
    }
}

#[tokio::test]
async fn purchase_history_marks_the_rating_verified() {
    let orders = MemOrders::default();
    let ratings = MemRatings::default();

    let customer_id = Uuid::now_v7();
    let product_id = Uuid::now_v7();
    CreateOrderUseCase { orders: &orders }
        .execute(CreateOrderInput {
            customer_id,
            items: vec![NewOrderItem {
                product_id,
                product_name: "Runner 2".into(),
                quantity: 1,
                price: 1200.0,
                variant: None,
            }],
            total_price: 1200.0,
            shipping_address: ShippingAddress::default(),
            payment_method: PaymentMethod::Cod,
            coupon_id: None,
            order_total: OrderTotals {
                subtotal: 1200.0,
                discount: 0.0,
                total: 1200.0,
            },
        })
        .await
        .unwrap();

    let upsert = UpsertRatingUseCase {
        ratings: &ratings,
        orders: &orders,
    };
    let verified = upsert
        .execute(rating_input(product_id, customer_id, 5))
        .await
        .unwrap();
    assert!(verified.verified_purchase);

    let stranger = upsert
        .execute(rating_input(product_id, Uuid::now_v7(), 3))
        .await
        .unwrap();
    assert!(!stranger.verified_purchase);
}

#[tokio::test]
async fn second_submission_replaces_the_first() {
    let orders = MemOrders::default();
    let ratings = MemRatings::default();
    let upsert = UpsertRatingUseCase {
        ratings: &ratings,
        orders: &orders,
    };

    let product_id = Uuid::now_v7();
    let customer_id = Uuid::now_v7();
    let first = upsert
        .execute(rating_input(product_id, customer_id, 2))
        .await
        .unwrap();
    let second = upsert
        .execute(UpsertRatingInput {
            review: "changed my mind".into(),
            ..rating_input(product_id, customer_id, 5)
        })
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.rating, 5);
    assert_eq!(second.review, "changed my mind");

    let stored = GetCustomerRatingUseCase { ratings: &ratings }
        .execute(product_id, customer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.rating, 5);
    assert_eq!(ratings.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn stats_aggregate_average_and_distribution() {
    let orders = MemOrders::default();
    let ratings = MemRatings::default();
    let upsert = UpsertRatingUseCase {
        ratings: &ratings,
        orders: &orders,
    };

    let product_id = Uuid::now_v7();
    for value in [5, 5, 4, 2] {
        upsert
            .execute(rating_input(product_id, Uuid::now_v7(), value))
            .await
            .unwrap();
    }

    let stats = GetRatingStatsUseCase { ratings: &ratings }
        .execute(product_id)
        .await
        .unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.average, 4.0);
    assert_eq!(stats.distribution, [0, 1, 0, 1, 2]);
}

#[tokio::test]
async fn listing_pages_through_a_products_ratings() {
    let orders = MemOrders::default();
    let ratings = MemRatings::default();
    let upsert = UpsertRatingUseCase {
        ratings: &ratings,
        orders: &orders,
    };

    let product_id = Uuid::now_v7();
    for _ in 0..7 {
        upsert
            .execute(rating_input(product_id, Uuid::now_v7(), 4))
            .await
            .unwrap();
    }

    let list = ListProductRatingsUseCase { ratings: &ratings };
    let page = list
        .execute(product_id, PageRequest { limit: 3, page: 1 })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total, 7);
    assert_eq!(page.total_pages, 3);

    let last = list
        .execute(product_id, PageRequest { limit: 3, page: 3 })
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.page, 3);
}
