use chrono::{Duration, Utc};
use uuid::Uuid;

use market_api::domain::repository::ProductScope;
use market_api::domain::types::{Coupon, CouponStatus, DiscountType};
use market_api::usecase::coupon::{CheckCouponInput, CheckCouponUseCase, CouponCheck};

use crate::helpers::{MemCoupons, MemScopes};

fn coupon(code: &str) -> Coupon {
    let now = Utc::now();
    Coupon {
        id: Uuid::now_v7(),
        code: code.to_owned(),
        discount_type: DiscountType::Fixed,
        discount_amount: 50.0,
        minimum_purchase_amount: None,
        end_date: now + Duration::days(7),
        status: CouponStatus::Active,
        applicable_category_id: None,
        applicable_sub_category_id: None,
        applicable_product_id: None,
        created_by: Uuid::now_v7(),
        created_at: now,
        updated_at: now,
    }
}

fn input(code: &str, purchase_amount: f64, product_ids: Vec<Uuid>) -> CheckCouponInput {
    CheckCouponInput {
        code: code.to_owned(),
        purchase_amount,
        product_ids,
    }
}

fn assert_rejected(check: CouponCheck, message: &str) {
    match check {
        CouponCheck::Rejected(m) => assert_eq!(m, message),
        CouponCheck::Valid(_) => panic!("expected rejection: {message}"),
    }
}

#[tokio::test]
async fn unscoped_coupon_applies_regardless_of_cart_and_case() {
    let coupons = MemCoupons::default();
    coupons.rows.lock().unwrap().push(coupon("SAVE50"));
    let scopes = MemScopes::default();
    let check = CheckCouponUseCase {
        coupons: &coupons,
        products: &scopes,
    };

    let result = check
        .execute(input("save50", 10.0, vec![Uuid::now_v7()]))
        .await
        .unwrap();
    assert!(matches!(result, CouponCheck::Valid(_)));
}

#[tokio::test]
async fn lifecycle_rejections_come_back_as_messages() {
    let coupons = MemCoupons::default();
    let mut expired = coupon("EXPIRED");
    expired.end_date = Utc::now() - Duration::days(1);
    let mut inactive = coupon("PAUSED");
    inactive.status = CouponStatus::Inactive;
    let mut minimum = coupon("BIGCART");
    minimum.minimum_purchase_amount = Some(500.0);
    {
        let mut rows = coupons.rows.lock().unwrap();
        rows.push(expired);
        rows.push(inactive);
        rows.push(minimum);
    }
    let scopes = MemScopes::default();
    let check = CheckCouponUseCase {
        coupons: &coupons,
        products: &scopes,
    };

    assert_rejected(
        check.execute(input("NOSUCH", 100.0, vec![])).await.unwrap(),
        "Coupon not found.",
    );
    assert_rejected(
        check.execute(input("EXPIRED", 100.0, vec![])).await.unwrap(),
        "Coupon is expired.",
    );
    assert_rejected(
        check.execute(input("PAUSED", 100.0, vec![])).await.unwrap(),
        "Coupon is inactive.",
    );
    assert_rejected(
        check.execute(input("BIGCART", 100.0, vec![])).await.unwrap(),
        "Minimum purchase amount of 500 is required.",
    );
}

#[tokio::test]
async fn scoped_coupon_requires_every_cart_product_to_match() {
    let category_id = Uuid::now_v7();
    let in_scope = ProductScope {
        id: Uuid::now_v7(),
        category_id,
        sub_category_id: Uuid::now_v7(),
    };
    let out_of_scope = ProductScope {
        id: Uuid::now_v7(),
        category_id: Uuid::now_v7(),
        sub_category_id: Uuid::now_v7(),
    };

    let coupons = MemCoupons::default();
    let mut scoped = coupon("SHOES10");
    scoped.applicable_category_id = Some(category_id);
    coupons.rows.lock().unwrap().push(scoped);

    let scopes = MemScopes {
        rows: vec![in_scope, out_of_scope],
    };
    let check = CheckCouponUseCase {
        coupons: &coupons,
        products: &scopes,
    };

    let result = check
        .execute(input("SHOES10", 100.0, vec![in_scope.id]))
        .await
        .unwrap();
    assert!(matches!(result, CouponCheck::Valid(_)));

    assert_rejected(
        check
            .execute(input("SHOES10", 100.0, vec![in_scope.id, out_of_scope.id]))
            .await
            .unwrap(),
        "Coupon is not applicable to the selected products.",
    );

    // unknown products resolve to no scopes at all
    assert_rejected(
        check
            .execute(input("SHOES10", 100.0, vec![Uuid::now_v7()]))
            .await
            .unwrap(),
        "Coupon is not applicable to the selected products.",
    );
}
