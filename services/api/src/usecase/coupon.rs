use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CouponLookup, ProductScopeLookup};
use crate::domain::types::{Coupon, CouponStatus};
use crate::error::ApiError;

/// Result of a storefront coupon check. Rejections are a normal answer
/// (HTTP 200), not an error.
#[derive(Debug, Clone)]
pub enum CouponCheck {
    Valid(Coupon),
    Rejected(String),
}

pub struct CheckCouponInput {
    pub code: String,
    pub purchase_amount: f64,
    pub product_ids: Vec<Uuid>,
}

pub struct CheckCouponUseCase<C: CouponLookup, P: ProductScopeLookup> {
    pub coupons: C,
    pub products: P,
}

impl<C: CouponLookup, P: ProductScopeLookup> CheckCouponUseCase<C, P> {
    pub async fn execute(&self, input: CheckCouponInput) -> Result<CouponCheck, ApiError> {
        if input.code.trim().is_empty() {
            return Err(ApiError::Validation("coupon code is required"));
        }

        let Some(coupon) = self.coupons.find_by_code(&input.code).await? else {
            return Ok(CouponCheck::Rejected("Coupon not found.".into()));
        };

        if coupon.end_date < Utc::now() {
            return Ok(CouponCheck::Rejected("Coupon is expired.".into()));
        }
        if coupon.status != CouponStatus::Active {
            return Ok(CouponCheck::Rejected("Coupon is inactive.".into()));
        }
        if let Some(minimum) = coupon.minimum_purchase_amount {
            if input.purchase_amount < minimum {
                return Ok(CouponCheck::Rejected(format!(
                    "Minimum purchase amount of {minimum} is required."
                )));
            }
        }

        // Scoped coupons require every product in the cart to match.
        if coupon.is_scoped() {
            let scopes = self.products.scopes(&input.product_ids).await?;
            if scopes.is_empty() {
                return Ok(CouponCheck::Rejected(
                    "Coupon is not applicable to the selected products.".into(),
                ));
            }
            let all_match = scopes.iter().all(|scope| {
                coupon.applicable_product_id.is_some_and(|id| id == scope.id)
                    || coupon
                        .applicable_category_id
                        .is_some_and(|id| id == scope.category_id)
                    || coupon
                        .applicable_sub_category_id
                        .is_some_and(|id| id == scope.sub_category_id)
            });
            if !all_match {
                return Ok(CouponCheck::Rejected(
                    "Coupon is not applicable to the selected products.".into(),
                ));
            }
        }

        Ok(CouponCheck::Valid(coupon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::ProductScope;
    use crate::domain::types::DiscountType;
    use chrono::Duration;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockCoupons {
        rows: Mutex<Vec<Coupon>>,
    }

    impl CouponLookup for &MockCoupons {
        async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, ApiError> {
            let code = code.trim().to_uppercase();
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.code == code)
                .cloned())
        }
    }

    #[derive(Default)]
    struct MockScopes {
        rows: Vec<ProductScope>,
    }

    impl ProductScopeLookup for &MockScopes {
        async fn scopes(&self, ids: &[Uuid]) -> Result<Vec<ProductScope>, ApiError> {
            Ok(self
                .rows
                .iter()
                .filter(|s| ids.contains(&s.id))
                .copied()
                .collect())
        }
    }

    fn coupon(code: &str) -> Coupon {
        let now = Utc::now();
        Coupon {
            id: Uuid::now_v7(),
            code: code.to_owned(),
            discount_type: DiscountType::Fixed,
            discount_amount: 10.0,
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

    fn input(code: &str, amount: f64, product_ids: Vec<Uuid>) -> CheckCouponInput {
        CheckCouponInput {
            code: code.to_owned(),
            purchase_amount: amount,
            product_ids,
        }
    }

    #[tokio::test]
    async fn unknown_code_is_rejected_not_an_error() {
        let coupons = MockCoupons::default();
        let scopes = MockScopes::default();
        let check = CheckCouponUseCase {
            coupons: &coupons,
            products: &scopes,
        }
        .execute(input("NOPE", 100.0, vec![]))
        .await
        .unwrap();
        assert!(matches!(check, CouponCheck::Rejected(msg) if msg.contains("not found")));
    }

    #[tokio::test]
    async fn expired_and_inactive_coupons_are_rejected() {
        let coupons = MockCoupons::default();
        let mut expired = coupon("OLD10");
        expired.end_date = Utc::now() - Duration::days(1);
        let mut inactive = coupon("OFF10");
        inactive.status = CouponStatus::Inactive;
        coupons.rows.lock().unwrap().extend([expired, inactive]);
        let scopes = MockScopes::default();
        let usecase = CheckCouponUseCase {
            coupons: &coupons,
            products: &scopes,
        };

        let check = usecase.execute(input("OLD10", 100.0, vec![])).await.unwrap();
        assert!(matches!(check, CouponCheck::Rejected(msg) if msg.contains("expired")));

        let check = usecase.execute(input("OFF10", 100.0, vec![])).await.unwrap();
        assert!(matches!(check, CouponCheck::Rejected(msg) if msg.contains("inactive")));
    }

    #[tokio::test]
    async fn minimum_purchase_is_enforced() {
        let coupons = MockCoupons::default();
        let mut save = coupon("SAVE10");
        save.minimum_purchase_amount = Some(50.0);
        coupons.rows.lock().unwrap().push(save);
        let scopes = MockScopes::default();
        let usecase = CheckCouponUseCase {
            coupons: &coupons,
            products: &scopes,
        };

        let check = usecase.execute(input("SAVE10", 30.0, vec![])).await.unwrap();
        assert!(matches!(check, CouponCheck::Rejected(msg) if msg.contains("Minimum purchase")));

        let check = usecase.execute(input("SAVE10", 80.0, vec![])).await.unwrap();
        assert!(matches!(check, CouponCheck::Valid(_)));
    }

    #[tokio::test]
    async fn scoped_coupon_requires_every_product_to_match() {
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

        let coupons = MockCoupons::default();
        let mut scoped = coupon("CAT10");
        scoped.applicable_category_id = Some(category_id);
        coupons.rows.lock().unwrap().push(scoped);
        let scopes = MockScopes {
            rows: vec![in_scope, out_of_scope],
        };
        let usecase = CheckCouponUseCase {
            coupons: &coupons,
            products: &scopes,
        };

        let check = usecase
            .execute(input("CAT10", 100.0, vec![in_scope.id]))
            .await
            .unwrap();
        assert!(matches!(check, CouponCheck::Valid(_)));

        let check = usecase
            .execute(input("CAT10", 100.0, vec![in_scope.id, out_of_scope.id]))
            .await
            .unwrap();
        assert!(matches!(check, CouponCheck::Rejected(_)));
    }

    #[tokio::test]
    async fn code_match_is_case_insensitive() {
        let coupons = MockCoupons::default();
        coupons.rows.lock().unwrap().push(coupon("SAVE10"));
        let scopes = MockScopes::default();

        let check = CheckCouponUseCase {
            coupons: &coupons,
            products: &scopes,
        }
        .execute(input("save10", 100.0, vec![]))
        .await
        .unwrap();
        assert!(matches!(check, CouponCheck::Valid(_)));
    }
}
