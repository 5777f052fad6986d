//! In-memory repository fakes shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use market_api::auth::{self, AdminIdentity};
use market_api::domain::repository::{
    AdminUserPatch, AdminUserRepository, CascadeReport, CatalogRepository, CategoryPatch,
    CouponLookup, CustomerRepository, MailerPort, NewAdminUser, NewCategory, NewCustomer,
    NewOrder, NewRating, OrderFilter, OrderPaymentUpdate, OrderRepository, ProductScope,
    ProductScopeLookup, RatingRepository,
};
use market_api::domain::types::{
    AdminUser, Category, ClearanceLevel, Coupon, Customer, Order, OrderItem, OrderStatus,
    PaymentMethod, PaymentStatus, Rating, RatingStats,
};
use market_api::error::ApiError;
use market_core::pagination::PageRequest;

pub fn identity(admin: &AdminUser) -> AdminIdentity {
    AdminIdentity {
        id: admin.id,
        clearance: admin.clearance,
    }
}

// ── Admins ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemAdmins {
    pub rows: Mutex<HashMap<Uuid, AdminUser>>,
    pub cascades: Mutex<Vec<Uuid>>,
}

impl MemAdmins {
    pub fn seed(&self, username: &str, password: &str, clearance: ClearanceLevel) -> AdminUser {
        let now = Utc::now();
        let admin = AdminUser {
            id: Uuid::now_v7(),
            username: username.to_owned(),
            name: username.to_owned(),
            email: format!("{username}@example.com"),
            password_hash: auth::hash_password(password).unwrap(),
            clearance,
            created_by: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(admin.id, admin.clone());
        admin
    }
}

impl AdminUserRepository for &MemAdmins {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, ApiError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<AdminUser>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.is_active)
            .cloned()
            .collect())
    }

    async fn insert(&self, new: NewAdminUser) -> Result<AdminUser, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .values()
            .any(|a| a.username == new.username || a.email == new.email)
        {
            return Err(ApiError::Conflict(
                "username or email already exists".into(),
            ));
        }
        let now = Utc::now();
        let admin = AdminUser {
            id: Uuid::now_v7(),
            username: new.username,
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            clearance: new.clearance,
            created_by: new.created_by,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        rows.insert(admin.id, admin.clone());
        Ok(admin)
    }

    async fn apply_patch(
        &self,
        id: Uuid,
        patch: AdminUserPatch,
    ) -> Result<Option<AdminUser>, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(email) = patch.email {
            row.email = email;
        }
        if let Some(clearance) = patch.clearance {
            row.clearance = clearance;
        }
        if let Some(is_active) = patch.is_active {
            row.is_active = is_active;
        }
        Ok(Some(row.clone()))
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(row) => {
                row.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_with_owned(&self, id: Uuid) -> Result<CascadeReport, ApiError> {
        self.cascades.lock().unwrap().push(id);
        self.rows.lock().unwrap().remove(&id);
        Ok(CascadeReport::default())
    }

    async fn any_super_admin(&self) -> Result<bool, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .any(|a| a.clearance == ClearanceLevel::SuperAdmin))
    }
}

// ── Categories ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemCategories {
    pub rows: Mutex<HashMap<Uuid, Category>>,
    /// Simulated dependents per category id.
    pub dependents: Mutex<HashMap<Uuid, u64>>,
}

impl MemCategories {
    pub fn set_dependents(&self, id: Uuid, count: u64) {
        self.dependents.lock().unwrap().insert(id, count);
    }
}

impl CatalogRepository for &MemCategories {
    type Entity = Category;
    type NewEntity = NewCategory;
    type Patch = CategoryPatch;

    const KIND: &'static str = "category";

    async fn list(&self, created_by: Option<Uuid>) -> Result<Vec<Category>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|c| created_by.is_none_or(|id| c.created_by == id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, ApiError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, new: NewCategory, created_by: Uuid) -> Result<Category, ApiError> {
        let now = Utc::now();
        let category = Category {
            id: Uuid::now_v7(),
            name: new.name,
            image_url: new.image_url,
            created_by,
            creator: None,
            created_at: now,
            updated_at: now,
        };
        self.rows
            .lock()
            .unwrap()
            .insert(category.id, category.clone());
        Ok(category)
    }

    async fn apply_patch(&self, id: Uuid, patch: CategoryPatch) -> Result<Option<Category>, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        row.name = patch.name;
        if let Some(image_url) = patch.image_url {
            row.image_url = image_url;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn dependent_count(&self, id: Uuid) -> Result<u64, ApiError> {
        Ok(self.dependents.lock().unwrap().get(&id).copied().unwrap_or(0))
    }
}

// ── Customers ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemCustomers {
    pub rows: Mutex<HashMap<Uuid, Customer>>,
}

impl CustomerRepository for &MemCustomers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, ApiError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, ApiError> {
        let email = email.to_lowercase();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|c| c.email.as_deref() == Some(email.as_str()))
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Customer>, ApiError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn insert(&self, new: NewCustomer) -> Result<Customer, ApiError> {
        if let Some(email) = &new.email {
            if self.find_by_email(email).await?.is_some() {
                return Err(ApiError::Conflict(
                    "an account with that email or phone already exists".into(),
                ));
            }
        }
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::now_v7(),
            name: new.name,
            email: new.email.map(|e| e.to_lowercase()),
            phone: new.phone,
            password_hash: new.password_hash,
            email_verified: false,
            phone_verified: false,
            verification_code: None,
            code_expires: None,
            created_at: now,
            updated_at: now,
        };
        self.rows
            .lock()
            .unwrap()
            .insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn update_name(&self, id: Uuid, name: &str) -> Result<Option<Customer>, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        row.name = name.to_owned();
        Ok(Some(row.clone()))
    }

    async fn update_email(&self, id: Uuid, email: &str) -> Result<Option<Customer>, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        row.email = Some(email.to_lowercase());
        row.email_verified = false;
        Ok(Some(row.clone()))
    }

    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<(), ApiError> {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&id) {
            row.password_hash = hash.to_owned();
        }
        Ok(())
    }

    async fn upsert_pending(
        &self,
        email: &str,
        code: &str,
        expires: DateTime<Utc>,
    ) -> Result<Customer, ApiError> {
        if let Some(existing) = self.find_by_email(email).await? {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.get_mut(&existing.id).unwrap();
            row.verification_code = Some(code.to_owned());
            row.code_expires = Some(expires);
            row.email_verified = false;
            return Ok(row.clone());
        }
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::now_v7(),
            name: String::new(),
            email: Some(email.to_lowercase()),
            phone: None,
            password_hash: String::new(),
            email_verified: false,
            phone_verified: false,
            verification_code: Some(code.to_owned()),
            code_expires: Some(expires),
            created_at: now,
            updated_at: now,
        };
        self.rows
            .lock()
            .unwrap()
            .insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn set_verification_code(
        &self,
        id: Uuid,
        code: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&id) {
            row.verification_code = Some(code.to_owned());
            row.code_expires = Some(expires);
        }
        Ok(())
    }

    async fn mark_email_verified(&self, id: Uuid) -> Result<(), ApiError> {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&id) {
            row.email_verified = true;
            row.verification_code = None;
            row.code_expires = None;
        }
        Ok(())
    }

    async fn clear_verification_code(&self, id: Uuid) -> Result<(), ApiError> {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&id) {
            row.verification_code = None;
            row.code_expires = None;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemOrders {
    pub rows: Mutex<HashMap<Uuid, Order>>,
}

impl OrderRepository for &MemOrders {
    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|o| filter.customer_id.is_none_or(|id| o.customer_id == id))
            .filter(|o| filter.payment_status.is_none_or(|s| o.payment_status == s))
            .filter(|o| {
                !filter.pending_verification
                    || (o.payment_method != PaymentMethod::Cod
                        && o.payment_status == PaymentStatus::Pending
                        && o.payment_proof.is_some())
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ApiError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, new: NewOrder) -> Result<Order, ApiError> {
        let now = Utc::now();
        let order = Order {
            id: Uuid::now_v7(),
            customer_id: new.customer_id,
            order_status: new.order_status,
            items: new
                .items
                .into_iter()
                .map(|item| OrderItem {
                    id: Uuid::now_v7(),
                    product_id: item.product_id,
                    product_name: item.product_name,
                    quantity: item.quantity,
                    price: item.price,
                    variant: item.variant,
                })
                .collect(),
            total_price: new.total_price,
            shipping_address: new.shipping_address,
            payment_method: new.payment_method,
            payment_status: new.payment_status,
            payment_proof: None,
            coupon_id: new.coupon_id,
            order_total: new.order_total,
            tracking_url: new.tracking_url,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(order.id, order.clone());
        Ok(order)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        tracking_url: Option<String>,
    ) -> Result<Option<Order>, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        row.order_status = status;
        if tracking_url.is_some() {
            row.tracking_url = tracking_url;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn update_payment(
        &self,
        id: Uuid,
        update: OrderPaymentUpdate,
    ) -> Result<Option<Order>, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        row.order_status = update.order_status;
        row.payment_status = update.payment_status;
        if update.proof.is_some() {
            row.payment_proof = update.proof;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

// ── Ratings ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemRatings {
    pub rows: Mutex<HashMap<Uuid, Rating>>,
}

impl RatingRepository for &MemRatings {
    async fn insert(&self, new: NewRating) -> Result<Rating, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .values()
            .any(|r| r.product_id == new.product_id && r.customer_id == new.customer_id)
        {
            return Err(ApiError::Conflict(
                "you have already rated this product".into(),
            ));
        }
        let now = Utc::now();
        let rating = Rating {
            id: Uuid::now_v7(),
            product_id: new.product_id,
            customer_id: new.customer_id,
            customer_name: new.customer_name,
            rating: new.rating,
            review: new.review,
            verified_purchase: new.verified_purchase,
            created_at: now,
            updated_at: now,
        };
        rows.insert(rating.id, rating.clone());
        Ok(rating)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rating>, ApiError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_product_and_customer(
        &self,
        product_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<Rating>, ApiError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|r| r.product_id == product_id && r.customer_id == customer_id)
            .cloned())
    }

    async fn list_by_product(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Rating>, u64), ApiError> {
        let mut all: Vec<Rating> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok((items, total))
    }

    async fn stats(&self, product_id: Uuid) -> Result<RatingStats, ApiError> {
        let rows = self.rows.lock().unwrap();
        let values: Vec<i16> = rows
            .values()
            .filter(|r| r.product_id == product_id)
            .map(|r| r.rating)
            .collect();
        if values.is_empty() {
            return Ok(RatingStats::empty());
        }
        let mut distribution = [0u64; 5];
        for value in &values {
            distribution[(*value - 1) as usize] += 1;
        }
        let sum: i64 = values.iter().map(|v| *v as i64).sum();
        let average = (sum as f64 / values.len() as f64 * 10.0).round() / 10.0;
        Ok(RatingStats {
            average,
            total: values.len() as u64,
            distribution,
        })
    }

    async fn update(
        &self,
        id: Uuid,
        rating: i16,
        review: String,
    ) -> Result<Option<Rating>, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        row.rating = rating;
        row.review = review;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

// ── Coupons & product scopes ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MemCoupons {
    pub rows: Mutex<Vec<Coupon>>,
}

impl CouponLookup for &MemCoupons {
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
pub struct MemScopes {
    pub rows: Vec<ProductScope>,
}

impl ProductScopeLookup for &MemScopes {
    async fn scopes(&self, ids: &[Uuid]) -> Result<Vec<ProductScope>, ApiError> {
        Ok(self
            .rows
            .iter()
            .filter(|s| ids.contains(&s.id))
            .copied()
            .collect())
    }
}

// ── Mailer ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl MailerPort for &RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), subject.to_owned(), body.to_owned()));
        Ok(())
    }
}
