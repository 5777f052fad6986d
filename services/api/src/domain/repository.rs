#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use market_core::pagination::PageRequest;

use crate::domain::types::{
    AdminUser, ClearanceLevel, Coupon, CouponStatus, Customer, DiscountType, NotificationRecord,
    NotificationStats, Order, OrderStatus, OrderTotals, Owned, PaymentProof, PaymentStatus,
    Rating, RatingStats, ShippingAddress,
};
use crate::error::ApiError;

// ── Generic catalog contract ──────────────────────────────────────────────────

/// One store per owned resource kind (category, brand, product, …).
///
/// The generic CRUD usecases apply the same ownership and integrity rules to
/// every implementor; only the entity shape and the dependent query differ.
pub trait CatalogRepository: Send + Sync {
    type Entity: Owned + Clone + serde::Serialize;
    type NewEntity;
    type Patch;

    /// Resource name used in messages ("category", "sub-category", …).
    const KIND: &'static str;

    /// All rows newest-first, optionally filtered to one creator.
    async fn list(&self, created_by: Option<Uuid>) -> Result<Vec<Self::Entity>, ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Self::Entity>, ApiError>;

    async fn insert(
        &self,
        new: Self::NewEntity,
        created_by: Uuid,
    ) -> Result<Self::Entity, ApiError>;

    /// Returns `None` when the row does not exist.
    async fn apply_patch(
        &self,
        id: Uuid,
        patch: Self::Patch,
    ) -> Result<Option<Self::Entity>, ApiError>;

    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;

    /// Rows in other tables still referencing this one. Deletion is refused
    /// while this is non-zero.
    async fn dependent_count(&self, id: Uuid) -> Result<u64, ApiError>;
}

// ── Catalog inputs ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct NewSubCategory {
    pub name: String,
    pub category_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewBrand {
    pub name: String,
    pub sub_category_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewVariantType {
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Clone)]
pub struct NewVariant {
    pub name: String,
    pub variant_type_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub offer_price: Option<f64>,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
    pub brand_id: Option<Uuid>,
    pub variant_type_id: Option<Uuid>,
    pub variant_ids: Vec<Uuid>,
    pub image_urls: Vec<String>,
}

/// Category updates keep the stored image when no replacement is uploaded.
#[derive(Debug, Clone)]
pub struct CategoryPatch {
    pub name: String,
    pub image_url: Option<String>,
}

/// Partial product update; image entries replace the slot at their position.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub offer_price: Option<f64>,
    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub variant_type_id: Option<Uuid>,
    pub variant_ids: Option<Vec<Uuid>>,
    pub images: Vec<(i16, String)>,
}

#[derive(Debug, Clone)]
pub struct NewCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_amount: f64,
    pub minimum_purchase_amount: Option<f64>,
    pub end_date: DateTime<Utc>,
    pub status: CouponStatus,
    pub applicable_category_id: Option<Uuid>,
    pub applicable_sub_category_id: Option<Uuid>,
    pub applicable_product_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewPoster {
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct PosterPatch {
    pub name: String,
    pub image_url: Option<String>,
}

// ── Coupon checks ─────────────────────────────────────────────────────────────

/// Code lookup for the public coupon check; matching is case-insensitive.
pub trait CouponLookup: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, ApiError>;
}

/// The product fields a scoped coupon is checked against.
#[derive(Debug, Clone, Copy)]
pub struct ProductScope {
    pub id: Uuid,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
}

pub trait ProductScopeLookup: Send + Sync {
    /// Scopes for the requested ids; unknown ids are silently dropped.
    async fn scopes(&self, ids: &[Uuid]) -> Result<Vec<ProductScope>, ApiError>;
}

// ── Admin users ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewAdminUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub clearance: ClearanceLevel,
    pub created_by: Option<Uuid>,
}

/// Partial admin update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct AdminUserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub clearance: Option<ClearanceLevel>,
    pub is_active: Option<bool>,
}

/// Per-type row counts removed by an admin cascade delete.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct CascadeReport {
    pub products: u64,
    pub categories: u64,
    pub sub_categories: u64,
    pub brands: u64,
    pub variant_types: u64,
    pub variants: u64,
    pub coupons: u64,
    pub posters: u64,
}

pub trait AdminUserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, ApiError>;

    /// Active admins, newest-first.
    async fn list_active(&self) -> Result<Vec<AdminUser>, ApiError>;

    async fn insert(&self, new: NewAdminUser) -> Result<AdminUser, ApiError>;

    async fn apply_patch(
        &self,
        id: Uuid,
        patch: AdminUserPatch,
    ) -> Result<Option<AdminUser>, ApiError>;

    /// Soft delete: flips `is_active` off. Returns `false` when not found.
    async fn deactivate(&self, id: Uuid) -> Result<bool, ApiError>;

    /// Best-effort delete of every row the admin created, then the admin row
    /// itself. Not transactional: failures for one type are logged and the
    /// rest still runs.
    async fn delete_with_owned(&self, id: Uuid) -> Result<CascadeReport, ApiError>;

    async fn any_super_admin(&self) -> Result<bool, ApiError>;
}

// ── Customers ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: String,
}

pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, ApiError>;

    /// First account with this display name (login key, not unique).
    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, ApiError>;

    /// All customers, newest-first.
    async fn list(&self) -> Result<Vec<Customer>, ApiError>;

    async fn insert(&self, new: NewCustomer) -> Result<Customer, ApiError>;

    async fn update_name(&self, id: Uuid, name: &str) -> Result<Option<Customer>, ApiError>;

    /// Change email and drop `email_verified` until re-verified.
    async fn update_email(&self, id: Uuid, email: &str) -> Result<Option<Customer>, ApiError>;

    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<(), ApiError>;

    /// Store a pending verification code for the email, creating an
    /// unverified skeleton account when none exists yet.
    async fn upsert_pending(
        &self,
        email: &str,
        code: &str,
        expires: DateTime<Utc>,
    ) -> Result<Customer, ApiError>;

    /// Stash a one-time code with its expiry.
    async fn set_verification_code(
        &self,
        id: Uuid,
        code: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), ApiError>;

    /// Mark the email verified and clear the pending code.
    async fn mark_email_verified(&self, id: Uuid) -> Result<(), ApiError>;

    /// Clear the pending code without verifying (used after password reset).
    async fn clear_verification_code(&self, id: Uuid) -> Result<(), ApiError>;

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
    pub variant: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub order_status: OrderStatus,
    pub items: Vec<NewOrderItem>,
    pub total_price: f64,
    pub shipping_address: ShippingAddress,
    pub payment_method: crate::domain::types::PaymentMethod,
    pub payment_status: PaymentStatus,
    pub coupon_id: Option<Uuid>,
    pub order_total: OrderTotals,
    pub tracking_url: Option<String>,
}

/// List filter; all fields combine with AND.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    pub customer_id: Option<Uuid>,
    pub payment_status: Option<PaymentStatus>,
    /// Non-cod orders with a proof attached and payment still pending.
    pub pending_verification: bool,
}

/// New payment state computed by the usecase, persisted in one row update.
#[derive(Debug, Clone)]
pub struct OrderPaymentUpdate {
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub proof: Option<PaymentProof>,
}

pub trait OrderRepository: Send + Sync {
    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ApiError>;
    async fn insert(&self, new: NewOrder) -> Result<Order, ApiError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        tracking_url: Option<String>,
    ) -> Result<Option<Order>, ApiError>;

    async fn update_payment(
        &self,
        id: Uuid,
        update: OrderPaymentUpdate,
    ) -> Result<Option<Order>, ApiError>;

    /// Unconditional delete; line items go with the order. Returns `false`
    /// when not found.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

// ── Ratings ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewRating {
    pub product_id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub rating: i16,
    pub review: String,
    pub verified_purchase: bool,
}

pub trait RatingRepository: Send + Sync {
    /// Insert a new rating. A duplicate (product, customer) pair surfaces as
    /// `Conflict` via the unique index.
    async fn insert(&self, new: NewRating) -> Result<Rating, ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rating>, ApiError>;

    async fn find_by_product_and_customer(
        &self,
        product_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<Rating>, ApiError>;

    /// One page of a product's ratings (newest-first) plus the total count.
    async fn list_by_product(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Rating>, u64), ApiError>;

    async fn stats(&self, product_id: Uuid) -> Result<RatingStats, ApiError>;

    async fn update(
        &self,
        id: Uuid,
        rating: i16,
        review: String,
    ) -> Result<Option<Rating>, ApiError>;

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

// ── Notifications ─────────────────────────────────────────────────────────────

pub trait NotificationRepository: Send + Sync {
    async fn insert(
        &self,
        provider_id: &str,
        title: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> Result<NotificationRecord, ApiError>;

    /// Stored notifications, newest-first.
    async fn list(&self) -> Result<Vec<NotificationRecord>, ApiError>;

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

// ── Outbound ports ────────────────────────────────────────────────────────────

/// Push provider (OneSignal). Failures map to `ApiError::Upstream`.
pub trait PushPort: Send + Sync {
    /// Broadcast to all subscribers; returns the provider's notification id.
    async fn send(
        &self,
        title: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> Result<String, ApiError>;

    async fn stats(&self, provider_id: &str) -> Result<NotificationStats, ApiError>;
}

/// Transactional mail relay.
pub trait MailerPort: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError>;
}

/// Image host (Cloudinary unsigned upload). Takes a data-URI or raw base64
/// payload and returns the hosted URL.
pub trait ImageStorePort: Send + Sync {
    async fn upload_base64(&self, payload: &str) -> Result<String, ApiError>;
}
