use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use market_core::serde::{to_rfc3339_ms, to_rfc3339_ms_opt};

// ── Enums ─────────────────────────────────────────────────────────────────────

/// Admin clearance tier. Super admins bypass ownership checks and may manage
/// other admin accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearanceLevel {
    Admin,
    SuperAdmin,
}

impl ClearanceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    PaymentPending,
    PaymentVerified,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::PaymentPending => "payment_pending",
            Self::PaymentVerified => "payment_verified",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            "payment_pending" => Some(Self::PaymentPending),
            "payment_verified" => Some(Self::PaymentVerified),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cod,
    Cbe,
    Telebirr,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Cbe => "cbe",
            Self::Telebirr => "telebirr",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cod" => Some(Self::Cod),
            "cbe" => Some(Self::Cbe),
            "telebirr" => Some(Self::Telebirr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Verified,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Fixed,
    Percentage,
}

impl DiscountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Percentage => "percentage",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fixed" => Some(Self::Fixed),
            "percentage" => Some(Self::Percentage),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponStatus {
    Active,
    Inactive,
}

impl CouponStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

// ── Ownership ─────────────────────────────────────────────────────────────────

/// Anything an admin owns. The ownership rule (creator or super admin) is
/// applied uniformly to every implementor.
pub trait Owned {
    fn id(&self) -> Uuid;
    fn created_by(&self) -> Uuid;
}

/// Creator shown in list responses instead of a bare uuid.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSummary {
    pub id: Uuid,
    pub username: String,
    pub name: String,
}

// ── Admins & customers ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub clearance: ClearanceLevel,
    pub created_by: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: String,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub verification_code: Option<String>,
    pub code_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub created_by: Uuid,
    /// Populated on reads, `None` straight after a write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<AdminSummary>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubCategory {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub created_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<AdminSummary>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub sub_category_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category_name: Option<String>,
    pub created_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<AdminSummary>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantType {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub created_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<AdminSummary>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    pub id: Uuid,
    pub name: String,
    pub variant_type_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_type_name: Option<String>,
    pub created_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<AdminSummary>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

macro_rules! impl_owned {
    ($($ty:ty),+ $(,)?) => {
        $(impl Owned for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
            fn created_by(&self) -> Uuid {
                self.created_by
            }
        })+
    };
}

impl_owned!(Category, SubCategory, Brand, VariantType, Variant);

// ── Products ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ProductImage {
    pub position: i16,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub offer_price: Option<f64>,
    pub category_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub sub_category_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category_name: Option<String>,
    pub brand_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    pub variant_type_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_type_name: Option<String>,
    pub variant_ids: Vec<Uuid>,
    pub images: Vec<ProductImage>,
    pub created_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<AdminSummary>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl_owned!(Product);

// ── Coupons & posters ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_amount: f64,
    pub minimum_purchase_amount: Option<f64>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub end_date: DateTime<Utc>,
    pub status: CouponStatus,
    pub applicable_category_id: Option<Uuid>,
    pub applicable_sub_category_id: Option<Uuid>,
    pub applicable_product_id: Option<Uuid>,
    pub created_by: Uuid,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl Coupon {
    /// A coupon is scoped when any applicability field is set. Unscoped
    /// coupons apply to every product.
    pub fn is_scoped(&self) -> bool {
        self.applicable_category_id.is_some()
            || self.applicable_sub_category_id.is_some()
            || self.applicable_product_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Poster {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub created_by: Uuid,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl_owned!(Coupon, Poster);

// ── Orders ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentProof {
    pub image_url: String,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub uploaded_at: Option<DateTime<Utc>>,
    pub verified: bool,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub verified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
    pub variant: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub order_status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_proof: Option<PaymentProof>,
    pub coupon_id: Option<Uuid>,
    pub order_total: OrderTotals,
    pub tracking_url: Option<String>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

// ── Ratings ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Rating {
    pub id: Uuid,
    pub product_id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub rating: i16,
    pub review: String,
    pub verified_purchase: bool,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

/// Per-product rating aggregate. `distribution[0]` counts 1-star ratings.
#[derive(Debug, Clone, Serialize)]
pub struct RatingStats {
    pub average: f64,
    pub total: u64,
    pub distribution: [u64; 5],
}

impl RatingStats {
    pub fn empty() -> Self {
        Self {
            average: 0.0,
            total: 0,
            distribution: [0; 5],
        }
    }
}

// ── Notifications ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct NotificationRecord {
    pub id: Uuid,
    pub provider_id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

/// Delivery counters reported by the push provider.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationStats {
    pub successful: u64,
    pub failed: u64,
    pub errored: u64,
    pub converted: u64,
}
