//! sea-orm entities for the marketplace API.

pub mod admin_users;
pub mod brands;
pub mod categories;
pub mod coupons;
pub mod customers;
pub mod notifications;
pub mod order_items;
pub mod orders;
pub mod posters;
pub mod product_images;
pub mod product_variants;
pub mod products;
pub mod ratings;
pub mod sub_categories;
pub mod variant_types;
pub mod variants;
