pub mod admin_user;
pub mod catalog;
pub mod coupon;
pub mod customer;
pub mod notification;
pub mod order;
pub mod rating;
pub mod verification;
