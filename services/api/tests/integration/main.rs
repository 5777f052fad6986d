mod helpers;

mod admin_test;
mod catalog_test;
mod coupon_test;
mod order_test;
mod rating_test;
mod routes_test;
mod verification_test;
