pub mod booking;
pub mod coupon;
pub mod pricing_rule;
pub mod schedule;
pub mod studio;
pub mod theme;
pub mod time_slot;
