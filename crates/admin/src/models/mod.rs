//! Domain models for the admin back office.

pub mod admin_user;
pub mod catalog;
pub mod content;
pub mod customer;
pub mod order;
pub mod report;

pub use admin_user::{AdminRole, AdminUser, CurrentAdmin, session_keys};
pub use catalog::{Collection, Product, ProductImage, ProductVariant};
pub use content::Section;
pub use customer::{Customer, CustomerAddress};
pub use order::{AdminOrder, AdminOrderDetail, AdminOrderItem};
pub use report::{DashboardKpis, MonthlyRevenue, TopProduct};
