//! Domain models for the storefront.

pub mod cart;
pub mod catalog;
pub mod content;
pub mod order;
pub mod review;
pub mod user;

pub use cart::{CartLine, CartView, WishlistItem};
pub use catalog::{Collection, Product, ProductImage, ProductVariant};
pub use content::Section;
pub use order::{Order, OrderItem, OrderWithItems, ShippingAddress};
pub use review::{Review, ReviewSummary};
pub use user::{Address, CurrentUser, User};
