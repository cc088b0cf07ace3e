//! Database entity models (SurrealDB)

pub mod app_settings;
pub mod dining_table;
pub mod menu_category;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod serde_helpers;
pub mod user;

pub use app_settings::{AppSettings, AppSettingsUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use menu_category::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{Order, OrderItem, OrderWithItems};
pub use payment::Payment;
pub use user::User;
