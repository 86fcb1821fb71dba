pub use super::cafe::Entity as Cafe;
pub use super::cafe_review::Entity as CafeReview;
pub use super::chat::Entity as Chat;
pub use super::favorite::Entity as Favorite;
pub use super::inventory::Entity as Inventory;
pub use super::loyalty_member::Entity as LoyaltyMember;
pub use super::loyalty_program::Entity as LoyaltyProgram;
pub use super::loyalty_reward::Entity as LoyaltyReward;
pub use super::loyalty_transaction::Entity as LoyaltyTransaction;
pub use super::member_reward::Entity as MemberReward;
pub use super::menu::Entity as Menu;
pub use super::order::Entity as Order;
pub use super::order_item::Entity as OrderItem;
pub use super::payment::Entity as Payment;
pub use super::stock_movement::Entity as StockMovement;
pub use super::user::Entity as User;
