mod cafe;
mod chat;
mod inventory;
mod menu;
mod order;
mod user;
