//! Small helpers shared by services and middleware.

pub mod password;
pub mod reference;
pub mod token;
