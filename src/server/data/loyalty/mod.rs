//! Repositories for loyalty programs and everything hanging off them.

pub mod member;
pub mod member_reward;
pub mod program;
pub mod reward;
pub mod transaction;

#[cfg(test)]
mod test;
