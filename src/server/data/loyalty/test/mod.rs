use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::loyalty::{
        member::LoyaltyMemberRepository,
        reward::LoyaltyRewardRepository,
        transaction::{LoyaltyTransactionRepository, TYPE_EARNED},
    },
    model::{
        loyalty::{LoyaltyProgram, RecordTransactionParams},
        page::PageRequest,
    },
};

mod transaction;
