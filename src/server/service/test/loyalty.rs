use chrono::{Duration, Utc};

use super::*;
use crate::server::{
    model::page::PageRequest,
    service::loyalty::{award_points, LoyaltyService},
};

/// Tests redeeming a reward with enough points.
///
/// Expected: 150 - 100 = 50 points left, an available member reward, one redeemed ledger
/// entry and the reward's use counter at 1
#[tokio::test]
async fn redeems_reward() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_loyalty_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let customer = factory::create_customer(db).await?;
    let program = factory::loyalty::LoyaltyProgramFactory::new(db, &cafe.id)
        .build()
        .await?;
    factory::loyalty::LoyaltyMemberFactory::new(db, &program, &customer.id)
        .points(150)
        .total_earned(150)
        .build()
        .await?;
    let reward = factory::loyalty::LoyaltyRewardFactory::new(db, &program)
        .points_cost(100)
        .uses(5, 0)
        .build()
        .await?;
    let service = LoyaltyService::new(db);

    let redemption = service.redeem(&customer.id, &reward.id, Utc::now()).await?;

    assert_eq!(redemption.points_spent, 100);
    assert_eq!(redemption.remaining_points, 50);
    assert_eq!(redemption.member_reward.status, "available");
    assert!(redemption.member_reward.expires_at.is_some());

    let stored = entity::prelude::LoyaltyReward::find_by_id(reward.id.clone())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.current_uses, 1);

    let ledger = service
        .transactions(&customer.id, &cafe.id, PageRequest::new(None, None, 20))
        .await?;
    assert_eq!(ledger.total, 1);
    assert_eq!(ledger.items[0].points, -100);
    assert_eq!(ledger.items[0].balance_after, 50);

    assert_eq!(service.member_rewards(&customer.id).await?.len(), 1);

    Ok(())
}

/// Tests a member without enough points.
///
/// Expected: Err(AppError::BadRequest) with balance and ledger untouched
#[tokio::test]
async fn rejects_insufficient_points() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_loyalty_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let customer = factory::create_customer(db).await?;
    let program = factory::loyalty::LoyaltyProgramFactory::new(db, &cafe.id)
        .build()
        .await?;
    let member = factory::loyalty::LoyaltyMemberFactory::new(db, &program, &customer.id)
        .points(40)
        .build()
        .await?;
    let reward = factory::loyalty::LoyaltyRewardFactory::new(db, &program)
        .points_cost(100)
        .build()
        .await?;

    let result = LoyaltyService::new(db)
        .redeem(&customer.id, &reward.id, Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(count(db, entity::prelude::LoyaltyTransaction).await?, 0);
    assert_eq!(count(db, entity::prelude::MemberReward).await?, 0);

    let stored = entity::prelude::LoyaltyMember::find_by_id(member.id.clone())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.current_points, 40);

    Ok(())
}

/// Tests the reward availability checks and membership requirement.
#[tokio::test]
async fn rejects_unavailable_rewards_and_non_members() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_loyalty_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let customer = factory::create_customer(db).await?;
    let outsider = factory::create_customer(db).await?;
    let program = factory::loyalty::LoyaltyProgramFactory::new(db, &cafe.id)
        .build()
        .await?;
    factory::loyalty::LoyaltyMemberFactory::new(db, &program, &customer.id)
        .points(1000)
        .build()
        .await?;

    let used_up = factory::loyalty::LoyaltyRewardFactory::new(db, &program)
        .uses(3, 3)
        .build()
        .await?;
    let expired = factory::loyalty::LoyaltyRewardFactory::new(db, &program)
        .valid_between(None, Some(Utc::now() - Duration::days(1)))
        .build()
        .await?;
    let inactive = factory::loyalty::LoyaltyRewardFactory::new(db, &program)
        .is_active(false)
        .build()
        .await?;
    let open = factory::loyalty::LoyaltyRewardFactory::new(db, &program)
        .build()
        .await?;
    let service = LoyaltyService::new(db);
    let now = Utc::now();

    for reward in [&used_up, &expired, &inactive] {
        let result = service.redeem(&customer.id, &reward.id, now).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    let missing = service.redeem(&customer.id, "missing", now).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let outsider_result = service.redeem(&outsider.id, &open.id, now).await;
    assert!(matches!(outsider_result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests joining a program once.
///
/// Expected: bronze member with zero points, then BadRequest on a second join
#[tokio::test]
async fn joins_program_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_loyalty_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let customer = factory::create_customer(db).await?;
    factory::loyalty::LoyaltyProgramFactory::new(db, &cafe.id)
        .build()
        .await?;
    let service = LoyaltyService::new(db);

    let member = service.join(&cafe.id, &customer.id).await?;
    assert_eq!(member.member_tier, "bronze");
    assert_eq!(member.current_points, 0);

    let again = service.join(&cafe.id, &customer.id).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that only members have a ledger.
#[tokio::test]
async fn transactions_require_membership() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_loyalty_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let customer = factory::create_customer(db).await?;

    let result = LoyaltyService::new(db)
        .transactions(&customer.id, &cafe.id, PageRequest::new(None, None, 20))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that awarding points to a balance near the integer limit saturates.
///
/// Expected: balance and lifetime total stop at i32::MAX instead of wrapping
#[tokio::test]
async fn award_saturates_at_point_limit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_loyalty_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let customer = factory::create_customer(db).await?;
    let program = factory::loyalty::LoyaltyProgramFactory::new(db, &cafe.id)
        .points_per_currency(1.0)
        .min_order_for_points(0.0)
        .build()
        .await?;
    let member = factory::loyalty::LoyaltyMemberFactory::new(db, &program, &customer.id)
        .points(i32::MAX - 10)
        .total_earned(i32::MAX - 10)
        .build()
        .await?;

    let transaction = award_points(db, &cafe.id, &customer.id, "order-1", 1_000.0, Utc::now())
        .await?
        .unwrap();
    assert_eq!(transaction.points, 1_000);
    assert_eq!(transaction.balance_after, i32::MAX);

    let stored = entity::prelude::LoyaltyMember::find_by_id(member.id.clone())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.current_points, i32::MAX);
    assert_eq!(stored.total_earned, i32::MAX);

    Ok(())
}
