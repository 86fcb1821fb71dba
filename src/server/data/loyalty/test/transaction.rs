use super::*;

/// Tests a member's ledger listing.
///
/// Verifies that entries come back newest first and only for the member.
///
/// Expected: two entries, the later one first
#[tokio::test]
async fn lists_member_ledger_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .with_loyalty_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let program = factory::loyalty::LoyaltyProgramFactory::new(db, &cafe.id)
        .build()
        .await?;
    let customer = factory::create_customer(db).await?;
    let member = factory::loyalty::LoyaltyMemberFactory::new(db, &program, &customer.id)
        .build()
        .await?;

    let entry = |points, balance_after| RecordTransactionParams {
        program_id: program.id.clone(),
        member_id: member.id.clone(),
        cafe_id: cafe.id.clone(),
        order_id: None,
        transaction_type: TYPE_EARNED.to_string(),
        points,
        balance_after,
        description: "Points earned from order".to_string(),
        reference_id: None,
    };

    let repo = LoyaltyTransactionRepository::new(db);
    let now = Utc::now();
    repo.create(entry(25, 25), now - Duration::days(1)).await?;
    let latest = repo.create(entry(40, 65), now).await?;

    let page = repo.list_for_member(&member.id, PageRequest::default()).await?;

    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].id, latest.id);
    assert_eq!(page.items[0].balance_after, 65);
    assert_eq!(page.items[1].points, 25);

    Ok(())
}
