use super::*;

/// Tests case-insensitive menu search.
///
/// Verifies that the term matches name, description or category regardless of case,
/// and that the optional cafe filter narrows results.
///
/// Expected: "LATTE" finds the latte by name and the cake by description
#[tokio::test]
async fn searches_name_description_and_category() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, cafe) = factory::helpers::create_cafe_with_owner(db).await?;
    let (_, other_cafe) = factory::helpers::create_cafe_with_owner(db).await?;

    factory::menu::MenuFactory::new(db, &cafe.id)
        .name("Green Tea Latte")
        .category("tea")
        .build()
        .await?;
    factory::menu::MenuFactory::new(db, &cafe.id)
        .name("Chocolate Cake")
        .description("Pairs well with a latte")
        .category("dessert")
        .build()
        .await?;
    factory::menu::MenuFactory::new(db, &other_cafe.id)
        .name("Caffe Latte")
        .build()
        .await?;

    let repo = MenuRepository::new(db);

    let all = repo.search("LATTE", None).await?;
    assert_eq!(all.len(), 3);

    let in_cafe = repo.search("latte", Some(&cafe.id)).await?;
    assert_eq!(in_cafe.len(), 2);

    let by_category = repo.search("dessert", None).await?;
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].name, "Chocolate Cake");

    Ok(())
}
