use super::*;
use crate::{
    model::menu::{CreateMenuDto, UpdateMenuDto},
    server::service::menu::MenuService,
};

fn menu_dto(name: &str, category: &str, price: f64) -> CreateMenuDto {
    CreateMenuDto {
        name: name.to_string(),
        category: category.to_string(),
        price,
        ..Default::default()
    }
}

/// Tests adding a menu to the owner's cafe.
///
/// Expected: Ok with trimmed name, the owner's cafe id and availability on
#[tokio::test]
async fn creates_menu_in_owned_cafe() -> Result<(), AppError> {
    let test = TestBuilder::new().with_cafe_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, cafe) = factory::helpers::create_cafe_with_owner(db).await?;

    let menu = MenuService::new(db)
        .create(&owner.id, menu_dto("  Flat White ", "coffee", 28000.0))
        .await?;

    assert_eq!(menu.name, "Flat White");
    assert_eq!(menu.cafe_id, cafe.id);
    assert!(menu.is_available);

    Ok(())
}

/// Tests the checks on a new menu.
///
/// Expected: Err(AppError::BadRequest) for a blank name, a blank category and a zero
/// price, and Err(AppError::NotFound) for an owner without a cafe
#[tokio::test]
async fn rejects_invalid_menu() -> Result<(), AppError> {
    let test = TestBuilder::new().with_cafe_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, _) = factory::helpers::create_cafe_with_owner(db).await?;
    let cafeless = factory::create_owner(db).await?;
    let service = MenuService::new(db);

    for dto in [
        menu_dto("   ", "coffee", 10000.0),
        menu_dto("Latte", " ", 10000.0),
        menu_dto("Latte", "coffee", 0.0),
    ] {
        let result = service.create(&owner.id, dto).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    let result = service
        .create(&cafeless.id, menu_dto("Latte", "coffee", 10000.0))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert_eq!(count(db, entity::prelude::Menu).await?, 0);

    Ok(())
}

/// Tests a partial update and its validation.
///
/// Expected: price updated, name kept; negative price and blank name rejected
#[tokio::test]
async fn updates_menu_fields() -> Result<(), AppError> {
    let test = TestBuilder::new().with_cafe_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, cafe, menu) = factory::helpers::create_menu_with_dependencies(db).await?;
    assert_eq!(menu.cafe_id, cafe.id);
    let service = MenuService::new(db);

    let updated = service
        .update(
            &owner.id,
            &menu.id,
            UpdateMenuDto {
                price: Some(32000.0),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.price, 32000.0);
    assert_eq!(updated.name, menu.name);

    let negative = service
        .update(
            &owner.id,
            &menu.id,
            UpdateMenuDto {
                price: Some(-1.0),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(negative, Err(AppError::BadRequest(_))));

    let blank = service
        .update(
            &owner.id,
            &menu.id,
            UpdateMenuDto {
                name: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(blank, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that owners cannot touch menus of another cafe.
///
/// Expected: Err(AppError::NotFound) for update and delete, menu left intact
#[tokio::test]
async fn hides_menus_of_other_cafes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_cafe_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, menu) = factory::helpers::create_menu_with_dependencies(db).await?;
    let (intruder, _) = factory::helpers::create_cafe_with_owner(db).await?;
    let service = MenuService::new(db);

    let update = service
        .update(
            &intruder.id,
            &menu.id,
            UpdateMenuDto {
                price: Some(1000.0),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(update, Err(AppError::NotFound(_))));

    let delete = service.delete(&intruder.id, &menu.id).await;
    assert!(matches!(delete, Err(AppError::NotFound(_))));

    let stored = service.get(&menu.id).await?;
    assert_eq!(stored.price, menu.price);

    Ok(())
}

/// Tests deleting a menu of the owner's cafe.
///
/// Expected: the menu is gone from lookups and from the cafe listing
#[tokio::test]
async fn deletes_owned_menu() -> Result<(), AppError> {
    let test = TestBuilder::new().with_cafe_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, cafe, menu) = factory::helpers::create_menu_with_dependencies(db).await?;
    let service = MenuService::new(db);

    service.delete(&owner.id, &menu.id).await?;

    assert!(matches!(service.get(&menu.id).await, Err(AppError::NotFound(_))));
    assert!(service.list_by_cafe(&cafe.id, None).await?.is_empty());

    Ok(())
}

/// Tests that a blank search query is rejected.
#[tokio::test]
async fn rejects_blank_search() -> Result<(), AppError> {
    let test = TestBuilder::new().with_cafe_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = MenuService::new(db).search("  ", None).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
