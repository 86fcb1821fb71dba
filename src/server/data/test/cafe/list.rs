use super::*;

/// Tests the public cafe listing order and visibility.
///
/// Verifies that inactive cafes are hidden and the rest are ordered by rating,
/// highest first.
///
/// Expected: two cafes, best rated first, total of 2
#[tokio::test]
async fn lists_active_cafes_by_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_owner(db).await?;
    factory::cafe::CafeFactory::new(db, &owner.id)
        .name("Low")
        .rating_average(3.5)
        .build()
        .await?;
    factory::cafe::CafeFactory::new(db, &owner.id)
        .name("High")
        .rating_average(4.8)
        .build()
        .await?;
    factory::cafe::CafeFactory::new(db, &owner.id)
        .name("Closed Down")
        .status("inactive")
        .build()
        .await?;

    let repo = CafeRepository::new(db);
    let page = repo
        .list(CafeFilter::default(), PageRequest::default())
        .await?;

    assert_eq!(page.total, 2);
    let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["High", "Low"]);

    Ok(())
}

/// Tests search, city and open filters.
///
/// Verifies that the search term matches descriptions case-insensitively and that
/// city and is_open narrow the results.
///
/// Expected: each filter returns only the matching cafe
#[tokio::test]
async fn filters_cafes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_owner(db).await?;
    factory::cafe::CafeFactory::new(db, &owner.id)
        .name("Kopi Senja")
        .description(Some("Best ROASTERY in town".to_string()))
        .city("Bandung")
        .build()
        .await?;
    factory::cafe::CafeFactory::new(db, &owner.id)
        .name("Teh Pagi")
        .city("Jakarta")
        .is_open(false)
        .build()
        .await?;

    let repo = CafeRepository::new(db);

    let by_search = repo
        .list(
            CafeFilter {
                search: Some("roastery".to_string()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;
    assert_eq!(by_search.items.len(), 1);
    assert_eq!(by_search.items[0].name, "Kopi Senja");

    let by_city = repo
        .list(
            CafeFilter {
                city: Some("Jakarta".to_string()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;
    assert_eq!(by_city.items.len(), 1);
    assert_eq!(by_city.items[0].name, "Teh Pagi");

    let open_only = repo
        .list(
            CafeFilter {
                is_open: Some(true),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;
    assert_eq!(open_only.items.len(), 1);
    assert_eq!(open_only.items[0].name, "Kopi Senja");

    Ok(())
}

/// Tests pagination of the listing.
///
/// Expected: page 2 of size 2 holds the last cafe and reports 3 pages in total
#[tokio::test]
async fn paginates_cafes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_cafe_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_owner(db).await?;
    for rating in [5.0, 4.0, 3.0, 2.0, 1.0] {
        factory::cafe::CafeFactory::new(db, &owner.id)
            .name(format!("Cafe {}", rating))
            .rating_average(rating)
            .build()
            .await?;
    }

    let repo = CafeRepository::new(db);
    let page = repo
        .list(CafeFilter::default(), PageRequest::new(Some(3), Some(2), 10))
        .await?;

    assert_eq!(page.total, 5);
    assert_eq!(page.pages(), 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].rating_average, 1.0);

    Ok(())
}
