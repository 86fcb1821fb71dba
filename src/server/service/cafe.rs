//! Public cafe browsing, reviews, and the owner's cafe management.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::cafe::CreateCafeDto,
    server::{
        data::{cafe::CafeRepository, review::ReviewRepository, user::UserRepository},
        error::AppError,
        model::{
            cafe::{rating_average, Cafe, CafeFilter, CreateCafeParams, Review, UpdateCafeParams},
            page::{PageRequest, Paginated},
        },
    },
};

pub struct CafeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CafeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        filter: CafeFilter,
        page: PageRequest,
    ) -> Result<Paginated<Cafe>, AppError> {
        Ok(CafeRepository::new(self.db).list(filter, page).await?)
    }

    /// Gets an active cafe.
    ///
    /// # Returns
    /// - `Ok(Cafe)` - Cafe exists, is not deleted and is active
    /// - `Err(AppError::NotFound)` - Otherwise
    pub async fn get(&self, id: &str) -> Result<Cafe, AppError> {
        CafeRepository::new(self.db)
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cafe not found".to_string()))
    }

    pub async fn reviews(
        &self,
        cafe_id: &str,
        page: PageRequest,
    ) -> Result<Paginated<Review>, AppError> {
        self.get(cafe_id).await?;

        Ok(ReviewRepository::new(self.db)
            .list_for_cafe(cafe_id, page)
            .await?)
    }

    /// Adds the user's review and recomputes the cafe's rating.
    ///
    /// The insert and the rating update share one transaction.
    ///
    /// # Returns
    /// - `Ok(Review)` - Review stored with the reviewer attached
    /// - `Err(AppError::BadRequest)` - Rating outside 1..=5 or user already reviewed the cafe
    /// - `Err(AppError::NotFound)` - Cafe not found
    pub async fn create_review(
        &self,
        cafe_id: &str,
        user_id: &str,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, AppError> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::BadRequest(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        self.get(cafe_id).await?;

        let txn = self.db.begin().await?;
        let review_repo = ReviewRepository::new(&txn);

        if review_repo.exists_for_user(cafe_id, user_id).await? {
            return Err(AppError::BadRequest(
                "You have already reviewed this cafe".to_string(),
            ));
        }

        let review = review_repo
            .create(cafe_id, user_id, rating, comment)
            .await?;

        let ratings = review_repo.ratings_for_cafe(cafe_id).await?;
        CafeRepository::new(&txn)
            .update_rating(cafe_id, rating_average(&ratings), ratings.len() as i32)
            .await?;

        txn.commit().await?;

        let reviewer = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .map(|user| (user.id, user.name));

        let mut review = Review::from_entity(review, None);
        review.reviewer = reviewer;
        Ok(review)
    }

    /// Opens the owner's cafe. Each owner may have only one.
    pub async fn create_owned(
        &self,
        owner_id: &str,
        dto: CreateCafeDto,
    ) -> Result<Cafe, AppError> {
        let cafe_repo = CafeRepository::new(self.db);

        if cafe_repo.find_by_owner(owner_id).await?.is_some() {
            return Err(AppError::BadRequest("You already have a cafe".to_string()));
        }

        let params = CreateCafeParams::from_dto(owner_id.to_string(), dto);
        if params.name.is_empty() {
            return Err(AppError::BadRequest("Cafe name is required".to_string()));
        }

        let cafe = cafe_repo.create(params).await?;
        tracing::info!("Owner {} opened cafe {}", owner_id, cafe.id);

        Ok(cafe)
    }

    /// Gets the owner's cafe, failing with 404 "Cafe not found" when they have none.
    pub async fn owned(&self, owner_id: &str) -> Result<Cafe, AppError> {
        CafeRepository::new(self.db)
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cafe not found".to_string()))
    }

    pub async fn update_owned(
        &self,
        owner_id: &str,
        params: UpdateCafeParams,
    ) -> Result<Cafe, AppError> {
        if params.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::BadRequest("Cafe name cannot be empty".to_string()));
        }

        let cafe = self.owned(owner_id).await?;

        CafeRepository::new(self.db)
            .update(&cafe.id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Cafe not found".to_string()))
    }

    /// Flips whether the owner's cafe is accepting orders.
    pub async fn toggle_open(&self, owner_id: &str) -> Result<Cafe, AppError> {
        let cafe = self.owned(owner_id).await?;

        let cafe = CafeRepository::new(self.db)
            .set_open(&cafe.id, !cafe.is_open)
            .await?
            .ok_or_else(|| AppError::NotFound("Cafe not found".to_string()))?;

        tracing::info!(
            "Cafe {} is now {}",
            cafe.id,
            if cafe.is_open { "open" } else { "closed" }
        );

        Ok(cafe)
    }
}
