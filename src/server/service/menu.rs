//! Menu browsing and owner-side menu management.

use sea_orm::DatabaseConnection;

use crate::{
    model::menu::CreateMenuDto,
    server::{
        data::menu::MenuRepository,
        error::AppError,
        model::menu::{CreateMenuParams, Menu, UpdateMenuParams},
        service::cafe::CafeService,
    },
};

pub struct MenuService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MenuService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_by_cafe(
        &self,
        cafe_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<Menu>, AppError> {
        Ok(MenuRepository::new(self.db)
            .list_available_by_cafe(cafe_id, category)
            .await?)
    }

    /// Case-insensitive search over available menus, optionally within one cafe.
    pub async fn search(&self, query: &str, cafe_id: Option<&str>) -> Result<Vec<Menu>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest("Search query is required".to_string()));
        }

        Ok(MenuRepository::new(self.db)
            .search(query, cafe_id.filter(|c| !c.is_empty()))
            .await?)
    }

    /// Gets a menu that has not been deleted; it may be unavailable.
    pub async fn get(&self, id: &str) -> Result<Menu, AppError> {
        MenuRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu not found".to_string()))
    }

    /// Adds a menu to the owner's cafe.
    ///
    /// # Returns
    /// - `Ok(Menu)` - Created menu
    /// - `Err(AppError::BadRequest)` - Missing name or category, or non-positive price
    /// - `Err(AppError::NotFound)` - Owner has no cafe
    pub async fn create(&self, owner_id: &str, dto: CreateMenuDto) -> Result<Menu, AppError> {
        let cafe = CafeService::new(self.db).owned(owner_id).await?;

        let params = CreateMenuParams::from_dto(cafe.id, dto);
        if params.name.is_empty() || params.category.is_empty() {
            return Err(AppError::BadRequest(
                "Menu name and category are required".to_string(),
            ));
        }
        if params.price <= 0.0 {
            return Err(AppError::BadRequest(
                "Price must be greater than zero".to_string(),
            ));
        }

        let menu = MenuRepository::new(self.db).create(params).await?;
        tracing::info!("Menu {} added to cafe {}", menu.id, menu.cafe_id);

        Ok(menu)
    }

    pub async fn update(
        &self,
        owner_id: &str,
        id: &str,
        params: UpdateMenuParams,
    ) -> Result<Menu, AppError> {
        if params.price.is_some_and(|p| p <= 0.0) {
            return Err(AppError::BadRequest(
                "Price must be greater than zero".to_string(),
            ));
        }
        if params.name.as_deref().is_some_and(|n| n.trim().is_empty())
            || params.category.as_deref().is_some_and(|c| c.trim().is_empty())
        {
            return Err(AppError::BadRequest(
                "Menu name and category cannot be empty".to_string(),
            ));
        }

        let menu = self.owned_menu(owner_id, id).await?;

        MenuRepository::new(self.db)
            .update(&menu.id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu not found".to_string()))
    }

    /// Soft deletes a menu of the owner's cafe and marks it unavailable.
    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<(), AppError> {
        let menu = self.owned_menu(owner_id, id).await?;

        MenuRepository::new(self.db).soft_delete(&menu.id).await?;

        Ok(())
    }

    async fn owned_menu(&self, owner_id: &str, id: &str) -> Result<Menu, AppError> {
        let cafe = CafeService::new(self.db).owned(owner_id).await?;

        MenuRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|menu| menu.cafe_id == cafe.id)
            .ok_or_else(|| AppError::NotFound("Menu not found".to_string()))
    }
}
