use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use market_api_schema::{brands, categories, products, sub_categories, variant_types, variants};

use crate::domain::repository::{
    CatalogRepository, CategoryPatch, NewBrand, NewCategory, NewSubCategory, NewVariant,
    NewVariantType,
};
use crate::domain::types::{AdminSummary, Brand, Category, SubCategory, Variant, VariantType};
use crate::error::ApiError;
use crate::infra::db::admin_summaries;

// ── Categories ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

fn category_from_model(
    model: categories::Model,
    creators: &HashMap<Uuid, AdminSummary>,
) -> Category {
    Category {
        id: model.id,
        name: model.name,
        image_url: model.image_url,
        created_by: model.created_by,
        creator: creators.get(&model.created_by).cloned(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl CatalogRepository for DbCategoryRepository {
    type Entity = Category;
    type NewEntity = NewCategory;
    type Patch = CategoryPatch;

    const KIND: &'static str = "category";

    async fn list(&self, created_by: Option<Uuid>) -> Result<Vec<Category>, ApiError> {
        let mut query =
            categories::Entity::find().order_by_desc(categories::Column::CreatedAt);
        if let Some(admin_id) = created_by {
            query = query.filter(categories::Column::CreatedBy.eq(admin_id));
        }
        let models = query.all(&self.db).await.context("list categories")?;
        let creators = admin_summaries(&self.db, models.iter().map(|m| m.created_by)).await?;
        Ok(models
            .into_iter()
            .map(|m| category_from_model(m, &creators))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, ApiError> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category")?;
        let Some(model) = model else {
            return Ok(None);
        };
        let creators = admin_summaries(&self.db, [model.created_by]).await?;
        Ok(Some(category_from_model(model, &creators)))
    }

    async fn insert(&self, new: NewCategory, created_by: Uuid) -> Result<Category, ApiError> {
        let now = Utc::now();
        let model = categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(new.name),
            image_url: Set(new.image_url),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("insert category")?;
        Ok(category_from_model(model, &HashMap::new()))
    }

    async fn apply_patch(
        &self,
        id: Uuid,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, ApiError> {
        let Some(existing) = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category for update")?
        else {
            return Ok(None);
        };

        let mut active: categories::ActiveModel = existing.into();
        active.name = Set(patch.name);
        if let Some(image_url) = patch.image_url {
            active.image_url = Set(image_url);
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update category")?;
        Ok(Some(category_from_model(model, &HashMap::new())))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        categories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete category")?;
        Ok(())
    }

    async fn dependent_count(&self, id: Uuid) -> Result<u64, ApiError> {
        let sub_categories = sub_categories::Entity::find()
            .filter(sub_categories::Column::CategoryId.eq(id))
            .count(&self.db)
            .await
            .context("count sub-categories of category")?;
        let products = products::Entity::find()
            .filter(products::Column::CategoryId.eq(id))
            .count(&self.db)
            .await
            .context("count products of category")?;
        Ok(sub_categories + products)
    }
}

// ── Sub-categories ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubCategoryRepository {
    pub db: DatabaseConnection,
}

/// Batch-resolve catalog row names for parent population.
async fn category_names(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<HashMap<Uuid, String>, ApiError> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = categories::Entity::find()
        .filter(categories::Column::Id.is_in(ids))
        .all(db)
        .await
        .context("resolve category names")?;
    Ok(rows.into_iter().map(|r| (r.id, r.name)).collect())
}

fn sub_category_from_model(
    model: sub_categories::Model,
    parents: &HashMap<Uuid, String>,
    creators: &HashMap<Uuid, AdminSummary>,
) -> SubCategory {
    SubCategory {
        id: model.id,
        name: model.name,
        category_id: model.category_id,
        category_name: parents.get(&model.category_id).cloned(),
        created_by: model.created_by,
        creator: creators.get(&model.created_by).cloned(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl CatalogRepository for DbSubCategoryRepository {
    type Entity = SubCategory;
    type NewEntity = NewSubCategory;
    type Patch = NewSubCategory;

    const KIND: &'static str = "sub-category";

    async fn list(&self, created_by: Option<Uuid>) -> Result<Vec<SubCategory>, ApiError> {
        let mut query =
            sub_categories::Entity::find().order_by_desc(sub_categories::Column::CreatedAt);
        if let Some(admin_id) = created_by {
            query = query.filter(sub_categories::Column::CreatedBy.eq(admin_id));
        }
        let models = query.all(&self.db).await.context("list sub-categories")?;
        let parents = category_names(&self.db, models.iter().map(|m| m.category_id)).await?;
        let creators = admin_summaries(&self.db, models.iter().map(|m| m.created_by)).await?;
        Ok(models
            .into_iter()
            .map(|m| sub_category_from_model(m, &parents, &creators))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubCategory>, ApiError> {
        let model = sub_categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find sub-category")?;
        let Some(model) = model else {
            return Ok(None);
        };
        let parents = category_names(&self.db, [model.category_id]).await?;
        let creators = admin_summaries(&self.db, [model.created_by]).await?;
        Ok(Some(sub_category_from_model(model, &parents, &creators)))
    }

    async fn insert(&self, new: NewSubCategory, created_by: Uuid) -> Result<SubCategory, ApiError> {
        let now = Utc::now();
        let model = sub_categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(new.name),
            category_id: Set(new.category_id),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("insert sub-category")?;
        Ok(sub_category_from_model(
            model,
            &HashMap::new(),
            &HashMap::new(),
        ))
    }

    async fn apply_patch(
        &self,
        id: Uuid,
        patch: NewSubCategory,
    ) -> Result<Option<SubCategory>, ApiError> {
        let Some(existing) = sub_categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find sub-category for update")?
        else {
            return Ok(None);
        };

        let mut active: sub_categories::ActiveModel = existing.into();
        active.name = Set(patch.name);
        active.category_id = Set(patch.category_id);
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .context("update sub-category")?;
        Ok(Some(sub_category_from_model(
            model,
            &HashMap::new(),
            &HashMap::new(),
        )))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        sub_categories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete sub-category")?;
        Ok(())
    }

    async fn dependent_count(&self, id: Uuid) -> Result<u64, ApiError> {
        let brands = brands::Entity::find()
            .filter(brands::Column::SubCategoryId.eq(id))
            .count(&self.db)
            .await
            .context("count brands of sub-category")?;
        let products = products::Entity::find()
            .filter(products::Column::SubCategoryId.eq(id))
            .count(&self.db)
            .await
            .context("count products of sub-category")?;
        Ok(brands + products)
    }
}

// ── Brands ────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBrandRepository {
    pub db: DatabaseConnection,
}

async fn sub_category_names(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<HashMap<Uuid, String>, ApiError> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = sub_categories::Entity::find()
        .filter(sub_categories::Column::Id.is_in(ids))
        .all(db)
        .await
        .context("resolve sub-category names")?;
    Ok(rows.into_iter().map(|r| (r.id, r.name)).collect())
}

fn brand_from_model(
    model: brands::Model,
    parents: &HashMap<Uuid, String>,
    creators: &HashMap<Uuid, AdminSummary>,
) -> Brand {
    Brand {
        id: model.id,
        name: model.name,
        sub_category_id: model.sub_category_id,
        sub_category_name: parents.get(&model.sub_category_id).cloned(),
        created_by: model.created_by,
        creator: creators.get(&model.created_by).cloned(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl CatalogRepository for DbBrandRepository {
    type Entity = Brand;
    type NewEntity = NewBrand;
    type Patch = NewBrand;

    const KIND: &'static str = "brand";

    async fn list(&self, created_by: Option<Uuid>) -> Result<Vec<Brand>, ApiError> {
        let mut query = brands::Entity::find().order_by_desc(brands::Column::CreatedAt);
        if let Some(admin_id) = created_by {
            query = query.filter(brands::Column::CreatedBy.eq(admin_id));
        }
        let models = query.all(&self.db).await.context("list brands")?;
        let parents =
            sub_category_names(&self.db, models.iter().map(|m| m.sub_category_id)).await?;
        let creators = admin_summaries(&self.db, models.iter().map(|m| m.created_by)).await?;
        Ok(models
            .into_iter()
            .map(|m| brand_from_model(m, &parents, &creators))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Brand>, ApiError> {
        let model = brands::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find brand")?;
        let Some(model) = model else {
            return Ok(None);
        };
        let parents = sub_category_names(&self.db, [model.sub_category_id]).await?;
        let creators = admin_summaries(&self.db, [model.created_by]).await?;
        Ok(Some(brand_from_model(model, &parents, &creators)))
    }

    async fn insert(&self, new: NewBrand, created_by: Uuid) -> Result<Brand, ApiError> {
        let now = Utc::now();
        let model = brands::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(new.name),
            sub_category_id: Set(new.sub_category_id),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("insert brand")?;
        Ok(brand_from_model(model, &HashMap::new(), &HashMap::new()))
    }

    async fn apply_patch(&self, id: Uuid, patch: NewBrand) -> Result<Option<Brand>, ApiError> {
        let Some(existing) = brands::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find brand for update")?
        else {
            return Ok(None);
        };

        let mut active: brands::ActiveModel = existing.into();
        active.name = Set(patch.name);
        active.sub_category_id = Set(patch.sub_category_id);
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update brand")?;
        Ok(Some(brand_from_model(
            model,
            &HashMap::new(),
            &HashMap::new(),
        )))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        brands::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete brand")?;
        Ok(())
    }

    async fn dependent_count(&self, id: Uuid) -> Result<u64, ApiError> {
        let products = products::Entity::find()
            .filter(products::Column::BrandId.eq(id))
            .count(&self.db)
            .await
            .context("count products of brand")?;
        Ok(products)
    }
}

// ── Variant types ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVariantTypeRepository {
    pub db: DatabaseConnection,
}

fn variant_type_from_model(
    model: variant_types::Model,
    creators: &HashMap<Uuid, AdminSummary>,
) -> VariantType {
    VariantType {
        id: model.id,
        name: model.name,
        kind: model.kind,
        created_by: model.created_by,
        creator: creators.get(&model.created_by).cloned(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl CatalogRepository for DbVariantTypeRepository {
    type Entity = VariantType;
    type NewEntity = NewVariantType;
    type Patch = NewVariantType;

    const KIND: &'static str = "variant type";

    async fn list(&self, created_by: Option<Uuid>) -> Result<Vec<VariantType>, ApiError> {
        let mut query =
            variant_types::Entity::find().order_by_desc(variant_types::Column::CreatedAt);
        if let Some(admin_id) = created_by {
            query = query.filter(variant_types::Column::CreatedBy.eq(admin_id));
        }
        let models = query.all(&self.db).await.context("list variant types")?;
        let creators = admin_summaries(&self.db, models.iter().map(|m| m.created_by)).await?;
        Ok(models
            .into_iter()
            .map(|m| variant_type_from_model(m, &creators))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VariantType>, ApiError> {
        let model = variant_types::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find variant type")?;
        let Some(model) = model else {
            return Ok(None);
        };
        let creators = admin_summaries(&self.db, [model.created_by]).await?;
        Ok(Some(variant_type_from_model(model, &creators)))
    }

    async fn insert(&self, new: NewVariantType, created_by: Uuid) -> Result<VariantType, ApiError> {
        let now = Utc::now();
        let model = variant_types::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(new.name),
            kind: Set(new.kind),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("insert variant type")?;
        Ok(variant_type_from_model(model, &HashMap::new()))
    }

    async fn apply_patch(
        &self,
        id: Uuid,
        patch: NewVariantType,
    ) -> Result<Option<VariantType>, ApiError> {
        let Some(existing) = variant_types::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find variant type for update")?
        else {
            return Ok(None);
        };

        let mut active: variant_types::ActiveModel = existing.into();
        active.name = Set(patch.name);
        active.kind = Set(patch.kind);
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .context("update variant type")?;
        Ok(Some(variant_type_from_model(model, &HashMap::new())))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        variant_types::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete variant type")?;
        Ok(())
    }

    async fn dependent_count(&self, id: Uuid) -> Result<u64, ApiError> {
        let variants = variants::Entity::find()
            .filter(variants::Column::VariantTypeId.eq(id))
            .count(&self.db)
            .await
            .context("count variants of variant type")?;
        let products = products::Entity::find()
            .filter(products::Column::VariantTypeId.eq(id))
            .count(&self.db)
            .await
            .context("count products of variant type")?;
        Ok(variants + products)
    }
}

// ── Variants ──────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVariantRepository {
    pub db: DatabaseConnection,
}

async fn variant_type_names(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<HashMap<Uuid, String>, ApiError> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = variant_types::Entity::find()
        .filter(variant_types::Column::Id.is_in(ids))
        .all(db)
        .await
        .context("resolve variant type names")?;
    Ok(rows.into_iter().map(|r| (r.id, r.name)).collect())
}

fn variant_from_model(
    model: variants::Model,
    parents: &HashMap<Uuid, String>,
    creators: &HashMap<Uuid, AdminSummary>,
) -> Variant {
    Variant {
        id: model.id,
        name: model.name,
        variant_type_id: model.variant_type_id,
        variant_type_name: parents.get(&model.variant_type_id).cloned(),
        created_by: model.created_by,
        creator: creators.get(&model.created_by).cloned(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl CatalogRepository for DbVariantRepository {
    type Entity = Variant;
    type NewEntity = NewVariant;
    type Patch = NewVariant;

    const KIND: &'static str = "variant";

    async fn list(&self, created_by: Option<Uuid>) -> Result<Vec<Variant>, ApiError> {
        let mut query = variants::Entity::find().order_by_desc(variants::Column::CreatedAt);
        if let Some(admin_id) = created_by {
            query = query.filter(variants::Column::CreatedBy.eq(admin_id));
        }
        let models = query.all(&self.db).await.context("list variants")?;
        let parents =
            variant_type_names(&self.db, models.iter().map(|m| m.variant_type_id)).await?;
        let creators = admin_summaries(&self.db, models.iter().map(|m| m.created_by)).await?;
        Ok(models
            .into_iter()
            .map(|m| variant_from_model(m, &parents, &creators))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Variant>, ApiError> {
        let model = variants::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find variant")?;
        let Some(model) = model else {
            return Ok(None);
        };
        let parents = variant_type_names(&self.db, [model.variant_type_id]).await?;
        let creators = admin_summaries(&self.db, [model.created_by]).await?;
        Ok(Some(variant_from_model(model, &parents, &creators)))
    }

    async fn insert(&self, new: NewVariant, created_by: Uuid) -> Result<Variant, ApiError> {
        let now = Utc::now();
        let model = variants::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(new.name),
            variant_type_id: Set(new.variant_type_id),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("insert variant")?;
        Ok(variant_from_model(model, &HashMap::new(), &HashMap::new()))
    }

    async fn apply_patch(&self, id: Uuid, patch: NewVariant) -> Result<Option<Variant>, ApiError> {
        let Some(existing) = variants::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find variant for update")?
        else {
            return Ok(None);
        };

        let mut active: variants::ActiveModel = existing.into();
        active.name = Set(patch.name);
        active.variant_type_id = Set(patch.variant_type_id);
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update variant")?;
        Ok(Some(variant_from_model(
            model,
            &HashMap::new(),
            &HashMap::new(),
        )))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        variants::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete variant")?;
        Ok(())
    }

    async fn dependent_count(&self, id: Uuid) -> Result<u64, ApiError> {
        use market_api_schema::product_variants;
        let links = product_variants::Entity::find()
            .filter(product_variants::Column::VariantId.eq(id))
            .count(&self.db)
            .await
            .context("count product links of variant")?;
        Ok(links)
    }
}
