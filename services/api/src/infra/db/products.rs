use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use market_api_schema::{
    brands, categories, product_images, product_variants, products, sub_categories, variant_types,
};

use crate::domain::repository::{
    CatalogRepository, NewProduct, ProductPatch, ProductScope, ProductScopeLookup,
};
use crate::domain::types::{AdminSummary, Product, ProductImage};
use crate::error::ApiError;
use crate::infra::db::admin_summaries;

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

/// Name lookups for the four parent tables, batched per listing.
#[derive(Default)]
struct ParentNames {
    categories: HashMap<Uuid, String>,
    sub_categories: HashMap<Uuid, String>,
    brands: HashMap<Uuid, String>,
    variant_types: HashMap<Uuid, String>,
}

async fn parent_names(
    db: &DatabaseConnection,
    models: &[products::Model],
) -> Result<ParentNames, ApiError> {
    let mut names = ParentNames::default();
    if models.is_empty() {
        return Ok(names);
    }

    let category_ids: Vec<Uuid> = models.iter().map(|m| m.category_id).collect();
    let rows = categories::Entity::find()
        .filter(categories::Column::Id.is_in(category_ids))
        .all(db)
        .await
        .context("resolve product categories")?;
    names.categories = rows.into_iter().map(|r| (r.id, r.name)).collect();

    let sub_category_ids: Vec<Uuid> = models.iter().map(|m| m.sub_category_id).collect();
    let rows = sub_categories::Entity::find()
        .filter(sub_categories::Column::Id.is_in(sub_category_ids))
        .all(db)
        .await
        .context("resolve product sub-categories")?;
    names.sub_categories = rows.into_iter().map(|r| (r.id, r.name)).collect();

    let brand_ids: Vec<Uuid> = models.iter().filter_map(|m| m.brand_id).collect();
    if !brand_ids.is_empty() {
        let rows = brands::Entity::find()
            .filter(brands::Column::Id.is_in(brand_ids))
            .all(db)
            .await
            .context("resolve product brands")?;
        names.brands = rows.into_iter().map(|r| (r.id, r.name)).collect();
    }

    let variant_type_ids: Vec<Uuid> = models.iter().filter_map(|m| m.variant_type_id).collect();
    if !variant_type_ids.is_empty() {
        let rows = variant_types::Entity::find()
            .filter(variant_types::Column::Id.is_in(variant_type_ids))
            .all(db)
            .await
            .context("resolve product variant types")?;
        names.variant_types = rows.into_iter().map(|r| (r.id, r.name)).collect();
    }

    Ok(names)
}

fn product_from_model(
    model: products::Model,
    images: Vec<ProductImage>,
    variant_ids: Vec<Uuid>,
    names: &ParentNames,
    creators: &HashMap<Uuid, AdminSummary>,
) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        quantity: model.quantity,
        price: model.price,
        offer_price: model.offer_price,
        category_id: model.category_id,
        category_name: names.categories.get(&model.category_id).cloned(),
        sub_category_id: model.sub_category_id,
        sub_category_name: names.sub_categories.get(&model.sub_category_id).cloned(),
        brand_id: model.brand_id,
        brand_name: model.brand_id.and_then(|id| names.brands.get(&id).cloned()),
        variant_type_id: model.variant_type_id,
        variant_type_name: model
            .variant_type_id
            .and_then(|id| names.variant_types.get(&id).cloned()),
        variant_ids,
        images,
        created_by: model.created_by,
        creator: creators.get(&model.created_by).cloned(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl DbProductRepository {
    async fn assemble(&self, models: Vec<products::Model>) -> Result<Vec<Product>, ApiError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let product_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();

        let image_rows = product_images::Entity::find()
            .filter(product_images::Column::ProductId.is_in(product_ids.clone()))
            .order_by_asc(product_images::Column::Position)
            .all(&self.db)
            .await
            .context("load product images")?;
        let mut images_by_product: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
        for row in image_rows {
            images_by_product
                .entry(row.product_id)
                .or_default()
                .push(ProductImage {
                    position: row.position,
                    url: row.url,
                });
        }

        let link_rows = product_variants::Entity::find()
            .filter(product_variants::Column::ProductId.is_in(product_ids))
            .all(&self.db)
            .await
            .context("load product variant links")?;
        let mut variants_by_product: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in link_rows {
            variants_by_product
                .entry(row.product_id)
                .or_default()
                .push(row.variant_id);
        }

        let names = parent_names(&self.db, &models).await?;
        let creators = admin_summaries(&self.db, models.iter().map(|m| m.created_by)).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let images = images_by_product.remove(&model.id).unwrap_or_default();
                let variant_ids = variants_by_product.remove(&model.id).unwrap_or_default();
                product_from_model(model, images, variant_ids, &names, &creators)
            })
            .collect())
    }
}

async fn insert_images(
    txn: &DatabaseTransaction,
    product_id: Uuid,
    entries: &[(i16, String)],
) -> Result<(), sea_orm::DbErr> {
    for (position, url) in entries {
        product_images::ActiveModel {
            id: Set(Uuid::now_v7()),
            product_id: Set(product_id),
            position: Set(*position),
            url: Set(url.clone()),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

async fn insert_variant_links(
    txn: &DatabaseTransaction,
    product_id: Uuid,
    variant_ids: &[Uuid],
) -> Result<(), sea_orm::DbErr> {
    for variant_id in variant_ids {
        product_variants::ActiveModel {
            product_id: Set(product_id),
            variant_id: Set(*variant_id),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

impl ProductScopeLookup for DbProductRepository {
    async fn scopes(&self, ids: &[Uuid]) -> Result<Vec<ProductScope>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = products::Entity::find()
            .filter(products::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .context("load product scopes")?;
        Ok(models
            .into_iter()
            .map(|m| ProductScope {
                id: m.id,
                category_id: m.category_id,
                sub_category_id: m.sub_category_id,
            })
            .collect())
    }
}

impl CatalogRepository for DbProductRepository {
    type Entity = Product;
    type NewEntity = NewProduct;
    type Patch = ProductPatch;

    const KIND: &'static str = "product";

    async fn list(&self, created_by: Option<Uuid>) -> Result<Vec<Product>, ApiError> {
        let mut query = products::Entity::find().order_by_desc(products::Column::CreatedAt);
        if let Some(admin_id) = created_by {
            query = query.filter(products::Column::CreatedBy.eq(admin_id));
        }
        let models = query.all(&self.db).await.context("list products")?;
        self.assemble(models).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApiError> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product")?;
        let Some(model) = model else {
            return Ok(None);
        };
        Ok(self.assemble(vec![model]).await?.into_iter().next())
    }

    async fn insert(&self, new: NewProduct, created_by: Uuid) -> Result<Product, ApiError> {
        let product_id = Uuid::now_v7();
        let now = Utc::now();
        let images: Vec<(i16, String)> = new
            .image_urls
            .iter()
            .enumerate()
            .map(|(i, url)| (i as i16 + 1, url.clone()))
            .collect();

        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    products::ActiveModel {
                        id: Set(product_id),
                        name: Set(new.name),
                        description: Set(new.description),
                        quantity: Set(new.quantity),
                        price: Set(new.price),
                        offer_price: Set(new.offer_price),
                        category_id: Set(new.category_id),
                        sub_category_id: Set(new.sub_category_id),
                        brand_id: Set(new.brand_id),
                        variant_type_id: Set(new.variant_type_id),
                        created_by: Set(created_by),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await?;
                    insert_images(txn, product_id, &images).await?;
                    insert_variant_links(txn, product_id, &new.variant_ids).await?;
                    Ok(())
                })
            })
            .await
            .context("insert product")?;

        self.find_by_id(product_id)
            .await?
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("inserted product missing")))
    }

    async fn apply_patch(&self, id: Uuid, patch: ProductPatch) -> Result<Option<Product>, ApiError> {
        let Some(existing) = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product for update")?
        else {
            return Ok(None);
        };

        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let mut active: products::ActiveModel = existing.into();
                    if let Some(name) = patch.name {
                        active.name = Set(name);
                    }
                    if let Some(description) = patch.description {
                        active.description = Set(Some(description));
                    }
                    if let Some(quantity) = patch.quantity {
                        active.quantity = Set(quantity);
                    }
                    if let Some(price) = patch.price {
                        active.price = Set(price);
                    }
                    if let Some(offer_price) = patch.offer_price {
                        active.offer_price = Set(Some(offer_price));
                    }
                    if let Some(category_id) = patch.category_id {
                        active.category_id = Set(category_id);
                    }
                    if let Some(sub_category_id) = patch.sub_category_id {
                        active.sub_category_id = Set(sub_category_id);
                    }
                    if let Some(brand_id) = patch.brand_id {
                        active.brand_id = Set(Some(brand_id));
                    }
                    if let Some(variant_type_id) = patch.variant_type_id {
                        active.variant_type_id = Set(Some(variant_type_id));
                    }
                    active.updated_at = Set(Utc::now());
                    active.update(txn).await?;

                    // Uploaded images replace whatever sat at their position.
                    for (position, _) in &patch.images {
                        product_images::Entity::delete_many()
                            .filter(product_images::Column::ProductId.eq(id))
                            .filter(product_images::Column::Position.eq(*position))
                            .exec(txn)
                            .await?;
                    }
                    insert_images(txn, id, &patch.images).await?;

                    if let Some(variant_ids) = patch.variant_ids {
                        product_variants::Entity::delete_many()
                            .filter(product_variants::Column::ProductId.eq(id))
                            .exec(txn)
                            .await?;
                        insert_variant_links(txn, id, &variant_ids).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update product")?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        // Images and variant links go with the row via FK cascade.
        products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete product")?;
        Ok(())
    }

    async fn dependent_count(&self, _id: Uuid) -> Result<u64, ApiError> {
        // Order items snapshot product data, so nothing blocks deletion.
        Ok(0)
    }
}
