use market_api::domain::repository::{CategoryPatch, NewCategory};
use market_api::domain::types::ClearanceLevel;
use market_api::error::ApiError;
use market_api::usecase::catalog::{
    CreateEntityUseCase, DeleteEntityUseCase, GetEntityUseCase, ListEntitiesUseCase,
    UpdateEntityUseCase,
};

use crate::helpers::{MemAdmins, MemCategories, identity};

fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_owned(),
        image_url: format!("https://cdn.example.com/{name}.png"),
    }
}

#[tokio::test]
async fn ownership_blocks_other_admins_but_not_super() {
    let admins = MemAdmins::default();
    let alice = admins.seed("alice", "hunter22", ClearanceLevel::Admin);
    let bob = admins.seed("bob", "hunter22", ClearanceLevel::Admin);
    let root = admins.seed("root", "hunter22", ClearanceLevel::SuperAdmin);

    let categories = MemCategories::default();
    let created = CreateEntityUseCase { repo: &categories }
        .execute(identity(&alice), new_category("shoes"))
        .await
        .unwrap();
    assert_eq!(created.created_by, alice.id);

    let patch = CategoryPatch {
        name: "footwear".into(),
        image_url: None,
    };
    let result = UpdateEntityUseCase { repo: &categories }
        .execute(identity(&bob), created.id, patch.clone())
        .await;
    assert!(matches!(result, Err(ApiError::Forbidden(_))));

    let updated = UpdateEntityUseCase { repo: &categories }
        .execute(identity(&root), created.id, patch)
        .await
        .unwrap();
    assert_eq!(updated.name, "footwear");
    // no replacement image keeps the stored one
    assert_eq!(updated.image_url, created.image_url);
}

#[tokio::test]
async fn delete_is_refused_while_dependents_remain() {
    let admins = MemAdmins::default();
    let alice = admins.seed("alice", "hunter22", ClearanceLevel::Admin);

    let categories = MemCategories::default();
    let created = CreateEntityUseCase { repo: &categories }
        .execute(identity(&alice), new_category("shoes"))
        .await
        .unwrap();

    categories.set_dependents(created.id, 3);
    let result = DeleteEntityUseCase { repo: &categories }
        .execute(identity(&alice), created.id)
        .await;
    assert!(matches!(result, Err(ApiError::Conflict(_))));

    categories.set_dependents(created.id, 0);
    DeleteEntityUseCase { repo: &categories }
        .execute(identity(&alice), created.id)
        .await
        .unwrap();

    let result = GetEntityUseCase { repo: &categories }
        .execute(created.id)
        .await;
    assert!(matches!(result, Err(ApiError::NotFound("category"))));
}

#[tokio::test]
async fn list_can_be_scoped_to_one_creator() {
    let admins = MemAdmins::default();
    let alice = admins.seed("alice", "hunter22", ClearanceLevel::Admin);
    let bob = admins.seed("bob", "hunter22", ClearanceLevel::Admin);

    let categories = MemCategories::default();
    let create = CreateEntityUseCase { repo: &categories };
    create
        .execute(identity(&alice), new_category("shoes"))
        .await
        .unwrap();
    create
        .execute(identity(&alice), new_category("bags"))
        .await
        .unwrap();
    create
        .execute(identity(&bob), new_category("hats"))
        .await
        .unwrap();

    let list = ListEntitiesUseCase { repo: &categories };
    assert_eq!(list.execute(None).await.unwrap().len(), 3);

    let mine = list.execute(Some(alice.id)).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|c| c.created_by == alice.id));
}
