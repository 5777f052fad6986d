use market_api::auth::AuthorizeAdminUseCase;
use market_api::domain::types::ClearanceLevel;
use market_api::error::ApiError;
use market_api::usecase::admin_user::{
    CreateAdminInput, CreateAdminUseCase, DeleteAdminUseCase, LoginAdminUseCase,
};

use crate::helpers::{MemAdmins, identity};

const SECRET: &str = "integration-secret";

#[tokio::test]
async fn login_token_authorizes_back_to_the_same_admin() {
    let admins = MemAdmins::default();
    let root = admins.seed("root", "hunter22", ClearanceLevel::SuperAdmin);

    let session = LoginAdminUseCase {
        admins: &admins,
        jwt_secret: SECRET.into(),
    }
    .execute("root", "hunter22")
    .await
    .unwrap();

    let acting = AuthorizeAdminUseCase {
        admins: &admins,
        jwt_secret: SECRET.into(),
    }
    .execute(&session.token)
    .await
    .unwrap();
    assert_eq!(acting.id, root.id);
    assert!(acting.is_super());
}

#[tokio::test]
async fn deactivated_admin_cannot_authorize_with_a_live_token() {
    let admins = MemAdmins::default();
    let staff = admins.seed("staff", "hunter22", ClearanceLevel::Admin);

    let session = LoginAdminUseCase {
        admins: &admins,
        jwt_secret: SECRET.into(),
    }
    .execute("staff", "hunter22")
    .await
    .unwrap();

    admins.rows.lock().unwrap().get_mut(&staff.id).unwrap().is_active = false;

    let result = AuthorizeAdminUseCase {
        admins: &admins,
        jwt_secret: SECRET.into(),
    }
    .execute(&session.token)
    .await;
    assert!(matches!(result, Err(ApiError::Forbidden(_))));
}

#[tokio::test]
async fn created_admin_can_log_in_with_its_password() {
    let admins = MemAdmins::default();
    let root = admins.seed("root", "hunter22", ClearanceLevel::SuperAdmin);

    let created = CreateAdminUseCase { admins: &admins }
        .execute(
            identity(&root),
            CreateAdminInput {
                username: "staff".into(),
                name: "Staff".into(),
                email: "staff@example.com".into(),
                password: "letmein".into(),
                clearance: ClearanceLevel::Admin,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.clearance_level, ClearanceLevel::Admin);
    assert_eq!(created.created_by, Some(root.id));

    let session = LoginAdminUseCase {
        admins: &admins,
        jwt_secret: SECRET.into(),
    }
    .execute("staff", "letmein")
    .await
    .unwrap();
    assert_eq!(session.admin.id, created.id);
}

#[tokio::test]
async fn deleting_an_admin_cascades_and_kills_their_login() {
    let admins = MemAdmins::default();
    let root = admins.seed("root", "hunter22", ClearanceLevel::SuperAdmin);
    let staff = admins.seed("staff", "hunter22", ClearanceLevel::Admin);

    DeleteAdminUseCase { admins: &admins }
        .execute(identity(&root), staff.id)
        .await
        .unwrap();
    assert_eq!(*admins.cascades.lock().unwrap(), vec![staff.id]);

    let result = LoginAdminUseCase {
        admins: &admins,
        jwt_secret: SECRET.into(),
    }
    .execute("staff", "hunter22")
    .await;
    assert!(matches!(result, Err(ApiError::Unauthorized(_))));
}
