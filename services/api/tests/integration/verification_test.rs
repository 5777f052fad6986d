use market_api::error::ApiError;
use market_api::usecase::customer::{
    LoginCustomerUseCase, RegisterCustomerInput, RegisterCustomerUseCase,
};
use market_api::usecase::verification::{
    ForgotPasswordUseCase, ResetPasswordUseCase, SendEmailVerificationUseCase, VerifyEmailUseCase,
};

use crate::helpers::{MemCustomers, RecordingMailer};

/// Pull the six-digit code out of a mail body.
fn code_from(body: &str) -> String {
    body.split("is ").nth(1).unwrap().chars().take(6).collect()
}

#[tokio::test]
async fn signup_verify_and_reset_journey() {
    let customers = MemCustomers::default();
    let mailer = RecordingMailer::default();

    RegisterCustomerUseCase {
        customers: &customers,
    }
    .execute(RegisterCustomerInput {
        name: "Abebe".into(),
        email: Some("abebe@example.com".into()),
        phone: None,
        password: "first-pass".into(),
    })
    .await
    .unwrap();

    // unverified account can still request a code
    SendEmailVerificationUseCase {
        customers: &customers,
        mailer: &mailer,
    }
    .execute("abebe@example.com")
    .await
    .unwrap();
    let code = {
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "abebe@example.com");
        code_from(&sent[0].2)
    };

    VerifyEmailUseCase {
        customers: &customers,
    }
    .execute("abebe@example.com", &code)
    .await
    .unwrap();

    // a second verification mail for the now-verified account is refused
    let result = SendEmailVerificationUseCase {
        customers: &customers,
        mailer: &mailer,
    }
    .execute("abebe@example.com")
    .await;
    assert!(matches!(result, Err(ApiError::Conflict(_))));

    ForgotPasswordUseCase {
        customers: &customers,
        mailer: &mailer,
    }
    .execute("abebe@example.com")
    .await
    .unwrap();
    let reset_code = {
        let sent = mailer.sent.lock().unwrap();
        code_from(&sent.last().unwrap().2)
    };

    ResetPasswordUseCase {
        customers: &customers,
    }
    .execute("abebe@example.com", &reset_code, "second-pass")
    .await
    .unwrap();

    let login = LoginCustomerUseCase {
        customers: &customers,
    };
    assert!(matches!(
        login.execute("Abebe", "first-pass").await,
        Err(ApiError::Unauthorized(_))
    ));
    let account = login.execute("Abebe", "second-pass").await.unwrap();
    assert!(account.email_verified);
}

#[tokio::test]
async fn unknown_email_gets_a_skeleton_account() {
    let customers = MemCustomers::default();
    let mailer = RecordingMailer::default();

    SendEmailVerificationUseCase {
        customers: &customers,
        mailer: &mailer,
    }
    .execute("new@example.com")
    .await
    .unwrap();

    let rows = customers.rows.lock().unwrap();
    let skeleton = rows.values().next().unwrap();
    assert!(skeleton.name.is_empty());
    assert!(skeleton.verification_code.is_some());
    assert!(!skeleton.email_verified);
}

#[tokio::test]
async fn stale_or_wrong_codes_are_rejected() {
    let customers = MemCustomers::default();
    let mailer = RecordingMailer::default();

    SendEmailVerificationUseCase {
        customers: &customers,
        mailer: &mailer,
    }
    .execute("abebe@example.com")
    .await
    .unwrap();

    let verify = VerifyEmailUseCase {
        customers: &customers,
    };
    assert!(matches!(
        verify.execute("abebe@example.com", "000000").await,
        Err(ApiError::Validation(_))
    ));

    // expire the pending code in place
    {
        let mut rows = customers.rows.lock().unwrap();
        let row = rows.values_mut().next().unwrap();
        row.code_expires = Some(chrono::Utc::now() - chrono::Duration::minutes(1));
    }
    let code = code_from(&mailer.sent.lock().unwrap()[0].2);
    assert!(matches!(
        verify.execute("abebe@example.com", &code).await,
        Err(ApiError::Validation(_))
    ));
}

#[tokio::test]
async fn forgot_password_only_serves_verified_accounts() {
    let customers = MemCustomers::default();
    let mailer = RecordingMailer::default();

    RegisterCustomerUseCase {
        customers: &customers,
    }
    .execute(RegisterCustomerInput {
        name: "Abebe".into(),
        email: Some("abebe@example.com".into()),
        phone: None,
        password: "first-pass".into(),
    })
    .await
    .unwrap();

    let result = ForgotPasswordUseCase {
        customers: &customers,
        mailer: &mailer,
    }
    .execute("abebe@example.com")
    .await;
    assert!(matches!(result, Err(ApiError::NotFound("account"))));
    assert!(mailer.sent.lock().unwrap().is_empty());
}
