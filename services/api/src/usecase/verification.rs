use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::auth;
use crate::domain::repository::{CustomerRepository, MailerPort};
use crate::error::ApiError;
use crate::usecase::customer::CustomerAccount;

/// One-time codes are valid for ten minutes.
const CODE_TTL_MINUTES: i64 = 10;

fn generate_code() -> String {
    let code: u32 = rand::rng().random_range(100_000..=999_999);
    code.to_string()
}

// ── Email verification ────────────────────────────────────────────────────────

pub struct SendEmailVerificationUseCase<R: CustomerRepository, M: MailerPort> {
    pub customers: R,
    pub mailer: M,
}

impl<R: CustomerRepository, M: MailerPort> SendEmailVerificationUseCase<R, M> {
    /// Issues a fresh code for the address. An unknown address gets a
    /// skeleton account so the code survives until registration.
    pub async fn execute(&self, email: &str) -> Result<(), ApiError> {
        if email.trim().is_empty() {
            return Err(ApiError::Validation("email is required"));
        }

        if let Some(existing) = self.customers.find_by_email(email).await? {
            if existing.email_verified && !existing.name.is_empty() {
                return Err(ApiError::Conflict(
                    "an account with that email already exists".into(),
                ));
            }
        }

        let code = generate_code();
        let expires = Utc::now() + Duration::minutes(CODE_TTL_MINUTES);
        self.customers.upsert_pending(email, &code, expires).await?;

        self.mailer
            .send(
                email,
                "Verify your email",
                &format!("Your verification code is {code}. It expires in {CODE_TTL_MINUTES} minutes."),
            )
            .await?;
        Ok(())
    }
}

pub struct VerifyEmailUseCase<R: CustomerRepository> {
    pub customers: R,
}

impl<R: CustomerRepository> VerifyEmailUseCase<R> {
    pub async fn execute(&self, email: &str, code: &str) -> Result<(), ApiError> {
        let customer = self
            .customers
            .find_by_email(email)
            .await?
            .ok_or(ApiError::Validation("invalid or expired verification code"))?;

        let valid = customer.verification_code.as_deref() == Some(code)
            && customer.code_expires.is_some_and(|at| at > Utc::now());
        if !valid {
            return Err(ApiError::Validation("invalid or expired verification code"));
        }

        self.customers.mark_email_verified(customer.id).await
    }
}

// ── Password recovery ─────────────────────────────────────────────────────────

pub struct ForgotPasswordUseCase<R: CustomerRepository, M: MailerPort> {
    pub customers: R,
    pub mailer: M,
}

impl<R: CustomerRepository, M: MailerPort> ForgotPasswordUseCase<R, M> {
    /// Only verified accounts can recover a password; anything else looks
    /// like a missing account.
    pub async fn execute(&self, email: &str) -> Result<(), ApiError> {
        let customer = self
            .customers
            .find_by_email(email)
            .await?
            .filter(|c| c.email_verified)
            .ok_or(ApiError::NotFound("account"))?;

        let code = generate_code();
        let expires = Utc::now() + Duration::minutes(CODE_TTL_MINUTES);
        self.customers
            .set_verification_code(customer.id, &code, expires)
            .await?;

        self.mailer
            .send(
                email,
                "Password reset code",
                &format!("Your password reset code is {code}. It expires in {CODE_TTL_MINUTES} minutes."),
            )
            .await?;
        Ok(())
    }
}

pub struct ResetPasswordUseCase<R: CustomerRepository> {
    pub customers: R,
}

impl<R: CustomerRepository> ResetPasswordUseCase<R> {
    pub async fn execute(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        if new_password.is_empty() {
            return Err(ApiError::Validation("new password is required"));
        }

        let customer = self
            .customers
            .find_by_email(email)
            .await?
            .ok_or(ApiError::NotFound("account"))?;

        if !customer.email_verified {
            return Err(ApiError::Validation("email is not verified"));
        }

        let valid = customer.verification_code.as_deref() == Some(code)
            && customer.code_expires.is_some_and(|at| at > Utc::now());
        if !valid {
            return Err(ApiError::Validation("invalid or expired reset code"));
        }

        self.customers
            .set_password_hash(customer.id, &auth::hash_password(new_password)?)
            .await?;
        self.customers.clear_verification_code(customer.id).await
    }
}

// ── Profile ───────────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub name: String,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub struct UpdateProfileUseCase<R: CustomerRepository> {
    pub customers: R,
}

impl<R: CustomerRepository> UpdateProfileUseCase<R> {
    /// Changing the email drops its verified flag until the new address is
    /// confirmed again.
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<CustomerAccount, ApiError> {
        if input.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required"));
        }

        let existing = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("user"))?;

        if let Some(new_password) = &input.new_password {
            if new_password.is_empty() {
                return Err(ApiError::Validation("new password cannot be empty"));
            }
            let current = input
                .current_password
                .as_deref()
                .ok_or(ApiError::Validation("current password is required"))?;
            if !auth::verify_password(current, &existing.password_hash)? {
                return Err(ApiError::Unauthorized("current password is incorrect"));
            }
            self.customers
                .set_password_hash(id, &auth::hash_password(new_password)?)
                .await?;
        }

        if let Some(email) = &input.email {
            if existing.email.as_deref() != Some(email.to_lowercase().as_str()) {
                self.customers
                    .update_email(id, email)
                    .await?
                    .ok_or(ApiError::NotFound("user"))?;
            }
        }

        let customer = self
            .customers
            .update_name(id, &input.name)
            .await?
            .ok_or(ApiError::NotFound("user"))?;
        Ok(customer.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::customer::tests::MockCustomerRepo;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockMailer {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    impl MailerPort for &MockMailer {
        async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_owned(), subject.to_owned(), body.to_owned()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn send_verification_creates_skeleton_and_mails_code() {
        let repo = MockCustomerRepo::default();
        let mailer = MockMailer::default();

        SendEmailVerificationUseCase {
            customers: &repo,
            mailer: &mailer,
        }
        .execute("new@example.com")
        .await
        .unwrap();

        let rows = repo.rows.lock().unwrap();
        let pending = rows.values().next().unwrap();
        assert_eq!(pending.email.as_deref(), Some("new@example.com"));
        assert!(pending.name.is_empty());
        let code = pending.verification_code.clone().unwrap();
        assert_eq!(code.len(), 6);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].2.contains(&code));
    }

    #[tokio::test]
    async fn send_verification_rejects_verified_account() {
        let repo = MockCustomerRepo::default();
        let customer = repo.seed("Abebe", Some("abebe@example.com"), "pass123");
        repo.rows
            .lock()
            .unwrap()
            .get_mut(&customer.id)
            .unwrap()
            .email_verified = true;

        let result = SendEmailVerificationUseCase {
            customers: &repo,
            mailer: &MockMailer::default(),
        }
        .execute("abebe@example.com")
        .await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn verify_email_accepts_matching_unexpired_code() {
        let repo = MockCustomerRepo::default();
        let customer = repo.seed("Abebe", Some("abebe@example.com"), "pass123");
        {
            let mut rows = repo.rows.lock().unwrap();
            let row = rows.get_mut(&customer.id).unwrap();
            row.verification_code = Some("123456".into());
            row.code_expires = Some(Utc::now() + Duration::minutes(5));
        }

        VerifyEmailUseCase { customers: &repo }
            .execute("abebe@example.com", "123456")
            .await
            .unwrap();

        let rows = repo.rows.lock().unwrap();
        let row = rows.get(&customer.id).unwrap();
        assert!(row.email_verified);
        assert!(row.verification_code.is_none());
    }

    #[tokio::test]
    async fn verify_email_rejects_expired_code() {
        let repo = MockCustomerRepo::default();
        let customer = repo.seed("Abebe", Some("abebe@example.com"), "pass123");
        {
            let mut rows = repo.rows.lock().unwrap();
            let row = rows.get_mut(&customer.id).unwrap();
            row.verification_code = Some("123456".into());
            row.code_expires = Some(Utc::now() - Duration::minutes(1));
        }

        let result = VerifyEmailUseCase { customers: &repo }
            .execute("abebe@example.com", "123456")
            .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn forgot_password_requires_verified_account() {
        let repo = MockCustomerRepo::default();
        repo.seed("Abebe", Some("abebe@example.com"), "pass123");

        let result = ForgotPasswordUseCase {
            customers: &repo,
            mailer: &MockMailer::default(),
        }
        .execute("abebe@example.com")
        .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn reset_password_consumes_code() {
        let repo = MockCustomerRepo::default();
        let customer = repo.seed("Abebe", Some("abebe@example.com"), "pass123");
        {
            let mut rows = repo.rows.lock().unwrap();
            let row = rows.get_mut(&customer.id).unwrap();
            row.email_verified = true;
            row.verification_code = Some("654321".into());
            row.code_expires = Some(Utc::now() + Duration::minutes(5));
        }

        ResetPasswordUseCase { customers: &repo }
            .execute("abebe@example.com", "654321", "newpass")
            .await
            .unwrap();

        let rows = repo.rows.lock().unwrap();
        let row = rows.get(&customer.id).unwrap();
        assert!(auth::verify_password("newpass", &row.password_hash).unwrap());
        assert!(row.verification_code.is_none());

        drop(rows);
        let replay = ResetPasswordUseCase { customers: &repo }
            .execute("abebe@example.com", "654321", "again")
            .await;
        assert!(matches!(replay, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn profile_email_change_resets_verified_flag() {
        let repo = MockCustomerRepo::default();
        let customer = repo.seed("Abebe", Some("abebe@example.com"), "pass123");
        repo.rows
            .lock()
            .unwrap()
            .get_mut(&customer.id)
            .unwrap()
            .email_verified = true;

        let account = UpdateProfileUseCase { customers: &repo }
            .execute(
                customer.id,
                UpdateProfileInput {
                    name: "Abebe K".into(),
                    email: Some("abebe@new.example".into()),
                    current_password: None,
                    new_password: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(account.name, "Abebe K");
        assert_eq!(account.email.as_deref(), Some("abebe@new.example"));
        assert!(!account.email_verified);
    }
}
