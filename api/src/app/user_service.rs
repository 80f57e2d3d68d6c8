//! User service
//!
//! Handles user registration, API key authentication, and profiles.

use std::sync::Arc;

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::{CourseId, NewUser, Role, User};
use crate::domain::ports::{BalanceRepository, SubscriptionRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// Maximum username length
pub const MAX_USERNAME_LEN: usize = 50;

/// Profile of the calling user
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub balance: i64,
    pub subscriptions: Vec<CourseId>,
}

/// Service for managing users
pub struct UserService<UR, BR, SR>
where
    UR: UserRepository + ?Sized,
    BR: BalanceRepository + ?Sized,
    SR: SubscriptionRepository + ?Sized,
{
    users: Arc<UR>,
    balances: Arc<BR>,
    subscriptions: Arc<SR>,
    initial_balance: i64,
}

impl<UR, BR, SR> UserService<UR, BR, SR>
where
    UR: UserRepository + ?Sized,
    BR: BalanceRepository + ?Sized,
    SR: SubscriptionRepository + ?Sized,
{
    pub fn new(
        users: Arc<UR>,
        balances: Arc<BR>,
        subscriptions: Arc<SR>,
        initial_balance: i64,
    ) -> Self {
        Self {
            users,
            balances,
            subscriptions,
            initial_balance,
        }
    }

    /// Register a new student
    ///
    /// Returns (user, api_key) - the key is only shown once
    pub async fn register(&self, username: &str) -> Result<(User, String), AppError> {
        validate_username(username)?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "User with name '{}' already exists",
                username
            ))));
        }

        let api_key = generate_api_key();
        let user = self
            .users
            .create(&NewUser {
                username: username.to_string(),
                role: Role::Student,
                api_key_hash: hash_api_key(&api_key),
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok((user, api_key))
    }

    /// Make sure an admin with the given API key exists
    pub async fn ensure_admin(&self, username: &str, api_key: &str) -> Result<User, AppError> {
        let key_hash = hash_api_key(api_key);

        if let Some(user) = self.users.find_by_api_key_hash(&key_hash).await? {
            if !user.is_admin() {
                tracing::warn!(user_id = %user.id, "Bootstrap admin key belongs to a non-admin user");
            }
            return Ok(user);
        }

        validate_username(username)?;
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "User with name '{}' already exists with a different key",
                username
            ))));
        }

        let user = self
            .users
            .create(&NewUser {
                username: username.to_string(),
                role: Role::Admin,
                api_key_hash: key_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Bootstrap admin created");
        Ok(user)
    }

    /// Find a user by their API key hash
    pub async fn find_by_api_key(&self, api_key_hash: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_api_key_hash(api_key_hash).await?)
    }

    /// Balance and subscriptions of a user.
    ///
    /// A user who never attempted a purchase has no balance row yet; the
    /// initial amount is reported without creating one.
    pub async fn profile(&self, user: &User) -> Result<UserProfile, AppError> {
        let balance = self
            .balances
            .find_by_user(&user.id)
            .await?
            .map(|b| b.amount)
            .unwrap_or(self.initial_balance);

        let subscriptions = self
            .subscriptions
            .find_by_user(&user.id)
            .await?
            .into_iter()
            .map(|s| s.course_id)
            .collect();

        Ok(UserProfile {
            user: user.clone(),
            balance,
            subscriptions,
        })
    }
}

fn validate_username(username: &str) -> Result<(), AppError> {
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Username must be between 1 and {} characters",
            MAX_USERNAME_LEN
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AppError::BadRequest(
            "Username must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Generate a random API key
fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("sk-{}", hex::encode(bytes))
}

/// Hash an API key for storage
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        test_admin, test_student, InMemoryBalanceRepository, InMemorySubscriptionRepository,
        InMemoryUserRepository,
    };

    fn create_service(
        users: InMemoryUserRepository,
        balances: InMemoryBalanceRepository,
    ) -> UserService<InMemoryUserRepository, InMemoryBalanceRepository, InMemorySubscriptionRepository>
    {
        UserService::new(
            Arc::new(users),
            Arc::new(balances),
            Arc::new(InMemorySubscriptionRepository::new()),
            1000,
        )
    }

    #[test]
    fn test_api_key_generation() {
        let key = generate_api_key();
        assert!(key.starts_with("sk-"));
        assert_eq!(key.len(), 3 + 64); // "sk-" + 32 bytes hex
    }

    #[test]
    fn test_api_key_hashing() {
        let key = "sk-test123";
        let hash1 = hash_api_key(key);
        let hash2 = hash_api_key(key);
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, key);
        assert_eq!(hash1.len(), 64);
    }

    #[tokio::test]
    async fn register_success() {
        let service = create_service(InMemoryUserRepository::new(), InMemoryBalanceRepository::new());

        let (user, api_key) = service.register("alice").await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.api_key_hash, hash_api_key(&api_key));

        let found = service.find_by_api_key(&hash_api_key(&api_key)).await.unwrap();
        assert_eq!(found.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn register_fails_with_empty_name() {
        let service = create_service(InMemoryUserRepository::new(), InMemoryBalanceRepository::new());

        let err = service.register("").await.unwrap_err().to_string();

        assert!(err.contains("between 1 and 50"));
    }

    #[tokio::test]
    async fn register_fails_with_long_name() {
        let service = create_service(InMemoryUserRepository::new(), InMemoryBalanceRepository::new());

        let result = service.register(&"a".repeat(51)).await;

        assert!(result.is_err());
    }

    #[test]
    fn username_length_counts_characters() {
        // 30 Cyrillic letters are 60 bytes
        assert!(validate_username(&"ж".repeat(30)).is_ok());
        assert!(validate_username(&"ж".repeat(50)).is_ok());
        assert!(validate_username(&"ж".repeat(51)).is_err());
    }

    #[tokio::test]
    async fn register_accepts_cyrillic_name() {
        let service = create_service(InMemoryUserRepository::new(), InMemoryBalanceRepository::new());

        let (user, _) = service.register("Анастасия").await.unwrap();

        assert_eq!(user.username, "Анастасия");
    }

    #[tokio::test]
    async fn register_fails_with_whitespace() {
        let service = create_service(InMemoryUserRepository::new(), InMemoryBalanceRepository::new());

        let err = service.register("alice smith").await.unwrap_err().to_string();

        assert!(err.contains("whitespace"));
    }

    #[tokio::test]
    async fn register_fails_with_duplicate_name() {
        let (existing, _) = test_student();
        let service = create_service(
            InMemoryUserRepository::new().with_user(existing.clone()),
            InMemoryBalanceRepository::new(),
        );

        let err = service.register(&existing.username).await.unwrap_err().to_string();

        assert!(err.contains("already exists"));
    }

    #[tokio::test]
    async fn ensure_admin_creates_once() {
        let service = create_service(InMemoryUserRepository::new(), InMemoryBalanceRepository::new());

        let first = service.ensure_admin("root", "sk-root").await.unwrap();
        let second = service.ensure_admin("root", "sk-root").await.unwrap();

        assert!(first.is_admin());
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn ensure_admin_keeps_existing_admin() {
        let (admin, key) = test_admin();
        let service = create_service(
            InMemoryUserRepository::new().with_user(admin.clone()),
            InMemoryBalanceRepository::new(),
        );

        let found = service.ensure_admin("someone-else", &key).await.unwrap();

        assert_eq!(found.id, admin.id);
    }

    #[tokio::test]
    async fn ensure_admin_refuses_taken_username() {
        let (student, _) = test_student();
        let service = create_service(
            InMemoryUserRepository::new().with_user(student.clone()),
            InMemoryBalanceRepository::new(),
        );

        let result = service.ensure_admin(&student.username, "sk-new-key").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn profile_reports_initial_balance_without_row() {
        let (user, _) = test_student();
        let balances = InMemoryBalanceRepository::new();
        let service = create_service(InMemoryUserRepository::new(), balances);

        let profile = service.profile(&user).await.unwrap();

        assert_eq!(profile.balance, 1000);
        assert!(profile.subscriptions.is_empty());
    }

    #[tokio::test]
    async fn profile_reports_stored_balance() {
        let (user, _) = test_student();
        let service = create_service(
            InMemoryUserRepository::new(),
            InMemoryBalanceRepository::new().with_balance(user.id, 250),
        );

        let profile = service.profile(&user).await.unwrap();

        assert_eq!(profile.balance, 250);
    }
}
