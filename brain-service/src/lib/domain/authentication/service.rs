use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationResult;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::errors::AuthFailure;
use crate::domain::authentication::models::bearer_token;
use crate::domain::authentication::models::Credentials;
use crate::domain::authentication::models::Identity;
use crate::domain::authentication::models::Strategy;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Domain service implementation for signup, signin and request authentication.
///
/// Generic over repository for testability.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    /// Verified against when the username matches no user, so a miss costs
    /// the same hashing work as a wrong password.
    dummy_hash: Option<String>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token handler
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        let dummy_hash = authenticator
            .hash_password(DUMMY_PASSWORD)
            .map_err(|e| tracing::warn!(error = %e, "Failed to precompute dummy password hash"))
            .ok();

        Self {
            repository,
            authenticator,
            dummy_hash,
        }
    }

    /// Runs on the blocking pool, like [`Self::verify_password`].
    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::HashingFailed(e.to_string()))?
            .map_err(|e| UserError::HashingFailed(e.to_string()))
    }

    async fn verify_password(
        &self,
        password: String,
        stored_hash: String,
    ) -> Result<bool, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || {
            authenticator.verify_password(&password, &stored_hash)
        })
        .await
        .map_err(|e| AuthError::PasswordError(e.to_string()))?
        .map_err(|e| AuthError::PasswordError(e.to_string()))
    }

    async fn reject_unknown_username(&self, password: String) -> Result<Identity, AuthError> {
        if let Some(dummy_hash) = &self.dummy_hash {
            self.verify_password(password, dummy_hash.clone()).await?;
        }

        Err(AuthFailure::UnknownUsername.into())
    }

    async fn verify_credentials(&self, credentials: Credentials) -> Result<Identity, AuthError> {
        let Credentials { username, password } = credentials;

        let username = match Username::new(username) {
            Ok(username) => username,
            Err(_) => return self.reject_unknown_username(password).await,
        };

        let user = match self.repository.find_by_username(&username).await? {
            Some(user) => user,
            None => return self.reject_unknown_username(password).await,
        };

        let matches = self.verify_password(password, user.password_hash).await?;

        if !matches {
            return Err(AuthFailure::IncorrectPassword.into());
        }

        Ok(Identity { user_id: user.id })
    }

    async fn verify_bearer(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(AuthFailure::InvalidToken)?;

        let user_id = UserId::from_string(&claims.sub).map_err(|_| AuthFailure::InvalidSubject)?;

        // A token can outlive its user
        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthFailure::UnknownSubject(user_id))?;

        Ok(Identity { user_id: user.id })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<User, UserError> {
        let password_hash = self
            .hash_password(command.password.expose().to_string())
            .await?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User signed up"
        );

        Ok(created_user)
    }

    async fn signin(&self, credentials: Credentials) -> Result<AuthenticationResult, AuthError> {
        let identity = self
            .authenticate(Strategy::Credentials(credentials))
            .await?;

        let result = self
            .authenticator
            .issue_token(identity.user_id)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;

        tracing::info!(user_id = %identity.user_id, "User signed in");

        Ok(result)
    }

    async fn authenticate(&self, strategy: Strategy) -> Result<Identity, AuthError> {
        let strategy_name = strategy.name();

        let result = match strategy {
            Strategy::Credentials(credentials) => self.verify_credentials(credentials).await,
            Strategy::Bearer(token) => self.verify_bearer(&token).await,
        };

        if let Err(AuthError::Rejected(reason)) = &result {
            tracing::warn!(strategy = strategy_name, reason = %reason, "Authentication rejected");
        }

        result
    }

    async fn authenticate_request(
        &self,
        authorization: Option<&str>,
    ) -> Result<Identity, AuthError> {
        let token = bearer_token(authorization).map_err(|reason| {
            tracing::warn!(strategy = "bearer", reason = %reason, "Authentication rejected");
            reason
        })?;
        self.authenticate(Strategy::Bearer(token.to_string())).await
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordCost;
    use auth::PasswordHasher;
    use auth::TokenError;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::Password;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        let hasher = PasswordHasher::with_cost(PasswordCost {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        Arc::new(Authenticator::new(SECRET, Duration::hours(1), hasher))
    }

    fn stored_user(authenticator: &Authenticator, username: &str, password: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn rejected(result: Result<Identity, AuthError>) -> AuthFailure {
        match result {
            Err(AuthError::Rejected(reason)) => reason,
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_signup_hashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice" && user.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let command = SignupCommand::new(
            Username::new("alice".to_string()).unwrap(),
            Password::new("secret123".to_string()).unwrap(),
        );

        let user = service.signup(command).await.expect("Signup failed");
        assert_eq!(user.username.as_str(), "alice");
        assert_ne!(user.password_hash, "secret123");
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = AuthService::new(Arc::new(repository), authenticator());

        let command = SignupCommand::new(
            Username::new("alice".to_string()).unwrap(),
            Password::new("other".to_string()).unwrap(),
        );

        let result = service.signup(command).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_signin_success_issues_token_for_user() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "alice", "secret123");
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .withf(|username| username.as_str() == "alice")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let result = service
            .signin(Credentials::new("alice", "secret123"))
            .await
            .expect("Signin failed");

        let claims = authenticator.validate_token(&result.access_token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[tokio::test]
    async fn test_signin_unknown_username() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.signin(Credentials::new("nobody", "secret123")).await;
        assert!(matches!(
            result,
            Err(AuthError::Rejected(AuthFailure::UnknownUsername))
        ));
    }

    #[tokio::test]
    async fn test_signin_invalid_username_never_hits_storage() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_username().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.signin(Credentials::new("a b", "secret123")).await;
        assert!(matches!(
            result,
            Err(AuthError::Rejected(AuthFailure::UnknownUsername))
        ));
    }

    #[tokio::test]
    async fn test_dummy_hash_is_precomputed() {
        let service = AuthService::new(Arc::new(MockTestUserRepository::new()), authenticator());

        let dummy_hash = service.dummy_hash.as_deref().unwrap();
        assert!(dummy_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_signin_unknown_username_runs_the_hasher() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let mut service = AuthService::new(Arc::new(repository), authenticator());
        // Verifying against an unparseable hash errors instead of rejecting
        service.dummy_hash = Some("not-a-phc-string".to_string());

        let unknown = service.signin(Credentials::new("nobody", "secret123")).await;
        assert!(matches!(unknown, Err(AuthError::PasswordError(_))));

        let invalid = service.signin(Credentials::new("a b", "secret123")).await;
        assert!(matches!(invalid, Err(AuthError::PasswordError(_))));
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "alice", "secret123");

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service.signin(Credentials::new("alice", "wrong")).await;
        assert!(matches!(
            result,
            Err(AuthError::Rejected(AuthFailure::IncorrectPassword))
        ));
    }

    #[tokio::test]
    async fn test_signin_storage_failure_is_not_a_rejection() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection refused".to_string())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.signin(Credentials::new("alice", "secret123")).await;
        assert!(matches!(result, Err(AuthError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_authenticate_request_success() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "alice", "secret123");
        let user_id = user.id;
        let token = authenticator.issue_token(user_id).unwrap().access_token;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let identity = service
            .authenticate_request(Some(&format!("Bearer {}", token)))
            .await
            .expect("Authentication failed");
        assert_eq!(identity, Identity { user_id });
    }

    #[tokio::test]
    async fn test_authenticate_request_without_header() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let reason = rejected(service.authenticate_request(None).await);
        assert_eq!(reason, AuthFailure::MissingHeader);
    }

    #[tokio::test]
    async fn test_authenticate_request_with_wrong_scheme() {
        let authenticator = authenticator();
        let token = authenticator.issue_token(UserId::new()).unwrap().access_token;

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator);

        let reason = rejected(
            service
                .authenticate_request(Some(&format!("Token {}", token)))
                .await,
        );
        assert_eq!(reason, AuthFailure::MalformedHeader);
    }

    #[tokio::test]
    async fn test_authenticate_request_with_expired_token() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_token_at(UserId::new(), Utc::now() - Duration::hours(2))
            .unwrap()
            .access_token;

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator);

        let reason = rejected(
            service
                .authenticate_request(Some(&format!("Bearer {}", token)))
                .await,
        );
        assert_eq!(reason, AuthFailure::InvalidToken(TokenError::Expired));
    }

    #[tokio::test]
    async fn test_authenticate_request_with_garbage_token() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let reason = rejected(service.authenticate_request(Some("Bearer not-a-jwt")).await);
        assert!(matches!(
            reason,
            AuthFailure::InvalidToken(TokenError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_request_for_deleted_user() {
        let authenticator = authenticator();
        let user_id = UserId::new();
        let token = authenticator.issue_token(user_id).unwrap().access_token;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let reason = rejected(
            service
                .authenticate_request(Some(&format!("Bearer {}", token)))
                .await,
        );
        assert_eq!(reason, AuthFailure::UnknownSubject(user_id));
    }

    #[tokio::test]
    async fn test_authenticate_request_with_non_uuid_subject() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("user123").unwrap().access_token;

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator);

        let reason = rejected(
            service
                .authenticate_request(Some(&format!("Bearer {}", token)))
                .await,
        );
        assert_eq!(reason, AuthFailure::InvalidSubject);
    }

    #[tokio::test]
    async fn test_credentials_and_bearer_resolve_same_identity() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "alice", "secret123");
        let user_id = user.id;
        let by_name = user.clone();
        let by_id = user.clone();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .returning(move |_| Ok(Some(by_name.clone())));
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(by_id.clone())));

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let from_credentials = service
            .authenticate(Strategy::Credentials(Credentials::new("alice", "secret123")))
            .await
            .unwrap();

        let token = authenticator.issue_token(user_id).unwrap().access_token;
        let from_bearer = service.authenticate(Strategy::Bearer(token)).await.unwrap();

        assert_eq!(from_credentials, from_bearer);
        assert_eq!(from_bearer.user_id, user_id);
    }
}
