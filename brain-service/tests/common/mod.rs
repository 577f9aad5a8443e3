use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordCost;
use auth::PasswordHasher;
use brain_service::domain::authentication::service::AuthService;
use brain_service::domain::content::service::ContentService;
use brain_service::domain::share::service::ShareService;
use brain_service::inbound::http::router::create_router;
use brain_service::outbound::repositories::InMemoryContentRepository;
use brain_service::outbound::repositories::InMemoryShareRepository;
use brain_service::outbound::repositories::InMemoryUserRepository;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheapest Argon2 cost keeps the suite fast
        let password_hasher = PasswordHasher::with_cost(PasswordCost {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build password hasher");
        let authenticator = Arc::new(Authenticator::new(
            JWT_SECRET,
            Duration::minutes(60),
            password_hasher,
        ));

        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::clone(&authenticator),
        ));
        let share_service = Arc::new(ShareService::new(Arc::new(InMemoryShareRepository::new())));
        let content_service = Arc::new(ContentService::new(Arc::new(
            InMemoryContentRepository::new(),
        )));

        let router = create_router(auth_service, share_service, content_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            jwt_handler: JwtHandler::new(JWT_SECRET, Duration::minutes(60)),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response
    pub async fn signup(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/signup")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign in and return the response
    pub async fn signin(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/signin")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and sign in, returning the user id and bearer token
    pub async fn signed_in_user(&self, username: &str) -> (String, String) {
        let signup: Value = self
            .signup(username, "pass_word!")
            .await
            .json()
            .await
            .expect("Failed to parse response");
        let signin: Value = self
            .signin(username, "pass_word!")
            .await
            .json()
            .await
            .expect("Failed to parse response");

        (
            signup["data"]["id"].as_str().unwrap().to_string(),
            signin["data"]["token"].as_str().unwrap().to_string(),
        )
    }

    /// Save a content item as the given user and return its id
    pub async fn create_content(&self, token: &str, title: &str) -> String {
        let body: Value = self
            .post_authenticated("/api/content", token)
            .json(&json!({
                "title": title,
                "link": "https://www.youtube.com/watch?v=rAl-9HwD858",
                "type": "video",
                "tags": ["rust", "talk"]
            }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["id"].as_str().unwrap().to_string()
    }
}
