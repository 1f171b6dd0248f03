use std::sync::Arc;
use std::time::Duration;

use auth::PasswordHasher;
use signup_service::domain::signup::models::ValidationPolicy;
use signup_service::domain::signup::service::SignUpService;
use signup_service::inbound::http::router::create_router;
use signup_service::outbound::repositories::InMemoryUserStore;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryUserStore>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application with lenient server-side validation
    pub async fn spawn() -> Self {
        Self::spawn_with_policy(ValidationPolicy::default()).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_policy(validation_policy: ValidationPolicy) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryUserStore::new());

        // Lowest cost keeps the suite fast
        let password_hasher =
            PasswordHasher::with_work_factor(1).expect("Failed to create password hasher");

        let signup_service = Arc::new(SignUpService::new(
            Arc::clone(&store),
            password_hasher,
            Duration::from_secs(30),
        ));

        let router = create_router(signup_service, validation_policy);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to POST a JSON body to the sign-up endpoint
    pub async fn sign_up(&self, body: &serde_json::Value) -> reqwest::Response {
        self.post("/api/auth/signup")
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
