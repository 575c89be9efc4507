use event_booker::{
    api::router::create_router,
    config::Config,
    domain::models::event::Event,
    domain::models::user::User,
    domain::ports::{EmailService, ImageStore},
    domain::services::auth_service::AuthService,
    error::AppError,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tera::Tera;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "Password1!";

pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, _recipient: &str, _subject: &str, _html_body: &str) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct MockImageStore;

#[async_trait]
impl ImageStore for MockImageStore {
    async fn store(&self, filename: &str, _bytes: Vec<u8>) -> Result<String, AppError> {
        Ok(format!("https://images.test/{}", filename))
    }

    async fn delete(&self, _uri: &str) -> Result<(), AppError> {
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template(
            "verification.html",
            "<html>Mock verification for {{ name }}: {{ verification_url }}</html>",
        )
        .unwrap();
        let templates = Arc::new(tera);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret-key".to_string(),
            base_url: "http://localhost".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            image_service_url: "http://localhost".to_string(),
            image_service_token: "token".to_string(),
        };

        let auth_service = Arc::new(AuthService::new(&config));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            auth_service,
            email_service: Arc::new(MockEmailService),
            image_store: Arc::new(MockImageStore),
            templates,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Inserts a user directly and returns it with a valid access token.
    pub async fn seed_user(&self, email: &str, role: &str) -> (User, String) {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(TEST_PASSWORD.as_bytes(), &salt)
            .unwrap()
            .to_string();

        let user = if role == "admin" {
            User::admin(email.to_string(), "Test Admin".to_string(), password_hash)
        } else {
            User::signup(email.to_string(), "Test User".to_string(), password_hash)
        };

        let created = self.state.user_repo.create(&user).await.unwrap();
        let token = self.state.auth_service.issue(&created).unwrap();
        (created, token)
    }

    /// Inserts an event directly, bypassing the handler's past-date guard
    /// so tests can seed events dated in the past.
    pub async fn seed_event(&self, name: &str, days_from_now: i64, capacity: i64) -> Event {
        let event = Event {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: "A test event".to_string(),
            category: "concert".to_string(),
            date: Utc::now() + Duration::days(days_from_now),
            venue: "Main Hall".to_string(),
            price: 25.0,
            image: "https://images.test/event.png".to_string(),
            capacity,
            created_at: Utc::now(),
        };

        self.state.event_repo.create(&event).await.unwrap()
    }

    pub fn get(&self, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    pub fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn patch_json(&self, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("PATCH")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn delete(&self, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
