use std::net::SocketAddr;

use axum_extra::extract::cookie::SameSite;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use multideportivo::config::{Config, CookieConfig, Environment};

pub const ADMIN_ROLE: i32 = 1;
pub const MEMBER_ROLE: i32 = 2;

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

/// A registration body with every profile field filled in.
pub fn user_body(id: i32, email: &str, password: &str, role: i32) -> Value {
    json!({
        "id": id,
        "given_name": "Ana",
        "paternal_surname": "López",
        "maternal_surname": "Ruiz",
        "email": email,
        "password": password,
        "postal_code": 64000,
        "neighborhood": "Centro",
        "street": "Av. Juárez",
        "street_number": 120,
        "sex": "femenino",
        "date_of_birth": "1990-05-17",
        "avatar": null,
        "role": role,
    })
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn register(&self, body: &Value) -> (Value, StatusCode) {
        self.post_json("/api/auth/register", body).await
    }

    pub async fn login(&self, id: i32, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "id": id, "password": password }))
            .send()
            .await
            .expect("login request failed")
    }

    pub async fn create_role(&self, id: i32, description: &str) -> (Value, StatusCode) {
        self.post_json("/api/auth/rol", &json!({ "id": id, "description": description }))
            .await
    }

    pub async fn create_membership(&self, id: i32, description: &str) -> (Value, StatusCode) {
        self.post_json(
            "/api/memberships",
            &json!({ "id": id, "description": description }),
        )
        .await
    }

    /// Seed the administrator and member roles.
    pub async fn seed_roles(&self) {
        let (_, status) = self.create_role(ADMIN_ROLE, "Administrador").await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, status) = self.create_role(MEMBER_ROLE, "Socio").await;
        assert_eq!(status, StatusCode::CREATED);
    }

    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .expect("count users failed")
    }
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!(
        "multideportivo_test_{}",
        Uuid::now_v7().to_string().replace('-', "")
    );

    // Connect to default postgres DB to create test DB
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        db_max_connections: 5,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        token_ttl_hours: 24,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        environment: Environment::Development,
        cookie: CookieConfig {
            secure: false,
            same_site: SameSite::Lax,
        },
        // Minimum cost keeps the suite fast
        bcrypt_cost: 4,
        member_role_id: Some(MEMBER_ROLE),
        cors_origins: vec!["http://localhost:3000".to_string()],
        max_body_size: 5 * 1024 * 1024,
        log_level: "warn".to_string(),
    };

    let app = multideportivo::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
