use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

/// Secret the spawned server verifies against; tests mint their tokens with
/// the same value.
pub const JWT_SECRET: &str = "modelhub-integration-secret";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_modelhub-api"));
        cmd.env("MODELHUB_API_PORT", port.to_string())
            .env("SECURITY_JWT_SECRET", JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env when present
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Consider server ready whether or not the database is up
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Bearer token for a user with a full UserInfo payload.
pub fn user_token(name: &str, email: &str) -> String {
    use modelhub_api::auth::{issue_token, Claims, UserInfo};

    let user = UserInfo {
        id: uuid::Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
    };
    let claims = Claims::new(user.id.to_string(), Some(user));
    issue_token(&claims, JWT_SECRET).expect("failed to sign test token")
}

/// Bearer token whose payload carries no UserInfo at all.
pub fn bare_token() -> String {
    use modelhub_api::auth::{issue_token, Claims};

    let claims = Claims::new("svc-integration".to_string(), None);
    issue_token(&claims, JWT_SECRET).expect("failed to sign test token")
}
