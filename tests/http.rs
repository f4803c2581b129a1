use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    date: String,
    total_visits: u64,
    today_visits: u64,
    registered_users: u64,
}

#[derive(Debug, Deserialize)]
struct SeriesPoint {
    date: String,
    #[allow(dead_code)]
    visits: u64,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    points: Vec<SeriesPoint>,
}

#[derive(Debug, Deserialize)]
struct SignupRejection {
    errors: BTreeMap<String, String>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "visit_tracker_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

fn unique_email(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{tag}_{nanos}@example.com")
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/summary")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_visit_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_summary(client: &Client, base_url: &str) -> SummaryResponse {
    client
        .get(format!("{base_url}/api/summary"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_visit_increments_counters_by_one() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_summary(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/visit", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let after = get_summary(&client, &server.base_url).await;
    assert_eq!(after.total_visits, before.total_visits + 1);
    assert_eq!(after.today_visits, before.today_visits + 1);
    assert!(!after.date.is_empty());
}

#[tokio::test]
async fn http_summary_is_read_only() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let first = get_summary(&client, &server.base_url).await;
    let second = get_summary(&client, &server.base_url).await;
    assert_eq!(second.total_visits, first.total_visits);
    assert_eq!(second.today_visits, first.today_visits);
}

#[tokio::test]
async fn http_dashboard_view_counts_as_a_visit() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_summary(&client, &server.base_url).await;

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());
    let body = page.text().await.unwrap();
    assert!(body.contains("Visit Tracker"));
    assert!(body.contains("visits-chart"));

    let after = get_summary(&client, &server.base_url).await;
    assert_eq!(after.total_visits, before.total_visits + 1);
}

#[tokio::test]
async fn http_series_is_capped_and_ends_with_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let summary = get_summary(&client, &server.base_url).await;
    let series: SeriesResponse = client
        .get(format!("{}/api/series", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(!series.points.is_empty());
    assert!(series.points.len() <= 7);
    assert_eq!(series.points.last().unwrap().date, summary.date);
}

#[tokio::test]
async fn http_signup_then_duplicate_email_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let email = unique_email("dup");
    let before = get_summary(&client, &server.base_url).await;

    let created = client
        .post(format!("{}/api/signup", server.base_url))
        .json(&serde_json::json!({
            "name": "Ada Lovelace",
            "email": email,
            "password": "secret1",
            "confirm": "secret1"
        }))
        .send()
        .await
        .unwrap();
    assert!(created.status().is_success());

    let after = get_summary(&client, &server.base_url).await;
    assert_eq!(after.registered_users, before.registered_users + 1);

    // Same address, different case.
    let duplicate = client
        .post(format!("{}/api/signup", server.base_url))
        .json(&serde_json::json!({
            "name": "Ada Again",
            "email": email.to_uppercase(),
            "password": "secret1",
            "confirm": "secret1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status().as_u16(), 422);

    let rejection: SignupRejection = duplicate.json().await.unwrap();
    assert!(rejection.errors.contains_key("email"));

    let last = get_summary(&client, &server.base_url).await;
    assert_eq!(last.registered_users, after.registered_users);
}

#[tokio::test]
async fn http_signup_rejects_short_password() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/signup", server.base_url))
        .json(&serde_json::json!({
            "name": "Ada Lovelace",
            "email": unique_email("short"),
            "password": "five5",
            "confirm": "five5"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);

    let rejection: SignupRejection = response.json().await.unwrap();
    assert!(rejection.errors.contains_key("password"));
}

#[tokio::test]
async fn http_form_signup_shows_inline_errors() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/signup", server.base_url))
        .form(&[
            ("name", ""),
            ("email", "not-an-email"),
            ("password", "abc"),
            ("confirm", "xyz"),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body = response.text().await.unwrap();
    assert!(body.contains("Please enter your full name."));
    assert!(body.contains("Please enter a valid email address."));
    assert!(body.contains("Passwords do not match."));
}

#[tokio::test]
async fn http_form_signup_success_shows_success_box() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/signup", server.base_url))
        .form(&[
            ("name", "Grace Hopper"),
            ("email", unique_email("form").as_str()),
            ("password", "secret1"),
            ("confirm", "secret1"),
        ])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body = response.text().await.unwrap();
    assert!(body.contains("Account created."));
    assert!(!body.contains(r#"class="success" hidden"#));
}
