//! In-process stand-in for the backend, bound to an ephemeral port

use super::client::BackendClient;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) const DEMO_TOKEN: &str = "demo_token_ST001_ab12cd34";

#[derive(Clone, Default)]
struct Recorded(Arc<Mutex<Vec<(&'static str, Value)>>>);

impl Recorded {
    fn push(&self, endpoint: &'static str, body: &Value) {
        self.0.lock().unwrap().push((endpoint, body.clone()));
    }
}

pub(crate) struct TestBackend {
    pub(crate) base_url: String,
    recorded: Recorded,
}

impl TestBackend {
    pub(crate) async fn start() -> Self {
        let recorded = Recorded::default();
        let app = Router::new()
            .route("/api/chat", post(chat))
            .route("/api/chat/history/:session_id", get(history))
            .route("/api/demo/login", post(login))
            .route("/api/demo/whatsapp/request-otp", post(request_otp))
            .route("/api/demo/whatsapp/verify-otp", post(verify_otp))
            .route("/api/demo/student-data", post(student_data))
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            recorded,
        }
    }

    pub(crate) fn client(&self) -> BackendClient {
        BackendClient::new(&self.base_url, Duration::from_millis(300)).unwrap()
    }

    /// Request bodies received on `endpoint`, in arrival order
    pub(crate) fn requests(&self, endpoint: &str) -> Vec<Value> {
        self.recorded
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| *name == endpoint)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

async fn chat(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Response {
    recorded.push("chat", &body);
    let message = body["message"].as_str().unwrap_or_default().to_string();
    match message.as_str() {
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            StatusCode::OK.into_response()
        }
        "boom" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "garbage" => "<html>oops</html>".into_response(),
        _ => Json(json!({
            "response": format!("You said: {}", message),
            "session_id": body["session_id"],
            "message_id": "m1",
        }))
        .into_response(),
    }
}

async fn history(Path(session_id): Path<String>) -> Json<Value> {
    if session_id == "empty" {
        return Json(json!([]));
    }
    Json(json!([
        {
            "id": "u1",
            "session_id": session_id,
            "message": "J1 math",
            "sender": "user",
            "timestamp": "2026-01-05T09:30:00.000001"
        },
        {
            "id": "m1",
            "session_id": session_id,
            "message": "Which location?",
            "sender": "assistant",
            "timestamp": "2026-01-05T09:30:02.5+00:00"
        }
    ]))
}

fn granted(message: &str) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": message,
        "session_token": DEMO_TOKEN,
        "student_name": "Emily Tan",
    }))
}

fn refused(message: &str) -> Json<Value> {
    Json(json!({"success": false, "message": message}))
}

async fn login(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    recorded.push("login", &body);
    if body["student_id"] == "ST001" && body["password"] == "demo123" {
        granted("Welcome back, Emily Tan!")
    } else {
        refused("Invalid student ID or password. Please try again.")
    }
}

async fn request_otp(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    recorded.push("request_otp", &body);
    if body["student_id"] == "ST001" && body["phone"] == "+6591234567" {
        Json(json!({"success": true, "message": "📱 OTP sent to 4567 (Demo OTP: 123456)"}))
    } else {
        refused("Student ID and phone number do not match our records.")
    }
}

async fn verify_otp(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    recorded.push("verify_otp", &body);
    if body["student_id"] == "ST001" && body["otp"] == "123456" {
        granted("✅ Welcome, Emily Tan! You now have access to your personal information.")
    } else {
        refused("Invalid OTP. 2 attempts remaining.")
    }
}

async fn student_data(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    recorded.push("student_data", &body);
    if body["session_token"] != DEMO_TOKEN {
        return Json(json!({"success": false, "error": "Session expired. Please login again."}));
    }
    match body["data_type"].as_str() {
        Some("fees") => Json(json!({"success": true, "data": "Outstanding: $0.00"})),
        Some("schedule") => Json(json!({"success": true, "data": "Sat 9:00 AM J1 Math"})),
        Some("profile") => Json(json!({"success": true, "data": "Emily Tan, J1"})),
        _ => Json(json!({"success": false, "error": "Invalid data type requested."})),
    }
}
