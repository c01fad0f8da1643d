use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use chrono::NaiveDate;
use finance_hub::api::{FinanceApi, HttpApiClient};
use finance_hub::config::ApiConfig;
use finance_hub::domain::{EntryKind, NewBudget};
use finance_hub::errors::FinanceError;
use uuid::Uuid;

/// Serves exactly one HTTP response and hands back the raw request text.
fn serve_once(status: &'static str, body: impl Into<String>) -> (String, JoinHandle<String>) {
    let body = body.into();
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().expect("stub address");
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let read = stream.read(&mut buf).expect("read request");
            if read == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..read]);
            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= head_end + 4 + length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
        String::from_utf8_lossy(&raw).to_string()
    });
    (format!("http://{addr}"), handle)
}

fn client(base_url: String, token: Option<&str>) -> HttpApiClient {
    let config = ApiConfig {
        base_url: Some(base_url),
        timeout_ms: 5_000,
        ..ApiConfig::default()
    };
    HttpApiClient::new(&config, token.map(str::to_string)).expect("client builds")
}

#[test]
fn lists_transactions_with_bearer_token() {
    let user = Uuid::new_v4();
    let body = r#"[{
        "id": "2d3b7f0a-3d9a-4a44-9d7b-8d2e0a1f6c11",
        "userId": "0b7e6b64-31b5-4c43-9c59-0e5d3c3e8f11",
        "categoryId": "6f9c1f7e-8a53-4a55-9d0e-3f0e1d2c4b5a",
        "amount": "42.10",
        "type": "expense",
        "description": "Lunch",
        "date": "2024-02-10T00:00:00.000Z",
        "createdAt": "2024-02-10T08:30:00Z",
        "updatedAt": "2024-02-10T08:30:00Z"
    }]"#;
    let (url, server) = serve_once("200 OK", body);

    let transactions = client(url, Some("secret")).list_transactions(user).unwrap();
    let request = server.join().unwrap();

    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, EntryKind::Expense);
    assert_eq!(transactions[0].description.as_deref(), Some("Lunch"));
    assert!(request.starts_with(&format!("GET /api/transactions/user/{user} ")));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer secret"));
}

#[test]
fn error_body_becomes_api_error() {
    let (url, server) = serve_once("404 Not Found", r#"{"error":"Budget not found"}"#);

    let err = client(url, None).delete_budget(Uuid::new_v4()).unwrap_err();
    let request = server.join().unwrap();

    match err {
        FinanceError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Budget not found");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!request.to_ascii_lowercase().contains("authorization:"));
}

#[test]
fn malformed_body_is_a_decode_error() {
    let (url, server) = serve_once("200 OK", r#"{"unexpected": true}"#);

    let err = client(url, None).list_categories(Uuid::new_v4()).unwrap_err();
    server.join().unwrap();

    assert!(matches!(
        err,
        FinanceError::Decode(ref message) if message.contains("/api/categories")
    ));
    assert!(err.to_string().starts_with("Unexpected response"));
}

#[test]
fn delete_accepts_no_content() {
    let (url, server) = serve_once("204 No Content", "");
    client(url, Some("t")).delete_transaction(Uuid::new_v4()).unwrap();
    let request = server.join().unwrap();
    assert!(request.starts_with("DELETE /api/transactions/"));
}

#[test]
fn budget_creation_posts_camel_case_json() {
    let category = Uuid::new_v4();
    let body = format!(
        r#"{{"id":"{}","userId":"{}","categoryId":"{category}","amount":"300","month":"2024-05-01"}}"#,
        Uuid::new_v4(),
        Uuid::new_v4()
    );
    let (url, server) = serve_once("201 Created", body);

    let input = NewBudget::for_month(category, "300", NaiveDate::from_ymd_opt(2024, 5, 20).unwrap());
    let budget = client(url, Some("t")).create_budget(&input).unwrap();
    let request = server.join().unwrap();

    assert_eq!(budget.category_id, category);
    assert!(request.starts_with("POST /api/budgets "));
    assert!(request.contains(&format!(r#""categoryId":"{category}""#)));
    assert!(request.contains(r#""month":"2024-05-01""#));
}

#[test]
fn rejects_invalid_base_url() {
    let config = ApiConfig {
        base_url: Some("not a url".into()),
        ..ApiConfig::default()
    };
    let err = HttpApiClient::new(&config, None).unwrap_err();
    assert!(matches!(err, FinanceError::Config(_)));
}
