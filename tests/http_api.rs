mod common;

use common::{json_response, stub_server, text_response};
use student_portal::api::{ApiError, HttpStudentApi, StudentApi, StudentPayload};
use student_portal::config::ClientConfig;

fn api_for(base_url: &str, cookies: Option<&str>) -> HttpStudentApi {
    let config = ClientConfig {
        base_url: base_url.to_string(),
        cookies: cookies.map(str::to_string),
        timeout_secs: 5,
        ..ClientConfig::default()
    };
    HttpStudentApi::new(&config).unwrap()
}

#[tokio::test]
async fn test_list_students_decodes_in_server_order() {
    let body = r#"{"success": true, "students": [
        {"id": 4, "name": "Dee", "subject": "Chem", "mark": 88},
        {"id": 2, "name": "Bob", "subject": "Art", "mark": 72}
    ]}"#;
    let (base_url, server) = stub_server(vec![json_response("200 OK", body)]).await;
    let api = api_for(&base_url, None);

    let students = api.list_students().await.unwrap();

    let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![4, 2]);
    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET /api/students/ "));
}

#[tokio::test]
async fn test_list_students_rejected_with_401_envelope() {
    let body = r#"{"success": false, "message": "Not authenticated"}"#;
    let (base_url, _server) = stub_server(vec![json_response("401 Unauthorized", body)]).await;
    let api = api_for(&base_url, None);

    let result = api.list_students().await;

    assert_eq!(result, Err(ApiError::Rejected("Not authenticated".to_string())));
}

#[tokio::test]
async fn test_add_sends_form_and_decoded_csrf_header() {
    let body = r#"{"success": true, "student": {"id": 7, "name": "Ann", "subject": "Math", "mark": 95}}"#;
    let (base_url, server) = stub_server(vec![json_response("200 OK", body)]).await;
    let api = api_for(&base_url, Some("csrftoken=tok%2F1; session_token=s1"));

    let stored = api
        .add_student(&StudentPayload::new("Ann", "Math", 95.0))
        .await
        .unwrap();

    assert_eq!(stored.id, 7);
    let request = server.await.unwrap().remove(0);
    let lowered = request.to_lowercase();
    assert!(request.starts_with("POST /api/add/ "));
    assert!(lowered.contains("x-csrftoken: tok/1"));
    assert!(lowered.contains("content-type: application/x-www-form-urlencoded"));
    assert!(lowered.contains("session_token=s1"));
    assert!(request.ends_with("name=Ann&subject=Math&marks=95"));
}

#[tokio::test]
async fn test_add_rejection_carries_message() {
    let body = r#"{"success": false, "message": "Marks must be between 0 and 100"}"#;
    let (base_url, _server) = stub_server(vec![json_response("400 Bad Request", body)]).await;
    let api = api_for(&base_url, Some("csrftoken=t"));

    let result = api.add_student(&StudentPayload::new("Ann", "Math", 50.0)).await;

    assert_eq!(
        result,
        Err(ApiError::Rejected("Marks must be between 0 and 100".to_string()))
    );
}

#[tokio::test]
async fn test_edit_redirect_is_success() {
    let response = text_response("302 Found", "Location: /students/\r\n", "");
    let (base_url, server) = stub_server(vec![response]).await;
    let api = api_for(&base_url, Some("csrftoken=t"));

    let result = api.edit_student(3, &StudentPayload::new("Cy", "Bio", 61.0)).await;

    assert_eq!(result, Ok(()));
    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 1, "redirect must not be followed");
    assert!(requests[0].starts_with("POST /students/edit/3/ "));
}

#[tokio::test]
async fn test_edit_without_redirect_returns_body() {
    let response = text_response("200 OK", "", "<p>Enter a whole number.</p>");
    let (base_url, _server) = stub_server(vec![response]).await;
    let api = api_for(&base_url, Some("csrftoken=t"));

    let result = api.edit_student(3, &StudentPayload::new("Cy", "Bio", 61.5)).await;

    assert_eq!(
        result,
        Err(ApiError::NotRedirected("<p>Enter a whole number.</p>".to_string()))
    );
}

#[tokio::test]
async fn test_delete_posts_without_body() {
    let body = r#"{"success": true, "student_id": 5}"#;
    let (base_url, server) = stub_server(vec![json_response("200 OK", body)]).await;
    let api = api_for(&base_url, Some("csrftoken=abc"));

    api.delete_student(5).await.unwrap();

    let request = server.await.unwrap().remove(0);
    assert!(request.starts_with("POST /api/delete/5/ "));
    assert!(request.to_lowercase().contains("x-csrftoken: abc"));
    assert!(request.ends_with("\r\n\r\n"));
}

#[tokio::test]
async fn test_delete_not_found() {
    let body = r#"{"success": false, "message": "Student not found"}"#;
    let (base_url, _server) = stub_server(vec![json_response("404 Not Found", body)]).await;
    let api = api_for(&base_url, Some("csrftoken=abc"));

    let result = api.delete_student(99).await;

    assert_eq!(result, Err(ApiError::Rejected("Student not found".to_string())));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);
    let api = api_for(&base_url, None);

    let result = api.list_students().await;

    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn test_non_json_body_is_network_failure() {
    let response = text_response("500 Internal Server Error", "", "<h1>Server Error</h1>");
    let (base_url, _server) = stub_server(vec![response]).await;
    let api = api_for(&base_url, None);

    let result = api.list_students().await;

    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn test_login_collects_csrf_then_session_cookie() {
    let login_page = text_response(
        "200 OK",
        "Set-Cookie: csrftoken=abc123; Path=/\r\n",
        "<form></form>",
    );
    let login_redirect = text_response(
        "302 Found",
        "Location: /students/\r\nSet-Cookie: session_token=sess9; Path=/; HttpOnly\r\n",
        "",
    );
    let (base_url, server) = stub_server(vec![login_page, login_redirect]).await;
    let api = api_for(&base_url, None);

    api.login("registrar", "pw").await.unwrap();

    assert_eq!(api.cookie("session_token").as_deref(), Some("sess9"));
    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET /login/ "));
    assert!(requests[1].starts_with("POST /login/ "));
    assert!(requests[1].contains("csrfmiddlewaretoken=abc123"));
    assert!(requests[1].to_lowercase().contains("x-csrftoken: abc123"));
}

#[tokio::test]
async fn test_login_rejected_when_form_is_rerendered() {
    let login_page = text_response("200 OK", "Set-Cookie: csrftoken=abc; Path=/\r\n", "");
    let rerendered = text_response("200 OK", "", "Invalid credentials");
    let (base_url, _server) = stub_server(vec![login_page, rerendered]).await;
    let api = api_for(&base_url, None);

    let result = api.login("registrar", "wrong").await;

    assert_eq!(result, Err(ApiError::Rejected("Invalid credentials".to_string())));
}

#[tokio::test]
async fn test_mutating_requests_carry_same_origin_referer() {
    let responses = vec![
        json_response(
            "200 OK",
            r#"{"success": true, "student": {"id": 1, "name": "Ann", "subject": "Math", "mark": 90}}"#,
        ),
        text_response("302 Found", "Location: /students/\r\n", ""),
        json_response("200 OK", r#"{"success": true}"#),
    ];
    let (base_url, server) = stub_server(responses).await;
    let api = api_for(&base_url, Some("csrftoken=t"));
    let payload = StudentPayload::new("Ann", "Math", 90.0);

    api.add_student(&payload).await.unwrap();
    api.edit_student(1, &payload).await.unwrap();
    api.delete_student(1).await.unwrap();

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 3);
    let expected = format!("referer: {}", base_url.to_lowercase());
    for request in requests {
        assert!(request.to_lowercase().contains(&expected), "{}", request);
    }
}

#[tokio::test]
async fn test_edit_redirect_to_login_is_rejected() {
    let response = text_response("302 Found", "Location: /login/?next=/students/edit/3/\r\n", "");
    let (base_url, _server) = stub_server(vec![response]).await;
    let api = api_for(&base_url, Some("csrftoken=t"));

    let result = api.edit_student(3, &StudentPayload::new("Cy", "Bio", 61.0)).await;

    assert!(matches!(result, Err(ApiError::Rejected(_))));
}

#[tokio::test]
async fn test_logout_follows_redirect_status() {
    let response = text_response("302 Found", "Location: /login/\r\n", "");
    let (base_url, server) = stub_server(vec![response]).await;
    let api = api_for(&base_url, None);

    assert_eq!(api.logout().await, Ok(()));
    assert!(server.await.unwrap()[0].starts_with("GET /logout/ "));
}

#[tokio::test]
async fn test_logout_server_error_is_rejected() {
    let response = text_response("500 Internal Server Error", "", "<h1>Server Error</h1>");
    let (base_url, _server) = stub_server(vec![response]).await;
    let api = api_for(&base_url, None);

    let result = api.logout().await;

    assert_eq!(result, Err(ApiError::Rejected("<h1>Server Error</h1>".to_string())));
}
