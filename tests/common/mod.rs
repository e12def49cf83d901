#![allow(dead_code)]

use std::sync::Mutex;

use student_portal::api::{ApiError, ApiResult, Student, StudentApi, StudentPayload};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn student(id: i64, name: &str, subject: &str, mark: f64) -> Student {
    Student {
        id,
        name: name.to_string(),
        subject: subject.to_string(),
        mark,
    }
}

/// In-memory backend that records every call it receives.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub students: Mutex<Vec<Student>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_next: Mutex<Option<ApiError>>,
}

impl FakeApi {
    pub fn with_students(students: Vec<Student>) -> Self {
        Self {
            students: Mutex::new(students),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_next(&self, error: ApiError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl StudentApi for FakeApi {
    async fn list_students(&self) -> ApiResult<Vec<Student>> {
        self.record("list".to_string())?;
        Ok(self.students.lock().unwrap().clone())
    }

    async fn add_student(&self, payload: &StudentPayload) -> ApiResult<Student> {
        self.record(format!("add:{}:{}:{}", payload.name, payload.subject, payload.marks))?;
        let mut students = self.students.lock().unwrap();
        let id = students.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let stored = student(id, &payload.name, &payload.subject, payload.marks.parse().unwrap());
        students.push(stored.clone());
        Ok(stored)
    }

    async fn edit_student(&self, id: i64, payload: &StudentPayload) -> ApiResult<()> {
        self.record(format!("edit:{}:{}", id, payload.marks))?;
        let mut students = self.students.lock().unwrap();
        match students.iter_mut().find(|s| s.id == id) {
            Some(existing) => {
                existing.name = payload.name.clone();
                existing.subject = payload.subject.clone();
                existing.mark = payload.marks.parse().unwrap();
                Ok(())
            }
            None => Err(ApiError::NotRedirected("Not Found".to_string())),
        }
    }

    async fn delete_student(&self, id: i64) -> ApiResult<()> {
        self.record(format!("delete:{}", id))?;
        let mut students = self.students.lock().unwrap();
        let before = students.len();
        students.retain(|s| s.id != id);
        if students.len() == before {
            return Err(ApiError::Rejected("Student not found".to_string()));
        }
        Ok(())
    }

    async fn logout(&self) -> ApiResult<()> {
        self.record("logout".to_string())
    }
}

/// Serves one canned HTTP response per connection, in order, and hands back
/// the raw requests it saw.
pub async fn stub_server(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            seen.push(read_request(&mut socket).await);
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
        seen
    });

    (base_url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break data.len();
        }
        data.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&data).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn json_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    )
}

pub fn text_response(status: &str, extra_headers: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\n{}Content-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        extra_headers,
        body.len(),
        body
    )
}
