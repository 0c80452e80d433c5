use assetbank::dam::auth::authenticate;
use assetbank::{DamConfig, DamError};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

/// One-shot HTTP endpoint: answers the first request with a canned response
/// and hands the raw request text back to the test.
fn spawn_login_endpoint(
    status_line: &'static str,
    body: &'static str,
) -> (DamConfig, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if let Some(header_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&raw[..header_end]).to_string();
                let content_length = headers
                    .lines()
                    .find_map(|line| {
                        line.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if raw.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        tx.send(String::from_utf8_lossy(&raw).to_string()).unwrap();
    });

    let config = DamConfig::new(
        format!("http://{addr}/"),
        "ckey".to_string(),
        "csecret".to_string(),
    );
    (config, rx)
}

fn request_body(request: &str) -> &str {
    request.split("\r\n\r\n").nth(1).unwrap_or("")
}

#[tokio::test]
async fn successful_login_parses_credentials_and_strips_the_consumer_pair() {
    let (config, rx) = spawn_login_endpoint(
        "200 OK",
        r#"{"tokenKey": "tk", "tokenSecret": "ts", "userId": "u1"}"#,
    );

    let credentials = authenticate(&reqwest::Client::new(), &config, "user", "pass")
        .await
        .unwrap();

    assert_eq!(credentials.token_key, "tk");
    assert_eq!(credentials.token_secret(), "ts");

    let request = rx.recv().unwrap();
    let lowercase = request.to_ascii_lowercase();
    assert!(lowercase.contains("post /api/v4/users/login/"));
    assert!(lowercase.contains("authorization: oauth oauth_consumer_key=\"ckey\""));

    // The consumer pair signs the request but must never reach the wire body,
    // and the consumer secret must not appear anywhere in the request.
    assert_eq!(request_body(&request), "username=user&password=pass");
    assert!(!request.contains("csecret"));
}

#[tokio::test]
async fn rejected_login_carries_the_exact_status() {
    let (config, rx) = spawn_login_endpoint("403 Forbidden", "{}");

    let err = authenticate(&reqwest::Client::new(), &config, "user", "pass")
        .await
        .unwrap_err();

    match err {
        DamError::Authentication { status } => assert_eq!(status, 403),
        other => panic!("unexpected error: {other:?}"),
    }

    let body = request_body(&rx.recv().unwrap()).to_string();
    assert!(!body.contains("ckey") && !body.contains("csecret"));
}
