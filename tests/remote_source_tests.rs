#![cfg(feature = "remote")]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use scheme_tool::{HttpTopicSource, SourceError, TopicSource};

/// Serves one canned response on a local port and returns its URL.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 1024];
        let _ = stream.read(&mut request);
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    format!("http://{addr}/api/topics")
}

#[test]
fn fetches_topics_from_data_envelope() {
    let url = serve_once(
        "200 OK",
        r#"{"data":[{"topic":"Cells","subTopic":"Structure"},{"topic":"Enzymes"}]}"#,
    );
    let topics = HttpTopicSource::new(url).load_topics().unwrap();
    let names: Vec<&str> = topics.iter().map(|t| t.topic.as_str()).collect();
    assert_eq!(names, vec!["Cells", "Enzymes"]);
    assert_eq!(topics[0].sub_topic, "Structure");
}

#[test]
fn error_status_is_http_error() {
    let url = serve_once("503 Service Unavailable", r#"{"error":"down"}"#);
    let err = HttpTopicSource::new(url).load_topics().unwrap_err();
    assert!(matches!(err, SourceError::Http(_)));
}

#[test]
fn malformed_body_is_json_error() {
    let url = serve_once("200 OK", "not json");
    let err = HttpTopicSource::new(url).load_topics().unwrap_err();
    assert!(matches!(err, SourceError::Json(_)));
}
