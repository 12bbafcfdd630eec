//! End-to-end tests: a real listener on an ephemeral port, driven by LogClient.

use jllogger_core::{Error, LogRequest, ServerConfig};
use jllogger_web::{serve, LogClient};
use std::fs;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Start a server and return (base_url, shutdown sender, join handle)
async fn start(
    config: ServerConfig,
) -> (String, oneshot::Sender<()>, tokio::task::JoinHandle<std::io::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(serve(listener, config, async move {
        let _ = rx.await;
    }));

    (format!("http://{}", addr), tx, handle)
}

#[tokio::test]
async fn test_client_appends_through_server() {
    let root = TempDir::new().unwrap();
    let config = ServerConfig {
        log_dir: root.path().join("jllogger"),
        ..ServerConfig::default()
    };
    let (base_url, shutdown, handle) = start(config).await;

    let client = LogClient::new(&base_url, None);
    client
        .send(&LogRequest::new("session1", vec!["step1 done".into(), "step2 done".into()]))
        .await
        .unwrap();
    client
        .send(&LogRequest::new("session1", vec!["step3 done".into()]))
        .await
        .unwrap();

    let content = fs::read_to_string(root.path().join("jllogger/session1.log")).unwrap();
    assert_eq!(content, "step1 done\nstep2 done\nstep3 done\n");

    shutdown.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_client_surfaces_rejection() {
    let root = TempDir::new().unwrap();
    let config = ServerConfig {
        log_dir: root.path().join("jllogger"),
        token: Some("secret".into()),
        ..ServerConfig::default()
    };
    let (base_url, shutdown, handle) = start(config).await;

    let anonymous = LogClient::new(&base_url, None);
    let err = anonymous
        .send(&LogRequest::new("s", vec!["x".into()]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpError(ref m) if m.contains("401")), "{err}");

    let authed = LogClient::new(&base_url, Some("secret".into()));
    let err = authed
        .send(&LogRequest::new("../escape", vec!["x".into()]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpError(ref m) if m.contains("500")), "{err}");
    assert!(!root.path().join("jllogger").exists());
    assert!(!root.path().join("escape.log").exists());

    authed
        .send(&LogRequest::new("ok", vec!["fine".into()]))
        .await
        .unwrap();
    assert_eq!(
        fs::read_to_string(root.path().join("jllogger/ok.log")).unwrap(),
        "fine\n"
    );

    shutdown.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
