use busconf::probe::{CancelToken, PortProbe, ProbeOutcome, RetryPolicy};
use busconf::tooling::cli::Commands;
use busconf::types::Mode;
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use super::support::{analytics_secrets, analytics_values, context};

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn probe_waits_for_a_late_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let server = thread::spawn(move || {
        thread::sleep(Duration::from_millis(150));
        let listener = TcpListener::bind(("127.0.0.1", port)).unwrap();
        let _ = listener.accept();
    });

    let policy = RetryPolicy::default()
        .with_max_attempts(100)
        .with_interval(Duration::from_millis(20));
    let outcome = PortProbe::new(policy).wait_until_reachable("127.0.0.1", port, &CancelToken::new());
    server.join().unwrap();

    match outcome {
        ProbeOutcome::Reachable { attempts } => assert!(attempts > 1),
        other => panic!("Expected reachable, got {:?}", other),
    }
}

#[test]
fn probe_cancellation_returns_before_budget() {
    let policy = RetryPolicy::default().with_interval(Duration::from_millis(100));
    let probe = PortProbe::new(policy);
    let cancel = CancelToken::new();
    let trigger = cancel.clone();

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(250));
        trigger.cancel();
    });

    let started = Instant::now();
    let outcome = probe.wait_until_reachable("127.0.0.1", closed_port(), &cancel);
    canceller.join().unwrap();

    assert!(matches!(outcome, ProbeOutcome::Cancelled { .. }));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn probe_command_reports_reachable_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let cli = context(analytics_values(), analytics_secrets(), Mode::Development);

    let output = cli
        .execute(&Commands::Probe {
            host: "127.0.0.1".to_string(),
            port,
            attempts: Some(3),
            interval_ms: Some(1),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["outcome"], "reachable");
    assert_eq!(parsed["reachable"], true);
    assert_eq!(parsed["attempts"], 1);
}

#[test]
fn probe_command_reports_unreachable_port() {
    let cli = context(analytics_values(), analytics_secrets(), Mode::Development);
    let output = cli
        .execute(&Commands::Probe {
            host: "127.0.0.1".to_string(),
            port: closed_port(),
            attempts: Some(3),
            interval_ms: Some(1),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["outcome"], "unreachable");
    assert_eq!(parsed["reachable"], false);
    assert_eq!(parsed["attempts"], 3);
}
