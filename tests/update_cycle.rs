//! Full check-and-update cycles against mock IP-echo and Route 53 servers.

use std::net::IpAddr;
use std::path::Path;

use async_trait::async_trait;
use log::LevelFilter;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use route53_ddns::config::Config;
use route53_ddns::error::{Error, Result};
use route53_ddns::fetcher::HttpFetcher;
use route53_ddns::logger::FileLogger;
use route53_ddns::provider::route53::{Credentials, Route53};
use route53_ddns::resolver::Resolver;
use route53_ddns::syncer::{self, SyncOutcome, Syncer};

const CHANGE_INFO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ChangeResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
    <ChangeInfo>
        <Id>/change/C3QYC83OA0KX5K</Id>
        <Status>PENDING</Status>
        <SubmittedAt>2024-05-06T07:08:09.000Z</SubmittedAt>
    </ChangeInfo>
</ChangeResourceRecordSetsResponse>"#;

struct FixedResolver(Vec<IpAddr>);

#[async_trait]
impl Resolver for FixedResolver {
    async fn lookup(&self, _name: &str) -> Result<Vec<IpAddr>> {
        Ok(self.0.clone())
    }
}

fn config(ip_echo: &MockServer) -> Config {
    Config {
        aws_access_key_id: "AKIATEST".into(),
        aws_secret_access_key: "testsecret".into(),
        hosted_zone_id: "/hostedzone/Z0123456789".into(),
        fqdn: "home.example.com".into(),
        ip_echo_url: format!("{}/", ip_echo.uri()),
        ..Default::default()
    }
}

async fn mount_ip_echo(server: &MockServer, ip: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(r#"{{"ip":"{}"}}"#, ip)))
        .expect(1)
        .mount(server)
        .await;
}

async fn run_cycle(
    cfg: &Config,
    route53: &MockServer,
    bound: &[&str],
    log_path: &Path,
) -> Result<SyncOutcome> {
    log::set_max_level(LevelFilter::Trace);
    let logger = FileLogger::open(log_path, LevelFilter::Debug)?;
    let credentials = Credentials {
        access_key_id: cfg.aws_access_key_id.clone(),
        secret_access_key: cfg.aws_secret_access_key.clone(),
    };
    let provider = Route53::with_endpoint(credentials, &cfg.hosted_zone_id, &route53.uri())?;
    let resolver = FixedResolver(bound.iter().map(|a| a.parse().unwrap()).collect());

    let syncer = Syncer::new(
        cfg,
        Box::new(HttpFetcher::new(&cfg.ip_echo_url)?),
        Box::new(resolver),
        Box::new(provider),
        &logger,
    );
    syncer.sync().await
}

#[tokio::test]
async fn test_out_of_date_record_is_upserted() {
    let ip_echo = MockServer::start().await;
    let route53 = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("route53.log");

    mount_ip_echo(&ip_echo, "203.0.113.9").await;
    Mock::given(method("POST"))
        .and(path("/2013-04-01/hostedzone/Z0123456789/rrset/"))
        .and(body_string_contains("<Action>UPSERT</Action>"))
        .and(body_string_contains("<Value>203.0.113.9</Value>"))
        .and(body_string_contains("<TTL>300</TTL>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHANGE_INFO))
        .expect(1)
        .mount(&route53)
        .await;

    let outcome = run_cycle(&config(&ip_echo), &route53, &["203.0.113.5"], &log_path)
        .await
        .unwrap();

    match outcome {
        SyncOutcome::Updated(info) => assert_eq!(info.id, "/change/C3QYC83OA0KX5K"),
        SyncOutcome::UpToDate => panic!("record should have been updated"),
    }

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("DEBUG:\tCurrent WAN IP is '203.0.113.9'"));
    assert!(log.contains(
        "INFO:\t'home.example.com' out of date, update '203.0.113.5' to '203.0.113.9'"
    ));
}

#[tokio::test]
async fn test_up_to_date_record_is_left_alone() {
    let ip_echo = MockServer::start().await;
    let route53 = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("route53.log");

    mount_ip_echo(&ip_echo, "203.0.113.9").await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHANGE_INFO))
        .expect(0)
        .mount(&route53)
        .await;

    let outcome = run_cycle(&config(&ip_echo), &route53, &["203.0.113.9"], &log_path)
        .await
        .unwrap();
    assert_eq!(outcome, SyncOutcome::UpToDate);

    let log = std::fs::read_to_string(&log_path).unwrap();
    let up_to_date: Vec<&str> = log.lines().filter(|l| l.contains("up to date")).collect();
    assert_eq!(up_to_date.len(), 1);
    assert!(up_to_date[0].ends_with("INFO:\t'home.example.com' is up to date"));
}

#[tokio::test]
async fn test_missing_record_is_created() {
    let ip_echo = MockServer::start().await;
    let route53 = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_ip_echo(&ip_echo, "203.0.113.9").await;
    Mock::given(method("POST"))
        .and(body_string_contains("<Value>203.0.113.9</Value>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHANGE_INFO))
        .expect(1)
        .mount(&route53)
        .await;

    let outcome = run_cycle(&config(&ip_echo), &route53, &[], &dir.path().join("route53.log"))
        .await
        .unwrap();
    assert!(matches!(outcome, SyncOutcome::Updated(_)));
}

#[tokio::test]
async fn test_undecodable_ip_echo_issues_no_update() {
    let ip_echo = MockServer::start().await;
    let route53 = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"origin":"203.0.113.9"}"#))
        .mount(&ip_echo)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHANGE_INFO))
        .expect(0)
        .mount(&route53)
        .await;

    let err = run_cycle(&config(&ip_echo), &route53, &["203.0.113.5"], &dir.path().join("route53.log"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DecodeError(_)));
    assert_eq!(err.exit_code(), std::process::ExitCode::from(4));
}

#[tokio::test]
async fn test_absent_config_fails_before_network() {
    let dir = tempfile::tempdir().unwrap();
    let logger = FileLogger::open(dir.path().join("route53.log"), LevelFilter::Info).unwrap();

    let err = syncer::run(&dir.path().join("config.json"), &logger)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
    assert_eq!(err.exit_code(), std::process::ExitCode::from(2));
}

#[tokio::test]
async fn test_unavailable_ip_echo_is_network_error() {
    let ip_echo = MockServer::start().await;
    let route53 = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&ip_echo)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHANGE_INFO))
        .expect(0)
        .mount(&route53)
        .await;

    let err = run_cycle(&config(&ip_echo), &route53, &["203.0.113.5"], &dir.path().join("route53.log"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NetworkError(_)));
    assert_eq!(err.exit_code(), std::process::ExitCode::from(3));
}

#[tokio::test]
async fn test_rejected_change_is_update_error() {
    let ip_echo = MockServer::start().await;
    let route53 = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("route53.log");

    mount_ip_echo(&ip_echo, "203.0.113.9").await;
    Mock::given(method("POST"))
        .and(path("/2013-04-01/hostedzone/Z0123456789/rrset/"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"<?xml version="1.0"?>
<ErrorResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
    <Error>
        <Type>Sender</Type>
        <Code>InvalidChangeBatch</Code>
        <Message>RRSet of type A with DNS name home.example.com. is not permitted in zone example.org.</Message>
    </Error>
    <RequestId>b25f48e8-84fd-11e6-80d9-574e0c4664cb</RequestId>
</ErrorResponse>"#,
        ))
        .expect(1)
        .mount(&route53)
        .await;

    let err = run_cycle(&config(&ip_echo), &route53, &["203.0.113.5"], &log_path)
        .await
        .unwrap_err();
    assert!(matches!(&err, Error::UpdateError(msg) if msg.contains("InvalidChangeBatch")));
    assert_eq!(err.exit_code(), std::process::ExitCode::from(5));

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("INFO:\t'home.example.com' out of date"));
}
