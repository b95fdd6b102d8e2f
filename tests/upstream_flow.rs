//! End-to-end lookups through the real HTTP fetcher.

use std::time::{Duration, Instant};
use stat_server::command::FailKind;
use stat_server::config::FetchMode;
use stat_server::upstream::codec::user_fragment;
use stat_server::upstream::PLACEHOLDER_FRAGMENT;
use stat_server::Outcome;

mod common;

use common::{open, payload_text};

#[tokio::test]
async fn test_batch_flow() {
    let (upstream, log) = common::start_stat_upstream().await;
    let interp = common::interpreter(&common::config_for(upstream, FetchMode::Batch));

    open(&interp, "@SET_USERS alpha,bravo").await;
    let bytes = open(&interp, "@GET_USERS").await.ok().unwrap();

    assert_eq!(
        payload_text(&bytes),
        format!(
            "<users>{}{}</users>",
            user_fragment("ALPHA", 10, "50"),
            user_fragment("BRAVO", 10, "50")
        )
    );
    assert_eq!(log.paths(), vec!["ALPHA,BRAVO"]);

    open(&interp, "@ADD_USERS charlie").await;
    open(&interp, "@GET_LAST_STAT").await;
    assert_eq!(log.paths(), vec!["ALPHA,BRAVO", "CHARLIE"]);
}

#[tokio::test]
async fn test_single_flow() {
    let (upstream, log) = common::start_stat_upstream().await;
    let interp = common::interpreter(&common::config_for(upstream, FetchMode::Single));

    let first = open(&interp, "alpha.xml").await.ok().unwrap();
    let second = open(&interp, "Alpha.XML").await.ok().unwrap();

    assert_eq!(first, second);
    assert_eq!(
        payload_text(&first),
        r#"<user nick="ALPHA" battles="5" wins="60"/>"#
    );
    assert_eq!(log.paths(), vec!["ALPHA.xml"]);
}

#[tokio::test]
async fn test_upstream_error_is_negatively_cached() {
    let (upstream, log) =
        common::start_programmable_upstream(|_| async { (500, "boom".to_string()) }).await;
    let interp = common::interpreter(&common::config_for(upstream, FetchMode::Single));

    for _ in 0..3 {
        let bytes = open(&interp, "alpha.xml").await.ok().unwrap();
        assert_eq!(payload_text(&bytes), PLACEHOLDER_FRAGMENT);
    }
    assert_eq!(log.count(), 1);
}

#[tokio::test]
async fn test_timeout_is_a_fetch_failure() {
    let (upstream, _) = common::start_programmable_upstream(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, "1-1".to_string())
    })
    .await;
    let mut config = common::config_for(upstream, FetchMode::Batch);
    config.settings.timeout_ms = 200;
    let interp = common::interpreter(&config);

    let started = Instant::now();
    let bytes = open(&interp, "alpha.xml").await.ok().unwrap();

    assert_eq!(payload_text(&bytes), PLACEHOLDER_FRAGMENT);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_batch_count_mismatch_yields_placeholders() {
    let (upstream, _) =
        common::start_programmable_upstream(|_| async { (200, "1-1".to_string()) }).await;
    let interp = common::interpreter(&common::config_for(upstream, FetchMode::Batch));

    open(&interp, "@SET_USERS alpha,bravo").await;
    let bytes = open(&interp, "@GET_USERS").await.ok().unwrap();

    assert_eq!(
        payload_text(&bytes),
        format!("<users>{0}{0}</users>", PLACEHOLDER_FRAGMENT)
    );
}

#[tokio::test]
async fn test_unreachable_upstream_opens_circuit() {
    let upstream = common::closed_port().await;
    let interp = common::interpreter(&common::config_for(upstream, FetchMode::Single));

    assert!(open(&interp, "alpha.xml").await.ok().is_some());
    assert!(open(&interp, "bravo.xml").await.ok().is_some());
    assert_eq!(
        open(&interp, "charlie.xml").await,
        Outcome::Fail(FailKind::Unavailable)
    );

    // Cached placeholders keep being served while open.
    let bytes = open(&interp, "alpha.xml").await.ok().unwrap();
    assert_eq!(payload_text(&bytes), PLACEHOLDER_FRAGMENT);
}

#[tokio::test]
async fn test_comma_in_member_name_is_ignored() {
    let (upstream, log) = common::start_stat_upstream().await;
    let interp = common::interpreter(&common::config_for(upstream, FetchMode::Batch));

    assert_eq!(open(&interp, "x,y.xml").await, Outcome::Skip);
    assert_eq!(open(&interp, "p,q.xml").await, Outcome::Skip);

    let bytes = open(&interp, "alpha.xml").await.ok().unwrap();
    assert_eq!(payload_text(&bytes), user_fragment("ALPHA", 10, "50"));
    assert_eq!(log.paths(), vec!["ALPHA"]);
}
