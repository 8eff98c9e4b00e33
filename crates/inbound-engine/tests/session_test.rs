mod support;

use inbound_engine::artifacts::Artifacts;
use inbound_engine::error::FlowError;
use inbound_engine::flow::InboundFlow;
use inbound_engine::selectors;
use support::{BASE_URL, Effect, MockElement, fast_config, init_tracing, receipt_app, receipt_form};
use tempfile::TempDir;

#[tokio::test]
async fn test_bootstrap_reaches_po_form() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let mut artifacts = Artifacts::new(&config.artifacts);
    artifacts.prepare().await.unwrap();
    let (mut backend, page) = receipt_app();
    backend.launched = true;

    let mut flow = InboundFlow::new(&mut backend, &config, &mut artifacts);
    flow.bootstrap().await.unwrap();

    assert_eq!(
        backend.visited,
        vec![
            format!("{}/login", BASE_URL),
            format!("{}/inventory/inbound", BASE_URL),
        ]
    );
    assert_eq!(backend.element(page.username).value, "testing@example.com");
    assert_eq!(backend.element(page.password).value, "password123");
    assert_eq!(backend.element(page.new_receipt).clicks, 1);
    assert_eq!(backend.element(page.po_option).clicks, 1);
    assert!(backend.element(page.po_number).attached);
    assert!(artifacts.take_screenshots().is_empty());
}

#[tokio::test]
async fn test_login_failure_captures_screenshot() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let mut artifacts = Artifacts::new(&config.artifacts);
    artifacts.prepare().await.unwrap();
    let (mut backend, page) = receipt_app();
    backend.launched = true;
    // Credentials rejected: the login page never goes away.
    backend.element_mut(page.login).on_click.clear();

    let mut flow = InboundFlow::new(&mut backend, &config, &mut artifacts);
    let err = flow.bootstrap().await.unwrap_err();

    assert!(matches!(err, FlowError::Setup { step: "login", .. }));
    assert!(err.to_string().contains("navigation away from login"));
    let shots = artifacts.take_screenshots();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].tag, "error_login");
    assert!(shots[0].path.exists());
}

#[tokio::test]
async fn test_inbound_failure_captures_screenshot() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let mut artifacts = Artifacts::new(&config.artifacts);
    artifacts.prepare().await.unwrap();
    let (mut backend, page) = receipt_app();
    backend.launched = true;
    backend.element_mut(page.new_receipt).attached = false;

    let mut flow = InboundFlow::new(&mut backend, &config, &mut artifacts);
    let err = flow.bootstrap().await.unwrap_err();

    assert!(matches!(err, FlowError::Setup { step: "inbound navigation", .. }));
    let tags: Vec<_> = artifacts.take_screenshots().into_iter().map(|s| s.tag).collect();
    assert_eq!(tags, vec!["error_navigation"]);
}

#[tokio::test]
async fn test_new_receipt_recovers_from_stale_clicks() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let mut artifacts = Artifacts::new(&config.artifacts);
    let (mut backend, page) = receipt_form();
    backend.element_mut(page.new_receipt).stale_clicks = config.retries.new_receipt_attempts - 1;

    let mut flow = InboundFlow::new(&mut backend, &config, &mut artifacts);
    flow.click_new_receipt().await.unwrap();

    assert_eq!(backend.element(page.new_receipt).clicks, 1);
}

#[tokio::test]
async fn test_new_receipt_stale_retries_exhausted() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let mut artifacts = Artifacts::new(&config.artifacts);
    let (mut backend, page) = receipt_form();
    backend.element_mut(page.new_receipt).stale_clicks = 10;

    let mut flow = InboundFlow::new(&mut backend, &config, &mut artifacts);
    let err = flow.click_new_receipt().await.unwrap_err();

    match err {
        FlowError::StaleRetriesExhausted { target, attempts } => {
            assert_eq!(target, "New Unplanned Receipt");
            assert_eq!(attempts, config.retries.new_receipt_attempts);
        }
        other => panic!("Expected StaleRetriesExhausted, got {:?}", other),
    }
    assert_eq!(backend.element(page.new_receipt).stale_clicks, 10 - config.retries.new_receipt_attempts);
}

#[tokio::test]
async fn test_new_receipt_missing_button_is_setup_error() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let mut artifacts = Artifacts::new(&config.artifacts);
    artifacts.prepare().await.unwrap();
    let (mut backend, page) = receipt_form();
    backend.element_mut(page.new_receipt).displayed = false;

    let mut flow = InboundFlow::new(&mut backend, &config, &mut artifacts);
    let err = flow.click_new_receipt().await.unwrap_err();

    assert!(matches!(err, FlowError::Setup { step: "new unplanned receipt", .. }));
    assert_eq!(artifacts.take_screenshots()[0].tag, "error_new_receipt");
}

#[tokio::test]
async fn test_select_external_po_falls_through_strategies() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let mut artifacts = Artifacts::new(&config.artifacts);
    let (mut backend, page) = receipt_app();
    backend.launched = true;
    // The first strategy matches a decoy label that opens nothing.
    backend.element_mut(page.po_option).matches.clear();
    let decoy = backend.add(MockElement::matching(selectors::EXTERNAL_PO_OPTIONS[0]));
    let real = backend.add(
        MockElement::matching(selectors::EXTERNAL_PO_OPTIONS[3])
            .on_click(Effect::Attach(page.po_number)),
    );

    let mut flow = InboundFlow::new(&mut backend, &config, &mut artifacts);
    assert!(flow.select_external_po().await);

    assert_eq!(backend.element(decoy).clicks, 1);
    assert_eq!(backend.element(real).clicks, 1);
    assert!(backend.element(page.po_number).attached);
}

#[tokio::test]
async fn test_select_external_po_exhausts_strategies() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let mut artifacts = Artifacts::new(&config.artifacts);
    artifacts.prepare().await.unwrap();
    let (mut backend, page) = receipt_app();
    backend.launched = true;
    backend.element_mut(page.po_option).attached = false;

    let mut flow = InboundFlow::new(&mut backend, &config, &mut artifacts);
    assert!(!flow.select_external_po().await);

    let tags: Vec<_> = artifacts.take_screenshots().into_iter().map(|s| s.tag).collect();
    assert_eq!(tags, vec!["error_external_po"]);
}

#[tokio::test]
async fn test_bootstrap_stops_without_external_po() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let mut artifacts = Artifacts::new(&config.artifacts);
    artifacts.prepare().await.unwrap();
    let (mut backend, page) = receipt_app();
    backend.launched = true;
    backend.element_mut(page.po_option).on_click.clear();

    let mut flow = InboundFlow::new(&mut backend, &config, &mut artifacts);
    let err = flow.bootstrap().await.unwrap_err();

    assert!(err.to_string().contains("Test cannot proceed"));
    // The option is clickable but never opens the form, so the last strategy
    // misses too.
    let tags: Vec<_> = artifacts.take_screenshots().into_iter().map(|s| s.tag).collect();
    assert_eq!(tags, vec!["error_external_po", "fatal_external_po_not_found"]);
}

#[tokio::test]
async fn test_screenshot_failure_does_not_mask_error() {
    let dir = TempDir::new().unwrap();
    let config = fast_config(dir.path());
    let mut artifacts = Artifacts::new(&config.artifacts);
    artifacts.prepare().await.unwrap();
    let (mut backend, page) = receipt_app();
    backend.launched = true;
    backend.fail_screenshot = true;
    backend.element_mut(page.login).on_click.clear();

    let mut flow = InboundFlow::new(&mut backend, &config, &mut artifacts);
    let err = flow.login().await.unwrap_err();

    assert!(matches!(err, FlowError::Setup { step: "login", .. }));
    assert!(artifacts.take_screenshots().is_empty());
}
