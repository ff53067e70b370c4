//! Integration tests for the full report lifecycle.
//!
//! Exercises the handler stack end-to-end against the in-memory store,
//! stub probes, and the real Stripe webhook verifier with a test secret:
//! start a report, deliver payment events (valid, invalid, duplicated,
//! misrouted), and fetch the full report by token.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use brandfuse::adapters::memory::InMemoryReportStore;
use brandfuse::adapters::stripe::{StripeBillingAdapter, StripeConfig};
use brandfuse::application::handlers::report::{
    BuildPreviewHandler, GetFullReportHandler, GetFullReportQuery, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler, HandlePaymentWebhookResult, StartReportCommand,
    StartReportHandler, StartReportResult,
};
use brandfuse::domain::foundation::ReportId;
use brandfuse::domain::report::{
    DomainCheck, DomainStatus, ReportError, ReportStatus, SocialPlatform, SocialStatus,
    WebsiteStatus,
};
use brandfuse::ports::{
    BillingError, BillingProvider, CheckoutSession, CreateCheckoutRequest,
    DomainAvailabilityProbe, ReportStore, SocialPresenceProbe, WebhookEvent,
    WebsiteReachabilityProbe,
};

const TEST_WEBHOOK_SECRET: &str = "whsec_integration_test";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Domain probe returning one fixed status for every variant.
struct StubDomainProbe {
    status: DomainStatus,
}

#[async_trait]
impl DomainAvailabilityProbe for StubDomainProbe {
    async fn check(&self, domain: &str) -> DomainCheck {
        DomainCheck {
            domain: domain.to_string(),
            status: self.status,
        }
    }
}

struct StubSocialProbe {
    status: SocialStatus,
}

#[async_trait]
impl SocialPresenceProbe for StubSocialProbe {
    async fn check(&self, _platform: SocialPlatform, _brand_name: &str) -> SocialStatus {
        self.status
    }
}

struct StubWebsiteProbe {
    status: WebsiteStatus,
}

#[async_trait]
impl WebsiteReachabilityProbe for StubWebsiteProbe {
    async fn check(&self, _brand_name: &str) -> WebsiteStatus {
        self.status
    }
}

/// Checkout stub; the webhook path goes through the real Stripe adapter.
struct StubCheckout;

#[async_trait]
impl BillingProvider for StubCheckout {
    async fn create_checkout(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, BillingError> {
        Ok(CheckoutSession {
            id: "cs_test_1".to_string(),
            url: format!("https://checkout.test/{}", request.report_id),
        })
    }

    async fn verify_webhook(
        &self,
        _payload: &[u8],
        _signature: Option<&str>,
    ) -> Result<WebhookEvent, BillingError> {
        unimplemented!("webhooks are verified by the Stripe adapter in these tests")
    }
}

struct Fixture {
    store: Arc<InMemoryReportStore>,
    start: StartReportHandler,
    webhook: HandlePaymentWebhookHandler,
    get: GetFullReportHandler,
}

fn fixture_with_probes(
    domain: DomainStatus,
    website: WebsiteStatus,
    social: SocialStatus,
) -> Fixture {
    let store = Arc::new(InMemoryReportStore::new());

    let build_preview = Arc::new(BuildPreviewHandler::new(
        Arc::new(StubDomainProbe { status: domain }),
        Arc::new(StubSocialProbe { status: social }),
        Arc::new(StubWebsiteProbe { status: website }),
        vec![
            ".com".to_string(),
            ".com.br".to_string(),
            ".net".to_string(),
            ".org".to_string(),
        ],
        Duration::from_secs(5),
    ));

    let verifier = Arc::new(StripeBillingAdapter::new(StripeConfig::new(
        "sk_test_key",
        Some(TEST_WEBHOOK_SECRET.to_string()),
    )));

    Fixture {
        store: store.clone(),
        start: StartReportHandler::new(build_preview, store.clone(), Arc::new(StubCheckout)),
        webhook: HandlePaymentWebhookHandler::new(store.clone(), verifier),
        get: GetFullReportHandler::new(store),
    }
}

fn fixture() -> Fixture {
    fixture_with_probes(
        DomainStatus::Available,
        WebsiteStatus::Down,
        SocialStatus::NotFound,
    )
}

fn checkout_completed_payload(report_id: &ReportId) -> Vec<u8> {
    serde_json::json!({
        "id": "evt_test_1",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": "cs_test_1",
                "metadata": {"report_id": report_id.to_string()}
            }
        }
    })
    .to_string()
    .into_bytes()
}

fn sign(payload: &[u8], secret: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(signed_payload.as_bytes());
    let signature: String = mac
        .finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();
    format!("t={},v1={}", timestamp, signature)
}

async fn start_report(fixture: &Fixture, brand_name: &str) -> StartReportResult {
    fixture
        .start
        .handle(StartReportCommand {
            brand_name: brand_name.to_string(),
        })
        .await
        .unwrap()
}

async fn deliver(
    fixture: &Fixture,
    payload: &[u8],
    signature: &str,
) -> Result<HandlePaymentWebhookResult, ReportError> {
    fixture
        .webhook
        .handle(HandlePaymentWebhookCommand {
            payload: payload.to_vec(),
            signature: Some(signature.to_string()),
        })
        .await
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn starting_a_report_creates_a_pending_record_with_full_preview() {
    let fixture = fixture();

    let result = start_report(&fixture, "acme").await;

    assert_eq!(result.report.status(), ReportStatus::Pending);
    assert!(result.report.access_token().is_none());
    assert!(result.report.full_report().is_none());
    assert!(result.checkout_url.contains(&result.report.id().to_string()));

    let preview = result.report.preview_data();
    let domains: Vec<&str> = preview
        .domain_checks
        .iter()
        .map(|c| c.domain.as_str())
        .collect();
    assert_eq!(domains, vec!["acme.com", "acme.com.br", "acme.net", "acme.org"]);
    assert!(preview
        .domain_checks
        .iter()
        .all(|c| c.status == DomainStatus::Available));
    assert_eq!(preview.website, WebsiteStatus::Down);
    for platform in SocialPlatform::ALL {
        assert_eq!(preview.social.get(platform), SocialStatus::NotFound);
    }

    // Persisted, and findable by id.
    let stored = fixture
        .store
        .find_by_id(result.report.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, result.report);
}

#[tokio::test]
async fn a_valid_payment_event_unlocks_the_full_report() {
    let fixture = fixture();
    let started = start_report(&fixture, "acme").await;
    let report_id = *started.report.id();

    let payload = checkout_completed_payload(&report_id);
    let result = deliver(&fixture, &payload, &sign(&payload, TEST_WEBHOOK_SECRET))
        .await
        .unwrap();
    assert_eq!(result, HandlePaymentWebhookResult::ReportUnlocked { report_id });

    let paid = fixture
        .store
        .find_by_id(&report_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(paid.status(), ReportStatus::Paid);
    let token = paid.access_token().unwrap();
    assert!(!token.as_str().is_empty());

    // The token is the retrieval credential.
    let full = fixture
        .get
        .handle(GetFullReportQuery {
            access_token: token.as_str().to_string(),
        })
        .await
        .unwrap();
    assert_eq!(Some(&full), paid.full_report());
    assert_eq!(full.score, 100);
}

#[tokio::test]
async fn duplicate_delivery_leaves_token_and_report_unchanged() {
    let fixture = fixture();
    let started = start_report(&fixture, "acme").await;
    let report_id = *started.report.id();
    let payload = checkout_completed_payload(&report_id);
    let header = sign(&payload, TEST_WEBHOOK_SECRET);

    deliver(&fixture, &payload, &header).await.unwrap();
    let first = fixture
        .store
        .find_by_id(&report_id)
        .await
        .unwrap()
        .unwrap();

    let second_result = deliver(&fixture, &payload, &header).await.unwrap();
    assert_eq!(
        second_result,
        HandlePaymentWebhookResult::AlreadyProcessed { report_id }
    );

    let second = fixture
        .store
        .find_by_id(&report_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.access_token(), second.access_token());
    assert_eq!(first.full_report(), second.full_report());
}

#[tokio::test]
async fn an_invalidly_signed_event_is_rejected_and_the_report_stays_pending() {
    let fixture = fixture();
    let started = start_report(&fixture, "acme").await;
    let report_id = *started.report.id();

    let payload = checkout_completed_payload(&report_id);
    let err = deliver(&fixture, &payload, &sign(&payload, "whsec_wrong_secret"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::InvalidSignature(_)));

    let stored = fixture
        .store
        .find_by_id(&report_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status(), ReportStatus::Pending);
    assert!(stored.access_token().is_none());
}

#[tokio::test]
async fn an_unsigned_event_is_rejected_when_a_secret_is_configured() {
    let fixture = fixture();
    let started = start_report(&fixture, "acme").await;
    let payload = checkout_completed_payload(started.report.id());

    let err = fixture
        .webhook
        .handle(HandlePaymentWebhookCommand {
            payload,
            signature: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::InvalidSignature(_)));
}

#[tokio::test]
async fn an_event_for_an_unknown_report_is_not_found_and_mutates_nothing() {
    let fixture = fixture();
    start_report(&fixture, "acme").await;
    let unknown = ReportId::new();

    let payload = checkout_completed_payload(&unknown);
    let err = deliver(&fixture, &payload, &sign(&payload, TEST_WEBHOOK_SECRET))
        .await
        .unwrap_err();
    assert_eq!(err, ReportError::NotFound(unknown));

    // Still exactly the one PENDING report, untouched.
    assert_eq!(fixture.store.len(), 1);
}

#[tokio::test]
async fn a_pending_report_cannot_be_fetched_even_with_a_guessed_token() {
    let fixture = fixture();
    start_report(&fixture, "acme").await;

    let err = fixture
        .get
        .handle(GetFullReportQuery {
            access_token: "any-guess".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err, ReportError::TokenNotFound);
}

#[tokio::test]
async fn taken_brand_scores_zero_in_the_paid_report() {
    let fixture = fixture_with_probes(
        DomainStatus::Taken,
        WebsiteStatus::Ok,
        SocialStatus::Ok,
    );
    let started = start_report(&fixture, "acme").await;
    let report_id = *started.report.id();

    let payload = checkout_completed_payload(&report_id);
    deliver(&fixture, &payload, &sign(&payload, TEST_WEBHOOK_SECRET))
        .await
        .unwrap();

    let paid = fixture
        .store
        .find_by_id(&report_id)
        .await
        .unwrap()
        .unwrap();
    let full = paid.full_report().unwrap();
    assert_eq!(full.score, 0);
    assert_eq!(
        full.advanced_checks,
        vec!["Trademark check", "Auction analysis", "Domain history"]
    );
}
