use std::sync::Arc;

use listing_forge::clients::mock::{MockProvider, MockSheetStore};
use listing_forge::clients::ClientError;
use listing_forge::error::{format_error, ContentError};
use listing_forge::generator::GenerationSettings;
use listing_forge::lifecycle::ContentService;
use listing_forge::model::{BatchEntry, BatchRequest, ContentKind, OverallStatus, ProductRecord};
use listing_forge::orchestrator::FailurePolicy;
use listing_forge::sheets::OUTPUT_HEADER;

const SHEET: &str = "sheet-1";
const INPUT: &str = "Products!A1:G";
const OUTPUT: &str = "Content!A1";

fn products_sheet() -> MockSheetStore {
    MockSheetStore::new().with_rows(
        SHEET,
        INPUT,
        &[
            &["SKU", "Name", "Category", "Features", "Price", "Audience", "Use Case"],
            &["LMP-1", "Arc Desk Lamp", "Home Office", "Dimmable, USB-C", "49.90", "Remote workers", "Late-night focus"],
            &["", "", "Kitchen"],
            &["MUG-7", "Camp Mug", "Outdoors", "", "abc"],
            &["BTL-2", "Trail Bottle", "Outdoors", "Insulated", "", "Hikers"],
        ],
    )
}

fn service(provider: &MockProvider, store: &MockSheetStore) -> ContentService {
    ContentService::new(Arc::new(provider.clone()), GenerationSettings::default())
        .with_sheet_store(Arc::new(store.clone()))
}

/// Single product, all kinds generated, wire shape as returned to callers.
#[tokio::test]
async fn test_single_product_end_to_end() {
    let provider = MockProvider::new();
    provider.on_kind(ContentKind::Title).return_ok("Arc Desk Lamp - Dimmable USB-C Light");
    provider.on_any().return_ok("Generated copy");

    let service = ContentService::new(Arc::new(provider.clone()), GenerationSettings::default());
    let record = ProductRecord::new("Arc Desk Lamp", "Home Office")
        .with_sku("LMP-1")
        .with_features("Dimmable, USB-C")
        .with_price(49.9);

    let result = service.generate_content_for_product(&record).await.unwrap();
    assert_eq!(result.status(), OverallStatus::Success);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["productName"], "Arc Desk Lamp");
    assert_eq!(json["sku"], "LMP-1");
    assert_eq!(json["title"], "Arc Desk Lamp - Dimmable USB-C Light");
    assert_eq!(json["adCopy"], "Generated copy");
    assert_eq!(json["status"], "success");
    assert_eq!(json["errors"], serde_json::json!([]));

    let requests = provider.calls();
    assert_eq!(requests.len(), 4);
    assert!(requests
        .iter()
        .all(|request| request.user_prompt.contains("$49.90") && request.max_tokens == 1000));
    provider.verify();
}

#[tokio::test]
async fn test_invalid_product_reports_every_violation() {
    let provider = MockProvider::always("copy");
    let service = ContentService::new(Arc::new(provider.clone()), GenerationSettings::default());

    let record: ProductRecord =
        serde_json::from_str(r#"{"name": "  ", "price": -3, "features": ["a", "b"]}"#).unwrap();
    let err = service.generate_content_for_product(&record).await.unwrap_err();

    let response = format_error(&err);
    assert_eq!(response.code, "VALIDATION_ERROR");
    assert_eq!(response.status, 400);
    for violation in ["name is required", "category is required", "price", "features"] {
        assert!(response.message.contains(violation), "missing '{violation}'");
    }
    assert_eq!(provider.call_count(), 0);
}

/// N+1 rows in, N entries out, header plus N rows written back.
#[tokio::test]
async fn test_batch_end_to_end() {
    let provider = MockProvider::always("copy");
    let store = products_sheet();

    let report = service(&provider, &store)
        .process_product_batch(&BatchRequest::new(SHEET, INPUT, OUTPUT))
        .await
        .unwrap();

    assert_eq!(report.processed_count, 4);
    assert_eq!(report.results.len(), 4);
    let names: Vec<_> = report.results.iter().map(BatchEntry::product_name).collect();
    assert_eq!(names, vec!["Arc Desk Lamp", "Unknown", "Camp Mug", "Trail Bottle"]);
    let rejected: Vec<_> = report.results.iter().map(BatchEntry::is_rejected).collect();
    assert_eq!(rejected, vec![false, true, true, false]);

    // two valid rows, four kinds each
    assert_eq!(provider.call_count(), 8);

    let written = store.rows(SHEET, OUTPUT).unwrap();
    assert_eq!(written.len(), 5);
    assert_eq!(written[0], OUTPUT_HEADER.to_vec());
    assert_eq!(written[1][0], "LMP-1");
    assert_eq!(written[1][2], "copy");
    assert_eq!(written[1][6], "success");
    assert_eq!(written[3][6], "error");
    assert!(written[3][7].contains("price"));
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_batch_report_wire_shape() {
    let provider = MockProvider::always("copy");
    let store = products_sheet();

    let report = service(&provider, &store)
        .process_product_batch(&BatchRequest::new(SHEET, INPUT, OUTPUT))
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["processedCount"], 4);
    assert_eq!(json["results"][0]["status"], "success");
    assert_eq!(json["results"][1]["status"], "error");
    assert_eq!(json["results"][1]["row"], 2);
    assert_eq!(json["results"][1]["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["results"][1]["error"]["message"], "name is required");
    assert!(json["results"][1]["error"].get("field").is_none());
}

#[tokio::test]
async fn test_failed_kind_does_not_fail_the_row() {
    let provider = MockProvider::new();
    provider
        .on_kind(ContentKind::APlusContent)
        .return_err(ClientError::with_status(500, "The server had an error"));
    provider.on_any().return_ok("copy");
    let store = products_sheet();

    let report = service(&provider, &store)
        .process_product_batch(&BatchRequest::new(SHEET, INPUT, OUTPUT))
        .await
        .unwrap();

    match &report.results[0] {
        BatchEntry::Generated(result) => {
            assert_eq!(result.status(), OverallStatus::PartialSuccess);
            assert_eq!(result.content(ContentKind::APlusContent), None);
            assert_eq!(result.content(ContentKind::AdCopy), Some("copy"));
        }
        other => panic!("Expected generated entry, got {other:?}"),
    }

    let written = store.rows(SHEET, OUTPUT).unwrap();
    assert_eq!(written[1][4], "");
    assert_eq!(written[1][6], "partial_success");
    assert_eq!(written[1][7], "aPlusContent: The server had an error");
}

#[tokio::test]
async fn test_header_only_sheet_writes_header() {
    let provider = MockProvider::always("copy");
    let store = MockSheetStore::new().with_rows(SHEET, INPUT, &[&["SKU", "Name", "Category"]]);

    let report = service(&provider, &store)
        .process_product_batch(&BatchRequest::new(SHEET, INPUT, OUTPUT))
        .await
        .unwrap();

    assert_eq!(report.processed_count, 0);
    assert_eq!(store.rows(SHEET, OUTPUT).unwrap().len(), 1);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_quota_refusals_are_written_per_kind() {
    let provider = MockProvider::new();
    provider
        .on_any()
        .return_err(ClientError::with_status(429, "You exceeded your current quota"));
    let store = products_sheet();

    let report = service(&provider, &store)
        .process_product_batch(&BatchRequest::new(SHEET, INPUT, OUTPUT))
        .await
        .unwrap();

    assert_eq!(report.processed_count, 4);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["results"][0]["status"], "partial_success");
    assert_eq!(json["results"][0]["errors"][0]["code"], "QUOTA_EXCEEDED");

    let written = store.rows(SHEET, OUTPUT).unwrap();
    assert_eq!(written.len(), 5);
    assert!(written[1][7].starts_with("title: [QUOTA_EXCEEDED] You exceeded your current quota"));
}

#[tokio::test]
async fn test_auth_error_aborts_batch_without_writing() {
    let provider = MockProvider::new();
    provider
        .on_any()
        .return_err(ClientError::with_status(401, "Incorrect API key provided"));
    let store = products_sheet();

    let err = service(&provider, &store)
        .process_product_batch(&BatchRequest::new(SHEET, INPUT, OUTPUT))
        .await
        .unwrap_err();

    assert_eq!(err, ContentError::Auth("Incorrect API key provided".into()));
    assert_eq!(format_error(&err).status, 401);
    assert_eq!(store.rows(SHEET, OUTPUT), None);
}

#[tokio::test]
async fn test_wrong_typed_product_fields_are_all_reported() {
    let provider = MockProvider::always("copy");
    let service = ContentService::new(Arc::new(provider.clone()), GenerationSettings::default());

    let record: ProductRecord =
        serde_json::from_str(r#"{"name": 42, "category": "", "price": -1}"#).unwrap();
    let err = service.generate_content_for_product(&record).await.unwrap_err();

    assert_eq!(
        format_error(&err).message,
        "name must be text; category is required; price must be a non-negative number"
    );
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_abort_policy_stops_at_first_rejected_row() {
    let provider = MockProvider::always("copy");
    let store = products_sheet();

    let err = service(&provider, &store)
        .with_failure_policy(FailurePolicy::AbortOnFirstError)
        .process_product_batch(&BatchRequest::new(SHEET, INPUT, OUTPUT))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(provider.call_count(), 4, "only the first row was generated");
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_missing_batch_fields_are_validation_errors() {
    let provider = MockProvider::always("copy");
    let store = products_sheet();
    let service = service(&provider, &store);

    let request = BatchRequest {
        output_range: Some(OUTPUT.into()),
        ..Default::default()
    };
    let err = service.process_product_batch(&request).await.unwrap_err();

    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(err.field(), Some("sourceId"));
    assert_eq!(store.read_count(), 0);
}

#[tokio::test]
async fn test_store_read_failure_is_reported() {
    let provider = MockProvider::always("copy");
    let store = products_sheet();
    store.fail_reads(ClientError::with_status(404, "Requested entity was not found."));

    let err = service(&provider, &store)
        .process_product_batch(&BatchRequest::new(SHEET, INPUT, OUTPUT))
        .await
        .unwrap_err();

    let response = format_error(&err);
    assert_eq!(response.code, "STORE_ERROR");
    assert_eq!(
        response.message,
        "Spreadsheet operation failed: Requested entity was not found."
    );
    assert_eq!(provider.call_count(), 0);
}
