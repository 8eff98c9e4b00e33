//! TC036: three files of different types pushed through the upload control
//! must each become visible.

use crate::backend::Backend;
use crate::error::FlowError;
use crate::flow::InboundFlow;
use crate::selectors::{self, xpath};
use inbound_common::outcome::{CaseId, Outcome};
use inbound_common::upload::UploadVerdict;
use tracing::{error, info};

pub async fn run<B: Backend>(flow: &mut InboundFlow<'_, B>) -> Result<Outcome, FlowError> {
    let data = &flow.config().tc036;

    flow.enter_text(
        &xpath(selectors::EXTERNAL_PO_NUMBER),
        &data.external_po_number,
        "External PO Number",
    )
    .await?;
    flow.enter_text(&xpath(selectors::SUPPLIER_NAME), &data.supplier_name, "Supplier Name")
        .await?;
    flow.enter_text(&xpath(selectors::BOL_AWR_NUMBER), &data.bol_awr_number, "BOL/AWR Number")
        .await?;
    flow.enter_date(&xpath(selectors::DELIVERY_DATE), &data.delivery_date, "Delivery Date")
        .await;
    flow.screenshot("tc036_01_form_filled").await;

    let created = flow.create_upload_files(&data.files).await;
    if created.is_empty() {
        error!(case = "TC036", "No test files were created");
        return Err(FlowError::Assertion("Failed to create any test files".to_string()));
    }

    let files_sent = flow.upload_files(&created).await;
    flow.screenshot("tc036_02_files_uploaded").await;

    let elements = flow.find_uploaded_elements().await;
    let displayed = flow.element_texts(&elements).await;
    let detection = flow.detect_in_page(&data.files).await;
    flow.screenshot("tc036_03_files_displayed").await;

    let verdict = UploadVerdict {
        files_created: created.len(),
        files_sent,
        ui_elements: elements.len(),
        displayed,
        detection,
    };
    for file in &verdict.detection.files {
        info!(case = "TC036", file = %file.name, detected = file.found, "File detection");
    }
    info!(
        case = "TC036",
        files_sent = verdict.files_sent,
        ui_elements = verdict.ui_elements,
        "Upload result"
    );

    let details = serde_json::to_value(&verdict).unwrap_or_default();
    let outcome = if verdict.passed() {
        Outcome::pass(CaseId::Tc036, "Multiple file upload is working")
    } else {
        error!(case = "TC036", "Uploads accepted by the input but not shown in the UI");
        Outcome::fail(CaseId::Tc036, verdict.failure_message())
    };
    Ok(outcome.with_details(details))
}
