//! TC004: submitting with an empty External PO Number must surface a
//! validation signal instead of silently moving on.

use crate::backend::Backend;
use crate::error::FlowError;
use crate::flow::InboundFlow;
use crate::selectors::{self, xpath};
use inbound_common::outcome::{CaseId, Outcome};
use inbound_common::validation::ValidationVerdict;
use tracing::{error, info, warn};

pub async fn run<B: Backend>(flow: &mut InboundFlow<'_, B>) -> Result<Outcome, FlowError> {
    let data = &flow.config().tc004;
    let po_number = xpath(selectors::EXTERNAL_PO_NUMBER);
    info!(
        case = "TC004",
        supplier = %data.supplier_name,
        bol = %data.bol_awr_number,
        date = %data.delivery_date,
        "External PO Number left empty"
    );

    flow.clear_field(&po_number, "External PO Number").await;
    flow.enter_text(&xpath(selectors::SUPPLIER_NAME), &data.supplier_name, "Supplier Name")
        .await?;
    flow.enter_text(&xpath(selectors::BOL_AWR_NUMBER), &data.bol_awr_number, "BOL/AWR Number")
        .await?;
    flow.enter_date(&xpath(selectors::DELIVERY_DATE), &data.delivery_date, "Delivery Date")
        .await;
    flow.screenshot("tc004_01_form_with_empty_po").await;

    if let Err(e) = flow.submit_next().await {
        error!(case = "TC004", "Failed to click Next button: {}", e);
        flow.screenshot("tc004_02_error_next").await;
        return Err(FlowError::Assertion(format!("Next button not clickable: {}", e)));
    }
    flow.await_validation_feedback().await;
    flow.screenshot("tc004_02_after_next_click").await;

    let errors = flow.collect_validation_errors().await;
    let field_state = flow.field_error_state(&po_number).await;
    flow.screenshot("tc004_03_validation_error").await;
    let current_url = flow.safe_current_url().await;

    let verdict = ValidationVerdict::new(field_state, errors, current_url);
    for (i, message) in verdict.errors.iter().enumerate() {
        info!(case = "TC004", index = i + 1, "Validation error: {}", message);
    }
    if let Some(related) = &verdict.related_error {
        info!(case = "TC004", "Found External PO related error: {}", related);
    }
    if !verdict.field_state.any() {
        warn!(case = "TC004", "No error state on External PO Number field");
    }
    info!(
        case = "TC004",
        field_error = verdict.field_state.any(),
        related_error = verdict.related_error.is_some(),
        total_errors = verdict.errors.len(),
        url = %verdict.current_url,
        still_on_form = verdict.still_on_form,
        "Validation result"
    );

    let details = serde_json::to_value(&verdict).unwrap_or_default();
    let outcome = if verdict.passed() {
        Outcome::pass(CaseId::Tc004, "External PO Number validation working")
    } else {
        Outcome::fail(
            CaseId::Tc004,
            "Expected validation error for empty External PO Number but none found",
        )
    };
    Ok(outcome.with_details(details))
}
