//! Case bodies. Each runs on a session that has already been bootstrapped
//! onto the External PO Reference form.

pub mod tc004;
pub mod tc036;

use crate::backend::Backend;
use crate::error::FlowError;
use crate::flow::InboundFlow;
use inbound_common::outcome::{CaseId, Outcome};

pub async fn run<B: Backend>(
    case: CaseId,
    flow: &mut InboundFlow<'_, B>,
) -> Result<Outcome, FlowError> {
    match case {
        CaseId::Tc004 => tc004::run(flow).await,
        CaseId::Tc036 => tc036::run(flow).await,
    }
}
