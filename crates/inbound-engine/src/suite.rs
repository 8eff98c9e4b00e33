//! Sequential runner: one fresh browser session per case, torn down
//! unconditionally afterwards.

use crate::artifacts::Artifacts;
use crate::backend::Backend;
use crate::cases;
use crate::config::FlowConfig;
use crate::error::FlowError;
use crate::flow::InboundFlow;
use inbound_common::outcome::{CaseId, Outcome, SuiteReport};
use tracing::{error, info, warn};

pub struct SuiteRunner<F> {
    config: FlowConfig,
    factory: F,
}

impl<B, F> SuiteRunner<F>
where
    B: Backend,
    F: FnMut(&FlowConfig) -> B,
{
    /// `factory` builds an unlaunched backend for every case.
    pub fn new(config: FlowConfig, factory: F) -> Self {
        Self { config, factory }
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Run `cases` in priority order and write the JSON report.
    pub async fn run(&mut self, cases: &[CaseId]) -> Result<SuiteReport, FlowError> {
        let mut artifacts = Artifacts::new(&self.config.artifacts);
        artifacts.prepare().await?;

        let mut ordered = cases.to_vec();
        ordered.sort_by_key(CaseId::priority);
        ordered.dedup();

        let mut report = SuiteReport::default();
        for case in ordered {
            let outcome = self.run_case(case, &mut artifacts).await;
            report.outcomes.push(outcome);
        }

        match artifacts.write_report(&report).await {
            Ok(path) => info!(path = %path.display(), "Report written"),
            Err(e) => warn!("Report could not be written: {}", e),
        }
        Ok(report)
    }

    pub async fn run_case(&mut self, case: CaseId, artifacts: &mut Artifacts) -> Outcome {
        info!(case = %case, "Setting up test environment");
        let mut backend = (self.factory)(&self.config);

        let result = match backend.launch().await {
            Ok(()) => {
                info!(case = %case, "Browser launched");
                let mut flow = InboundFlow::new(&mut backend, &self.config, artifacts);
                match flow.bootstrap().await {
                    Ok(()) => cases::run(case, &mut flow).await,
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(FlowError::setup("browser launch", e)),
        };

        teardown(&mut backend).await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => Outcome::fail(case, e.to_string()),
        };
        if outcome.passed {
            info!(case = %case, "TEST PASSED: {}", outcome.message);
        } else {
            error!(case = %case, "TEST FAILED: {}", outcome.message);
        }
        outcome.with_screenshots(artifacts.take_screenshots())
    }
}

/// Close the session, tolerating one that is already gone.
pub async fn teardown<B: Backend>(backend: &mut B) {
    match backend.close().await {
        Ok(()) => info!("Browser closed"),
        Err(e) => warn!("Browser already closed or unreachable: {}", e),
    }
}
