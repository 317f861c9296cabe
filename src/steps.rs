//! Step outcome records and failure annotation.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use crate::page::Page;
use crate::screenshot::Screenshots;

/// Outcome of one probing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Short description of the action taken
    pub action: String,
    /// Failure message, when the step found a problem
    pub failure: Option<String>,
}

impl StepOutcome {
    pub fn passed(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            failure: None,
        }
    }

    pub fn failed(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            failure: Some(message.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Failure messages from a sequence of outcomes, in recorded order.
pub fn failures(outcomes: &[StepOutcome]) -> Vec<String> {
    outcomes.iter().filter_map(|o| o.failure.clone()).collect()
}

/// A failed step, optionally annotated with the screenshot taken at the
/// moment of failure.
#[derive(Debug)]
pub struct StepError {
    pub message: String,
    pub screenshot: Option<PathBuf>,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(path) = &self.screenshot {
            write!(f, "\nScreenshot saved to: {}", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for StepError {}

/// Run a fallible step; on failure capture a screenshot and return the
/// original error message annotated with the screenshot path.
///
/// Success passes through untouched. When capture is disabled (or itself
/// fails) the error is returned without a path; a capture problem never
/// masks the step's own error.
pub async fn with_failure_screenshot<T, E, Fut>(
    shots: &Screenshots,
    page: &dyn Page,
    label: &str,
    step: Fut,
) -> Result<T, StepError>
where
    E: fmt::Display,
    Fut: Future<Output = Result<T, E>>,
{
    match step.await {
        Ok(value) => Ok(value),
        Err(err) => {
            let screenshot = match shots.capture(page, Some(label)).await {
                Ok(path) => path,
                Err(capture_err) => {
                    log::warn!("Could not capture failure screenshot: {}", capture_err);
                    None
                }
            };
            Err(StepError {
                message: err.to_string(),
                screenshot,
            })
        }
    }
}
