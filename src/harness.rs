//! Admin listing page exercise sequence.
//!
//! Signs in as an administrator, opens one model's change list and probes its
//! filters, search box, add form, bulk actions and sortable headers. Probe
//! failures are collected rather than aborting the sequence; only login and
//! opening the listing itself abort a run immediately.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::sleep;

use crate::config::{AdminAccount, Config};
use crate::page::{Element, Page, Target, UiError};
use crate::screenshot::Screenshots;
use crate::steps::{failures, with_failure_screenshot, StepError, StepOutcome};

const FILTER_CLASS: &str = "admin-filter";
const SEARCH_INPUT_ID: &str = "searchbar";
const ADD_LINK_CLASS: &str = "addlink";
const ACTIONS_SELECT_NAME: &str = "action";
const SORTABLE_HEADER_CSS: &str = "th.sortable";
const ERROR_BANNER_CLASS: &str = "errornote";

const SEARCH_QUERY: &str = "test";

// Crude settle pause after state-changing clicks; the page has no
// event we can wait on once the click lands.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Errors raised by a single exercise run
#[derive(Debug, thiserror::Error)]
pub enum AdminTestError {
    #[error("Login failed: {0}")]
    Login(UiError),

    #[error("Failed to open change list: {0}")]
    Listing(UiError),

    #[error("{}", .0.join("\n"))]
    Failures(Vec<String>),
}

/// Drives one admin change list page through the full probing sequence.
pub struct AdminPageHarness<P> {
    page: P,
    base_url: String,
    app_label: String,
    model_name: String,
    test_filters: Vec<String>,
    admin: AdminAccount,
    wait_timeout: Duration,
    custom_waits: HashMap<String, String>,
    screenshots: Screenshots,
}

impl<P: Page> AdminPageHarness<P> {
    pub fn new(
        page: P,
        config: &Config,
        base_url: impl Into<String>,
        app_label: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            page,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_label: app_label.into(),
            model_name: model_name.into(),
            test_filters: vec![],
            admin: config.admin.clone(),
            wait_timeout: Duration::from_secs(config.browser.wait_timeout_secs),
            custom_waits: config.custom_wait_conditions.clone(),
            screenshots: Screenshots::from_settings(&config.screenshots),
        }
    }

    /// Restrict filter probing to the named filters; probes all when empty.
    pub fn with_test_filters(mut self, filters: Vec<String>) -> Self {
        self.test_filters = filters;
        self
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Run the full sequence, annotating any failure with a screenshot.
    pub async fn run(&self) -> Result<Vec<StepOutcome>, StepError> {
        let label = format!("{}_{}", self.app_label, self.model_name);
        with_failure_screenshot(&self.screenshots, &self.page, &label, self.exercise()).await
    }

    /// Run the full sequence without screenshot annotation.
    ///
    /// Login and listing navigation abort immediately; the five probe phases
    /// run unconditionally in order and pool their failures. Returns all
    /// recorded outcomes when nothing failed.
    pub async fn exercise(&self) -> Result<Vec<StepOutcome>, AdminTestError> {
        self.login().await.map_err(AdminTestError::Login)?;
        self.open_changelist().await.map_err(AdminTestError::Listing)?;

        let mut outcomes = Vec::new();
        outcomes.extend(self.probe_filters().await);
        outcomes.extend(self.probe_search().await);
        outcomes.extend(self.probe_add_form().await);
        outcomes.extend(self.probe_actions().await);
        outcomes.extend(self.probe_sorting().await);

        let failed = failures(&outcomes);
        if failed.is_empty() {
            Ok(outcomes)
        } else {
            Err(AdminTestError::Failures(failed))
        }
    }

    fn login_url(&self) -> String {
        format!("{}/admin/", self.base_url)
    }

    fn changelist_url(&self) -> String {
        format!(
            "{}/admin/{}/{}/",
            self.base_url, self.app_label, self.model_name
        )
    }

    async fn login(&self) -> Result<(), UiError> {
        let url = self.login_url();
        log::info!("Logging in to {} as {}", url, self.admin.username);

        self.page.open(&url).await?;
        let username = self.require(&Target::name("username")).await?;
        username.send_keys(&self.admin.username).await?;
        let password = self.require(&Target::name("password")).await?;
        password.send_keys(&self.admin.password).await?;
        let submit = self.require(&Target::css("input[type='submit']")).await?;
        submit.click().await?;
        Ok(())
    }

    async fn open_changelist(&self) -> Result<(), UiError> {
        let url = self.changelist_url();
        log::info!("Opening change list {}", url);

        self.page.open(&url).await?;
        for (name, selector) in &self.custom_waits {
            log::debug!("Waiting for condition {}: {}", name, selector);
            self.page
                .wait_for(&Target::css(selector.as_str()), self.wait_timeout)
                .await?;
        }
        Ok(())
    }

    async fn probe_filters(&self) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        if let Err(err) = self.try_filters(&mut outcomes).await {
            outcomes.push(StepOutcome::failed(
                "filters",
                format!("Filter test failed: {}", err),
            ));
        }
        outcomes
    }

    async fn try_filters(&self, outcomes: &mut Vec<StepOutcome>) -> Result<(), UiError> {
        let filters = self.page.find_all(&Target::class_name(FILTER_CLASS)).await?;
        log::debug!("Found {} filter blocks", filters.len());

        for filter in &filters {
            let text = filter.text().await?;
            let name = first_line(&text);
            if !self.test_filters.is_empty() && !self.test_filters.iter().any(|f| *f == name) {
                log::debug!("Skipping filter {}", name);
                continue;
            }

            let options = filter.find_all(&Target::tag("a")).await?;
            for option in &options {
                let option_text = option.text().await.unwrap_or_default();
                let action = format!("filter {} - {}", name, option_text);
                match self.click_filter_option(option.as_ref()).await {
                    Ok(true) => outcomes.push(StepOutcome::failed(
                        action,
                        format!("Filter error: {} - {}", name, option_text),
                    )),
                    Ok(false) => outcomes.push(StepOutcome::passed(action)),
                    Err(err) => outcomes.push(StepOutcome::failed(
                        action,
                        format!(
                            "Failed to click filter: {} - {} - {}",
                            name, option_text, err
                        ),
                    )),
                }
            }
        }
        Ok(())
    }

    async fn click_filter_option(&self, option: &dyn Element) -> Result<bool, UiError> {
        option.wait_clickable(self.wait_timeout).await?;
        option.click().await?;
        self.settle().await;
        self.error_banner_present().await
    }

    async fn probe_search(&self) -> Vec<StepOutcome> {
        match self.try_search().await {
            Ok(None) => vec![],
            Ok(Some(outcome)) => vec![outcome],
            Err(err) => vec![StepOutcome::failed(
                "search",
                format!("Search test failed: {}", err),
            )],
        }
    }

    async fn try_search(&self) -> Result<Option<StepOutcome>, UiError> {
        let Some(input) = self.page.find(&Target::id(SEARCH_INPUT_ID)).await? else {
            return Ok(None);
        };
        input.send_keys(SEARCH_QUERY).await?;
        input.submit().await?;
        self.settle().await;
        Ok(Some(StepOutcome::passed("search")))
    }

    async fn probe_add_form(&self) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        if let Err(err) = self.try_add_form(&mut outcomes).await {
            outcomes.push(StepOutcome::failed(
                "add form",
                format!("Add form test failed: {}", err),
            ));
        }
        outcomes
    }

    async fn try_add_form(&self, outcomes: &mut Vec<StepOutcome>) -> Result<(), UiError> {
        let Some(add_link) = self.page.find(&Target::class_name(ADD_LINK_CLASS)).await? else {
            return Ok(());
        };
        add_link.click().await?;
        self.settle().await;
        if self.error_banner_present().await? {
            outcomes.push(StepOutcome::failed("add form", "Add form error"));
        } else {
            outcomes.push(StepOutcome::passed("add form"));
        }
        self.page.back().await?;
        Ok(())
    }

    async fn probe_actions(&self) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        if let Err(err) = self.try_actions(&mut outcomes).await {
            outcomes.push(StepOutcome::failed(
                "actions",
                format!("List actions test failed: {}", err),
            ));
        }
        outcomes
    }

    async fn try_actions(&self, outcomes: &mut Vec<StepOutcome>) -> Result<(), UiError> {
        let Some(select) = self.page.find(&Target::name(ACTIONS_SELECT_NAME)).await? else {
            return Ok(());
        };
        let options = select.find_all(&Target::tag("option")).await?;
        // The first option is the "---------" placeholder
        for option in options.iter().skip(1) {
            let value = option.attr("value").await?.unwrap_or_default();
            option.click().await?;
            outcomes.push(StepOutcome::passed(format!("action {}", value)));
        }
        Ok(())
    }

    async fn probe_sorting(&self) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        if let Err(err) = self.try_sorting(&mut outcomes).await {
            outcomes.push(StepOutcome::failed(
                "sorting",
                format!("Sorting test failed: {}", err),
            ));
        }
        outcomes
    }

    async fn try_sorting(&self, outcomes: &mut Vec<StepOutcome>) -> Result<(), UiError> {
        let headers = self.page.find_all(&Target::css(SORTABLE_HEADER_CSS)).await?;
        for header in &headers {
            let label = header.text().await?;
            header.click().await?;
            self.settle().await;
            if self.error_banner_present().await? {
                outcomes.push(StepOutcome::failed(
                    format!("sorting {}", label),
                    format!("Sorting error: {}", label),
                ));
            } else {
                outcomes.push(StepOutcome::passed(format!("sorting {}", label)));
            }
        }
        Ok(())
    }

    async fn error_banner_present(&self) -> Result<bool, UiError> {
        let banners = self
            .page
            .find_all(&Target::class_name(ERROR_BANNER_CLASS))
            .await?;
        Ok(!banners.is_empty())
    }

    async fn require(&self, target: &Target) -> Result<Box<dyn Element>, UiError> {
        self.page
            .find(target)
            .await?
            .ok_or_else(|| UiError::NotFound(target.to_string()))
    }

    async fn settle(&self) {
        sleep(SETTLE_DELAY).await;
    }
}

fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("Status\nAll\nActive"), "Status");
        assert_eq!(first_line("Status"), "Status");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_failures_error_joins_lines_in_order() {
        let err = AdminTestError::Failures(vec![
            "Filter error: Status - Active".to_string(),
            "Sorting error: Created".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Filter error: Status - Active\nSorting error: Created"
        );
    }
}
