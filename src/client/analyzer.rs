//! Phishing analyzer: client-side request state.
//!
//! DESIGN
//! ======
//! Mirrors what an analyzer widget renders: the input text, a loading flag,
//! a result, an error, and whether the trigger is enabled. After every settled call exactly one of result/error is set.
//! The trigger is disabled while a call is in flight; a second `analyze`
//! during that window returns [`ClientError::Busy`] without touching the view
//! or the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::api::{AnalysisTransport, ClientError};
use super::session::AuthSession;
use crate::services::analysis::{AnalysisResult, RiskLevel};

pub const HIGH_RISK_BANNER: &str = "High Risk - Potential Phishing Detected";
pub const LOW_RISK_BANNER: &str = "Low Risk - Likely Safe";

/// Snapshot of what the analyzer shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalyzerView {
    pub input: String,
    pub loading: bool,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    /// Signed in and no call in flight.
    pub can_submit: bool,
}

impl AnalyzerView {
    /// Headline for the current result, if any.
    #[must_use]
    pub fn banner(&self) -> Option<&'static str> {
        self.result.as_ref().map(|r| match r.risk {
            RiskLevel::High => HIGH_RISK_BANNER,
            RiskLevel::Low => LOW_RISK_BANNER,
        })
    }
}

pub struct PhishingAnalyzer<T> {
    session: AuthSession,
    transport: T,
    view: Mutex<AnalyzerView>,
    in_flight: AtomicBool,
}

impl<T: AnalysisTransport> PhishingAnalyzer<T> {
    #[must_use]
    pub fn new(session: AuthSession, transport: T) -> Self {
        Self { session, transport, view: Mutex::new(AnalyzerView::default()), in_flight: AtomicBool::new(false) }
    }

    #[must_use]
    pub fn view(&self) -> AnalyzerView {
        let mut view = self.lock_view().clone();
        view.can_submit = self.can_submit();
        view
    }

    /// Replace the input text without submitting it.
    pub fn set_input(&self, text: &str) {
        text.clone_into(&mut self.lock_view().input);
    }

    /// Whether the analyze trigger is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.in_flight.load(Ordering::SeqCst) && self.session.is_signed_in()
    }

    /// Analyze `content` and update the view.
    ///
    /// # Errors
    ///
    /// [`ClientError::Busy`] if a call is already in flight (view untouched).
    /// Validation, server, network and malformed-response errors are also
    /// stored in the view's `error` with the previous result cleared.
    pub async fn analyze(&self, content: &str) -> Result<AnalysisResult, ClientError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ClientError::Busy);
        }
        let _trigger = TriggerGuard { analyzer: self };
        self.set_input(content);

        let outcome = self.run(content).await;
        let mut view = self.lock_view();
        match &outcome {
            Ok(result) => {
                view.result = Some(result.clone());
                view.error = None;
            }
            Err(e) => {
                warn!(error = %e, "analysis request failed");
                view.result = None;
                view.error = Some(e.to_string());
            }
        }
        outcome
    }

    async fn run(&self, content: &str) -> Result<AnalysisResult, ClientError> {
        if content.trim().is_empty() {
            return Err(ClientError::EmptyContent);
        }
        let user = self.session.current_user().ok_or(ClientError::NotSignedIn)?;

        {
            let mut view = self.lock_view();
            view.loading = true;
            view.error = None;
            view.result = None;
        }
        self.transport.submit(content, &user.id).await
    }

    fn lock_view(&self) -> MutexGuard<'_, AnalyzerView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Re-enables the trigger and clears `loading` when a call settles or is dropped.
struct TriggerGuard<'a, T: AnalysisTransport> {
    analyzer: &'a PhishingAnalyzer<T>,
}

impl<T: AnalysisTransport> Drop for TriggerGuard<'_, T> {
    fn drop(&mut self) {
        self.analyzer.lock_view().loading = false;
        self.analyzer.in_flight.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
