use chrono::{NaiveDate, Utc};
use rand::{distributions::Alphanumeric, Rng};
use std::fmt;
use std::sync::Arc;

use crate::models::catalog::Catalog;
use crate::models::language::Language;
use crate::models::selection::{Selection, SelectionError};
use crate::models::wizard::{FieldError, PriceSummary, TripSubmission, WizardState, WizardStep};
use crate::services::pricing_service::PricingService;
use crate::services::summary_service::{build_summary_rows, SummaryRow};
use crate::services::translation_service::Translator;
use crate::services::validation_service::{validate, Messages};

const REFERENCE_LENGTH: usize = 8;

pub type Listener = Box<dyn FnMut(&WizardState) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Submitting is only possible from the summary step
    NotOnSummary(WizardStep),
    /// The selection was edited after reaching the summary and no longer
    /// passes the checks of `step`. The session has been moved back there.
    Incomplete {
        step: WizardStep,
        errors: Vec<FieldError>,
    },
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotOnSummary(step) => write!(
                f,
                "Trip can only be submitted from the summary step, not step {}",
                step.number()
            ),
            SubmitError::Incomplete { step, errors } => write!(
                f,
                "Step {} is incomplete ({} errors)",
                step.number(),
                errors.len()
            ),
        }
    }
}

impl std::error::Error for SubmitError {}

/// One visitor's pass through the trip wizard.
///
/// Owns the current step and the selection. Forward moves are gated by the
/// validator of the step being left; backward moves are always allowed.
/// Every mutation is followed by a call to each subscribed listener with the
/// new state, after the state change has completed.
pub struct WizardSession {
    catalog: Arc<Catalog>,
    translator: Arc<dyn Translator>,
    state: WizardState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl WizardSession {
    pub fn new(catalog: Arc<Catalog>, translator: Arc<dyn Translator>, language: Language) -> Self {
        Self {
            catalog,
            translator,
            state: WizardState::new(language),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.state.errors
    }

    pub fn summary(&self) -> Option<&PriceSummary> {
        self.state.summary.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(state);
        }
    }

    /// Keep a shown price in line with the selection it was computed from.
    fn selection_changed(&mut self) {
        if self.state.summary.is_some() {
            self.state.summary = Some(PricingService::compute(&self.catalog, &self.state.selection));
        }
        self.notify();
    }

    pub fn set_language(&mut self, language: Language) {
        self.state.language = language;
        self.notify();
    }

    pub fn set_region(&mut self, region: Option<&str>) -> Result<(), SelectionError> {
        let result = self.state.selection.set_region(&self.catalog, region);
        self.selection_changed();
        result
    }

    pub fn toggle_attraction(&mut self, id: &str) -> bool {
        let toggled = self.state.selection.toggle_attraction(&self.catalog, id);
        if !toggled {
            log::debug!("Ignoring attraction {} outside the selected region", id);
        }
        self.selection_changed();
        toggled
    }

    pub fn choose_hotel(
        &mut self,
        hotel_id: &str,
        room_type: &str,
        room_count: u32,
    ) -> Result<(), SelectionError> {
        let result = self
            .state
            .selection
            .choose_hotel(&self.catalog, hotel_id, room_type, room_count);
        self.selection_changed();
        result
    }

    pub fn clear_hotel(&mut self) {
        self.state.selection.clear_hotel();
        self.selection_changed();
    }

    pub fn set_dates(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.state.selection.set_dates(start, end);
        self.selection_changed();
    }

    pub fn set_party_size(&mut self, party_size: i64) {
        self.state.selection.set_party_size(party_size);
        self.selection_changed();
    }

    pub fn set_contact(&mut self, full_name: &str, email: &str, phone: &str) {
        self.state.selection.set_contact(full_name, email, phone);
        self.selection_changed();
    }

    /// Validate the current step and move to the next one.
    ///
    /// On failure the step is unchanged and the errors are both returned and
    /// kept on the state for display. Entering `Summary` prices the trip.
    pub fn advance(&mut self) -> Result<WizardStep, Vec<FieldError>> {
        let messages = Messages::new(self.translator.as_ref(), self.state.language);
        let errors = validate(self.state.current_step, &self.state.selection, &messages);

        let result = if errors.is_empty() {
            let next = self.state.current_step.next();
            self.state.current_step = next;
            self.state.errors.clear();
            if next == WizardStep::Summary {
                self.state.summary =
                    Some(PricingService::compute(&self.catalog, &self.state.selection));
            }
            Ok(next)
        } else {
            self.state.errors = errors.clone();
            Err(errors)
        };

        self.notify();
        result
    }

    /// Step back one stage without validation. Returns `None` on the first step.
    pub fn retreat(&mut self) -> Option<WizardStep> {
        let previous = self.state.current_step.previous()?;
        self.state.current_step = previous;
        self.state.errors.clear();
        self.state.summary = None;
        self.notify();
        Some(previous)
    }

    /// Back to the first step with an empty selection. Language and
    /// subscriptions survive.
    pub fn reset(&mut self) {
        self.state = WizardState::new(self.state.language);
        self.notify();
    }

    /// Confirm the trip from the summary step.
    ///
    /// The selection is checked again and priced afresh, since it stays
    /// editable on the summary step. If an earlier step no longer passes, the
    /// session moves back to it with its errors. On success the request is
    /// logged and the session reset.
    pub fn submit(&mut self) -> Result<TripSubmission, SubmitError> {
        let current = self.state.current_step;
        if current != WizardStep::Summary {
            return Err(SubmitError::NotOnSummary(current));
        }

        let messages = Messages::new(self.translator.as_ref(), self.state.language);
        let failing = [WizardStep::Destination, WizardStep::Stay, WizardStep::Contact]
            .into_iter()
            .map(|step| (step, validate(step, &self.state.selection, &messages)))
            .find(|(_, errors)| !errors.is_empty());
        if let Some((step, errors)) = failing {
            log::info!("Trip submission sent back to step {}", step.number());
            self.state.current_step = step;
            self.state.summary = None;
            self.state.errors = errors.clone();
            self.notify();
            return Err(SubmitError::Incomplete { step, errors });
        }

        let summary = PricingService::compute(&self.catalog, &self.state.selection);
        let submission = TripSubmission {
            reference: generate_reference(),
            submitted_at: Utc::now(),
            language: self.state.language,
            selection: self.state.selection.clone(),
            summary,
        };

        log::info!(
            "Trip request {} submitted: region={:?} attractions={} total={} {}",
            submission.reference,
            submission.selection.region(),
            submission.selection.attraction_ids().len(),
            submission.summary.grand_total,
            submission.summary.currency
        );

        self.reset();
        Ok(submission)
    }

    /// Localized summary rows for the current selection.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let price = self
            .state
            .summary
            .unwrap_or_else(|| PricingService::compute(&self.catalog, &self.state.selection));
        build_summary_rows(
            &self.catalog,
            self.translator.as_ref(),
            self.state.language,
            &self.state.selection,
            &price,
        )
    }
}

pub(crate) fn generate_reference() -> String {
    let code: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFERENCE_LENGTH)
        .map(char::from)
        .collect();
    format!("NEP-{}", code.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wizard::Field;
    use crate::services::translation_service::NoTranslations;
    use std::sync::Mutex;

    fn session() -> WizardSession {
        WizardSession::new(
            Arc::new(Catalog::egypt()),
            Arc::new(NoTranslations),
            Language::En,
        )
    }

    #[test]
    fn test_failed_advance_keeps_step_and_exposes_errors() {
        let mut session = session();

        for _ in 0..3 {
            let errors = session.advance().unwrap_err();
            assert_eq!(errors.len(), 2);
            assert_eq!(session.current_step(), WizardStep::Destination);
            assert_eq!(session.errors(), errors.as_slice());
        }
        assert_eq!(session.selection(), &Selection::new());
    }

    #[test]
    fn test_retreat_on_first_step_is_noop() {
        let mut session = session();
        assert_eq!(session.retreat(), None);
        assert_eq!(session.current_step(), WizardStep::Destination);
    }

    #[test]
    fn test_retreat_clears_errors() {
        let mut session = session();
        session.set_region(Some("cairo")).unwrap();
        session.toggle_attraction("museum");
        session.advance().unwrap();
        assert!(session.advance().is_err());

        assert_eq!(session.retreat(), Some(WizardStep::Destination));
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_listeners_see_every_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut session = session();
        let sink = seen.clone();
        let id = session.subscribe(Box::new(move |state: &WizardState| {
            sink.lock().unwrap().push(state.current_step);
        }));

        session.set_region(Some("giza")).unwrap();
        session.toggle_attraction("karnak");
        session.toggle_attraction("pyramids");
        session.advance().unwrap();
        assert!(session.unsubscribe(id));
        session.retreat();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                WizardStep::Destination,
                WizardStep::Destination,
                WizardStep::Destination,
                WizardStep::Stay,
            ]
        );
    }

    #[test]
    fn test_submit_only_from_summary() {
        let mut session = session();
        assert_eq!(
            session.submit().unwrap_err(),
            SubmitError::NotOnSummary(WizardStep::Destination)
        );

        session.set_region(Some("cairo")).unwrap();
        session.toggle_attraction("nilometer");
        session.advance().unwrap();
        session.set_dates(
            NaiveDate::from_ymd_opt(2025, 1, 1),
            NaiveDate::from_ymd_opt(2025, 1, 2),
        );
        session
            .choose_hotel("hotel-grand-cairo", "deluxe", 1)
            .unwrap();
        session.advance().unwrap();
        session.set_contact("Omar", "omar@example.com", "01012345678");
        assert_eq!(session.advance(), Ok(WizardStep::Summary));

        let submission = session.submit().unwrap();
        assert!(submission.reference.starts_with("NEP-"));
        assert_eq!(submission.reference.len(), 4 + REFERENCE_LENGTH);
        assert_eq!(submission.summary.grand_total, 70 + 220);
        assert_eq!(session.current_step(), WizardStep::Destination);
        assert_eq!(session.selection(), &Selection::new());
    }

    fn session_on_summary() -> WizardSession {
        let mut session = session();
        session.set_region(Some("giza")).unwrap();
        session.toggle_attraction("pyramids");
        session.advance().unwrap();
        session.set_dates(
            NaiveDate::from_ymd_opt(2025, 6, 1),
            NaiveDate::from_ymd_opt(2025, 6, 3),
        );
        session
            .choose_hotel("hotel-giza-pyramid", "standard", 1)
            .unwrap();
        session.advance().unwrap();
        session.set_contact("Omar", "omar@example.com", "01012345678");
        session.advance().unwrap();
        session
    }

    #[test]
    fn test_edits_on_summary_reprice() {
        let mut session = session_on_summary();
        assert_eq!(session.summary().map(|s| s.grand_total), Some(200 + 240));

        session
            .choose_hotel("hotel-giza-pyramid", "deluxe", 2)
            .unwrap();
        assert_eq!(session.summary().map(|s| s.hotel_total), Some(180 * 2 * 2));

        session.clear_hotel();
        assert_eq!(session.summary().map(|s| s.grand_total), Some(200));
    }

    #[test]
    fn test_submit_after_breaking_edit_returns_to_failing_step() {
        let mut session = session_on_summary();
        session.set_region(Some("luxor")).unwrap();
        session.clear_hotel();

        match session.submit() {
            Err(SubmitError::Incomplete { step, errors }) => {
                assert_eq!(step, WizardStep::Destination);
                assert_eq!(errors[0].field, Field::Attractions);
            }
            other => panic!("unexpected submit result: {:?}", other),
        }
        assert_eq!(session.current_step(), WizardStep::Destination);
        assert!(session.summary().is_none());
        assert_eq!(session.selection().region(), Some("luxor"));
    }

    #[test]
    fn test_language_change_localizes_next_errors() {
        let mut session = session();
        session.set_language(Language::Ar);
        let errors = session.advance().unwrap_err();
        assert_eq!(errors[0].field, Field::Region);
        assert_eq!(errors[0].message, "هذا الحقل مطلوب");
    }
}
