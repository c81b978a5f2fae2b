use crate::models::language::Language;
use crate::models::selection::Selection;
use crate::models::wizard::{Field, FieldError, WizardStep};
use crate::services::translation_service::{keys, localize, localize_with, Translator};

const MIN_PARTY_SIZE: i64 = 1;

/// Resolves validation messages for one language.
pub struct Messages<'a> {
    translator: &'a dyn Translator,
    lang: Language,
}

impl<'a> Messages<'a> {
    pub fn new(translator: &'a dyn Translator, lang: Language) -> Self {
        Self { translator, lang }
    }

    fn error(&self, field: Field, key: &str) -> FieldError {
        FieldError::new(field, localize(self.translator, key, self.lang))
    }

    fn error_with(&self, field: Field, key: &str, params: &[(&str, &str)]) -> FieldError {
        FieldError::new(field, localize_with(self.translator, key, self.lang, params))
    }
}

/// Check the selection against the rules of `step`. An empty list means the
/// step may be left.
pub fn validate(step: WizardStep, selection: &Selection, messages: &Messages) -> Vec<FieldError> {
    match step {
        WizardStep::Destination => validate_destination(selection, messages),
        WizardStep::Stay => validate_stay(selection, messages),
        WizardStep::Contact => validate_contact(selection, messages),
        WizardStep::Summary => Vec::new(),
    }
}

pub fn validate_destination(selection: &Selection, messages: &Messages) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if selection.region().is_none() {
        errors.push(messages.error(Field::Region, keys::REQUIRED));
    }
    if selection.attraction_ids().is_empty() {
        errors.push(messages.error(Field::Attractions, keys::SELECT_DESTINATION));
    }
    errors
}

pub fn validate_stay(selection: &Selection, messages: &Messages) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if selection.start_date().is_none() {
        errors.push(messages.error(Field::StartDate, keys::REQUIRED));
    }
    if selection.end_date().is_none() {
        errors.push(messages.error(Field::EndDate, keys::REQUIRED));
    }
    if let (Some(start), Some(end)) = (selection.start_date(), selection.end_date()) {
        if end <= start {
            errors.push(messages.error(Field::EndDate, keys::END_DATE_BEFORE_START));
        }
    }
    if selection.party_size() < MIN_PARTY_SIZE {
        let min = MIN_PARTY_SIZE.to_string();
        errors.push(messages.error_with(Field::PartySize, keys::MIN_VALUE, &[("min", min.as_str())]));
    }
    if selection.hotel().is_none() {
        errors.push(messages.error(Field::Hotel, keys::SELECT_HOTEL));
    }
    errors
}

pub fn validate_contact(selection: &Selection, messages: &Messages) -> Vec<FieldError> {
    let contact = selection.contact();
    [
        (Field::FullName, &contact.full_name),
        (Field::Email, &contact.email),
        (Field::Phone, &contact.phone),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| messages.error(field, keys::REQUIRED))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::Catalog;
    use crate::services::translation_service::NoTranslations;
    use chrono::NaiveDate;

    fn fields(errors: &[FieldError]) -> Vec<Field> {
        errors.iter().map(|e| e.field).collect()
    }

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 6, d)
    }

    #[test]
    fn test_destination_reports_both_errors() {
        let messages = Messages::new(&NoTranslations, Language::En);
        let errors = validate(WizardStep::Destination, &Selection::new(), &messages);
        assert_eq!(fields(&errors), vec![Field::Region, Field::Attractions]);
        assert_eq!(errors[0].message, "This field is required");
    }

    #[test]
    fn test_stay_reports_everything_missing() {
        let messages = Messages::new(&NoTranslations, Language::En);
        let mut selection = Selection::new();
        selection.set_party_size(0);

        let errors = validate_stay(&selection, &messages);
        assert_eq!(
            fields(&errors),
            vec![Field::StartDate, Field::EndDate, Field::PartySize, Field::Hotel]
        );
        assert_eq!(errors[2].message, "Value must be at least 1");
    }

    #[test]
    fn test_same_day_dates_use_ordering_message() {
        let catalog = Catalog::egypt();
        let messages = Messages::new(&NoTranslations, Language::En);
        let mut selection = Selection::new();
        selection.set_dates(date(1), date(1));
        selection
            .choose_hotel(&catalog, "hotel-giza-pyramid", "standard", 1)
            .unwrap();

        let errors = validate_stay(&selection, &messages);
        assert_eq!(fields(&errors), vec![Field::EndDate]);
        assert_eq!(errors[0].message, "End date must be after start date");
        assert_ne!(errors[0].message, "This field is required");
    }

    #[test]
    fn test_contact_requires_trimmed_values() {
        let messages = Messages::new(&NoTranslations, Language::Ar);
        let mut selection = Selection::new();
        selection.set_contact("Mona", "   ", "");

        let errors = validate_contact(&selection, &messages);
        assert_eq!(fields(&errors), vec![Field::Email, Field::Phone]);
        assert_eq!(errors[0].message, "هذا الحقل مطلوب");
    }

    #[test]
    fn test_contact_does_not_check_formats() {
        let messages = Messages::new(&NoTranslations, Language::En);
        let mut selection = Selection::new();
        selection.set_contact("M", "not-an-email", "12");

        assert!(validate_contact(&selection, &messages).is_empty());
    }

    #[test]
    fn test_summary_is_always_valid() {
        let messages = Messages::new(&NoTranslations, Language::En);
        assert!(validate(WizardStep::Summary, &Selection::new(), &messages).is_empty());
    }
}
