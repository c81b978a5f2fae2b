mod common;

use chrono::NaiveDate;
use nepora_trip_wizard::models::language::Language;
use nepora_trip_wizard::models::selection::Selection;
use nepora_trip_wizard::models::wizard::{Field, WizardStep};
use nepora_trip_wizard::services::pricing_service::PricingService;
use nepora_trip_wizard::services::wizard_service::{SubmitError, WizardSession};

use common::{giza_catalog, giza_session};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn test_invalid_steps_never_advance() {
    let mut session = giza_session(Language::En);

    // step 1: nothing chosen yet
    assert!(session.advance().is_err());
    assert_eq!(session.current_step(), WizardStep::Destination);

    session.set_region(Some("giza")).unwrap();
    session.toggle_attraction("pyramids");
    assert_eq!(session.advance(), Ok(WizardStep::Stay));

    // step 2: dates missing
    session.choose_hotel("mena-house", "double", 1).unwrap();
    assert!(session.advance().is_err());
    assert_eq!(session.current_step(), WizardStep::Stay);

    session.set_dates(date(2025, 6, 1), date(2025, 6, 2));
    assert_eq!(session.advance(), Ok(WizardStep::Contact));

    // step 3: contact blank
    session.set_contact("Nour", " ", "0100");
    assert!(session.advance().is_err());
    assert_eq!(session.current_step(), WizardStep::Contact);
}

#[test]
fn test_region_change_clears_attractions() {
    let catalog = giza_catalog();
    let mut selection = Selection::new();
    selection.set_region(&catalog, Some("giza")).unwrap();
    selection.toggle_attraction(&catalog, "pyramids");
    assert_eq!(selection.attraction_ids().len(), 1);

    selection.set_region(&catalog, Some("luxor")).unwrap();
    assert!(selection.attraction_ids().is_empty());
}

#[test]
fn test_pricing_twice_is_identical() {
    let catalog = giza_catalog();
    let mut selection = Selection::new();
    selection.set_region(&catalog, Some("giza")).unwrap();
    selection.toggle_attraction(&catalog, "pyramids");
    selection.choose_hotel(&catalog, "mena-house", "suite", 3).unwrap();
    selection.set_dates(date(2025, 12, 30), date(2026, 1, 2));

    let first = PricingService::compute(&catalog, &selection);
    let second = PricingService::compute(&catalog, &selection);
    assert_eq!(first, second);
    assert_eq!(first.nights, 3);
    assert_eq!(first.hotel_total, 250 * 3 * 3);
}

#[test]
fn test_same_day_is_one_night() {
    let catalog = giza_catalog();
    let mut selection = Selection::new();
    selection.choose_hotel(&catalog, "mena-house", "double", 1).unwrap();
    selection.set_dates(date(2025, 6, 1), date(2025, 6, 1));

    let summary = PricingService::compute(&catalog, &selection);
    assert_eq!(summary.nights, 1);
    assert_eq!(summary.hotel_total, 100);
}

#[test]
fn test_empty_destination_reports_two_errors() {
    let mut session = giza_session(Language::Ar);
    let errors = session.advance().unwrap_err();

    let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec![Field::Region, Field::Attractions]);
    assert_eq!(errors[0].message, "هذا الحقل مطلوب");
    assert_eq!(errors[1].message, "يرجى اختيار وجهة واحدة على الأقل");
}

#[test]
fn test_giza_scenario_totals() {
    let catalog = giza_catalog();
    let mut selection = Selection::new();
    selection.set_region(&catalog, Some("giza")).unwrap();
    selection.toggle_attraction(&catalog, "pyramids");
    selection.choose_hotel(&catalog, "mena-house", "double", 2).unwrap();
    selection.set_dates(date(2025, 6, 1), date(2025, 6, 3));

    let summary = PricingService::compute(&catalog, &selection);
    assert_eq!(summary.attractions_total, 200);
    assert_eq!(summary.nights, 2);
    assert_eq!(summary.hotel_total, 400);
    assert_eq!(summary.grand_total, 600);
}

#[test]
fn test_toggle_from_other_region_is_ignored() {
    let mut session = giza_session(Language::En);
    session.set_region(Some("giza")).unwrap();
    let before = session.selection().clone();

    assert!(!session.toggle_attraction("karnak"));
    assert_eq!(session.selection(), &before);
}

#[test]
fn test_end_equal_to_start_is_an_ordering_error() {
    let mut session = giza_session(Language::En);
    session.set_region(Some("giza")).unwrap();
    session.toggle_attraction("pyramids");
    session.advance().unwrap();

    session.choose_hotel("mena-house", "double", 1).unwrap();
    session.set_dates(date(2025, 6, 1), date(2025, 6, 1));
    let errors = session.advance().unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, Field::EndDate);
    assert_eq!(errors[0].message, "End date must be after start date");
    assert_ne!(errors[0].message, "This field is required");
    assert_eq!(session.current_step(), WizardStep::Stay);
}

#[test]
fn test_full_happy_path_then_reset() {
    let mut session = giza_session(Language::En);

    session.set_region(Some("giza")).unwrap();
    session.toggle_attraction("pyramids");
    assert_eq!(session.advance(), Ok(WizardStep::Stay));

    session.set_dates(date(2025, 6, 1), date(2025, 6, 3));
    session.set_party_size(4);
    session.choose_hotel("mena-house", "double", 2).unwrap();
    assert_eq!(session.advance(), Ok(WizardStep::Contact));
    assert!(session.summary().is_none());

    session.set_contact("Nour Adel", "nour@example.com", "01012345678");
    assert_eq!(session.advance(), Ok(WizardStep::Summary));
    let summary = session.summary().copied().expect("summary on last step");
    assert_eq!(summary.grand_total, 600);

    // already on the last step
    assert_eq!(session.advance(), Ok(WizardStep::Summary));

    session.reset();
    assert_eq!(session.current_step(), WizardStep::Destination);
    assert_eq!(session.selection(), &Selection::new());
    assert!(session.summary().is_none());
    assert_eq!(session.language(), Language::En);
}

#[test]
fn test_leaving_summary_discards_price() {
    let mut session = giza_session(Language::En);
    session.set_region(Some("giza")).unwrap();
    session.toggle_attraction("pyramids");
    session.advance().unwrap();
    session.set_dates(date(2025, 6, 1), date(2025, 6, 3));
    session.choose_hotel("mena-house", "double", 1).unwrap();
    session.advance().unwrap();
    session.set_contact("Nour", "nour@example.com", "01012345678");
    session.advance().unwrap();
    assert!(session.summary().is_some());

    assert_eq!(session.retreat(), Some(WizardStep::Contact));
    assert!(session.summary().is_none());
}

fn session_on_summary() -> WizardSession {
    let mut session = giza_session(Language::En);
    session.set_region(Some("giza")).unwrap();
    session.toggle_attraction("pyramids");
    session.advance().unwrap();
    session.set_dates(date(2025, 6, 1), date(2025, 6, 3));
    session.choose_hotel("mena-house", "double", 2).unwrap();
    session.advance().unwrap();
    session.set_contact("Nour", "nour@example.com", "01012345678");
    session.advance().unwrap();
    assert_eq!(session.summary().map(|s| s.grand_total), Some(600));
    session
}

#[test]
fn test_submit_after_emptying_selection_on_summary_is_refused() {
    let mut session = session_on_summary();

    session.set_region(Some("luxor")).unwrap();
    session.clear_hotel();
    assert_eq!(session.summary().map(|s| s.grand_total), Some(0));

    let err = session.submit().unwrap_err();
    match err {
        SubmitError::Incomplete { step, errors } => {
            assert_eq!(step, WizardStep::Destination);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, Field::Attractions);
        }
        other => panic!("expected an incomplete step, got {:?}", other),
    }
    assert_eq!(session.current_step(), WizardStep::Destination);
    assert!(session.summary().is_none());
    assert_eq!(session.selection().region(), Some("luxor"));
}

#[test]
fn test_submit_after_valid_edit_on_summary_uses_new_price() {
    let mut session = session_on_summary();

    session.choose_hotel("mena-house", "suite", 1).unwrap();
    session.set_dates(date(2025, 6, 1), date(2025, 6, 4));
    let shown = session.summary().copied().expect("summary kept on last step");
    // 200 + 250 * 3 nights
    assert_eq!(shown.grand_total, 950);

    let selection = session.selection().clone();
    let submission = session.submit().expect("still valid");
    assert_eq!(submission.summary, shown);
    assert_eq!(
        submission.summary,
        PricingService::compute(&giza_catalog(), &selection)
    );
    assert_eq!(submission.selection, selection);
}

#[test]
fn test_submit_after_breaking_stay_returns_to_stay() {
    let mut session = session_on_summary();
    session.set_dates(date(2025, 6, 3), date(2025, 6, 1));

    match session.submit() {
        Err(SubmitError::Incomplete { step, errors }) => {
            assert_eq!(step, WizardStep::Stay);
            assert_eq!(errors[0].field, Field::EndDate);
        }
        other => panic!("expected an incomplete step, got {:?}", other),
    }
    assert_eq!(session.current_step(), WizardStep::Stay);
}
