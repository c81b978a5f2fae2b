use serde::Serialize;

use crate::models::catalog::Catalog;
use crate::models::language::Language;
use crate::models::selection::Selection;
use crate::models::wizard::PriceSummary;
use crate::services::translation_service::{keys, localize, Translator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

/// Human-readable rows for the summary card, in display order.
pub fn build_summary_rows(
    catalog: &Catalog,
    translator: &dyn Translator,
    lang: Language,
    selection: &Selection,
    price: &PriceSummary,
) -> Vec<SummaryRow> {
    let text = |key: &str| localize(translator, key, lang);
    let row = |key: &str, value: String| SummaryRow {
        label: text(key),
        value,
    };

    let governorate = selection
        .region()
        .map(|id| {
            translator
                .translate(&format!("tripWizard.governorates.{}", id), lang)
                .filter(|s| !s.is_empty())
                .or_else(|| catalog.region(id).map(|r| r.name.get(lang).to_string()))
                .unwrap_or_else(|| id.to_string())
        })
        .unwrap_or_else(|| "-".to_string());

    // catalog order, not selection order
    let attractions: Vec<&str> = selection
        .region()
        .map(|region| {
            catalog
                .attractions_in(region)
                .filter(|a| selection.attraction_ids().contains(&a.id))
                .map(|a| a.name.get(lang))
                .collect()
        })
        .unwrap_or_default();
    let attractions = if attractions.is_empty() {
        text(keys::SUMMARY_NO_ATTRACTIONS)
    } else {
        attractions.join(", ")
    };

    let hotel = selection
        .hotel()
        .and_then(|choice| catalog.hotel(&choice.hotel_id))
        .map(|hotel| hotel.name.get(lang).to_string())
        .unwrap_or_else(|| text(keys::SUMMARY_NO_HOTEL));

    let fmt_date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let dates = format!(
        "{} – {} ({} {})",
        fmt_date(selection.start_date()),
        fmt_date(selection.end_date()),
        price.nights,
        text(keys::SUMMARY_NIGHTS)
    );

    vec![
        row(keys::SUMMARY_GOVERNORATE, governorate),
        row(keys::SUMMARY_ATTRACTIONS, attractions),
        row(keys::SUMMARY_HOTEL, hotel),
        row(keys::SUMMARY_DATES, dates),
        row(keys::SUMMARY_PEOPLE, selection.party_size().to_string()),
        row(
            keys::SUMMARY_TOTAL,
            format!("{} {}", price.grand_total, text(keys::CURRENCY)),
        ),
    ]
}
