use serde_json::Value;
use std::fmt;
use std::path::Path;

use crate::models::language::Language;

pub mod keys {
    pub const REQUIRED: &str = "validation.required";
    pub const SELECT_DESTINATION: &str = "validation.selectDestination";
    pub const END_DATE_BEFORE_START: &str = "validation.endDateBeforeStart";
    pub const MIN_VALUE: &str = "validation.minValue";
    pub const MIN_LENGTH: &str = "validation.minLength";
    pub const INVALID_EMAIL: &str = "validation.invalidEmail";
    pub const INVALID_PHONE: &str = "validation.invalidPhone";
    pub const SELECT_HOTEL: &str = "tripWizard.step2.selectHotel";
    pub const CURRENCY: &str = "common.egp";
    pub const SUMMARY_GOVERNORATE: &str = "tripWizard.summary.governorate";
    pub const SUMMARY_ATTRACTIONS: &str = "tripWizard.summary.attractions";
    pub const SUMMARY_HOTEL: &str = "tripWizard.summary.hotel";
    pub const SUMMARY_DATES: &str = "tripWizard.summary.dates";
    pub const SUMMARY_PEOPLE: &str = "tripWizard.summary.people";
    pub const SUMMARY_TOTAL: &str = "tripWizard.summary.total";
    pub const SUMMARY_NIGHTS: &str = "tripWizard.summary.nights";
    pub const SUMMARY_NO_ATTRACTIONS: &str = "tripWizard.summary.noAttractions";
    pub const SUMMARY_NO_HOTEL: &str = "tripWizard.summary.noHotel";
    pub const CONTACT_SUCCESS: &str = "contact.success";
}

/// Source of localized strings, looked up by dotted key.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str, lang: Language) -> Option<String>;
}

/// Translator that knows nothing; every lookup falls through to the defaults.
pub struct NoTranslations;

impl Translator for NoTranslations {
    fn translate(&self, _key: &str, _lang: Language) -> Option<String> {
        None
    }
}

#[derive(Debug)]
pub enum TranslationError {
    Io(String),
    Parse(String),
    InvalidShape,
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::Io(err) => write!(f, "Failed to read translations: {}", err),
            TranslationError::Parse(err) => write!(f, "Failed to parse translations: {}", err),
            TranslationError::InvalidShape => {
                write!(f, "Translations must be an object keyed by language code")
            }
        }
    }
}

impl std::error::Error for TranslationError {}

/// Nested translation document of the form `{ "ar": {...}, "en": {...} }`.
pub struct JsonTranslations {
    translations: Value,
}

impl JsonTranslations {
    pub fn new(translations: Value) -> Result<Self, TranslationError> {
        if !translations.is_object() {
            return Err(TranslationError::InvalidShape);
        }
        Ok(Self { translations })
    }

    pub fn from_json_str(json: &str) -> Result<Self, TranslationError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| TranslationError::Parse(e.to_string()))?;
        Self::new(value)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TranslationError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| TranslationError::Io(e.to_string()))?;
        Self::from_json_str(&raw)
    }
}

impl Translator for JsonTranslations {
    fn translate(&self, key: &str, lang: Language) -> Option<String> {
        let mut value = self.translations.get(lang.code())?;
        for part in key.split('.') {
            value = value.as_object()?.get(part)?;
        }
        value.as_str().map(str::to_string)
    }
}

/// Built-in text used when a translation is missing.
pub fn default_text(key: &str, lang: Language) -> Option<&'static str> {
    let text = match (key, lang) {
        (keys::REQUIRED, Language::Ar) => "هذا الحقل مطلوب",
        (keys::REQUIRED, Language::En) => "This field is required",
        (keys::SELECT_DESTINATION, Language::Ar) => "يرجى اختيار وجهة واحدة على الأقل",
        (keys::SELECT_DESTINATION, Language::En) => "Please select at least one destination",
        (keys::END_DATE_BEFORE_START, Language::Ar) => "تاريخ النهاية يجب أن يكون بعد تاريخ البداية",
        (keys::END_DATE_BEFORE_START, Language::En) => "End date must be after start date",
        (keys::MIN_VALUE, Language::Ar) => "القيمة يجب أن تكون {min} على الأقل",
        (keys::MIN_VALUE, Language::En) => "Value must be at least {min}",
        (keys::MIN_LENGTH, Language::Ar) => "يجب أن يحتوي على {min} أحرف على الأقل",
        (keys::MIN_LENGTH, Language::En) => "Must be at least {min} characters",
        (keys::INVALID_EMAIL, Language::Ar) => "يرجى إدخال بريد إلكتروني صحيح",
        (keys::INVALID_EMAIL, Language::En) => "Please enter a valid email address",
        (keys::INVALID_PHONE, Language::Ar) => "يرجى إدخال رقم هاتف مصري صحيح",
        (keys::INVALID_PHONE, Language::En) => "Please enter a valid Egyptian phone number",
        (keys::SELECT_HOTEL, Language::Ar) => "يرجى اختيار فندق",
        (keys::SELECT_HOTEL, Language::En) => "Please select a hotel",
        (keys::CURRENCY, Language::Ar) => "ج.م",
        (keys::CURRENCY, Language::En) => "EGP",
        (keys::SUMMARY_GOVERNORATE, Language::Ar) => "المحافظة",
        (keys::SUMMARY_GOVERNORATE, Language::En) => "Governorate",
        (keys::SUMMARY_ATTRACTIONS, Language::Ar) => "المعالم",
        (keys::SUMMARY_ATTRACTIONS, Language::En) => "Attractions",
        (keys::SUMMARY_HOTEL, Language::Ar) => "الفندق",
        (keys::SUMMARY_HOTEL, Language::En) => "Hotel",
        (keys::SUMMARY_DATES, Language::Ar) => "التواريخ",
        (keys::SUMMARY_DATES, Language::En) => "Dates",
        (keys::SUMMARY_PEOPLE, Language::Ar) => "الافراد",
        (keys::SUMMARY_PEOPLE, Language::En) => "People",
        (keys::SUMMARY_TOTAL, Language::Ar) => "السعر الاجمالي",
        (keys::SUMMARY_TOTAL, Language::En) => "Total price",
        (keys::SUMMARY_NIGHTS, Language::Ar) => "ليالي",
        (keys::SUMMARY_NIGHTS, Language::En) => "nights",
        (keys::SUMMARY_NO_ATTRACTIONS, Language::Ar) => "لم يتم اختيار معالم",
        (keys::SUMMARY_NO_ATTRACTIONS, Language::En) => "No attractions selected",
        (keys::SUMMARY_NO_HOTEL, Language::Ar) => "لم يتم اختيار فندق",
        (keys::SUMMARY_NO_HOTEL, Language::En) => "No hotel selected",
        (keys::CONTACT_SUCCESS, Language::Ar) => "تم إرسال رسالتك بنجاح",
        (keys::CONTACT_SUCCESS, Language::En) => "Your message has been sent successfully",
        _ => return None,
    };
    Some(text)
}

/// Resolve `key` through the translator, then the built-in default, then the
/// key itself. Never returns an empty string.
pub fn localize(translator: &dyn Translator, key: &str, lang: Language) -> String {
    translator
        .translate(key, lang)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| default_text(key, lang).map(str::to_string))
        .unwrap_or_else(|| key.to_string())
}

/// Like [`localize`], substituting `{name}` placeholders afterwards.
pub fn localize_with(
    translator: &dyn Translator,
    key: &str,
    lang: Language,
    params: &[(&str, &str)],
) -> String {
    params
        .iter()
        .fold(localize(translator, key, lang), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
}
