use chrono::Utc;
use regex::Regex;

use crate::models::contact::{ContactField, ContactFieldError, ContactMessage, ContactReceipt};
use crate::models::language::Language;
use crate::services::translation_service::{keys, localize, localize_with, Translator};
use crate::services::wizard_service::generate_reference;

const MIN_NAME_LENGTH: usize = 3;
const MIN_MESSAGE_LENGTH: usize = 10;

fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map(|re| re.is_match(email))
        .unwrap_or(false)
}

// Egyptian mobile numbers: optional +20 or 0, then 10, 11, 12 or 15 and eight digits
fn is_valid_phone(phone: &str) -> bool {
    let cleaned: String = phone.chars().filter(|c| *c != ' ' && *c != '-').collect();
    Regex::new(r"^(\+20|0)?1[0125]\d{8}$")
        .map(|re| re.is_match(&cleaned))
        .unwrap_or(false)
}

/// Check the standalone contact form. Unlike the wizard's contact step this
/// enforces formats and minimum lengths.
pub fn validate_contact_message(
    message: &ContactMessage,
    translator: &dyn Translator,
    lang: Language,
) -> Vec<ContactFieldError> {
    let mut errors = Vec::new();
    let mut push = |field: ContactField, text: String| {
        errors.push(ContactFieldError {
            field,
            message: text,
        })
    };
    let required = || localize(translator, keys::REQUIRED, lang);
    let min_length = |min: usize| {
        localize_with(translator, keys::MIN_LENGTH, lang, &[("min", min.to_string().as_str())])
    };

    let name = message.name.trim();
    if name.is_empty() {
        push(ContactField::Name, required());
    } else if name.chars().count() < MIN_NAME_LENGTH {
        push(ContactField::Name, min_length(MIN_NAME_LENGTH));
    }

    let email = message.email.trim();
    if email.is_empty() {
        push(ContactField::Email, required());
    } else if !is_valid_email(email) {
        push(ContactField::Email, localize(translator, keys::INVALID_EMAIL, lang));
    }

    let phone = message.phone.trim();
    if phone.is_empty() {
        push(ContactField::Phone, required());
    } else if !is_valid_phone(phone) {
        push(ContactField::Phone, localize(translator, keys::INVALID_PHONE, lang));
    }

    let body = message.message.trim();
    if body.is_empty() {
        push(ContactField::Message, required());
    } else if body.chars().count() < MIN_MESSAGE_LENGTH {
        push(ContactField::Message, min_length(MIN_MESSAGE_LENGTH));
    }

    errors
}

/// Accept a contact message. Nothing is sent anywhere; the message is logged
/// and acknowledged.
pub fn submit_contact_message(
    message: &ContactMessage,
    translator: &dyn Translator,
    lang: Language,
) -> Result<ContactReceipt, Vec<ContactFieldError>> {
    let errors = validate_contact_message(message, translator, lang);
    if !errors.is_empty() {
        return Err(errors);
    }

    let receipt = ContactReceipt {
        reference: generate_reference(),
        received_at: Utc::now(),
        message: localize(translator, keys::CONTACT_SUCCESS, lang),
    };
    log::info!(
        "Contact message {} received from {} <{}>",
        receipt.reference,
        message.name.trim(),
        message.email.trim()
    );
    Ok(receipt)
}
