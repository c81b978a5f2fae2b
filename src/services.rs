pub mod contact_service;
pub mod pricing_service;
pub mod session_service;
pub mod summary_service;
pub mod translation_service;
pub mod validation_service;
pub mod wizard_service;
