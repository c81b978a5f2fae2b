pub mod catalog;
pub mod contact;
pub mod language;
pub mod selection;
pub mod wizard;
