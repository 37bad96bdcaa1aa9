pub mod interface;
pub mod client;

pub use interface::{TranslateError, Translator};
pub use client::GoogleTranslateClient;
