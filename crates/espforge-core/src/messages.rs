//! User-facing strings, per locale.
//!
//! Errors shown to the user are deliberately short and carry no detail;
//! the underlying cause goes to the log.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fa,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Fa => write!(f, "fa"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown locale {0:?} (expected en or fa)")]
pub struct ParseLocaleError(String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "fa" | "persian" | "farsi" => Ok(Locale::Fa),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

/// The fixed message set for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub generate_failed: &'static str,
    pub suggest_failed: &'static str,
    pub welcome_title: &'static str,
    pub welcome_body: &'static str,
    pub loading_title: &'static str,
    pub loading_body: &'static str,
    pub error_title: &'static str,
    pub no_sections: &'static str,
}

const EN: Messages = Messages {
    generate_failed: "Something went wrong while generating the project. Please try again.",
    suggest_failed: "Could not get a new idea. Please check your connection.",
    welcome_title: "Welcome to the ESP32 project generator!",
    welcome_body: "Pick your project settings in the form and press Generate to get a full \
guide, schematic, and code for your project.",
    loading_title: "Building your project...",
    loading_body: "The AI is choosing the best pins and writing the code. Please wait.",
    error_title: "Processing error",
    no_sections: "The response did not contain any recognizable sections.",
};

const FA: Messages = Messages {
    generate_failed: "متاسفانه در تولید پروژه خطایی رخ داد. لطفاً دوباره تلاش کنید.",
    suggest_failed: "خطا در دریافت ایده جدید. لطفاً اتصال خود را بررسی کنید.",
    welcome_title: "به مولد پروژه ESP32 خوش آمدید!",
    welcome_body: "مشخصات پروژه خود را انتخاب کنید و دکمه تولید را بزنید تا راهنمای کامل، \
شماتیک و کد پروژه شما توسط هوش مصنوعی ساخته شود.",
    loading_title: "در حال ساخت پروژه شما...",
    loading_body: "هوش مصنوعی در حال انتخاب بهترین پین‌ها و نوشتن کد است. لطفاً کمی صبر کنید.",
    error_title: "خطا در پردازش",
    no_sections: "پاسخ شامل هیچ بخش قابل تشخیصی نبود.",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::En => &EN,
            Locale::Fa => &FA,
        }
    }
}
