//! Lightweight natural-language contact extraction.
//!
//! Users type things like "Anna, anna@mail.com, +7 999 123-45-67" and the
//! extractor pulls out whatever fields it can recognize.

use regex::Regex;

/// Fields recognized in one message. All optional; an empty result means the
/// text carried nothing that looks like contact data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
}

impl ContactFields {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.name.is_none()
    }
}

pub struct ContactExtractor {
    email_re: Regex,
    phone_re: Regex,
    labeled_name_re: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        // The patterns are fixed and known to compile.
        Self {
            email_re: Regex::new(r"[\w.\-+]+@[\w.\-]+\.\w{2,}").unwrap(),
            phone_re: Regex::new(r"\+?[78][\s\-(]*\d{3}[\s\-)]*\d{3}[\s\-]*\d{2}[\s\-]*\d{2}")
                .unwrap(),
            labeled_name_re: Regex::new(r"(?i)(?:name|имя)\s*[:\-]\s*([\p{L}]+)").unwrap(),
        }
    }

    /// Extracts email, phone, and an explicitly labeled name ("name: Anna").
    pub fn extract(&self, text: &str) -> ContactFields {
        let email = self.email_re.find(text).map(|m| m.as_str().to_string());
        let phone = self.phone_re.find(text).map(|m| normalize_phone(m.as_str()));
        let name = self
            .labeled_name_re
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        ContactFields { email, phone, name }
    }

    /// Like [`extract`](Self::extract), but when the user was explicitly
    /// asked for contact data the first plain word also counts as a name.
    /// Tokens that look like emails or phones never do.
    pub fn extract_expecting_name(&self, text: &str) -> ContactFields {
        let mut fields = self.extract(text);
        if fields.name.is_none() {
            fields.name = text
                .split([',', ';', '\n', ' '])
                .map(str::trim)
                .find(|token| {
                    !token.is_empty()
                        && !token.contains('@')
                        && !token.chars().any(|c| c.is_ascii_digit())
                        && token.chars().all(|c| c.is_alphabetic() || c == '-')
                })
                .map(|token| token.to_string());
        }
        fields
    }
}

/// Keeps digits only, with the leading `+` when present.
fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if raw.trim_start().starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}
