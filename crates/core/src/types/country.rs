//! Country reference table.
//!
//! Phone and postcode formats, and the selectable states, depend on the
//! country picked in the address form. Each supported country is one
//! [`CountryRules`] entry; countries outside the table fall back to a
//! "must not be empty" rule for phone and postcode and accept any state.

use std::sync::LazyLock;

use regex::Regex;

static IN_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("Invalid regex"));

static TEN_DIGIT_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid regex"));

static IN_POSTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("Invalid regex"));

static US_ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("Invalid regex"));

/// Validation strategy and state list for one country.
#[derive(Debug)]
pub struct CountryRules {
    /// ISO 3166-1 alpha-2 code, as sent to the backend.
    pub code: &'static str,
    /// Display name for pickers.
    pub name: &'static str,
    /// States or provinces the user may select.
    pub states: &'static [&'static str],
    phone: &'static LazyLock<Regex>,
    postcode: &'static LazyLock<Regex>,
}

impl CountryRules {
    /// Whether `phone` is a valid number for this country.
    #[must_use]
    pub fn accepts_phone(&self, phone: &str) -> bool {
        self.phone.is_match(phone)
    }

    /// Whether `postcode` is a valid postal code for this country.
    #[must_use]
    pub fn accepts_postcode(&self, postcode: &str) -> bool {
        self.postcode.is_match(postcode)
    }

    /// Whether `state` is one of this country's selectable states.
    #[must_use]
    pub fn has_state(&self, state: &str) -> bool {
        self.states.contains(&state)
    }
}

/// Supported countries, in picker order.
pub static COUNTRIES: [CountryRules; 2] = [
    CountryRules {
        code: "IN",
        name: "India",
        states: &[
            "West Bengal",
            "Maharashtra",
            "Delhi",
            "Karnataka",
            "Tamil Nadu",
        ],
        phone: &IN_PHONE_RE,
        postcode: &IN_POSTCODE_RE,
    },
    CountryRules {
        code: "US",
        name: "United States",
        states: &["California", "Texas", "New York", "Florida", "Washington"],
        phone: &TEN_DIGIT_PHONE_RE,
        postcode: &US_ZIP_RE,
    },
];

/// Look up the rules for a country code (case-insensitive).
#[must_use]
pub fn country_rules(code: &str) -> Option<&'static CountryRules> {
    let code = code.trim();
    COUNTRIES
        .iter()
        .find(|rules| rules.code.eq_ignore_ascii_case(code))
}

/// States selectable for a country code. Empty for unknown countries.
#[must_use]
pub fn states_for(code: &str) -> &'static [&'static str] {
    country_rules(code).map_or(&[], |rules| rules.states)
}

/// Whether `phone` is exactly ten ASCII digits (the signup form rule).
pub(crate) fn is_ten_digit_phone(phone: &str) -> bool {
    TEN_DIGIT_PHONE_RE.is_match(phone)
}
