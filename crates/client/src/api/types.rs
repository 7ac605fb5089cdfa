//! Wire types for the account backend.
//!
//! Every response wraps its payload in a `result` object. Fields are decoded
//! leniently: the backend sends some numeric-looking values (phone, postcode,
//! verification code) as JSON numbers and others as strings. A `result` or
//! nested object of the wrong shape counts as absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use ecom_account_core::{PasswordChange, Profile};

/// Raw response from the low-level `post` calls.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body, or `Value::Null` when the body is empty or not JSON.
    pub data: Value,
}

/// Decode the `result` of a `{"result": ...}` body.
///
/// Returns `None` when the body is not an object, has no `result`, or the
/// `result` does not have the shape of `T`.
pub(super) fn extract_result<T: DeserializeOwned>(data: Value) -> Option<T> {
    let Value::Object(mut body) = data else {
        return None;
    };
    let result = body.remove("result")?;
    serde_json::from_value(result)
        .map_err(|e| tracing::debug!(error = %e, "Ignoring malformed result"))
        .ok()
}

/// `result` of `/auth/login`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct LoginResult {
    #[serde(default, deserialize_with = "lenient_string")]
    pub token: String,
}

/// `result` of `/signUp`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct SignUpResult {
    #[serde(default, deserialize_with = "lenient_object")]
    pub status: Option<SignUpStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SignUpStatus {
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
}

/// `result` of `/user-details`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct UserDetailsResult {
    #[serde(default, rename = "userData", deserialize_with = "lenient_object")]
    pub user_data: Option<UserData>,
}

/// Profile as sent by the backend.
#[derive(Debug, Default, Deserialize)]
pub(super) struct UserData {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub postcode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
}

impl From<UserData> for Profile {
    fn from(data: UserData) -> Self {
        Self {
            name: data.name,
            email: data.email,
            phone: data.phone,
            country: data.country,
            state: data.state,
            city: data.city,
            postcode: data.postcode,
            full_address: data.address,
        }
    }
}

/// Accept a string, number, or boolean; anything else (including `null`)
/// becomes an empty string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Decode a nested object, treating any other shape as absent.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| serde_json::from_value(value).ok()))
}

/// Body of the profile-update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Trimmed profile values.
    pub profile: Profile,
    /// Trimmed `(old, new)` passwords, present only when changing password.
    pub password: Option<(String, String)>,
}

impl ProfileUpdate {
    /// Build an update from form values.
    #[must_use]
    pub fn new(profile: &Profile, password: &PasswordChange) -> Self {
        Self {
            profile: profile.trimmed(),
            password: password.submission(),
        }
    }

    /// Multipart form fields in wire order.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let p = &self.profile;
        let mut fields = vec![
            ("name", p.name.clone()),
            ("email", p.email.clone()),
            ("phone", p.phone.clone()),
            ("country", p.country.clone()),
            ("state", p.state.clone()),
            ("city", p.city.clone()),
            ("postcode", p.postcode.clone()),
            ("address", p.full_address.clone()),
        ];
        if let Some((old, new)) = &self.password {
            fields.push(("oldPassword", old.clone()));
            fields.push(("newPassword", new.clone()));
        }
        fields
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_data_accepts_numbers() {
        let data: UserData = serde_json::from_value(json!({
            "name": "Asha",
            "email": "asha@example.in",
            "phone": 9_876_543_210_u64,
            "country": "IN",
            "state": "Delhi",
            "city": "New Delhi",
            "postcode": 110_001,
            "address": "1 Janpath",
        }))
        .unwrap();

        let profile = Profile::from(data);
        assert_eq!(profile.phone, "9876543210");
        assert_eq!(profile.postcode, "110001");
        assert_eq!(profile.full_address, "1 Janpath");
    }

    #[test]
    fn test_user_data_nulls_become_empty() {
        let data: UserData =
            serde_json::from_value(json!({"name": "Asha", "state": null})).unwrap();
        let profile = Profile::from(data);
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.state, "");
        assert_eq!(profile.city, "");
    }

    #[test]
    fn test_signup_code_as_number() {
        let result: SignUpResult =
            extract_result(json!({"result": {"status": {"code": 482_913}}})).unwrap();
        assert_eq!(result.status.unwrap().code, "482913");
    }

    #[test]
    fn test_body_without_result() {
        assert!(extract_result::<LoginResult>(json!({"message": "nope"})).is_none());
        assert!(extract_result::<LoginResult>(Value::Null).is_none());
        assert!(extract_result::<LoginResult>(json!("OK")).is_none());
    }

    #[test]
    fn test_result_of_wrong_shape_is_absent() {
        assert!(extract_result::<LoginResult>(json!({"result": false})).is_none());
        assert!(extract_result::<LoginResult>(json!({"result": [1, 2]})).is_none());
        assert!(extract_result::<SignUpResult>(json!({"result": "pending"})).is_none());
    }

    #[test]
    fn test_nested_object_of_wrong_shape_is_absent() {
        let result: SignUpResult =
            extract_result(json!({"result": {"status": "pending"}})).unwrap();
        assert!(result.status.is_none());

        let result: UserDetailsResult =
            extract_result(json!({"result": {"userData": "missing"}})).unwrap();
        assert!(result.user_data.is_none());
    }

    #[test]
    fn test_form_fields_without_password() {
        let profile = Profile {
            name: " Asha ".into(),
            full_address: "1 Janpath".into(),
            ..Profile::default()
        };
        let update = ProfileUpdate::new(&profile, &PasswordChange::default());
        let fields = update.form_fields();

        let names: Vec<_> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            names,
            [
                "name", "email", "phone", "country", "state", "city", "postcode", "address"
            ]
        );
        assert_eq!(fields[0].1, "Asha");
        assert_eq!(fields[7].1, "1 Janpath");
    }

    #[test]
    fn test_form_fields_with_password() {
        let change = PasswordChange {
            old_password: "Old1234!".into(),
            new_password: "Abcdef1!".into(),
            confirm_password: "Abcdef1!".into(),
        };
        let update = ProfileUpdate::new(&Profile::default(), &change);
        let fields = update.form_fields();

        assert_eq!(fields.len(), 10);
        assert_eq!(fields[8], ("oldPassword", "Old1234!".to_string()));
        assert_eq!(fields[9], ("newPassword", "Abcdef1!".to_string()));
        assert!(fields.iter().all(|(k, _)| *k != "confirmPassword"));
    }
}
