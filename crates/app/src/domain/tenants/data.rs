//! Tenant Data

use crate::{
    auth::passwords::{MIN_PASSWORD_CHARS, Password},
    domain::tenants::records::TenantUuid,
    validation::{self, ValidationErrors},
};

/// Registration payload.
#[derive(Debug, Clone)]
pub struct NewTenant {
    /// UUID to assign to the tenant row.
    pub uuid: TenantUuid,

    pub name: String,

    pub location: String,

    pub phone_number: String,

    pub email: String,

    /// Plaintext password; hashed before it reaches the repository.
    pub password: Password,
}

impl NewTenant {
    /// Normalise and check every field.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(mut self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validation::trimmed_length(
            &mut errors,
            "name",
            &mut self.name,
            2,
            100,
            "Name must be 2-100 characters",
        );

        validation::trimmed_length(
            &mut errors,
            "location",
            &mut self.location,
            2,
            200,
            "Location must be 2-200 characters",
        );

        check_password(&mut errors, &self.password);
        check_phone_number(&mut errors, &mut self.phone_number);
        check_email(&mut errors, &mut self.email);

        errors.finish(self)
    }
}

/// Login payload.
#[derive(Debug, Clone)]
pub struct TenantCredentials {
    pub name: String,
    pub location: String,
    pub password: Password,
}

impl TenantCredentials {
    /// Trim the lookup key and require all three fields.
    ///
    /// # Errors
    ///
    /// Returns an error for each empty field.
    pub fn validate(mut self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        validation::required(&mut errors, "name", &mut self.name, "Name is required");
        validation::required(
            &mut errors,
            "location",
            &mut self.location,
            "Location is required",
        );

        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }

        errors.finish(self)
    }
}

/// Contact details a tenant may change about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// Check whichever fields are present.
    ///
    /// # Errors
    ///
    /// Returns an error for each present field that is malformed.
    pub fn validate(mut self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(phone_number) = self.phone_number.as_mut() {
            check_phone_number(&mut errors, phone_number);
        }

        if let Some(email) = self.email.as_mut() {
            check_email(&mut errors, email);
        }

        errors.finish(self)
    }
}

pub(crate) fn check_password(errors: &mut ValidationErrors, password: &Password) {
    if password.char_count() < MIN_PASSWORD_CHARS {
        errors.push("password", "Password must be at least 6 characters");
    }
}

fn check_phone_number(errors: &mut ValidationErrors, phone_number: &mut String) {
    validation::trim_in_place(phone_number);

    if !validation::is_phone_number(phone_number) {
        errors.push("phoneNumber", "Phone number must be 10 digits");
    }
}

fn check_email(errors: &mut ValidationErrors, email: &mut String) {
    *email = email.trim().to_lowercase();

    if !validation::is_email(email) {
        errors.push("email", "Please provide valid email");
    }
}
