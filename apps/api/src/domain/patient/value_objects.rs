use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^\+?[0-9][0-9 \-]{3,30}$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PhoneNumber {
    #[validate(
        length(max = 32),
        regex(path = *PHONE_REGEX, message = "Phone must contain only digits, spaces or dashes.")
    )]
    pub value: String,
}

impl PhoneNumber {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let phone = Self { value };
        phone.validate()?;
        Ok(phone)
    }
}
