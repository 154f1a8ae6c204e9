use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for student/teacher contact data (phone numbers, Telegram handles)
/// that hides the value in Debug and Display output.
#[derive(Clone, Deserialize)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // API responses carry the real value; the mask exists to keep contact
        // data out of log macros like tracing::info!("{:?}", student).
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Masked(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    pub fn inner(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_masked() {
        let contact = Masked::new("+7 900 123-45-67".to_string());
        assert_eq!(format!("{:?}", contact), "********");
        assert_eq!(format!("{}", contact), "********");
    }

    #[test]
    fn serialization_keeps_real_value() {
        let contact = Masked::new("@student_chat".to_string());
        let json = serde_json::to_string(&contact).unwrap();
        assert_eq!(json, "\"@student_chat\"");
    }
}
