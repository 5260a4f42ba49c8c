//! Validation rules for form fields

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
            min_length: None,
        }
    }

    /// Create validation rules for a non-negative numeric field
    pub const fn non_negative() -> Self {
        Self {
            required: false,
            min: Some(0.0),
            max: None,
            min_length: None,
        }
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} не может быть пустым", field_label));
        }

        if let Some(min) = self.min_length {
            if value.len() < min {
                return Err(format!(
                    "{} должен содержать минимум {} символов",
                    field_label, min
                ));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} должен быть не менее {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} должен быть не более {}", field_label, max));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_whitespace() {
        let rules = ValidationRules::required();
        assert!(rules.validate_string("   ", "Поле").is_err());
        assert!(rules.validate_string("значение", "Поле").is_ok());
    }

    #[test]
    fn test_non_negative_bounds() {
        let rules = ValidationRules::non_negative();
        assert!(rules.validate_number(-0.5, "Высота").is_err());
        assert!(rules.validate_number(0.0, "Высота").is_ok());
        assert!(rules.validate_number(2.5, "Высота").is_ok());
    }
}
