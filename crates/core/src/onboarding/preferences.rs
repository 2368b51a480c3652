//! Work-style preference form
//!
//! Three fixed binary axes. The form is complete only when every axis has a
//! value.

use pathwise_domain::{
    CodingPreference, CreativePreference, EnvironmentPreference, PathwiseError, Preferences,
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceAxis {
    Coding,
    Creative,
    Environment,
}

pathwise_domain::impl_wire_name_conversions!(PreferenceAxis {
    Coding => "coding",
    Creative => "creative",
    Environment => "environment",
});

impl PreferenceAxis {
    pub const ALL: [PreferenceAxis; 3] = [Self::Coding, Self::Creative, Self::Environment];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Coding => "Code vs Non-Code",
            Self::Creative => "Creative vs Analytical",
            Self::Environment => "Indoor vs Outdoor",
        }
    }

    /// `(wire value, display label)` for both sides of the axis.
    pub fn options(&self) -> [(&'static str, &'static str); 2] {
        match self {
            Self::Coding => [("code", "Code"), ("non-code", "Non-Code")],
            Self::Creative => [("creative", "Creative"), ("analytical", "Analytical")],
            Self::Environment => [("indoor", "Indoor"), ("outdoor", "Outdoor")],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferenceForm {
    pub coding: Option<CodingPreference>,
    pub creative: Option<CreativePreference>,
    pub environment: Option<EnvironmentPreference>,
}

impl PreferenceForm {
    /// Set one axis from its wire value (e.g. `"non-code"`).
    ///
    /// # Errors
    /// Returns `InvalidInput` when `value` is not one of the axis' options.
    pub fn set(&mut self, axis: PreferenceAxis, value: &str) -> Result<()> {
        let invalid = |_| {
            PathwiseError::InvalidInput(format!("'{value}' is not an option for {}", axis.label()))
        };
        match axis {
            PreferenceAxis::Coding => self.coding = Some(value.parse().map_err(invalid)?),
            PreferenceAxis::Creative => self.creative = Some(value.parse().map_err(invalid)?),
            PreferenceAxis::Environment => {
                self.environment = Some(value.parse().map_err(invalid)?)
            }
        }
        Ok(())
    }

    /// Wire value currently chosen on `axis`.
    pub fn value(&self, axis: PreferenceAxis) -> Option<&'static str> {
        match axis {
            PreferenceAxis::Coding => self.coding.map(|v| v.as_str()),
            PreferenceAxis::Creative => self.creative.map(|v| v.as_str()),
            PreferenceAxis::Environment => self.environment.map(|v| v.as_str()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }

    pub fn complete(&self) -> Option<Preferences> {
        Some(Preferences {
            coding: self.coding?,
            creative: self.creative?,
            environment: self.environment?,
        })
    }
}
