use crate::error::{ModelError, Result};

/// A customer quote shown by the testimonial rotator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub company: Option<String>,
}

impl Testimonial {
    /// Build a testimonial, rejecting blank quotes or authors.
    pub fn new(
        quote: impl Into<String>,
        author: impl Into<String>,
        role: impl Into<String>,
        company: Option<String>,
    ) -> Result<Self> {
        let quote = quote.into();
        let author = author.into();
        if quote.trim().is_empty() {
            return Err(ModelError::InvalidItem(
                "testimonial quote is blank".into(),
            ));
        }
        if author.trim().is_empty() {
            return Err(ModelError::InvalidItem(
                "testimonial author is blank".into(),
            ));
        }
        Ok(Self {
            quote,
            author,
            role: role.into(),
            company,
        })
    }

    /// Role line under the author, e.g. `"CTO, Acme"`.
    pub fn byline(&self) -> String {
        match self.company.as_deref() {
            Some(company) if !company.is_empty() => {
                format!("{}, {}", self.role, company)
            }
            _ => self.role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byline_appends_company_when_present() {
        let t = Testimonial::new("Great", "Ada", "CTO", Some("Acme".into()))
            .unwrap();
        assert_eq!(t.byline(), "CTO, Acme");

        let t = Testimonial::new("Great", "Ada", "CTO", None).unwrap();
        assert_eq!(t.byline(), "CTO");
    }

    #[test]
    fn blank_quote_is_rejected() {
        let err = Testimonial::new("  ", "Ada", "CTO", None).unwrap_err();
        assert!(matches!(err, ModelError::InvalidItem(_)));
    }
}
