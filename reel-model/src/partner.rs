use crate::error::{ModelError, Result};

/// A partner logo tile shown by the marquee.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partner {
    pub name: String,
    /// Logo asset path or URL. Loading it is the page's business.
    pub logo: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub category: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub url: Option<String>,
}

impl Partner {
    pub fn new(name: impl Into<String>, logo: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::InvalidItem("partner name is blank".into()));
        }
        Ok(Self {
            name,
            logo: logo.into(),
            category: None,
            url: None,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Alt text for the logo image.
    pub fn logo_alt(&self) -> String {
        format!("{} logo", self.name)
    }

    /// Whether the tile links out to the partner site.
    pub fn is_linked(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }
}
