//! What the caller asks for: which post, from which service, at which size and how to process
//! its tags.
use std::{convert::Infallible, fmt::Display, str::FromStr};

use btk_common::post::size::ImageSize;
use btk_extractors::{registry::AUTO_SERVICE, tags::TagOptions};

use crate::error::ToolkitError;

/// How the handler for a request is picked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceSelector {
    /// Pick the handler from the hostname of the post URL.
    #[default]
    Auto,
    /// Use the handler registered under this name.
    Named(String),
}

impl FromStr for ServiceSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(AUTO_SERVICE) {
            return Ok(Self::Auto);
        }
        Ok(Self::Named(s.to_string()))
    }
}

impl Display for ServiceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "{AUTO_SERVICE}"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub service: ServiceSelector,
    pub image_size: ImageSize,
    pub tag_options: TagOptions,
}

impl FetchRequest {
    /// Request for `url` with auto service selection, the `sample` size and default tag options.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            service: ServiceSelector::Auto,
            image_size: ImageSize::default(),
            tag_options: TagOptions::default(),
        }
    }

    pub fn with_service(mut self, service: ServiceSelector) -> Self {
        self.service = service;
        self
    }

    pub fn with_image_size(mut self, image_size: ImageSize) -> Self {
        self.image_size = image_size;
        self
    }

    pub fn with_tag_options(mut self, tag_options: TagOptions) -> Self {
        self.tag_options = tag_options;
        self
    }

    /// Builds a request from plain string/boolean inputs.
    ///
    /// Fails with an invalid input error if `image_size` isn't a known size.
    pub fn parse_strings(
        url: &str,
        service: &str,
        image_size: &str,
        format_tags: bool,
        trailing_comma: bool,
        exclude_tags: bool,
        excluded_tags_csv: &str,
    ) -> Result<Self, ToolkitError> {
        let service = service.parse::<ServiceSelector>().unwrap_or_default();
        let image_size = image_size.parse::<ImageSize>()?;

        Ok(Self {
            url: url.trim().to_string(),
            service,
            image_size,
            tag_options: TagOptions {
                format_tags,
                trailing_comma,
                exclude_tags,
                excluded_tags: excluded_tags_csv.to_string(),
            },
        })
    }
}
