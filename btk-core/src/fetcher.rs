//! The fetch pipeline: pick a handler, query the post, get its image and process its tags.
//!
//! A fetch walks through these stages, in order:
//!
//! | Stage | Done when |
//! |---|---|
//! | [`Idle`](FetchStage::Idle) | the request arrived |
//! | [`HandlerResolved`](FetchStage::HandlerResolved) | a handler was picked for the URL |
//! | [`Fetched`](FetchStage::Fetched) | the post JSON was retrieved |
//! | [`Parsed`](FetchStage::Parsed) | the JSON was mapped to tags, dimensions and an image URL |
//! | [`ImageResolved`](FetchStage::ImageResolved) | image downloaded or replaced by a placeholder |
//! | [`TagsProcessed`](FetchStage::TagsProcessed) | exclusion, formatting and trailing comma ran |
//! | [`Done`](FetchStage::Done) | the [`FetchResult`] was assembled |
//!
//! Any error before [`ImageResolved`](FetchStage::ImageResolved) aborts the fetch. Image
//! failures don't: they are logged and the placeholder is used.
use std::{fmt::Display, time::Duration};

use btk_common::{
    client,
    log::{debug, error, info},
    post::size::ImageSize,
    reqwest::Client,
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
use btk_extractors::{
    handlers::BooruHandler,
    registry::{HandlerRegistry, DEFAULT_REGISTRY},
};

use crate::{
    error::ToolkitError,
    media::{download_image, placeholder},
    preset::OutputPreset,
    request::{FetchRequest, ServiceSelector},
    result::{FetchResult, ImageSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStage {
    Idle,
    HandlerResolved,
    Fetched,
    Parsed,
    ImageResolved,
    TagsProcessed,
    Done,
}

impl Display for FetchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::HandlerResolved => "handler resolved",
            Self::Fetched => "fetched",
            Self::Parsed => "parsed",
            Self::ImageResolved => "image resolved",
            Self::TagsProcessed => "tags processed",
            Self::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// HTTP settings shared by the API and image requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    pub user_agent: String,
    /// Limit for each request, not for the whole fetch.
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: String::from(DEFAULT_USER_AGENT),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Runs fetch requests against the handlers of a [`HandlerRegistry`].
///
/// The fetcher holds no per-request state, so one instance can serve any number of requests.
#[derive(Debug, Clone)]
pub struct PostFetcher<'r> {
    client: Client,
    registry: &'r HandlerRegistry,
    bound: Option<&'r dyn BooruHandler>,
}

impl PostFetcher<'static> {
    /// Fetcher over the built-in handlers.
    pub fn new(config: &FetcherConfig) -> Result<Self, ToolkitError> {
        Self::with_registry(config, &DEFAULT_REGISTRY)
    }
}

impl<'r> PostFetcher<'r> {
    pub fn with_registry(
        config: &FetcherConfig,
        registry: &'r HandlerRegistry,
    ) -> Result<Self, ToolkitError> {
        let client = client!(config.user_agent.as_str(), config.timeout)?;

        Ok(Self {
            client,
            registry,
            bound: None,
        })
    }

    /// Always use `handler`, ignoring the URL and the service selector of requests.
    pub fn bound(mut self, handler: &'r dyn BooruHandler) -> Self {
        self.bound = Some(handler);
        self
    }

    /// Binds the handler of `preset`, if it has one.
    pub fn with_preset(self, preset: OutputPreset) -> Result<Self, ToolkitError> {
        let Some(name) = preset.handler_name() else {
            return Ok(self);
        };

        let handler = self
            .registry
            .resolve_by_name(name)
            .ok_or_else(|| ToolkitError::NoHandlerFound {
                selector: name.to_string(),
            })?;

        Ok(self.bound(handler))
    }

    /// Picks the handler for a request.
    ///
    /// A bound handler always wins. Otherwise `auto` matches the URL's hostname and a name
    /// is looked up in the registry.
    pub fn resolve_handler(
        &self,
        request: &FetchRequest,
    ) -> Result<&'r dyn BooruHandler, ToolkitError> {
        if let Some(handler) = self.bound {
            return Ok(handler);
        }

        let handler = match &request.service {
            ServiceSelector::Auto => self.registry.resolve_for_url(&request.url),
            ServiceSelector::Named(name) => self.registry.resolve_by_name(name),
        };

        handler.ok_or_else(|| ToolkitError::NoHandlerFound {
            selector: match &request.service {
                ServiceSelector::Auto => request.url.clone(),
                ServiceSelector::Named(name) => name.clone(),
            },
        })
    }

    /// Runs the whole pipeline for one post.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult, ToolkitError> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(ToolkitError::InvalidInput {
                message: String::from("the post URL is empty"),
            });
        }

        let handler = self.resolve_handler(request)?;
        let name = handler.name();
        transition(name, FetchStage::Idle, FetchStage::HandlerResolved);

        // Surface URL problems as input errors instead of fetch errors.
        handler
            .get_api_url(url)
            .map_err(|source| ToolkitError::InvalidUrl {
                handler: name,
                source,
            })?;

        let raw = handler
            .fetch(&self.client, url)
            .await
            .map_err(|source| ToolkitError::FetchFailed {
                handler: name,
                source,
            })?;
        transition(name, FetchStage::HandlerResolved, FetchStage::Fetched);

        let post = handler
            .parse(&raw, request.image_size)
            .map_err(|source| ToolkitError::ParseFailed {
                handler: name,
                source,
            })?;
        transition(name, FetchStage::Fetched, FetchStage::Parsed);

        let (image, image_source) = self
            .resolve_image(request.image_size, post.image_url.as_deref())
            .await;
        transition(name, FetchStage::Parsed, FetchStage::ImageResolved);

        let mut tags = post.tags;
        request.tag_options.apply(&mut tags);
        transition(name, FetchStage::ImageResolved, FetchStage::TagsProcessed);

        let result = FetchResult {
            handler: name,
            image,
            image_source,
            tags,
            width: post.width,
            height: post.height,
        };
        transition(name, FetchStage::TagsProcessed, FetchStage::Done);

        Ok(result)
    }

    async fn resolve_image(
        &self,
        size: ImageSize,
        url: Option<&str>,
    ) -> (image::DynamicImage, ImageSource) {
        let reason = match (size, url) {
            (ImageSize::None, _) => String::from("no image requested"),
            (_, None) => String::from("the post has no image URL"),
            (_, Some(url)) => match download_image(&self.client, url).await {
                Ok(image) => {
                    info!("Downloaded {}x{} image", image.width(), image.height());
                    return (
                        image,
                        ImageSource::Downloaded {
                            url: url.to_string(),
                        },
                    );
                }
                Err(e) => {
                    error!("Failed to download image from {url}: {e}. Using placeholder");
                    e.to_string()
                }
            },
        };

        debug!("Using placeholder image: {reason}");
        (placeholder(), ImageSource::Placeholder { reason })
    }
}

#[inline]
fn transition(handler: &str, from: FetchStage, to: FetchStage) {
    debug!("[{handler}] {from} -> {to}");
}

/// Fetches a post with the built-in handlers and the default HTTP settings.
///
/// `service` is `auto` or a handler name, `image_size` one of `none`, `180x180`, `360x360`,
/// `720x720`, `sample` or `original`.
pub async fn fetch_post(
    url: &str,
    service: &str,
    image_size: &str,
    format_tags: bool,
    trailing_comma: bool,
    exclude_tags: bool,
    excluded_tags_csv: &str,
) -> Result<FetchResult, ToolkitError> {
    let request = FetchRequest::parse_strings(
        url,
        service,
        image_size,
        format_tags,
        trailing_comma,
        exclude_tags,
        excluded_tags_csv,
    )?;

    PostFetcher::new(&FetcherConfig::default())?
        .fetch(&request)
        .await
}
