pub use crate::error::ExtractorError;
pub use crate::handlers::aibooru::AIBooruHandler;
pub use crate::handlers::danbooru::DanbooruHandler;
pub use crate::handlers::e621::E621Handler;
pub use crate::handlers::gelbooru::GelbooruHandler;
pub use crate::handlers::BooruHandler;
pub use crate::handlers::HandlerFeatures;
pub use crate::registry::HandlerRegistry;
pub use crate::registry::DEFAULT_REGISTRY;
pub use crate::tags::TagOptions;
