//! Client side of the posts app: the feed store, the composer and the
//! collaborators they talk to.

pub mod api;
pub mod composer;
pub mod feed;
pub mod prompt;
pub mod uploader;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiError, Authenticator, HttpPostsApi, PostsApi};
pub use composer::{Composer, ComposerError, UploadState};
pub use feed::{DeleteOutcome, FeedSnapshot, FeedStore};
pub use prompt::{Prompter, TerminalPrompter};
pub use uploader::{ImageFile, ImageKitUploader, ImageUploader, UploadError};
