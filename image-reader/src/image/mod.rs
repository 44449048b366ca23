//! Image input resolution.
//!
//! Every tool accepts the same image arguments ([`ImageInput`]). They are
//! narrowed to exactly one [`ImageSource`] and then resolved by
//! [`ImageResolver`] into an [`ImageRef`]: either a remote URL or a
//! `data:<mime>;base64,<payload>` URL that the model API can consume without
//! further I/O.

pub mod errors;
pub mod mime;
pub mod resolve;
pub mod source;

pub use errors::ImageError;
pub use resolve::{ImageResolver, MAX_DOWNLOAD_BYTES};
pub use source::{Detail, ImageInput, ImageRef, ImageSource, UrlMode};
