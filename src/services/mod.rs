pub mod image_service;
pub mod link_rewriter;
pub mod naming;
pub mod output_cleaner;

pub use image_service::{ImageRewrite, ImageService};
pub use link_rewriter::LinkRewriter;
pub use output_cleaner::{clean_output_directories, CleanReport};
