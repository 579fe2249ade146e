//! Screen reader module for capturing and analyzing screen content

pub mod captures;
pub mod image_service;
pub mod pixels;
pub mod screen_service;

pub use captures::CaptureSession;
pub use image_service::{image_diff, image_diff_files, load_image, save_image};
pub use pixels::{BluePixelFilter, PixelFilter, PixelMatch};
pub use screen_service::{Region, ScreenService};
