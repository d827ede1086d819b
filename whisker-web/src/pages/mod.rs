mod gallery;
mod layout;

pub use gallery::{CatDetail, Gallery, GalleryShell};
pub use layout::AppLayout;
