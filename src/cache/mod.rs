mod disk;
mod memory;

pub use disk::ThumbnailCache;
pub use memory::ThumbnailMemoryCache;
