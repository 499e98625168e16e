mod catalog;
mod editor;
mod quote;
mod recent;
mod scan;

pub use catalog::*;
pub use editor::*;
pub use quote::Quote;
pub use recent::RecentProject;
pub use scan::*;
