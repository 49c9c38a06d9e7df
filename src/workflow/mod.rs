pub mod page_range;
pub mod session;

pub use page_range::parse_page_range;
pub use session::{PageState, Session};
