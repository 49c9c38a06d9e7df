pub mod lesson_registry;
pub mod pdf_fetcher;
pub mod source_loader;

pub use lesson_registry::LessonRegistry;
pub use pdf_fetcher::{is_valid_url, FetchOptions, FetchProgress, FetchedPdf, PdfFetcher};
pub use source_loader::{load_from_bytes, load_from_path};
