pub mod fallback;
pub mod http;
pub mod traits;

pub use fallback::fallback_properties;
pub use http::HttpPropertySource;
pub use traits::PropertySource;
