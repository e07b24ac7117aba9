pub mod method;
pub mod proxy;
pub mod request;
pub mod uri;

pub mod parser;

mod version;
pub use version::HttpVersion;
