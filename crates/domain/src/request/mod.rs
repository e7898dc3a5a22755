//! HTTP Request domain types

mod descriptor;
mod header;
mod method;
mod options;

pub use descriptor::RequestDescriptor;
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use options::RequestOptions;
