//! 类型模块：请求配置、响应记录与表单字段。
//!
//! # Types Module
//!
//! Plain data carried between the curl parser, the executor and the cache.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RequestConfig`] | Everything needed to issue (and cache) one request |
//! | [`ResponseRecord`] | Normalized response, also the on-disk cache entry |
//! | [`FormField`] | Ordered text or file field of a multipart upload |
//! | [`MultipartRequest`] | Target and fields of a multipart upload |
//! | [`SoapRequest`] / [`SoapResponse`] | XML-over-HTTP call and its result |

pub mod form;
pub mod request;
pub mod response;

pub use form::{FormField, MultipartRequest, SoapRequest, SoapResponse};
pub use request::{RequestConfig, DEFAULT_TIMEOUT};
pub use response::ResponseRecord;
