pub mod response;
pub mod responsebody;

// Re-exports for convenience
pub use response::HttpResponse;
pub use responsebody::ResponseBody;
