//! HTTP front end for code-sleuth.
//!
//! Accepts two uploaded source files, runs the comparison pipeline from
//! `sleuth-detect` and returns both similarity scores with a verdict.
//!
//! # API Endpoints
//!
//! - `POST /check-plagiarism` - multipart fields `file1`, `file2`;
//!   optional query `lang`, `k`
//! - `GET /health` - liveness probe
//! - `GET /` - API information

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::AppState;
