//! Trackprobe resolves a song title and artist name, as typed or picked from a
//! spreadsheet, to a single catalog track and its audio characteristics.
//!
//! ## Configuration
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! trackprobe = "0.1.0"
//! ```
//!
//! Trackprobe uses asynchronous programming with `async` and `await`.
//!
//! ## Authorization
//!
//! The catalog is accessed with a client-credentials grant. Every resolution
//! exchanges the client id and secret for a fresh short-lived token, so no
//! session is ever shared between two resolutions.
//!
//! The credentials are read from `TRACKPROBE_CLIENT_ID` and
//! `TRACKPROBE_CLIENT_SECRET`, or passed directly to [`config::CatalogConfig`].
//!
//! ### Examples
//!
//! ```toml
//! [dependencies]
//! trackprobe = { version = "0.1.0" }
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ```rust,no_run
//! use trackprobe::config::CatalogConfig;
//! use trackprobe::resolver::Resolver;
//! use dotenv::dotenv;
//!
//! #[tokio::main]
//! async fn main() {
//!     {
//!         dotenv().ok();
//!     }
//!
//!     let config = CatalogConfig::from_env().unwrap();
//!     let resolver = Resolver::new(config);
//!
//!     match resolver.resolve("Yesterday", "The Beatles").await {
//!         Ok(resolution) => {
//!             println!("{:?}", resolution.track);
//!             if let Some(advisory) = resolution.advisory() {
//!                 println!("{}", advisory);
//!             }
//!         }
//!         Err(err) => println!("{}", err),
//!     }
//! }
//! ```

pub mod auth;
pub mod canonical;
pub mod client;
pub mod config;
pub mod dataset;
pub mod endpoints;
pub mod features;
pub mod links;
pub mod model;
pub mod resolver;
