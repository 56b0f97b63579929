//! Task API configuration core.
//!
//! Loads nested configuration structures from a flat, namespaced
//! environment. Structures are declared with [`env_config!`], which attaches
//! per-field tags:
//!
//! ```
//! use task_todo_api::{env_config, loader::{self, Environment}};
//!
//! env_config! {
//!     #[derive(Debug, Default)]
//!     pub struct Server {
//!         pub port: u16 [env = "PORT", default = "8080"],
//!         pub origins: Vec<String> [env = "ORIGINS"],
//!     }
//! }
//!
//! env_config! {
//!     #[derive(Debug, Default)]
//!     pub struct Settings {
//!         pub server: Server [namespace = "APP"],
//!     }
//! }
//!
//! let env = Environment::from_lines(["APP_ORIGINS=a.example, b.example"]);
//! let mut settings = Settings::default();
//! loader::parse_with(&env, &mut settings).unwrap();
//!
//! assert_eq!(settings.server.port, 8080);
//! assert_eq!(settings.server.origins, ["a.example", "b.example"]);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod loader;
