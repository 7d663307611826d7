//! Terminal client for the MGNREGA district performance API.
//!
//! Two screens make up the client: [`selector::SelectorScreen`] picks a
//! state and district, [`dashboard::DashboardScreen`] shows the district's
//! recent performance. Both share a single [`session::LanguageSetting`].

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod lang;
pub mod metrics;
pub mod notice;
pub mod output;
pub mod selector;
pub mod session;
pub mod types;
pub mod util;

pub use client::ApiClient;
pub use config::Config;
pub use error::{Error, Result};
pub use lang::Language;
