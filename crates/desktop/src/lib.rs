//! `salesdesk-desktop`
//!
//! **Responsibility:** the sales entry form as a toolkit-neutral presenter.
//!
//! This crate provides:
//! - the form state (input fields, grid selection, validation notification)
//! - a serializable render model for a webview or terminal
//! - a line-oriented console front end
//!
//! The form is a **thin shell** around the sales ledger; it never computes
//! amounts or totals itself.

pub mod config;
pub mod console;
pub mod form;
pub mod types;

pub use config::{ConfigError, FormConfig};
pub use form::{FormError, SalesForm};
pub use types::{Column, FormView, InputField, Notification, NotificationKind, RowView};
