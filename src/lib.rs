//! AZbot: a single-page chat widget that forwards the conversation to a
//! fixed webhook and renders the reply.
//!
//! The [`session`] controller and the [`webhook`] wire layer carry the chat
//! flow. [`theme`], [`i18n`] and [`toast`] are the providers wrapped around
//! it; [`ui`] and [`views`] render everything with Dioxus.

pub mod config;
pub mod i18n;
pub mod session;
pub mod theme;
pub mod toast;
pub mod types;
pub mod webhook;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
