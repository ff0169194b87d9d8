//! `mailgrab` — download email attachments from an IMAP mailbox.
//!
//! This crate provides the core library for walking parsed MIME message
//! trees, extracting attachments by content type, and resolving safe,
//! collision-free filenames for them.

pub mod config;
pub mod creds;
pub mod download;
pub mod error;
pub mod extract;
pub mod fname;
pub mod imap;
pub mod model;
pub mod parser;
