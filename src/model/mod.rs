//! Data model: parsed message part trees and attachment candidates.

pub mod part;
