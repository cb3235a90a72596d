//! Secret records and their shape validators.
//!
//! - [`provider`]: closed enumerations (`type`, model format/flavor)
//! - [`metadata`]: base, OpenAI and Azure metadata variants
//! - [`entities`]: the validated [`Secret`](entities::Secret)
//! - [`validation`]: the ordered union over provider type

pub mod entities;
pub mod metadata;
pub mod provider;
mod reader;
pub mod validation;
