//! Keepsake - Event Album Media Sharing Backend
//!
//! This crate implements the server-side domain logic for a media-sharing
//! platform: album visibility and expiration, the media moderation lifecycle,
//! and the payment-order/entitlement pipeline.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
