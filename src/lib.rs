//! Parley - Negotiation Practice Backend
//!
//! This crate implements a conversational negotiation-practice service: a
//! user trades turns with one or more AI negotiator personas over a scripted
//! scenario, and can submit any dialogue snippet to a facilitator that scores
//! sentiment and proposes de-escalating interventions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
