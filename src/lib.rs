//! Damage Service
//!
//! API REST para registrar y consultar reportes de daños de vehículos
//! sobre una única tabla SQLite.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
