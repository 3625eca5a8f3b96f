pub mod controller;
pub mod crud;
pub mod memory;
pub mod model;
pub mod routes;
pub mod schema;
