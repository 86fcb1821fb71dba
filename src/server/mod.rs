//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework, SeaORM over SQLite for persistence,
//! JWT bearer tokens for authentication and Gemini for the chat concierge.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, access control and DTO conversion
//! - **Service Layer** (`service/`) - Business rules and transactions
//! - **Data Layer** (`data/`) - Repositories converting entities to domain models
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Extractors** (`extract`) - `Json` and `Query` that reject with `AppError`
//! - **Middleware** (`middleware/`) - Bearer token guard
//! - **Concierge** (`concierge/`) - Prompt building, Gemini client and offline keyword replies
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Database, HTTP client and demo data setup
//! - **Seed** (`seed`) - Demo cafe inserted into an empty database
//! - **Router** (`router`) - Route table, CORS, tracing and OpenAPI document
//!
//! # Request Flow
//!
//! 1. **Router** matches the request to a controller
//! 2. **Controller** authenticates through `AuthGuard`, converts the DTO and calls a service
//! 3. **Service** validates, opens a transaction where needed and calls repositories
//! 4. **Data** queries the database and returns domain models
//! 5. **Controller** converts the result to a DTO inside the response envelope

pub mod concierge;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod model;
pub mod router;
pub mod seed;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
