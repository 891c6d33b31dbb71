pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod notify;
pub mod render;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    Condition, DealType, Decimal, EvaluationResult, PropertyCategory, ValuationRequest,
};
pub use engine::{evaluate, ValuationEngine};
pub use error::AppError;
pub use notify::{LogNotifier, Notifier, RecordingNotifier, WebhookNotifier};
pub use render::Locale;
