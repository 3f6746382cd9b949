pub mod events;
pub mod mockup;
pub mod models;
pub mod prompt;
pub mod runs;
