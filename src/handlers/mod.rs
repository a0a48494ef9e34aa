pub mod audio;
pub mod health;
pub mod lesson;
pub mod runtime_config;
pub mod translate;
