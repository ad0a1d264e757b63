pub mod backend;
pub mod output;
pub mod preview;
pub mod settings;
