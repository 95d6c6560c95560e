pub mod application;
pub mod capability;
pub mod closure;
pub mod commands;
pub mod dump;
pub mod link;
pub mod package;
pub mod report;
pub mod runtime;
