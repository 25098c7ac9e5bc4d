// Storage operation traits and implementations
pub mod copy;
pub mod delete;
pub mod list;
pub mod mimetype;
pub mod mkdir;
pub mod mv;
pub mod read;
pub mod stat;
pub mod visibility;
pub mod write;

// Re-export all operation traits
pub use copy::Copier;
pub use delete::Deleter;
pub use list::Lister;
pub use mimetype::MimeResolver;
pub use mkdir::Mkdirer;
pub use mv::Mover;
pub use read::FileReader;
pub use stat::Stater;
pub use visibility::VisibilitySetter;
pub use write::Writer;
