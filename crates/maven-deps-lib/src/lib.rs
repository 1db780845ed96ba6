pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::ResolverOptions;

pub mod version;
pub mod artifact;
pub use artifact::Dependency;
pub use artifact::DependencyScope;

pub mod pom;
pub mod repository;
pub use repository::Repository;

pub mod resolver;
pub use resolver::Resolver;

pub mod classpath;
pub mod scanner;
pub mod discovery;
