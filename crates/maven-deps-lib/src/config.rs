use crate::artifact::Dependency;
use crate::artifact::DependencyScope;

/// Behavioral options for a resolution session.
pub struct ResolverOptions {
	cache_dir: std::path::PathBuf,
	central_url: String,
	self_identity: Dependency,
}

impl Default for ResolverOptions {
	fn default() -> Self {
		Self {
			cache_dir: {
				#[cfg(target_os = "windows")]
				let home = std::path::PathBuf::from(std::env::var("USERPROFILE").expect("USERPROFILE missing."));

				#[cfg(not(target_os = "windows"))]
				let home = std::path::PathBuf::from(std::env::var("HOME").expect("HOME environment variable not set."));

				/* Created on demand by the resolver, not here. */
				home.join(".runtime-deps").join("maven")
			},
			central_url: crate::repository::MAVEN_CENTRAL.to_string(),
			self_identity: Dependency::new(
				"com.github.maven-deps-rs",
				"maven-deps",
				Some(env!("CARGO_PKG_VERSION").to_string()),
				DependencyScope::Provided,
			),
		}
	}
}

impl ResolverOptions {
	/// Root of the local artifact cache.
	pub fn cache_dir(&self) -> &std::path::PathBuf {
		&self.cache_dir
	}

	pub fn set_cache_dir(&mut self, cache_dir: std::path::PathBuf) {
		self.cache_dir = cache_dir;
	}

	/// Base url of the default central repository.
	pub fn central_url(&self) -> &str {
		&self.central_url
	}

	pub fn set_central_url(&mut self, central_url: impl Into<String>) {
		self.central_url = central_url.into();
	}

	/// The artifact identity of the resolver itself. Declaring it as a
	/// dependency is always a no-op since it is already running.
	pub fn self_identity(&self) -> &Dependency {
		&self.self_identity
	}

	pub fn set_self_identity(&mut self, self_identity: Dependency) {
		self.self_identity = self_identity;
	}
}
