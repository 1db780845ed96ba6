//! Artifact identities declared by project descriptors.

use crate::version::Version;

/// The lifecycle phase a dependency is required in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DependencyScope {
	#[default]
	Compile,
	Runtime,
	Provided,
	Test,
	System,
	Import,
}

impl DependencyScope {
	/// The scopes resolved when the caller does not say otherwise.
	pub const DEFAULT_SET: [DependencyScope; 2] = [DependencyScope::Compile, DependencyScope::Runtime];

	pub fn parse(s: &str) -> Option<Self> {
		match s.to_ascii_lowercase().as_str() {
			"compile" => Some(Self::Compile),
			"runtime" => Some(Self::Runtime),
			"provided" => Some(Self::Provided),
			"test" => Some(Self::Test),
			"system" => Some(Self::System),
			"import" => Some(Self::Import),
			_ => None,
		}
	}
}

/// Characters marking a version string as a property placeholder or a range,
/// both of which force dynamic latest-version resolution.
const DYNAMIC_VERSION_MARKERS: [char; 3] = ['$', '[', '('];

/// A uniquely named unit of packaged code to fetch into the local cache.
///
/// Equality and hashing are keyed on `(group, name)` only, so the same
/// artifact at different versions collides during deduplication.
#[derive(Debug, Clone)]
pub struct Dependency {
	group: String,
	name: String,
	/// `None` until latest-version resolution decides a concrete version.
	version: Option<String>,
	scope: DependencyScope,
}

impl Dependency {
	pub fn new(group: impl Into<String>, name: impl Into<String>, version: Option<String>, scope: DependencyScope) -> Self {
		let version = version.filter(|v| !v.contains(&DYNAMIC_VERSION_MARKERS[..]));
		Dependency { group: group.into(), name: name.into(), version, scope }
	}

	pub fn group(&self) -> &str {
		&self.group
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// `None` while the version has not been resolved yet.
	pub fn version(&self) -> Option<&str> {
		self.version.as_deref()
	}

	pub fn scope(&self) -> DependencyScope {
		self.scope
	}

	/// Adopts the version chosen by latest-version resolution.
	///
	/// A concrete version is immutable; setting it twice is an error.
	pub fn set_version(&mut self, version: String) -> crate::Result<()> {
		if self.version.is_some() {
			return Err(crate::Error::VersionAlreadyResolved(self.to_string()));
		}
		self.version = Some(version);
		Ok(())
	}

	/// The cache directory holding every downloaded version of this artifact,
	/// one namespace segment per directory level.
	pub fn artifact_dir(&self, cache_root: &std::path::Path) -> std::path::PathBuf {
		let mut dir = cache_root.to_path_buf();
		for part in self.group.split('.') {
			dir.push(part);
		}
		dir.push(&self.name);
		dir
	}

	/// The cache file for one extension, `None` while the version is unresolved.
	pub fn cache_file(&self, cache_root: &std::path::Path, ext: &str) -> Option<std::path::PathBuf> {
		let version = self.version.as_deref()?;
		let mut path = self.artifact_dir(cache_root);
		path.push(version);
		path.push(format!("{}-{}.{}", self.name, version, ext));
		Some(path)
	}

	/// Versions of this artifact already present in the local cache.
	pub fn installed_versions(&self, cache_root: &std::path::Path) -> Vec<Version> {
		let mut versions = Vec::new();
		if let Ok(entries) = std::fs::read_dir(self.artifact_dir(cache_root)) {
			for entry in entries.flatten() {
				versions.push(Version::new(&entry.file_name().to_string_lossy()));
			}
		}
		versions
	}
}

impl PartialEq for Dependency {
	fn eq(&self, other: &Self) -> bool {
		self.group == other.group && self.name == other.name
	}
}

impl Eq for Dependency {}

impl std::hash::Hash for Dependency {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.group.hash(state);
		self.name.hash(state);
	}
}

impl std::fmt::Display for Dependency {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}:{}", self.group, self.name, self.version.as_deref().unwrap_or("latest"))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn dep(version: Option<&str>) -> Dependency {
		Dependency::new("com.acme", "lib", version.map(str::to_string), DependencyScope::Compile)
	}

	#[test] fn identity_ignores_version() { assert_eq!(dep(Some("1.0.0")), dep(Some("2.0.0"))) }
	#[test] fn identity_ignores_unresolved_version() { assert_eq!(dep(None), dep(Some("1.0.0"))) }
	#[test] fn identity_respects_name() { assert_ne!(dep(None), Dependency::new("com.acme", "util", None, DependencyScope::Compile)) }
	#[test] fn placeholder_version_is_unresolved() { assert_eq!(dep(Some("${project.version}")).version(), None) }
	#[test] fn range_version_is_unresolved() { assert_eq!(dep(Some("[1.0,2.0)")).version(), None) }
	#[test] fn display_shows_latest_placeholder() { assert_eq!(dep(None).to_string(), "com.acme:lib:latest") }

	#[test]
	fn version_is_set_exactly_once() {
		let mut d = dep(None);
		d.set_version("1.0.0".to_string()).unwrap();
		assert_eq!(d.version(), Some("1.0.0"));
		assert!(d.set_version("2.0.0".to_string()).is_err());
	}

	#[test]
	fn cache_file_projects_group_segments() {
		let path = dep(Some("1.2.3")).cache_file(std::path::Path::new("cache"), "jar").unwrap();
		assert_eq!(path, std::path::PathBuf::from("cache/com/acme/lib/1.2.3/lib-1.2.3.jar"));
	}

	#[test]
	fn cache_file_requires_resolved_version() {
		assert!(dep(None).cache_file(std::path::Path::new("cache"), "jar").is_none());
	}

	#[test]
	fn scope_parsing_is_case_insensitive() {
		assert_eq!(DependencyScope::parse("RUNTIME"), Some(DependencyScope::Runtime));
		assert_eq!(DependencyScope::parse("import"), Some(DependencyScope::Import));
		assert_eq!(DependencyScope::parse("banana"), None);
	}
}
