//! Remote artifact repositories and the static override table.

use crate::artifact::Dependency;

/// The url of the central repository, implicitly tried first.
pub const MAVEN_CENTRAL: &str = "https://repo.maven.apache.org/maven2";

/// Extra repository urls bundled with the library, one per line.
const BUNDLED_REPOSITORY_URLS: &str = include_str!("repository/extra.repos");

/// Bundled override table, `group:name:version<TAB>url` per line.
const BUNDLED_OVERRIDES: &str = include_str!("repository/common.overrides");

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
	#[error("server returned {status} for {url}")]
	Status { url: String, status: reqwest::StatusCode },
	#[error("no override download for {0}")]
	NoOverride(String),
	#[error("artifact version is unresolved: {0}")]
	UnresolvedVersion(String),
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
	#[error("metadata document has no release version")]
	MissingRelease,
	#[error("unable to parse metadata document: {0}")]
	Xml(#[from] roxmltree::Error),
	#[error("server returned {status} for {url}")]
	Status { url: String, status: reqwest::StatusCode },
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
}

/// A source of artifact files. Priority between repositories is the order of
/// the list the caller hands to the resolver, not anything stored here.
#[derive(Debug, Clone)]
pub enum Repository {
	Remote(RemoteRepository),
	Overrides(OverrideRepository),
}

impl Repository {
	/// The central repository, priority zero for every resolve.
	pub fn central() -> Self {
		Repository::Remote(RemoteRepository::new(MAVEN_CENTRAL))
	}

	pub fn remote(url: impl AsRef<str>) -> Self {
		Repository::Remote(RemoteRepository::new(url))
	}

	/// Repositories bundled with the library for artifacts known to live
	/// outside the standard repositories.
	pub fn bundled_extras() -> Vec<Repository> {
		BUNDLED_REPOSITORY_URLS
			.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty() && !line.starts_with('#'))
			.map(Repository::remote)
			.collect()
	}

	/// The base url, `None` for the override variant.
	pub fn url(&self) -> Option<&str> {
		match self {
			Repository::Remote(remote) => Some(remote.url()),
			Repository::Overrides(_) => None,
		}
	}

	/// Downloads `<name>-<version>.<ext>` for an artifact into `target`.
	pub fn fetch_file(&self, client: &reqwest::blocking::Client, dependency: &Dependency, ext: &str, target: &std::path::Path) -> Result<(), DownloadError> {
		match self {
			Repository::Remote(remote) => remote.fetch_file(client, dependency, ext, target),
			Repository::Overrides(overrides) => overrides.fetch_file(client, dependency, ext, target),
		}
	}

	/// Resolves an unversioned artifact to the repository's release version.
	///
	/// The override variant cannot serve this; it fails with a distinct
	/// [`crate::Error::UnsupportedOperation`] rather than a missing-document
	/// error.
	pub fn resolve_latest_version(&self, client: &reqwest::blocking::Client, dependency: &mut Dependency) -> crate::Result<()> {
		match self {
			Repository::Remote(remote) => remote.resolve_latest_version(client, dependency),
			Repository::Overrides(_) => Err(crate::Error::UnsupportedOperation("override repositories only serve pinned artifact downloads")),
		}
	}
}

/// A repository reachable over HTTP with the standard path layout.
#[derive(Debug, Clone)]
pub struct RemoteRepository {
	url: String,
}

impl RemoteRepository {
	pub fn new(url: impl AsRef<str>) -> Self {
		let url = url.as_ref();
		RemoteRepository { url: url.strip_suffix('/').unwrap_or(url).to_string() }
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	fn fetch_file(&self, client: &reqwest::blocking::Client, dependency: &Dependency, ext: &str, target: &std::path::Path) -> Result<(), DownloadError> {
		let version = dependency.version().ok_or_else(|| DownloadError::UnresolvedVersion(dependency.to_string()))?;
		let url = format!(
			"{}/{}/{}/{}/{}-{}.{}",
			self.url,
			dependency.group().replace('.', "/"),
			dependency.name(),
			version,
			dependency.name(),
			version,
			ext
		);
		log::debug!("Fetching {} from {}", dependency, url);
		fetch_to_file(client, &url, target)
	}

	fn resolve_latest_version(&self, client: &reqwest::blocking::Client, dependency: &mut Dependency) -> crate::Result<()> {
		let url = format!(
			"{}/{}/{}/maven-metadata.xml",
			self.url,
			dependency.group().replace('.', "/"),
			dependency.name()
		);
		log::debug!("Resolving latest version of {} from {}", dependency, url);
		let response = client.get(&url).send().map_err(MetadataError::from)?;
		if !response.status().is_success() {
			return Err(MetadataError::Status { url, status: response.status() }.into());
		}
		let text = response.text().map_err(MetadataError::from)?;
		let release = crate::pom::release_version(&text)?;
		log::info!("Resolved {} to version {}", dependency, release);
		dependency.set_version(release)
	}
}

/// Fixed download urls for pinned artifacts absent from standard repositories.
#[derive(Debug, Clone)]
pub struct OverrideRepository {
	/// `group:name:version` keys paired with download urls, sorted by key.
	entries: Vec<(String, String)>,
}

impl OverrideRepository {
	pub fn new(mut entries: Vec<(String, String)>) -> Self {
		entries.sort_by(|a, b| a.0.cmp(&b.0));
		OverrideRepository { entries }
	}

	/// The override table bundled with the library.
	pub fn common() -> Self {
		Self::new(
			BUNDLED_OVERRIDES
				.lines()
				.map(str::trim)
				.filter(|line| !line.is_empty() && !line.starts_with('#'))
				.filter_map(|line| line.split_once('\t').map(|(k, v)| (k.trim().to_string(), v.trim().to_string())))
				.collect(),
		)
	}

	fn fetch_file(&self, client: &reqwest::blocking::Client, dependency: &Dependency, ext: &str, target: &std::path::Path) -> Result<(), DownloadError> {
		/* Overrides carry only payload jars. Descriptor requests succeed
		without producing a file, so the caller skips recursion for them. */
		if ext != "jar" {
			return Ok(());
		}
		let key = dependency.to_string();
		let index = self
			.entries
			.binary_search_by(|(k, _)| k.as_str().cmp(key.as_str()))
			.map_err(|_| DownloadError::NoOverride(key.clone()))?;
		let url = self.entries[index].1.clone();
		log::debug!("Fetching {} from override url {}", dependency, url);
		fetch_to_file(client, &url, target)
	}
}

impl From<OverrideRepository> for Repository {
	fn from(overrides: OverrideRepository) -> Self {
		Repository::Overrides(overrides)
	}
}

/// Streamed byte-for-byte copy of a remote resource into a local file.
fn fetch_to_file(client: &reqwest::blocking::Client, url: &str, target: &std::path::Path) -> Result<(), DownloadError> {
	let mut response = client.get(url).send()?;
	if !response.status().is_success() {
		return Err(DownloadError::Status { url: url.to_string(), status: response.status() });
	}
	let mut file = std::fs::File::create(target)?;
	if let Err(e) = std::io::copy(&mut response, &mut file) {
		/* A partial file must not later count as a cache hit. */
		drop(file);
		let _ = std::fs::remove_file(target);
		return Err(e.into());
	}
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::artifact::DependencyScope;

	fn overrides() -> OverrideRepository {
		OverrideRepository::new(vec![
			("org.zlib:zlib:1.2.8".to_string(), "https://downloads.example/zlib-1.2.8.jar".to_string()),
			("com.acme:lib:1.0.0".to_string(), "https://downloads.example/lib-1.0.0.jar".to_string()),
		])
	}

	#[test]
	fn trailing_slash_is_stripped() {
		assert_eq!(RemoteRepository::new("https://repo.example/maven2/").url(), "https://repo.example/maven2");
		assert_eq!(RemoteRepository::new("https://repo.example/maven2").url(), "https://repo.example/maven2");
	}

	#[test]
	fn override_table_is_sorted_for_binary_search() {
		let repo = overrides();
		assert_eq!(repo.entries[0].0, "com.acme:lib:1.0.0");
		assert_eq!(repo.entries[1].0, "org.zlib:zlib:1.2.8");
	}

	#[test]
	fn override_descriptor_request_is_a_silent_noop() {
		let repo = overrides();
		let dep = Dependency::new("com.acme", "lib", Some("1.0.0".to_string()), DependencyScope::Compile);
		let target = std::path::PathBuf::from("never-written.pom");
		repo.fetch_file(&reqwest::blocking::Client::new(), &dep, "pom", &target).unwrap();
		assert!(!target.exists());
	}

	#[test]
	fn override_miss_is_a_download_error() {
		let repo = overrides();
		let dep = Dependency::new("com.acme", "missing", Some("1.0.0".to_string()), DependencyScope::Compile);
		let result = repo.fetch_file(&reqwest::blocking::Client::new(), &dep, "jar", std::path::Path::new("never-written.jar"));
		assert!(matches!(result, Err(DownloadError::NoOverride(_))));
	}

	#[test]
	fn override_repository_cannot_resolve_latest() {
		let repo = Repository::from(overrides());
		let mut dep = Dependency::new("com.acme", "lib", None, DependencyScope::Compile);
		let result = repo.resolve_latest_version(&reqwest::blocking::Client::new(), &mut dep);
		assert!(matches!(result, Err(crate::Error::UnsupportedOperation(_))));
		assert_eq!(dep.version(), None);
	}

	#[test]
	fn fetching_an_unresolved_artifact_is_an_error() {
		let repo = RemoteRepository::new("https://repo.example/maven2");
		let dep = Dependency::new("com.acme", "lib", None, DependencyScope::Compile);
		let result = repo.fetch_file(&reqwest::blocking::Client::new(), &dep, "jar", std::path::Path::new("never-written.jar"));
		assert!(matches!(result, Err(DownloadError::UnresolvedVersion(_))));
	}
}
