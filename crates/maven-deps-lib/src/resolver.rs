//! The transitive-closure resolution algorithm.
//!
//! # Usage
//! 1. Create a [`Resolver`] from [`crate::ResolverOptions`].
//! 2. Call [`Resolver::resolve_all`] with an ordered repository list, the
//!    top-level dependencies and a [`ClasspathInjector`].
//! 3. Query the returned set, or reuse the session for further resolves to
//!    benefit from the materialized-artifact cache.

use std::collections::HashSet;

use crate::artifact::Dependency;
use crate::artifact::DependencyScope;
use crate::classpath::ClasspathInjector;
use crate::error::AggregateError;
use crate::pom::Descriptor;
use crate::repository::Repository;

/// A resolution session.
///
/// Owns the local cache layout, the set of already materialized artifacts
/// and the descriptor-expansion memo. All network and filesystem work is
/// synchronous and runs on the calling thread.
pub struct Resolver {
	options: crate::ResolverOptions,
	client: reqwest::blocking::Client,
	/// Artifacts whose payload is known to be in the cache. Seeded with the
	/// session's self identity so declaring it as a dependency is a no-op.
	materialized: HashSet<Dependency>,
	/// Artifacts whose descriptor dependencies were already expanded, so
	/// diamond shapes don't re-parse the same descriptor.
	expanded: HashSet<Dependency>,
}

impl Resolver {
	pub fn new(options: crate::ResolverOptions) -> Self {
		let mut materialized = HashSet::new();
		materialized.insert(options.self_identity().clone());
		Resolver {
			options,
			client: reqwest::blocking::Client::new(),
			materialized,
			expanded: HashSet::new(),
		}
	}

	pub fn options(&self) -> &crate::ResolverOptions {
		&self.options
	}

	/// Resolves every given dependency, unions the transitive closures and
	/// hands the final jar set to `injector` exactly once.
	///
	/// Injector failure is treated as a failure of the whole resolution.
	pub fn resolve_all(&mut self, repositories: &[Repository], dependencies: Vec<Dependency>, injector: &mut dyn ClasspathInjector) -> crate::Result<HashSet<Dependency>> {
		std::fs::create_dir_all(self.options.cache_dir()).map_err(crate::Error::CacheIO)?;

		let mut resolved = HashSet::new();
		for dependency in dependencies {
			resolved.extend(self.resolve(repositories, dependency)?);
		}

		let jars: Vec<std::path::PathBuf> = resolved
			.iter()
			.filter_map(|d| d.cache_file(self.options.cache_dir(), "jar"))
			.filter(|p| p.exists())
			.collect();
		injector.inject(&jars)?;

		Ok(resolved)
	}

	/// Resolves one dependency and its transitive closure.
	///
	/// Repositories are tried in order; per-repository failures are collected
	/// and surfaced together as an [`AggregateError`] only if all of them
	/// fail. The returned set always contains the dependency itself.
	pub fn resolve(&mut self, repositories: &[Repository], mut dependency: Dependency) -> crate::Result<HashSet<Dependency>> {
		if self.materialized.contains(&dependency) {
			log::trace!("Skipping already materialized dependency {}", dependency);
			return Ok(HashSet::new());
		}
		log::debug!("Resolving dependency {}", dependency);

		if dependency.version().is_none() {
			self.resolve_version(repositories, &mut dependency)?;
		}
		let (pom, jar) = self.cache_paths(&dependency)?;

		let mut resolved = HashSet::new();
		resolved.insert(dependency.clone());

		/* Cache short-circuit: an existing payload means no network work. */
		if jar.exists() {
			log::trace!("Cache hit for {}", dependency);
			self.materialize_and_expand(&dependency, &pom, &mut resolved)?;
			return Ok(resolved);
		}

		if let Some(dir) = pom.parent() {
			std::fs::create_dir_all(dir).map_err(crate::Error::CacheIO)?;
		}

		let mut failure = AggregateError::new(format!("unable to find download for {}", dependency));
		let mut fetched = false;
		for repository in repositories {
			match self.fetch_from(repository, &dependency, &pom, &jar) {
				Ok(()) => {
					fetched = true;
					break;
				}
				Err(e) => {
					log::debug!("Repository {} failed for {}: {}", repository.url().unwrap_or("<overrides>"), dependency, e);
					failure.push(e);
				}
			}
		}
		if !fetched {
			return Err(failure.into());
		}

		self.materialize_and_expand(&dependency, &pom, &mut resolved)?;
		Ok(resolved)
	}

	/// Marks the artifact materialized and expands its descriptor if present.
	///
	/// The mark is rolled back when expansion fails, so a retry on a reused
	/// session walks the closure again instead of short-circuiting on an
	/// artifact whose children never arrived.
	fn materialize_and_expand(&mut self, dependency: &Dependency, pom: &std::path::Path, resolved: &mut HashSet<Dependency>) -> crate::Result<()> {
		self.materialized.insert(dependency.clone());
		if pom.exists() {
			match self.expand_descriptor(dependency, pom) {
				Ok(children) => resolved.extend(children),
				Err(e) => {
					self.materialized.remove(dependency);
					return Err(e);
				}
			}
		}
		Ok(())
	}

	/// Decides a concrete version for an unversioned dependency, remotely or,
	/// failing that, from versions already present in the cache.
	fn resolve_version(&self, repositories: &[Repository], dependency: &mut Dependency) -> crate::Result<()> {
		let mut failure = AggregateError::new(format!("unable to find latest version of {}", dependency));
		for repository in repositories {
			match repository.resolve_latest_version(&self.client, dependency) {
				Ok(()) => return Ok(()),
				Err(e) => failure.push(e),
			}
		}

		/* Offline fallback: the newest cached version keeps previously
		resolved trees working without network access. */
		match dependency.installed_versions(self.options.cache_dir()).into_iter().max() {
			Some(max) => {
				log::info!("Falling back to cached version {} of {}", max, dependency);
				dependency.set_version(max.as_str().to_string())
			}
			None => Err(failure.into()),
		}
	}

	/// One repository attempt: the descriptor first, then the payload.
	///
	/// A missing payload is fine when the descriptor declares the default
	/// `pom` packaging; such artifacts legitimately have nothing to download.
	fn fetch_from(&self, repository: &Repository, dependency: &Dependency, pom: &std::path::Path, jar: &std::path::Path) -> crate::Result<()> {
		repository.fetch_file(&self.client, dependency, "pom", pom)?;
		if let Err(jar_error) = repository.fetch_file(&self.client, dependency, "jar", jar) {
			let descriptor = Descriptor::parse_file(pom)?;
			if descriptor.packaging != crate::pom::DEFAULT_PACKAGING {
				return Err(jar_error.into());
			}
			log::trace!("{} has no payload, packaging is '{}'", dependency, descriptor.packaging);
		}
		Ok(())
	}

	/// Recursively resolves the dependencies declared by a cached descriptor.
	///
	/// The repository list is re-derived from the descriptor itself: central
	/// first, its declared repositories next, then the override table. Only
	/// default-scope children are followed.
	fn expand_descriptor(&mut self, dependency: &Dependency, pom: &std::path::Path) -> crate::Result<HashSet<Dependency>> {
		/* Inserted before recursion so dependency cycles terminate; removed
		again if any child fails, keeping the memo retry-safe. */
		if !self.expanded.insert(dependency.clone()) {
			log::trace!("Descriptor of {} already expanded", dependency);
			return Ok(HashSet::new());
		}

		match self.expand_children(pom) {
			Ok(resolved) => Ok(resolved),
			Err(e) => {
				self.expanded.remove(dependency);
				Err(e)
			}
		}
	}

	fn expand_children(&mut self, pom: &std::path::Path) -> crate::Result<HashSet<Dependency>> {
		let descriptor = Descriptor::parse_file(pom)?;
		let repositories = self.descriptor_repositories(&descriptor);
		let mut resolved = HashSet::new();
		for child in descriptor.dependencies {
			if !DependencyScope::DEFAULT_SET.contains(&child.scope()) {
				continue;
			}
			resolved.extend(self.resolve(&repositories, child)?);
		}
		Ok(resolved)
	}

	/// The full prioritized repository list for a descriptor: central, the
	/// descriptor's declared repositories, bundled extras, then the override
	/// table as a last resort.
	pub fn descriptor_repositories(&self, descriptor: &Descriptor) -> Vec<Repository> {
		let mut repositories = vec![Repository::remote(self.options.central_url())];
		for url in &descriptor.repositories {
			repositories.push(Repository::remote(url));
		}
		repositories.extend(Repository::bundled_extras());
		repositories.push(crate::repository::OverrideRepository::common().into());
		repositories
	}

	fn cache_paths(&self, dependency: &Dependency) -> crate::Result<(std::path::PathBuf, std::path::PathBuf)> {
		let root = self.options.cache_dir();
		match (dependency.cache_file(root, "pom"), dependency.cache_file(root, "jar")) {
			(Some(pom), Some(jar)) => Ok((pom, jar)),
			_ => Err(crate::Error::Parse(format!("version of {} was not resolved", dependency))),
		}
	}
}
