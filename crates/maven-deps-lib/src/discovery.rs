//! Discovery and batch resolution of project descriptors.
//!
//! This is the manifest-facing layer: it decides which descriptors to
//! resolve and with which scopes, then drives the [`Resolver`].

use std::collections::HashSet;

use crate::artifact::Dependency;
use crate::artifact::DependencyScope;
use crate::classpath::ClasspathInjector;
use crate::pom::Descriptor;
use crate::resolver::Resolver;

/// Resolves every dependency a descriptor declares in the given scopes.
pub fn resolve_descriptor(resolver: &mut Resolver, descriptor: &Descriptor, scopes: &[DependencyScope], injector: &mut dyn ClasspathInjector) -> crate::Result<HashSet<Dependency>> {
	let repositories = resolver.descriptor_repositories(descriptor);
	let dependencies: Vec<Dependency> = descriptor
		.dependencies
		.iter()
		.filter(|d| scopes.contains(&d.scope()))
		.cloned()
		.collect();
	resolver.resolve_all(&repositories, dependencies, injector)
}

/// Reads a descriptor from a file and resolves it.
pub fn resolve_descriptor_file(resolver: &mut Resolver, path: &std::path::Path, scopes: &[DependencyScope], injector: &mut dyn ClasspathInjector) -> crate::Result<HashSet<Dependency>> {
	log::info!("Resolving descriptor {}", path.display());
	let descriptor = Descriptor::parse_file(path)?;
	resolve_descriptor(resolver, &descriptor, scopes, injector)
}

/// Scans classpath roots for embedded descriptors under `META-INF/maven`
/// and resolves every one found.
///
/// Each root may be a directory or a jar archive; descriptors live at
/// `META-INF/maven/<group>/<artifact>/pom.xml`.
pub fn resolve_embedded(resolver: &mut Resolver, roots: &[std::path::PathBuf], scopes: &[DependencyScope], injector: &mut dyn ClasspathInjector) -> crate::Result<HashSet<Dependency>> {
	let mut resolved = HashSet::new();
	for root in roots {
		for group in crate::scanner::list_entries(root, "META-INF/maven")? {
			for artifact in crate::scanner::list_entries(root, &format!("META-INF/maven/{}", group))? {
				let path = format!("META-INF/maven/{}/{}/pom.xml", group, artifact);
				log::info!("Discovered embedded descriptor {} in {}", path, root.display());
				let descriptor = Descriptor::parse(&crate::scanner::read_entry(root, &path)?)?;
				resolved.extend(resolve_descriptor(resolver, &descriptor, scopes, injector)?);
			}
		}
	}
	Ok(resolved)
}
