//! Various helper functions for testing
//!
//! Builds descriptor documents and throwaway repository/cache layouts. The
//! same group/name/version path shape is used by remote repositories and the
//! local cache, so these helpers can seed either side.

use std::io::Write;

/// A dependency with the unresolved-version marker applied as the library
/// would when reading a descriptor.
pub fn dependency(group: &str, name: &str, version: Option<&str>) -> maven_deps::Dependency {
	maven_deps::Dependency::new(group, name, version.map(str::to_string), maven_deps::DependencyScope::Compile)
}

/// A minimal descriptor document. `dependencies` entries are
/// `(group, name, version, scope)` with `None` version meaning unspecified.
pub fn pom_xml(group: &str, name: &str, version: &str, packaging: Option<&str>, repositories: &[&str], dependencies: &[(&str, &str, Option<&str>, &str)]) -> String {
	let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n");
	xml.push_str(&format!("\t<groupId>{}</groupId>\n", group));
	xml.push_str(&format!("\t<artifactId>{}</artifactId>\n", name));
	xml.push_str(&format!("\t<version>{}</version>\n", version));
	if let Some(packaging) = packaging {
		xml.push_str(&format!("\t<packaging>{}</packaging>\n", packaging));
	}
	if !repositories.is_empty() {
		xml.push_str("\t<repositories>\n");
		for url in repositories {
			xml.push_str(&format!("\t\t<repository>\n\t\t\t<url>{}</url>\n\t\t</repository>\n", url));
		}
		xml.push_str("\t</repositories>\n");
	}
	if !dependencies.is_empty() {
		xml.push_str("\t<dependencies>\n");
		for (dep_group, dep_name, dep_version, dep_scope) in dependencies {
			xml.push_str("\t\t<dependency>\n");
			xml.push_str(&format!("\t\t\t<groupId>{}</groupId>\n", dep_group));
			xml.push_str(&format!("\t\t\t<artifactId>{}</artifactId>\n", dep_name));
			if let Some(dep_version) = dep_version {
				xml.push_str(&format!("\t\t\t<version>{}</version>\n", dep_version));
			}
			xml.push_str(&format!("\t\t\t<scope>{}</scope>\n", dep_scope));
			xml.push_str("\t\t</dependency>\n");
		}
		xml.push_str("\t</dependencies>\n");
	}
	xml.push_str("</project>\n");
	xml
}

/// A repository metadata document declaring one release version.
pub fn metadata_xml(release: &str) -> String {
	format!(
		"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<metadata>\n\t<versioning>\n\t\t<release>{}</release>\n\t</versioning>\n</metadata>\n",
		release
	)
}

/// Writes an artifact at its projected path under `root`, which may be a
/// repository tree or a local cache root.
pub fn write_artifact(root: &std::path::Path, group: &str, name: &str, version: &str, pom: Option<&str>, jar: Option<&[u8]>) {
	let mut dir = root.to_path_buf();
	for part in group.split('.') {
		dir.push(part);
	}
	dir.push(name);
	dir.push(version);
	std::fs::create_dir_all(&dir).expect("failed to create artifact directory");
	if let Some(pom) = pom {
		std::fs::write(dir.join(format!("{}-{}.pom", name, version)), pom).expect("failed to write pom");
	}
	if let Some(jar) = jar {
		std::fs::write(dir.join(format!("{}-{}.jar", name, version)), jar).expect("failed to write jar");
	}
}

/// Writes a jar archive containing the given `(entry name, body)` pairs.
pub fn write_jar(path: &std::path::Path, entries: &[(&str, &str)]) {
	let file = std::fs::File::create(path).expect("failed to create jar file");
	let mut writer = zip::ZipWriter::new(file);
	for (name, body) in entries {
		writer.start_file(*name, zip::write::FileOptions::default()).expect("failed to start jar entry");
		writer.write_all(body.as_bytes()).expect("failed to write jar entry");
	}
	writer.finish().expect("failed to finish jar file");
}

/// A throwaway cache root, deleted when the guard drops.
pub fn temp_cache() -> tempfile::TempDir {
	tempfile::tempdir().expect("failed to create temporary cache directory")
}

/// Resolver options pointing at a throwaway cache and a central url.
pub fn test_options(cache: &tempfile::TempDir, central_url: impl Into<String>) -> maven_deps::ResolverOptions {
	let mut options = maven_deps::ResolverOptions::default();
	options.set_cache_dir(cache.path().to_path_buf());
	options.set_central_url(central_url);
	options
}
