//! Parsing of project descriptor and repository metadata documents.
//!
//! The resolver treats descriptors as pre-parsed typed records; this module
//! is the only place XML structure is interpreted.

use crate::artifact::Dependency;
use crate::artifact::DependencyScope;
use crate::repository::MetadataError;

/// The packaging assumed when a descriptor does not declare one. Artifacts
/// with this packaging legitimately have no binary payload.
pub const DEFAULT_PACKAGING: &str = "pom";

/// Typed view of a project descriptor.
#[derive(Debug)]
pub struct Descriptor {
	pub packaging: String,
	/// Base urls of the repositories the descriptor declares, in order.
	pub repositories: Vec<String>,
	pub dependencies: Vec<Dependency>,
}

impl Descriptor {
	pub fn parse(text: &str) -> crate::Result<Descriptor> {
		let doc = roxmltree::Document::parse(text)
			.map_err(|e| crate::Error::Parse(format!("unable to parse descriptor: {}", e)))?;
		let root = doc.root_element();

		let packaging = find_text(root, "packaging").unwrap_or(DEFAULT_PACKAGING).trim().to_string();

		/* Only the fetch-repository list counts; a <repository> elsewhere,
		e.g. under <distributionManagement>, is a publishing target. */
		let mut repositories = Vec::new();
		for node in root
			.descendants()
			.filter(|n| n.has_tag_name("repository"))
			.filter(|n| n.parent().map_or(false, |p| p.has_tag_name("repositories")))
		{
			let url = find_text(node, "url")
				.ok_or_else(|| crate::Error::Parse("repository element without a url".to_string()))?;
			repositories.push(url.trim().to_string());
		}

		let mut dependencies = Vec::new();
		for node in root.descendants().filter(|n| n.has_tag_name("dependency")) {
			dependencies.push(parse_dependency(node)?);
		}

		Ok(Descriptor { packaging, repositories, dependencies })
	}

	pub fn parse_file(path: &std::path::Path) -> crate::Result<Descriptor> {
		Self::parse(&std::fs::read_to_string(path)?)
	}
}

fn parse_dependency(node: roxmltree::Node) -> crate::Result<Dependency> {
	let group = find_text(node, "groupId")
		.ok_or_else(|| crate::Error::Parse("dependency element without a groupId".to_string()))?;
	let name = find_text(node, "artifactId")
		.ok_or_else(|| crate::Error::Parse("dependency element without an artifactId".to_string()))?;
	let version = find_text(node, "version").map(|s| s.trim().to_string());
	let scope = match find_text(node, "scope") {
		Some(s) => DependencyScope::parse(s.trim())
			.ok_or_else(|| crate::Error::Parse(format!("unknown dependency scope '{}'", s.trim())))?,
		None => DependencyScope::default(),
	};
	Ok(Dependency::new(group.trim(), name.trim(), version, scope))
}

/// Extracts the `release` field from a repository metadata document.
pub fn release_version(text: &str) -> Result<String, MetadataError> {
	let doc = roxmltree::Document::parse(text)?;
	doc.root_element()
		.descendants()
		.find(|n| n.has_tag_name("release"))
		.and_then(|n| n.text())
		.map(|s| s.trim().to_string())
		.filter(|s| !s.is_empty())
		.ok_or(MetadataError::MissingRelease)
}

/// The text of the first descendant with the given tag name.
fn find_text<'a, 'input>(node: roxmltree::Node<'a, 'input>, tag: &str) -> Option<&'a str> {
	node.descendants().find(|n| n.has_tag_name(tag)).and_then(|n| n.text())
}
