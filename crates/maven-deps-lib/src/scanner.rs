//! Listing of resources inside classpath roots.
//!
//! A root is either a plain directory or a jar/zip archive. Only names
//! directly inside the requested logical directory are returned; this is a
//! listing utility, not part of the resolution logic.

/// Lists the entry names directly inside `dir` under `root`.
///
/// A missing directory lists as empty.
pub fn list_entries(root: &std::path::Path, dir: &str) -> crate::Result<Vec<String>> {
	if is_archive(root) {
		list_archive_entries(root, dir)
	} else {
		let path = root.join(dir);
		let mut names = Vec::new();
		if path.is_dir() {
			for entry in std::fs::read_dir(&path)? {
				names.push(entry?.file_name().to_string_lossy().into_owned());
			}
		}
		names.sort();
		Ok(names)
	}
}

/// Reads one resource under `root` into a string.
pub fn read_entry(root: &std::path::Path, path: &str) -> crate::Result<String> {
	if is_archive(root) {
		let file = std::fs::File::open(root)?;
		let mut archive = zip::ZipArchive::new(file)?;
		let mut entry = archive.by_name(path)?;
		let mut text = String::new();
		std::io::Read::read_to_string(&mut entry, &mut text)?;
		Ok(text)
	} else {
		Ok(std::fs::read_to_string(root.join(path))?)
	}
}

fn is_archive(path: &std::path::Path) -> bool {
	path.is_file()
		&& path
			.extension()
			.map(|ext| ext.eq_ignore_ascii_case("jar") || ext.eq_ignore_ascii_case("zip"))
			.unwrap_or(false)
}

fn list_archive_entries(root: &std::path::Path, dir: &str) -> crate::Result<Vec<String>> {
	let file = std::fs::File::open(root)?;
	let archive = zip::ZipArchive::new(file)?;
	let prefix = format!("{}/", dir.trim_end_matches('/'));

	/* Archives are not required to carry explicit directory entries, so take
	the first path component below the prefix from every file name. */
	let mut names: Vec<String> = archive
		.file_names()
		.filter_map(|name| name.strip_prefix(&prefix))
		.filter_map(|rest| rest.split('/').next())
		.filter(|first| !first.is_empty())
		.map(str::to_string)
		.collect();
	names.sort();
	names.dedup();
	Ok(names)
}

#[cfg(test)]
mod test {
	use super::*;
	use std::io::Write;

	fn archive_with(entries: &[(&str, &str)]) -> (tempfile::TempDir, std::path::PathBuf) {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("fixture.jar");
		let file = std::fs::File::create(&path).unwrap();
		let mut writer = zip::ZipWriter::new(file);
		for (name, body) in entries {
			writer.start_file(*name, zip::write::FileOptions::default()).unwrap();
			writer.write_all(body.as_bytes()).unwrap();
		}
		writer.finish().unwrap();
		(dir, path)
	}

	#[test]
	fn lists_directory_entries() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::create_dir_all(dir.path().join("META-INF/maven/com.acme")).unwrap();
		std::fs::create_dir_all(dir.path().join("META-INF/maven/org.example")).unwrap();
		let names = list_entries(dir.path(), "META-INF/maven").unwrap();
		assert_eq!(names, vec!["com.acme".to_string(), "org.example".to_string()]);
	}

	#[test]
	fn missing_directory_lists_as_empty() {
		let dir = tempfile::tempdir().unwrap();
		assert!(list_entries(dir.path(), "META-INF/maven").unwrap().is_empty());
	}

	#[test]
	fn lists_archive_entries_one_level_deep() {
		let (_dir, jar) = archive_with(&[
			("META-INF/maven/com.acme/app/pom.xml", "<project/>"),
			("META-INF/maven/com.acme/util/pom.xml", "<project/>"),
			("META-INF/MANIFEST.MF", ""),
		]);
		let groups = list_entries(&jar, "META-INF/maven").unwrap();
		assert_eq!(groups, vec!["com.acme".to_string()]);
		let artifacts = list_entries(&jar, "META-INF/maven/com.acme").unwrap();
		assert_eq!(artifacts, vec!["app".to_string(), "util".to_string()]);
	}

	#[test]
	fn reads_archive_entry() {
		let (_dir, jar) = archive_with(&[("META-INF/maven/com.acme/app/pom.xml", "<project/>")]);
		assert_eq!(read_entry(&jar, "META-INF/maven/com.acme/app/pom.xml").unwrap(), "<project/>");
	}
}
