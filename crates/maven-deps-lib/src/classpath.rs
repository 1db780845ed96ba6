//! Making resolved artifacts visible to a running process.

/// Capability to put a set of jar files on a process's code search path.
///
/// The resolver calls this exactly once per batch, after the whole
/// transitive closure is materialized; a failure aborts the resolution.
pub trait ClasspathInjector {
	fn inject(&mut self, jars: &[std::path::PathBuf]) -> crate::Result<()>;
}

/// Accumulates the injected paths without side effects.
#[derive(Debug, Default)]
pub struct CollectedClasspath {
	pub jars: Vec<std::path::PathBuf>,
}

impl CollectedClasspath {
	/// The collected paths joined with the platform's path-list separator.
	pub fn to_search_path(&self) -> crate::Result<std::ffi::OsString> {
		std::env::join_paths(&self.jars).map_err(|e| crate::Error::Injection(e.to_string()))
	}
}

impl ClasspathInjector for CollectedClasspath {
	fn inject(&mut self, jars: &[std::path::PathBuf]) -> crate::Result<()> {
		self.jars.extend(jars.iter().cloned());
		Ok(())
	}
}

/// Appends the jars to the `CLASSPATH` environment variable so that spawned
/// JVMs pick them up.
#[derive(Debug, Default)]
pub struct EnvClasspathInjector;

impl ClasspathInjector for EnvClasspathInjector {
	fn inject(&mut self, jars: &[std::path::PathBuf]) -> crate::Result<()> {
		let mut paths: Vec<std::path::PathBuf> = match std::env::var_os("CLASSPATH") {
			Some(existing) => std::env::split_paths(&existing).collect(),
			None => Vec::new(),
		};
		paths.extend(jars.iter().cloned());
		let joined = std::env::join_paths(paths).map_err(|e| crate::Error::Injection(e.to_string()))?;
		std::env::set_var("CLASSPATH", &joined);
		log::debug!("Added {} jars to CLASSPATH", jars.len());
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn collector_accumulates_across_calls() {
		let mut classpath = CollectedClasspath::default();
		classpath.inject(&[std::path::PathBuf::from("a.jar")]).unwrap();
		classpath.inject(&[std::path::PathBuf::from("b.jar")]).unwrap();
		assert_eq!(classpath.jars.len(), 2);
	}

	#[test]
	fn collector_joins_with_platform_separator() {
		let mut classpath = CollectedClasspath::default();
		classpath.inject(&[std::path::PathBuf::from("a.jar"), std::path::PathBuf::from("b.jar")]).unwrap();
		let joined = classpath.to_search_path().unwrap();
		let parts: Vec<_> = std::env::split_paths(&joined).collect();
		assert_eq!(parts, vec![std::path::PathBuf::from("a.jar"), std::path::PathBuf::from("b.jar")]);
	}
}
