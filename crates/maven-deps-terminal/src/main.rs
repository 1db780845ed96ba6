use maven_deps::DependencyScope;

const USAGE: &str = "maven-deps-terminal [options] resolve <pom.xml> | run <pom.xml> <main-class> [args...]";

fn main() {
	env_logger::init();

	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag("h", "help", "Show help");
		opts.optopt("c", "cache-dir", "Override the artifact cache directory", "DIR");
		opts.optmulti("s", "scope", "Dependency scope to resolve, repeatable (default: compile, runtime)", "SCOPE");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m) => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage(USAGE));
			return;
		}

		parsed_options
	};

	let mut options = maven_deps::ResolverOptions::default();
	if let Some(dir) = parsed_options.opt_str("c") {
		options.set_cache_dir(std::path::PathBuf::from(dir));
	}

	let scopes = {
		let mut scopes = Vec::new();
		for raw in parsed_options.opt_strs("s") {
			match DependencyScope::parse(&raw) {
				Some(scope) => scopes.push(scope),
				None => { log::error!("Unknown scope: {}", raw); return }
			}
		}
		if scopes.is_empty() {
			scopes.extend(DependencyScope::DEFAULT_SET);
		}
		scopes
	};

	if parsed_options.free.is_empty() {
		eprintln!("{}", opts.usage(USAGE));
		return;
	}

	match parsed_options.free[0].as_str() {
		"resolve" => {
			let pom = match parsed_options.free.get(1) {
				Some(p) => std::path::PathBuf::from(p),
				None => { log::error!("Descriptor path not provided."); return }
			};
			match resolve_classpath(options, &scopes, &pom) {
				Ok(classpath) => {
					match classpath.to_search_path() {
						Ok(path) => println!("{}", path.to_string_lossy()),
						Err(e) => log::error!("Failed to join classpath: {}", e),
					}
				}
				Err(e) => log::error!("Resolution failed: {}", e),
			}
		}
		"run" => {
			match run_with_classpath(options, &scopes, &parsed_options.free[1..]) {
				Ok(code) => std::process::exit(code),
				Err(e) => { log::error!("Failed to run: {}", e); std::process::exit(1) }
			}
		}
		command => {
			log::error!("Unknown command: {}", command);
			eprintln!("{}", opts.usage(USAGE));
		}
	}
}

fn resolve_classpath(options: maven_deps::ResolverOptions, scopes: &[DependencyScope], pom: &std::path::Path) -> Result<maven_deps::classpath::CollectedClasspath, Error> {
	let mut resolver = maven_deps::Resolver::new(options);
	let mut classpath = maven_deps::classpath::CollectedClasspath::default();
	let resolved = maven_deps::discovery::resolve_descriptor_file(&mut resolver, pom, scopes, &mut classpath)?;
	log::info!("Resolved {} artifacts.", resolved.len());
	for dependency in &resolved {
		log::debug!("\t{}", dependency);
	}
	Ok(classpath)
}

/// Resolves a descriptor, injects the classpath into the environment and
/// spawns a JVM on the requested main class.
fn run_with_classpath(options: maven_deps::ResolverOptions, scopes: &[DependencyScope], free: &[String]) -> Result<i32, Error> {
	let pom = match free.first() {
		Some(p) => std::path::PathBuf::from(p),
		None => return Err(Error::MissingArgument("descriptor path")),
	};
	let main_class = free.get(1).ok_or(Error::MissingArgument("main class"))?;

	let mut resolver = maven_deps::Resolver::new(options);
	let mut injector = maven_deps::classpath::EnvClasspathInjector;
	maven_deps::discovery::resolve_descriptor_file(&mut resolver, &pom, scopes, &mut injector)?;

	/* EnvClasspathInjector already put the jars in CLASSPATH; the child
	inherits the environment. */
	let status = std::process::Command::new("java")
		.arg(main_class)
		.args(&free[2..])
		.status()
		.map_err(Error::Launch)?;
	Ok(status.code().unwrap_or(1))
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("maven-deps error: {0}")]
	MavenDeps(#[from] maven_deps::Error),
	#[error("missing argument: {0}")]
	MissingArgument(&'static str),
	#[error("failed to launch java: {0}")]
	Launch(std::io::Error),
}
