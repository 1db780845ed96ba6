//! Discovery of descriptors embedded in classpath roots.

#[test]
fn resolves_descriptors_found_inside_a_jar() {
	let _ = env_logger::builder().is_test(true).try_init();

	let cache = maven_deps_test_utils::temp_cache();
	let util_pom = maven_deps_test_utils::pom_xml("com.acme", "util", "1.0.0", None, &[], &[]);
	maven_deps_test_utils::write_artifact(cache.path(), "com.acme", "util", "1.0.0", Some(&util_pom), Some(b"util payload"));

	let app_pom = maven_deps_test_utils::pom_xml(
		"com.acme", "app", "1.0.0", None, &[],
		&[
			("com.acme", "util", Some("1.0.0"), "compile"),
			("com.acme", "harness", Some("1.0.0"), "test"),
		],
	);
	let jar_dir = maven_deps_test_utils::temp_cache();
	let jar = jar_dir.path().join("app.jar");
	maven_deps_test_utils::write_jar(&jar, &[("META-INF/maven/com.acme/app/pom.xml", app_pom.as_str())]);

	/* util is served from the cache, so the unreachable central is fine. */
	let options = maven_deps_test_utils::test_options(&cache, "http://127.0.0.1:1/maven2");
	let mut resolver = maven_deps::Resolver::new(options);

	let mut classpath = maven_deps::classpath::CollectedClasspath::default();
	let resolved = maven_deps::discovery::resolve_embedded(
		&mut resolver,
		&[jar],
		&maven_deps::DependencyScope::DEFAULT_SET,
		&mut classpath,
	)
	.unwrap();

	/* The test-scoped dependency is filtered out before resolution. */
	assert_eq!(resolved.len(), 1);
	assert!(resolved.iter().any(|d| d.name() == "util" && d.version() == Some("1.0.0")));
	assert_eq!(classpath.jars.len(), 1);
}

#[test]
fn roots_without_embedded_descriptors_resolve_to_nothing() {
	let _ = env_logger::builder().is_test(true).try_init();

	let cache = maven_deps_test_utils::temp_cache();
	let options = maven_deps_test_utils::test_options(&cache, "http://127.0.0.1:1/maven2");
	let mut resolver = maven_deps::Resolver::new(options);

	let empty_root = maven_deps_test_utils::temp_cache();
	let mut classpath = maven_deps::classpath::CollectedClasspath::default();
	let resolved = maven_deps::discovery::resolve_embedded(
		&mut resolver,
		&[empty_root.path().to_path_buf()],
		&maven_deps::DependencyScope::DEFAULT_SET,
		&mut classpath,
	)
	.unwrap();

	assert!(resolved.is_empty());
	assert!(classpath.jars.is_empty());
}
