//! Ordering of dotted numeric version strings.

/// A version split into its numeric components.
///
/// Components are the runs of digits in the raw string; everything else is
/// decoration and ignored for comparison. The raw string is kept for display.
#[derive(Debug, Clone, Eq)]
pub struct Version {
	parts: Vec<u64>,
	raw: String,
}

impl Version {
	pub fn new(raw: &str) -> Self {
		let parts = raw
			.split(|c: char| !c.is_ascii_digit())
			.filter(|part| !part.is_empty())
			/* A digit run too long for u64 still has to take part in the
			ordering, as a very large component. */
			.map(|part| part.parse::<u64>().unwrap_or(u64::MAX))
			.collect();
		Version { parts, raw: raw.to_string() }
	}

	pub fn as_str(&self) -> &str {
		&self.raw
	}
}

impl Ord for Version {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		for (lhs, rhs) in self.parts.iter().zip(other.parts.iter()) {
			match lhs.cmp(rhs) {
				std::cmp::Ordering::Equal => {},
				ord => return ord,
			}
		}
		/* A version that continues past a shared prefix sorts greater. */
		self.parts.len().cmp(&other.parts.len())
	}
}

impl PartialOrd for Version {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for Version {
	fn eq(&self, other: &Self) -> bool {
		self.parts == other.parts
	}
}

impl std::hash::Hash for Version {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.parts.hash(state);
	}
}

impl std::fmt::Display for Version {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.raw)
	}
}
