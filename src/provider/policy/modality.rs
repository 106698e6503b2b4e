// self
use crate::_prelude::*;

/// Response modalities a live session may be constrained to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
	/// Spoken audio output.
	Audio,
	/// Text output.
	Text,
	/// Image output.
	Image,
}
impl Modality {
	/// Returns the identifier used on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Modality::Audio => "AUDIO",
			Modality::Text => "TEXT",
			Modality::Image => "IMAGE",
		}
	}
}
impl Display for Modality {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn wire_names_match_display() {
		for modality in [Modality::Audio, Modality::Text, Modality::Image] {
			let encoded = serde_json::to_string(&modality).expect("Modality should serialize.");

			assert_eq!(encoded, format!("\"{modality}\""));
		}
	}
}
