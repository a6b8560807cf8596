use std::fmt::Display;

/// Byte range into the source text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
	pub fn from(start: u32, end: u32) -> Self {
		Self { start, end }
	}

	pub fn to(self, other: SrcSpan) -> Self {
		Self {
			start: self.start.min(other.start),
			end: self.end.max(other.end),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.start >= self.end
	}

	/// Span of the 1-based `line` of `src`, without its line break.
	/// Lines past the end collapse to an empty span at the end of the text.
	pub fn of_line(src: &str, line: u32) -> Self {
		let mut start = 0;

		for (number, text) in (1..).zip(src.split_inclusive('\n')) {
			if number == line {
				let text = text.trim_end_matches(['\n', '\r']);

				return Self::from(start as u32, (start + text.len()) as u32);
			}

			start += text.len();
		}

		Self::from(src.len() as u32, src.len() as u32)
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}
