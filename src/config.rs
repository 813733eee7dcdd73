//! Options for the line codec.

/// Line terminator written after each rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Deepest level accepted by default. The format numbers levels with at most
/// two digits.
pub const DEFAULT_MAX_DEPTH: usize = 99;

/// Options controlling how text is decoded into nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub(crate) trim_whitespace: bool,
    pub(crate) strip_bom: bool,
    pub(crate) max_depth: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
            strip_bom: true,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore leading whitespace before the depth field (on by default).
    pub fn with_trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    /// Remove a UTF-8 byte order mark from the first line (on by default).
    pub fn with_strip_bom(mut self, strip: bool) -> Self {
        self.strip_bom = strip;
        self
    }

    /// Reject lines nested deeper than `depth` (99 by default).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Accept any nesting depth.
    pub fn without_max_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    pub fn trim_whitespace(&self) -> bool {
        self.trim_whitespace
    }

    pub fn strip_bom(&self) -> bool {
        self.strip_bom
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

/// Options controlling how nodes are rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    pub(crate) line_ending: LineEnding,
    pub(crate) start_depth: usize,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Depth given to the outermost rendered nodes.
    pub fn with_start_depth(mut self, depth: usize) -> Self {
        self.start_depth = depth;
        self
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn start_depth(&self) -> usize {
        self.start_depth
    }
}
